//! Encoding parameter resolution.
//!
//! Decides the text mode, applies the required text transforms and packs the
//! result into an [`EncodingRequest`] for the QR encoder.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{TokenError, VersionError};

/// Characters allowed in alphanumeric mode.
pub static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Protocol prefix added to content that carries none.
pub const DEFAULT_SCHEME: &str = "https://";

/// Text encoding scheme of a QR code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Binary,
    Kanji,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Binary => "binary",
            Mode::Kanji => "kanji",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(Mode::Numeric),
            "alphanumeric" => Ok(Mode::Alphanumeric),
            "binary" => Ok(Mode::Binary),
            "kanji" => Ok(Mode::Kanji),
            _ => Err(TokenError {
                what: "mode",
                value: s.to_owned(),
            }),
        }
    }
}

/// Error correction level of a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum ErrorLevel {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

/// Correctable percentage per error level, in the order reverse lookups
/// walk them.
pub static ERROR_LEVELS: [(ErrorLevel, u8); 4] = [
    (ErrorLevel::Low, 7),
    (ErrorLevel::Medium, 15),
    (ErrorLevel::Quartile, 25),
    (ErrorLevel::High, 30),
];

impl ErrorLevel {
    fn ordinal(self) -> usize {
        use ErrorLevel::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// The single-letter token of the standard (`L`, `M`, `Q`, `H`).
    pub fn token(self) -> char {
        use ErrorLevel::*;
        match self {
            Low => 'L',
            Medium => 'M',
            Quartile => 'Q',
            High => 'H',
        }
    }

    /// Percentage of damaged codewords this level can correct.
    pub fn percentage(self) -> u8 {
        ERROR_LEVELS[self.ordinal()].1
    }

    /// First level whose correctable percentage equals `percent`.
    pub fn from_percentage(percent: u8) -> Option<Self> {
        ERROR_LEVELS
            .iter()
            .find(|(_, p)| *p == percent)
            .map(|(level, _)| *level)
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for ErrorLevel {
    type Err = TokenError;

    /// Accepts `L`/`M`/`Q`/`H` in any case, or the percentage with or
    /// without a trailing `%`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let by_letter = ERROR_LEVELS
            .iter()
            .map(|(level, _)| *level)
            .find(|level| token.eq_ignore_ascii_case(&level.token().to_string()));
        let by_percent = || {
            let digits = token.strip_suffix('%').unwrap_or(token);
            digits.parse().ok().and_then(ErrorLevel::from_percentage)
        };
        by_letter.or_else(by_percent).ok_or_else(|| TokenError {
            what: "error level",
            value: s.to_owned(),
        })
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::OutOfRange`] if the number is outside `[1, 40]`.
    pub fn new(ver: i64) -> Result<Self, VersionError> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&ver) {
            Ok(Self(ver as u8))
        } else {
            Err(VersionError::OutOfRange(ver))
        }
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Width and height of a symbol of this version, in modules.
    pub const fn module_count(self) -> u32 {
        (self.0 as u32) * 4 + 17
    }

    /// All versions, smallest first.
    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ver = s
            .trim()
            .parse::<i64>()
            .map_err(|_| VersionError::Invalid(s.to_owned()))?;
        Version::new(ver)
    }
}

/// What gets encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// A non-negative integer in canonical decimal form.
    Number(String),
}

impl Content {
    pub fn as_str(&self) -> &str {
        match self {
            Content::Text(text) | Content::Number(text) => text,
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters handed to the QR encoder. Unset fields are left to the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingRequest {
    pub content: Content,
    pub mode: Option<Mode>,
    pub version: Option<Version>,
    pub error_level: Option<ErrorLevel>,
}

impl EncodingRequest {
    /// Whether the content was recognized as a number, which is reported
    /// differently from text.
    pub fn is_number(&self) -> bool {
        matches!(self.content, Content::Number(_))
    }
}

/// Canonical decimal form of `text` if it is a non-negative integer.
fn parse_number(text: &str) -> Option<String> {
    let text = text.trim();
    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    Some(if significant.is_empty() { "0" } else { significant }.to_owned())
}

/// Resolves the encoding mode and the final content.
///
/// # Arguments
///
/// * `text` - The user-supplied text.
/// * `mode` - The requested mode; if unset, integers switch to numeric mode.
/// * `version` - Passed through to the request.
/// * `error_level` - Passed through to the request.
///
/// # Example
///
/// ```rust
/// use plone_qrcode::encoding::{resolve, Content, Mode};
///
/// let request = resolve("example.com", None, None, None);
/// assert_eq!(request.content, Content::Text("https://example.com".into()));
///
/// let request = resolve("12345", None, None, None);
/// assert_eq!(request.mode, Some(Mode::Numeric));
/// ```
pub fn resolve(
    text: &str,
    mode: Option<Mode>,
    version: Option<Version>,
    error_level: Option<ErrorLevel>,
) -> EncodingRequest {
    if mode.is_none() {
        if let Some(number) = parse_number(text) {
            return EncodingRequest {
                content: Content::Number(number),
                mode: Some(Mode::Numeric),
                version,
                error_level,
            };
        }
    }

    let mut text = text.to_owned();
    if mode != Some(Mode::Numeric) && !text.contains("://") {
        debug!("no protocol given, prepending {DEFAULT_SCHEME}");
        text.insert_str(0, DEFAULT_SCHEME);
    }
    if mode == Some(Mode::Alphanumeric) {
        text = text.to_uppercase();
    }

    EncodingRequest {
        content: Content::Text(text),
        mode,
        version,
        error_level,
    }
}

/// Whether `text` only contains characters allowed in numeric mode.
pub fn is_numeric(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

/// Whether `text` only contains characters allowed in alphanumeric mode.
pub fn is_alphanumeric(text: &str) -> bool {
    text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
}

/// Whether `data` is a sequence of Shift JIS double-byte kanji characters.
pub fn is_kanji(data: &[u8]) -> bool {
    data.len() % 2 == 0
        && data.chunks(2).all(|pair| {
            let code = (u16::from(pair[0]) << 8) | u16::from(pair[1]);
            (0x8140..=0x9FFC).contains(&code) || (0xE040..=0xEBBF).contains(&code)
        })
}
