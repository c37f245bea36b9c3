//! QR code encoding.
//!
//! Turns an [`EncodingRequest`] into a [`Symbol`], the square grid of dark and
//! light modules. The module matrix itself is built by the `qrcode` crate; this
//! module picks the segment mode, the version and the error correction level.

use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;
use qrcode::bits::Bits;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use crate::encoding::{
    is_alphanumeric, is_kanji, is_numeric, EncodingRequest, ErrorLevel, Mode, Version,
};
use crate::error::EncodingError;

/// Error level used when the request leaves it unset.
pub const DEFAULT_ERROR_LEVEL: ErrorLevel = ErrorLevel::High;

impl From<ErrorLevel> for EcLevel {
    fn from(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::Low => EcLevel::L,
            ErrorLevel::Medium => EcLevel::M,
            ErrorLevel::Quartile => EcLevel::Q,
            ErrorLevel::High => EcLevel::H,
        }
    }
}

impl From<EcLevel> for ErrorLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => ErrorLevel::Low,
            EcLevel::M => ErrorLevel::Medium,
            EcLevel::Q => ErrorLevel::Quartile,
            EcLevel::H => ErrorLevel::High,
        }
    }
}

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Instances are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    size: usize,
    modules: Vec<bool>,
    version: Version,
    error_level: ErrorLevel,
}

impl Symbol {
    fn from_code(code: &QrCode) -> Result<Self, EncodingError> {
        let version = match code.version() {
            qrcode::Version::Normal(n) | qrcode::Version::Micro(n) => {
                Version::new(i64::from(n)).map_err(|_| QrError::InvalidVersion)?
            }
        };
        Ok(Self {
            size: code.width(),
            modules: code
                .to_colors()
                .into_iter()
                .map(|color| color == qrcode::Color::Dark)
                .collect(),
            version,
            error_level: code.error_correction_level().into(),
        })
    }

    /// Width and height of the symbol in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn error_correction_level(&self) -> ErrorLevel {
        self.error_level
    }

    /// Returns whether the module at `(x, y)` is dark. Coordinates outside
    /// the symbol are light.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let size = self.size as i32;
        (0..size).contains(&x) && (0..size).contains(&y) && self.modules[(y * size + x) as usize]
    }
}

/// Encodes the request into a QR code symbol.
///
/// Without a mode the encoder segments the content optimally. With a mode the
/// content is checked against that mode's character set and encoded as one
/// segment, at the requested version or the smallest one it fits in.
///
/// # Errors
///
/// Returns [`EncodingError`] if the content does not fit the mode or the
/// version, or is too long for any QR code.
///
/// # Example
///
/// ```rust
/// use plone_qrcode::encoder::encode;
/// use plone_qrcode::encoding::resolve;
///
/// let symbol = encode(&resolve("12345", None, None, None)).unwrap();
/// assert_eq!(symbol.size(), 21);
/// ```
pub fn encode(request: &EncodingRequest) -> Result<Symbol, EncodingError> {
    let level = request.error_level.unwrap_or(DEFAULT_ERROR_LEVEL);
    let data = request.content.as_str();

    let code = match (request.mode, request.version) {
        (None, None) => QrCode::with_error_correction_level(data, level.into())?,
        (None, Some(version)) => QrCode::with_version(data, qr_version(version), level.into())?,
        (Some(mode), version) => {
            let bytes = segment_data(mode, data)?;
            match version {
                Some(version) => encode_segment(mode, &bytes, version, level)?,
                None => encode_smallest(mode, &bytes, level)?,
            }
        }
    };
    Symbol::from_code(&code)
}

fn qr_version(version: Version) -> qrcode::Version {
    qrcode::Version::Normal(i16::from(version.value()))
}

/// The bytes of a single segment in `mode`. Kanji text is transcoded to
/// Shift JIS, every other mode uses the UTF-8 bytes as they are.
fn segment_data(mode: Mode, data: &str) -> Result<Cow<'_, [u8]>, EncodingError> {
    let bytes = match mode {
        Mode::Numeric if is_numeric(data) => Some(Cow::Borrowed(data.as_bytes())),
        Mode::Alphanumeric if is_alphanumeric(data) => Some(Cow::Borrowed(data.as_bytes())),
        Mode::Binary => Some(Cow::Borrowed(data.as_bytes())),
        Mode::Kanji => {
            let (bytes, _, had_errors) = SHIFT_JIS.encode(data);
            (!had_errors && is_kanji(&bytes)).then_some(bytes)
        }
        _ => None,
    };
    bytes.ok_or_else(|| EncodingError::InvalidCharacter {
        mode,
        text: data.to_owned(),
    })
}

fn encode_segment(
    mode: Mode,
    data: &[u8],
    version: Version,
    level: ErrorLevel,
) -> Result<QrCode, QrError> {
    let mut bits = Bits::new(qr_version(version));
    match mode {
        Mode::Numeric => bits.push_numeric_data(data),
        Mode::Alphanumeric => bits.push_alphanumeric_data(data),
        Mode::Binary => bits.push_byte_data(data),
        Mode::Kanji => bits.push_kanji_data(data),
    }?;
    bits.push_terminator(level.into())?;
    QrCode::with_bits(bits, level.into())
}

fn encode_smallest(mode: Mode, data: &[u8], level: ErrorLevel) -> Result<QrCode, QrError> {
    for version in Version::all() {
        match encode_segment(mode, data, version, level) {
            Err(QrError::DataTooLong) => continue,
            result => return result,
        }
    }
    Err(QrError::DataTooLong)
}
