//! Error types, one enum per concern.

use std::fmt;

use thiserror::Error;

use crate::encoding::Mode;

/// A color that cannot be turned into an SVG color token.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("{0}: out-of-range alpha; numbers above 1.0 are expected to be integers")]
    OutOfRangeAlpha(f64),

    #[error("{0}: negative channel; values < 0 are forbidden")]
    NegativeChannel(i64),

    #[error("{0}: invalid channel type; integer value expected")]
    InvalidChannelType(f64),

    #[error("tuple too long: {0} channels given, at most 4 allowed")]
    TupleTooLong(usize),

    #[error("tuple too short: {0} channels given, at least 3 required")]
    TupleTooShort(usize),

    #[error("{0:?}: not a number")]
    InvalidChannel(String),

    #[error("{0:?}: unknown color")]
    UnknownColor(String),
}

/// A QR version outside of the range supported by the standard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("{0:?} is not a QR version number")]
    Invalid(String),

    #[error("QR version {0} is out of range (1..=40)")]
    OutOfRange(i64),
}

/// Unknown token for an error correction level or encoding mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{value:?}: unknown {what}")]
pub struct TokenError {
    pub what: &'static str,
    pub value: String,
}

/// Missing user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("No text (usually a URL) given!")]
    MissingText,

    #[error("No filename given!")]
    MissingFilename,
}

/// All input errors of a run, collected so they can be reported together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct InputErrors(pub Vec<InputError>);

impl fmt::Display for InputErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Errors raised while turning command line options into a run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Input(#[from] InputErrors),

    #[error("invalid color: {0}")]
    Color(#[from] ColorError),
}

/// The QR encoder rejected the content or the parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("{text:?} contains characters that cannot be encoded in {mode} mode")]
    InvalidCharacter { mode: Mode, text: String },

    #[error("the QR encoder rejected the data: {0}")]
    Encoder(#[from] qrcode::types::QrError),
}

/// Errors of the XML tree facility.
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("invalid UTF-8 in XML document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unbalanced end tag </{0}>")]
    UnexpectedEnd(String),

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The generated SVG document violates the encoder's contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("No width information found in generated SVG file!")]
    MissingDimension,

    #[error("{0:?}: invalid width in generated SVG file")]
    InvalidDimension(String),
}
