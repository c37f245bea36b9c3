//! Command line options and their resolution into a run configuration.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

use crate::color::{normalize, Color};
use crate::encoding::{self, EncodingRequest, ErrorLevel, Mode, Version};
use crate::error::{ConfigError, InputError, InputErrors};
use crate::helper::RenderOptions;
use crate::logo::StyleParameters;

/// Logo background used when no background color is given.
pub const DEFAULT_LOGO_BACKGROUND: &str = "white";

#[derive(Parser, Debug, Clone)]
#[command(name = "make-plone-qrcode")]
#[command(version, about = "Create QR codes with the Plone logo injected")]
pub struct Cli {
    /// The text to encode (usually a URL) and the name of the file to write
    #[arg(value_name = "ARG", num_args = 0..=2)]
    pub args: Vec<String>,

    /// A title for the QR code; not a visible caption, and browsers may
    /// ignore it
    #[arg(long, help_heading = "QR Code creation")]
    pub title: Option<String>,

    /// A URL to be encoded; "https://" is prepended if no protocol is given.
    /// Defaults to the --title, else the first positional argument
    #[arg(long, help_heading = "QR Code creation")]
    pub url: Option<String>,

    /// Screen pixels per module
    #[arg(long, value_name = "N", default_value_t = 4.0, value_parser = positive_float,
          help_heading = "QR Code creation")]
    pub scale: f64,

    /// Width of the blank margin around the code, in modules
    #[arg(long, value_name = "N", default_value_t = 4, help_heading = "QR Code creation")]
    pub quiet_zone: u32,

    /// Module color: an SVG color name, #rrggbb, rgb(...), or "plone" (#009ddc)
    #[arg(long, visible_alias = "module-colour", value_name = "COLOR",
          default_value = "black", help_heading = "QR Code creation")]
    pub module_color: Color,

    /// Background color; transparent if unset. Any alpha channel only
    /// applies to the code, the logo background is always opaque
    #[arg(long, value_name = "COLOR", help_heading = "QR Code creation")]
    pub background: Option<Color>,

    /// QR version (1-40); the smallest fitting version if unset
    #[arg(long, value_name = "1-40", help_heading = "QR Code creation")]
    pub qr_version: Option<Version>,

    /// Error correction level: L, M, Q or H (7%, 15%, 25%, 30%); default H
    #[arg(long, value_name = "LEVEL", help_heading = "QR Code creation")]
    pub error_level: Option<ErrorLevel>,

    /// Encoding mode: numeric, alphanumeric, binary or kanji
    #[arg(long, value_name = "MODE", help_heading = "QR Code creation")]
    pub mode: Option<Mode>,

    /// Size of the logo in percent of the code; QR codes cope with up to 30%
    /// of the modules covered, check larger values for scanability yourself
    #[arg(long, value_name = "NN.N", default_value_t = 32.0, value_parser = percentage,
          help_heading = "Logo injection")]
    pub logo_size: f64,

    /// Logo color; defaults to the module color
    #[arg(long, visible_alias = "logo-colour", value_name = "COLOR", help_heading = "Logo injection")]
    pub logo_color: Option<Color>,

    /// Extra space around the logo in percent, added to --logo-size
    #[arg(long, value_name = "N.N", default_value_t = 3.0, value_parser = percentage,
          help_heading = "Logo injection")]
    pub extra_space: f64,

    /// The file to write; a ".svg" extension is appended unless present.
    /// Defaults to the next positional argument
    #[arg(long, value_name = "FILE", help_heading = "File options")]
    pub name: Option<String>,

    /// More output
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

/// Everything one run needs, fully resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub filename: PathBuf,
    pub request: EncodingRequest,
    pub render: RenderOptions,
    pub style: StyleParameters,
}

fn positive_float(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => Ok(number),
        _ => Err(format!("{value:?} is not a positive number")),
    }
}

fn percentage(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => Ok(number),
        _ => Err(format!("{value:?} is not a non-negative percentage")),
    }
}

/// Appends `.svg` unless the name already ends with it, in any case.
pub fn svg_filename(name: &str) -> PathBuf {
    match Path::new(name).extension().and_then(OsStr::to_str) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => PathBuf::from(name),
        _ => PathBuf::from(format!("{name}.svg")),
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Verbosity level: 1 by default, raised by `-v`, lowered by `-q`.
    pub fn verbosity(&self) -> i16 {
        1 + i16::from(self.verbose) - i16::from(self.quiet)
    }

    /// The text to encode and the file to write, with all missing inputs
    /// reported at once.
    pub fn inputs(&self) -> Result<(String, PathBuf), InputErrors> {
        let mut positional = self.args.iter().cloned();
        let text = self
            .url
            .clone()
            .or_else(|| self.title.clone())
            .or_else(|| positional.next());
        let filename = self.name.clone().or_else(|| positional.next());

        match (text, filename) {
            (Some(text), Some(filename)) => Ok((text, svg_filename(&filename))),
            (text, filename) => {
                let mut errors = Vec::new();
                if text.is_none() {
                    errors.push(InputError::MissingText);
                }
                if filename.is_none() {
                    errors.push(InputError::MissingFilename);
                }
                Err(InputErrors(errors))
            }
        }
    }

    /// Resolves the options into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Input`] listing every missing input, or
    /// [`ConfigError::Color`] for the first color that cannot be normalized.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let (text, filename) = self.inputs()?;

        let logo_color = self.logo_color.as_ref().unwrap_or(&self.module_color);
        let logo_background = match &self.background {
            Some(background) => normalize(&background.opaque())?,
            None => DEFAULT_LOGO_BACKGROUND.to_owned(),
        };

        let render = RenderOptions {
            title: self.title.clone(),
            scale: self.scale,
            quiet_zone: self.quiet_zone,
            module_color: normalize(&self.module_color)?,
            background: self.background.as_ref().map(normalize).transpose()?,
        };
        let style = StyleParameters {
            logo_size_percent: self.logo_size,
            extra_space_percent: self.extra_space,
            logo_color: normalize(logo_color)?,
            background_color: logo_background,
            padding_px: render.padding_px(),
        };
        let request = encoding::resolve(&text, self.mode, self.qr_version, self.error_level);

        Ok(Config {
            filename,
            request,
            render,
            style,
        })
    }
}
