//! One run: encode, render, inject the logo, write the file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::Config;
use crate::encoder;
use crate::helper::to_svg_string;
use crate::logo;
use crate::svg;
use crate::xml::Document;

/// Builds the SVG document with the logo injected.
///
/// # Errors
///
/// Fails if the content cannot be encoded or the generated SVG has no usable
/// width.
pub fn generate(config: &Config) -> Result<Vec<u8>> {
    let request = &config.request;
    if request.is_number() {
        info!("Encoding number {}", request.content);
    } else {
        info!("Encoding text {}", request.content);
    }

    let symbol = encoder::encode(request)
        .with_context(|| format!("cannot encode {:?}", request.content.as_str()))?;
    let version = symbol.version();
    let level = symbol.error_correction_level();
    info!(
        "QR version {version} ({0}x{0} modules), error level {level} ({1}%)",
        version.module_count(),
        level.percentage()
    );

    let mut doc = Document::parse(to_svg_string(&symbol, &config.render).as_bytes())
        .context("generated SVG cannot be parsed")?;
    let (root, width) = svg::extract_width(&mut doc)?;

    let circles = logo::compute(width, &config.style);
    debug!("injecting {} logo circles into {width}px wide SVG", circles.len());
    for circle in &circles {
        debug!(?circle);
    }
    svg::compose(root, &circles);

    Ok(svg::serialize(root)?)
}

/// Generates the SVG and writes it to `config.filename`.
///
/// # Errors
///
/// Fails on any [`generate`] error, before anything is written, or if the
/// file cannot be written.
pub fn run(config: &Config) -> Result<PathBuf> {
    let bytes = generate(config)?;
    fs::write(&config.filename, bytes)
        .with_context(|| format!("cannot write {}", config.filename.display()))?;
    info!("{} written", config.filename.display());
    Ok(config.filename.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let argv = std::iter::once("make-plone-qrcode").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().resolve().unwrap()
    }

    #[test]
    fn test_generate_number() {
        let bytes = generate(&config(&["12345", "out"])).unwrap();
        let svg = String::from_utf8(bytes).unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("width=\"116\""));
        assert_eq!(svg.matches("<circle ").count(), 6);
        assert!(svg.contains("<circle cx=\"58\" cy=\"58\" r=\"14.700\" fill=\"white\"/>"));
    }

    #[test]
    fn test_generate_without_extra_space() {
        let bytes = generate(&config(&["--extra-space", "0", "12345", "out"])).unwrap();
        let svg = String::from_utf8(bytes).unwrap();
        assert_eq!(svg.matches("<circle ").count(), 5);
    }

    #[test]
    fn test_generate_encoding_error() {
        let err = generate(&config(&["--mode", "numeric", "12a", "out"])).unwrap_err();
        assert!(err.to_string().contains("cannot encode"));
    }
}
