//! # plone-qrcode
//!
//! Creates QR codes as SVG documents with the Plone logo injected.
//!
//! The logo is drawn from circles on top of the code, centered and sized so
//! that the error correction of the QR code still allows scanning. With the
//! default error correction level `H` up to 30% of the modules may be covered.
//!
//! ## Features
//!
//! - Encode text or numbers in numeric, alphanumeric, binary or kanji mode.
//! - Pick a QR version (1 to 40) and one of four error correction levels.
//! - Style the code with module and background colors, scale, quiet zone and title.
//! - Size the logo and the space cleared around it in percent of the code.
//!
//! ## Example
//!
//! ```rust
//! use plone_qrcode::{encoder, encoding, helper, logo, svg, xml::Document};
//!
//! let request = encoding::resolve("plone.org", None, None, None);
//! let symbol = encoder::encode(&request).unwrap();
//! let options = helper::RenderOptions::default();
//!
//! let mut doc = Document::parse(helper::to_svg_string(&symbol, &options).as_bytes()).unwrap();
//! let (root, width) = svg::extract_width(&mut doc).unwrap();
//! let style = logo::StyleParameters {
//!     logo_size_percent: 32.0,
//!     extra_space_percent: 3.0,
//!     logo_color: "#009ddc".into(),
//!     background_color: "white".into(),
//!     padding_px: options.padding_px(),
//! };
//! svg::compose(root, &logo::compute(width, &style));
//! let bytes = svg::serialize(root).unwrap();
//! assert!(bytes.starts_with(b"<svg"));
//! ```
//!
//! ## Modules
//!
//! - [`color`]: Color specifications and SVG color tokens.
//! - [`encoding`]: Mode, version and error level resolution.
//! - [`encoder`]: QR code encoding.
//! - [`helper`]: Rendering QR codes as SVG.
//! - [`logo`]: Geometry of the logo overlay.
//! - [`svg`]: Injecting the logo into the SVG document.
//! - [`xml`]: The XML tree the document is edited in.
//! - [`cli`], [`app`], [`logger`]: The command line tool.

pub mod app;
pub mod cli;
pub mod color;
pub mod encoder;
pub mod encoding;
pub mod error;
pub mod helper;
pub mod logger;
pub mod logo;
pub mod svg;
pub mod xml;
