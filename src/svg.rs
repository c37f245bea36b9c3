//! Injection of the logo circles into a generated SVG document.

use crate::error::{ComposeError, XmlError};
use crate::helper::SVG_NAMESPACE;
use crate::logo::Circle;
use crate::xml::{Document, Element};

/// Parses a declared width, truncating fractional pixel counts.
pub fn parse_width(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|width| width.is_finite())
            .map(|width| width.trunc() as i64)
    })
}

/// Locates the first `svg` element in the SVG namespace and its width in
/// pixels. Elements named `svg` in another namespace, or in none, are skipped.
///
/// # Errors
///
/// Returns [`ComposeError::MissingDimension`] if there is no such element or
/// it has no `width`, and [`ComposeError::InvalidDimension`] if the width is
/// not a number.
pub fn extract_width(doc: &mut Document) -> Result<(&mut Element, i64), ComposeError> {
    let root = doc
        .find_ns_mut(SVG_NAMESPACE, "svg")
        .ok_or(ComposeError::MissingDimension)?;
    let raw = root.attr("width").ok_or(ComposeError::MissingDimension)?;
    let width = parse_width(raw).ok_or_else(|| ComposeError::InvalidDimension(raw.to_owned()))?;
    Ok((root, width))
}

/// Appends the circles to `root` in paint order, using the root's namespace
/// prefix if it has one.
pub fn compose(root: &mut Element, circles: &[Circle]) {
    let name = match root.prefix() {
        Some(prefix) => format!("{prefix}:circle"),
        None => "circle".to_owned(),
    };
    for circle in circles {
        let element = circle
            .attributes()
            .into_iter()
            .fold(Element::new(name.as_str()), |element, (key, value)| {
                element.with_attr(key, value)
            });
        root.append(element);
    }
}

/// Serializes the composed SVG element.
pub fn serialize(root: &Element) -> Result<Vec<u8>, XmlError> {
    root.to_bytes()
}
