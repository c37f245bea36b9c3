use quick_xml::escape::escape;

use crate::encoder::Symbol;
use crate::logo::format_number;

/// SVG namespace of the generated documents.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Rendering options of the QR code itself. Colors are SVG color tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Document title; not a visible caption.
    pub title: Option<String>,
    /// Pixels per module.
    pub scale: f64,
    /// Width of the blank margin, in modules.
    pub quiet_zone: u32,
    pub module_color: String,
    /// Background fill; transparent if unset.
    pub background: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            scale: 4.0,
            quiet_zone: 4,
            module_color: "black".to_owned(),
            background: None,
        }
    }
}

impl RenderOptions {
    /// Width and height of the rendered document in pixels.
    pub fn dimension(&self, symbol: &Symbol) -> f64 {
        (symbol.size() as f64 + 2.0 * f64::from(self.quiet_zone)) * self.scale
    }

    /// Width of the quiet zone in whole pixels.
    pub fn padding_px(&self) -> i64 {
        (f64::from(self.quiet_zone) * self.scale) as i64
    }
}

/// Returns a string of SVG code for an image depicting the given QR Code.
///
/// The root element declares `width` and `height` in pixels. Modules are
/// drawn as one path in module units, scaled by `options.scale` and shifted
/// by the quiet zone. The string always uses Unix newlines (\n), regardless
/// of the platform.
///
/// # Example
///
/// ```rust
/// use plone_qrcode::encoder::encode;
/// use plone_qrcode::encoding::resolve;
/// use plone_qrcode::helper::{to_svg_string, RenderOptions};
///
/// let symbol = encode(&resolve("12345", None, None, None)).unwrap();
/// let svg = to_svg_string(&symbol, &RenderOptions::default());
/// assert!(svg.contains("width=\"116\""));
/// ```
pub fn to_svg_string(symbol: &Symbol, options: &RenderOptions) -> String {
    let dimension = format_number(options.dimension(symbol));
    let border = options.quiet_zone as i32;

    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += &format!(
        "<svg xmlns=\"{SVG_NAMESPACE}\" width=\"{dimension}\" height=\"{dimension}\" class=\"qrcode\">\n"
    );
    if let Some(title) = &options.title {
        result += &format!("\t<title>{}</title>\n", escape(title.as_str()));
    }
    if let Some(background) = &options.background {
        result += &format!(
            "\t<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            escape(background.as_str())
        );
    }

    let size = symbol.size() as i32;
    let mut squares = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if symbol.get_module(x, y) {
                squares.push(format!("M{},{}h1v1h-1z", x + border, y + border));
            }
        }
    }
    result += &format!(
        "\t<path transform=\"scale({})\" fill=\"{}\" d=\"{}\"/>\n",
        format_number(options.scale),
        escape(options.module_color.as_str()),
        squares.join(" ")
    );
    result += "</svg>\n";
    result
}
