//! Color specifications and their conversion to SVG color tokens.
//!
//! A [`Color`] is either a named token (an SVG color keyword) or a tuple of
//! channels. Aliases such as `plone` are expanded to channel tuples when a
//! color is parsed from the command line, so [`normalize`] never sees them.

use std::str::FromStr;

use crate::error::ColorError;

/// Domain color aliases, expanded at parse time.
pub static ALIASES: &[(&str, [u8; 3])] = &[("plone", [0, 157, 220])];

/// The SVG 1.1 color keywords, sorted for binary search.
pub static SVG_COLOR_NAMES: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta",
    "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
    "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow",
    "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
    "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
    "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
    "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "red", "rosybrown",
    "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke", "yellow",
    "yellowgreen",
];

/// A single color channel as given by the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Channel {
    Int(i64),
    Float(f64),
}

/// A color specification.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    /// An SVG color keyword, passed through unchanged.
    Named(String),
    /// Red, green, blue and an optional alpha channel.
    Tuple(Vec<Channel>),
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Color::Named(name.into())
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Tuple(vec![
            Channel::Int(r.into()),
            Channel::Int(g.into()),
            Channel::Int(b.into()),
        ])
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Tuple(vec![
            Channel::Int(r.into()),
            Channel::Int(g.into()),
            Channel::Int(b.into()),
            Channel::Float(a),
        ])
    }

    /// Returns this color without its alpha channel.
    pub fn opaque(&self) -> Color {
        match self {
            Color::Tuple(channels) => Color::Tuple(channels.iter().take(3).copied().collect()),
            named => named.clone(),
        }
    }
}

/// Validates one channel of an `rgba(...)` tuple and returns its decimal form.
///
/// Floats must lie in `[0.0, 1.0]`; integers must not be negative and are
/// clamped to 255.
pub fn channel_value(channel: Channel) -> Result<String, ColorError> {
    match channel {
        Channel::Float(value) if (0.0..=1.0).contains(&value) => Ok(format_float(value)),
        Channel::Float(value) => Err(ColorError::OutOfRangeAlpha(value)),
        Channel::Int(value) if value < 0 => Err(ColorError::NegativeChannel(value)),
        Channel::Int(value) => Ok(value.min(255).to_string()),
    }
}

/// Converts a color into a valid SVG color token.
///
/// # Returns
///
/// The name itself for named colors, `#rrggbb` for three channels and
/// `rgba(r,g,b,a)` for four channels.
///
/// # Example
///
/// ```rust
/// use plone_qrcode::color::{normalize, Color};
///
/// assert_eq!(normalize(&Color::rgb(0, 157, 220)).unwrap(), "#009ddc");
/// assert_eq!(normalize(&Color::rgba(1, 2, 3, 0.5)).unwrap(), "rgba(1,2,3,0.5)");
/// ```
pub fn normalize(color: &Color) -> Result<String, ColorError> {
    let channels = match color {
        Color::Named(name) => return Ok(name.clone()),
        Color::Tuple(channels) => channels,
    };
    match channels.len() {
        n if n > 4 => Err(ColorError::TupleTooLong(n)),
        4 => {
            let values = channels
                .iter()
                .map(|&c| channel_value(c))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("rgba({})", values.join(",")))
        }
        3 => {
            let mut hex = String::from("#");
            for &channel in channels {
                let value = match channel {
                    Channel::Int(value) if value < 0 => return Err(ColorError::NegativeChannel(value)),
                    Channel::Int(value) => value.min(255),
                    Channel::Float(value) => return Err(ColorError::InvalidChannelType(value)),
                };
                hex.push_str(&format!("{value:02x}"));
            }
            Ok(hex)
        }
        n => Err(ColorError::TupleTooShort(n)),
    }
}

// Keeps a decimal point on whole numbers, so 1.0 stays "1.0".
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn parse_channel(token: &str) -> Result<Channel, ColorError> {
    let token = token.trim();
    let invalid = || ColorError::InvalidChannel(token.to_owned());
    if token.contains('.') {
        token.parse().map(Channel::Float).map_err(|_| invalid())
    } else {
        token.parse().map(Channel::Int).map_err(|_| invalid())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Accepts color keywords, aliases, `#rgb`, `#rrggbb`, `rgb(r,g,b)`,
    /// `rgba(r,g,b,a)` and bare `r,g,b[,a]` lists.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let lower = spec.to_ascii_lowercase();
        let unknown = || ColorError::UnknownColor(spec.to_owned());

        if let Some((_, [r, g, b])) = ALIASES.iter().find(|(alias, _)| *alias == lower) {
            return Ok(Color::rgb(*r, *g, *b));
        }
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(unknown);
        }

        let body = match lower.strip_prefix("rgba(").or_else(|| lower.strip_prefix("rgb(")) {
            Some(rest) => Some(rest.strip_suffix(')').ok_or_else(unknown)?),
            None if lower.contains(',') => Some(lower.as_str()),
            None => None,
        };
        if let Some(body) = body {
            let channels = body
                .split(',')
                .map(parse_channel)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Color::Tuple(channels));
        }

        if SVG_COLOR_NAMES.binary_search(&lower.as_str()).is_ok() {
            return Ok(Color::Named(lower));
        }
        Err(unknown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rgb() {
        assert_eq!(normalize(&Color::rgb(0, 0, 0)).unwrap(), "#000000");
        assert_eq!(normalize(&Color::rgb(255, 255, 255)).unwrap(), "#ffffff");
        assert_eq!(normalize(&Color::rgb(0, 157, 220)).unwrap(), "#009ddc");
    }

    #[test]
    fn test_normalize_rgba() {
        assert_eq!(normalize(&Color::rgba(1, 2, 3, 0.5)).unwrap(), "rgba(1,2,3,0.5)");
        assert_eq!(normalize(&Color::rgba(1, 2, 3, 1.0)).unwrap(), "rgba(1,2,3,1.0)");
    }

    #[test]
    fn test_normalize_rgba_rejects_bad_channels() {
        let negative = Color::Tuple(vec![
            Channel::Int(-1),
            Channel::Int(0),
            Channel::Int(0),
            Channel::Float(0.5),
        ]);
        assert_eq!(normalize(&negative), Err(ColorError::NegativeChannel(-1)));

        let alpha = Color::Tuple(vec![
            Channel::Int(0),
            Channel::Int(0),
            Channel::Int(0),
            Channel::Float(1.5),
        ]);
        assert_eq!(normalize(&alpha), Err(ColorError::OutOfRangeAlpha(1.5)));
    }

    #[test]
    fn test_channel_value_clamps() {
        assert_eq!(channel_value(Channel::Int(300)).unwrap(), "255");
        assert_eq!(channel_value(Channel::Int(0)).unwrap(), "0");
        assert_eq!(channel_value(Channel::Float(0.0)).unwrap(), "0.0");
        assert!(channel_value(Channel::Float(-0.1)).is_err());
    }

    #[test]
    fn test_normalize_rgb_validates_channels() {
        let wide = Color::Tuple(vec![Channel::Int(256), Channel::Int(0), Channel::Int(0)]);
        assert_eq!(normalize(&wide).unwrap(), "#ff0000");

        let float = Color::Tuple(vec![Channel::Int(0), Channel::Float(0.5), Channel::Int(0)]);
        assert_eq!(normalize(&float), Err(ColorError::InvalidChannelType(0.5)));
    }

    #[test]
    fn test_normalize_tuple_length() {
        let long = Color::Tuple(vec![Channel::Int(0); 5]);
        assert_eq!(normalize(&long), Err(ColorError::TupleTooLong(5)));

        let short = Color::Tuple(vec![Channel::Int(0); 2]);
        assert_eq!(normalize(&short), Err(ColorError::TupleTooShort(2)));
    }

    #[test]
    fn test_normalize_named() {
        assert_eq!(normalize(&Color::named("black")).unwrap(), "black");
    }

    #[test]
    fn test_parse_alias() {
        assert_eq!("plone".parse::<Color>().unwrap(), Color::rgb(0, 157, 220));
        assert_eq!("Plone".parse::<Color>().unwrap(), Color::rgb(0, 157, 220));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#009ddc".parse::<Color>().unwrap(), Color::rgb(0, 157, 220));
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::rgb(255, 255, 255));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_functional() {
        assert_eq!("rgb(1, 2, 3)".parse::<Color>().unwrap(), Color::rgb(1, 2, 3));
        assert_eq!("rgba(1,2,3,0.5)".parse::<Color>().unwrap(), Color::rgba(1, 2, 3, 0.5));
        assert_eq!("1,2,3".parse::<Color>().unwrap(), Color::rgb(1, 2, 3));
        assert!("rgb(1,2,3".parse::<Color>().is_err());
        assert!("rgb(a,b,c)".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!("White".parse::<Color>().unwrap(), Color::named("white"));
        assert_eq!(
            "blurple".parse::<Color>(),
            Err(ColorError::UnknownColor("blurple".to_owned()))
        );
    }

    #[test]
    fn test_opaque_drops_alpha() {
        assert_eq!(Color::rgba(1, 2, 3, 0.5).opaque(), Color::rgb(1, 2, 3));
        assert_eq!(Color::named("white").opaque(), Color::named("white"));
    }

    #[test]
    fn test_color_names_sorted() {
        assert!(SVG_COLOR_NAMES.windows(2).all(|w| w[0] < w[1]));
    }
}
