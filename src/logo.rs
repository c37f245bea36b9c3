//! Geometry of the Plone logo overlay.
//!
//! The logo is a ring with three small disks inside, centered on the drawable
//! area of the QR code. The proportions below were measured on the original
//! logo image and have to be reproduced exactly.

/// Style of the overlay. Colors are SVG color tokens, already normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleParameters {
    /// Logo diameter in percent of the code height (quiet zone excluded).
    pub logo_size_percent: f64,
    /// Cleared space around the logo, in percent of the code height.
    pub extra_space_percent: f64,
    pub logo_color: String,
    pub background_color: String,
    /// Width of the quiet zone in pixels.
    pub padding_px: i64,
}

/// One `<circle>` of the overlay. Circles are listed in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
}

impl Circle {
    fn new(cx: f64, cy: f64, r: f64, fill: &str) -> Self {
        Self {
            cx,
            cy,
            r,
            fill: fill.to_owned(),
        }
    }

    /// The SVG attributes of this circle, numbers formatted with
    /// [`format_number`].
    pub fn attributes(&self) -> [(&'static str, String); 4] {
        [
            ("cx", format_number(self.cx)),
            ("cy", format_number(self.cy)),
            ("r", format_number(self.r)),
            ("fill", self.fill.clone()),
        ]
    }
}

/// Formats whole numbers without a decimal point and everything else with
/// exactly three decimals.
///
/// ```rust
/// use plone_qrcode::logo::format_number;
///
/// assert_eq!(format_number(116.0), "116");
/// assert_eq!(format_number(35.5), "35.500");
/// ```
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        // adding 0.0 turns -0 into 0
        format!("{:.0}", value + 0.0)
    } else {
        format!("{value:.3}")
    }
}

/// Computes the circles of the logo overlay.
///
/// # Arguments
///
/// * `total_width_px` - Width of the whole SVG, quiet zone included.
/// * `style` - Size, spacing and colors of the logo.
///
/// # Returns
///
/// Five circles (ring, ring cutout, three disks), preceded by a spacer circle
/// in the background color if `style.extra_space_percent` is positive. A
/// non-positive width yields circles of zero size at the origin.
///
/// # Example
///
/// ```rust
/// use plone_qrcode::logo::{compute, StyleParameters};
///
/// let style = StyleParameters {
///     logo_size_percent: 32.0,
///     extra_space_percent: 3.0,
///     logo_color: "#009ddc".into(),
///     background_color: "white".into(),
///     padding_px: 16,
/// };
/// let circles = compute(148, &style);
/// assert_eq!(circles.len(), 6);
/// ```
pub fn compute(total_width_px: i64, style: &StyleParameters) -> Vec<Circle> {
    let (total, padding) = if total_width_px > 0 {
        (total_width_px as f64, style.padding_px as f64)
    } else {
        (0.0, 0.0)
    };

    let code_height = (total - 2.0 * padding).max(0.0);
    let logo_height = code_height * style.logo_size_percent / 100.0;
    let logo_radius = logo_height / 2.0;
    let logo_strike = logo_height / 10.0;

    let vertical_tangent_x = logo_height * 6.0 / 11.0;
    let small_radius = logo_height * 71.0 / 660.0;
    let upper_horizontal_tangent = logo_height * 58.0 / 330.0;

    let offset = (code_height - logo_height) / 2.0 + padding;
    let middle = total / 2.0;

    let cx1 = vertical_tangent_x - small_radius + offset;
    let cx2 = cx1;
    let cx3 = vertical_tangent_x + small_radius + offset;
    let cy1 = upper_horizontal_tangent + small_radius;
    let cy2 = logo_height - cy1 + offset;
    let cy1 = cy1 + offset;
    let cy3 = middle;

    let logo = style.logo_color.as_str();
    let background = style.background_color.as_str();

    let mut circles = Vec::with_capacity(6);
    if style.extra_space_percent > 0.0 {
        let space_radius =
            code_height * (style.logo_size_percent + style.extra_space_percent) / 200.0;
        circles.push(Circle::new(middle, middle, space_radius, background));
    }
    // the ring
    circles.push(Circle::new(middle, middle, logo_radius, logo));
    circles.push(Circle::new(middle, middle, logo_radius - logo_strike, background));
    // small disks
    circles.push(Circle::new(cx1, cy1, small_radius, logo));
    circles.push(Circle::new(cx2, cy2, small_radius, logo));
    circles.push(Circle::new(cx3, cy3, small_radius, logo));
    circles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(logo_size_percent: f64, extra_space_percent: f64, padding_px: i64) -> StyleParameters {
        StyleParameters {
            logo_size_percent,
            extra_space_percent,
            logo_color: "#009ddc".to_owned(),
            background_color: "white".to_owned(),
            padding_px,
        }
    }

    fn formatted(circle: &Circle) -> [String; 3] {
        [
            format_number(circle.cx),
            format_number(circle.cy),
            format_number(circle.r),
        ]
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(165.0), "165");
        assert_eq!(format_number(144.5), "144.500");
        assert_eq!(format_number(1.0 / 3.0), "0.333");
        assert_eq!(format_number(-12.0), "-12");
    }

    #[test]
    fn test_format_number_beyond_i64() {
        assert_eq!(format_number(2f64.powi(70)), "1180591620717411303424");
        assert_eq!(format_number(-(2f64.powi(64))), "-18446744073709551616");
    }

    #[test]
    fn test_circle_count() {
        assert_eq!(compute(148, &style(32.0, 0.0, 16)).len(), 5);
        assert_eq!(compute(148, &style(32.0, 3.0, 16)).len(), 6);
        assert_eq!(compute(1, &style(32.0, 0.0, 0)).len(), 5);
    }

    #[test]
    fn test_reference_proportions() {
        let circles = compute(330, &style(100.0, 0.0, 0));
        let values: Vec<_> = circles.iter().map(formatted).collect();
        assert_eq!(values[0], ["165", "165", "165"]);
        assert_eq!(values[1], ["165", "165", "132"]);
        assert_eq!(values[2], ["144.500", "93.500", "35.500"]);
        assert_eq!(values[3], ["144.500", "236.500", "35.500"]);
        assert_eq!(values[4], ["215.500", "165", "35.500"]);
    }

    #[test]
    fn test_padding_shifts_logo() {
        let circles = compute(400, &style(100.0, 0.0, 35));
        let values: Vec<_> = circles.iter().map(formatted).collect();
        assert_eq!(values[0], ["200", "200", "165"]);
        assert_eq!(values[2], ["179.500", "128.500", "35.500"]);
        assert_eq!(values[3], ["179.500", "271.500", "35.500"]);
        assert_eq!(values[4], ["250.500", "200", "35.500"]);
    }

    #[test]
    fn test_spacer_first() {
        let circles = compute(400, &style(30.0, 5.0, 35));
        assert_eq!(circles[0].fill, "white");
        assert_eq!(circles[0].cx, 200.0);
        assert_eq!(circles[0].r, 330.0 * 35.0 / 200.0);
        assert_eq!(circles[1].r, 49.5);
    }

    #[test]
    fn test_fills_in_paint_order() {
        let fills: Vec<_> = compute(148, &style(32.0, 3.0, 16))
            .into_iter()
            .map(|c| c.fill)
            .collect();
        assert_eq!(fills, ["white", "#009ddc", "white", "#009ddc", "#009ddc", "#009ddc"]);
    }

    #[test]
    fn test_small_disks_do_not_overlap() {
        let circles = compute(148, &style(32.0, 0.0, 16));
        let disks = &circles[2..];
        for (i, a) in disks.iter().enumerate() {
            for b in &disks[i + 1..] {
                let distance = (a.cx - b.cx).hypot(a.cy - b.cy);
                assert!(a.r + b.r <= distance, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_disks_inside_ring() {
        let circles = compute(148, &style(32.0, 0.0, 16));
        let inner = &circles[1];
        for disk in &circles[2..] {
            let distance = (disk.cx - inner.cx).hypot(disk.cy - inner.cy);
            assert!(distance + disk.r <= inner.r);
        }
    }

    #[test]
    fn test_degenerate_width() {
        for width in [0, -10] {
            let circles = compute(width, &style(32.0, 3.0, 16));
            assert_eq!(circles.len(), 6);
            for circle in &circles {
                assert_eq!(formatted(circle), ["0", "0", "0"]);
            }
        }
    }

    #[test]
    fn test_attributes() {
        let circle = Circle::new(1.0, 2.5, 3.0, "red");
        let attrs = circle.attributes();
        assert_eq!(attrs[0], ("cx", "1".to_owned()));
        assert_eq!(attrs[1], ("cy", "2.500".to_owned()));
        assert_eq!(attrs[3], ("fill", "red".to_owned()));
    }
}
