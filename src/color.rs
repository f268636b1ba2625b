use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

pub type Rgb8 = Srgb<u8>;

pub const GRAY: Rgb8 = Srgb::new(160, 160, 160);

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb8> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: group label → colour
// ---------------------------------------------------------------------------

/// Maps the labels of a grouped chart to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb8>,
    default_color: Rgb8,
}

impl ColorMap {
    /// Build a colour map over `labels`, in the order given.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(l, c)| (l.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Rgb8 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for correlation heatmaps
// ---------------------------------------------------------------------------

const COOL: Rgb8 = Srgb::new(59, 76, 192);
const NEUTRAL: Rgb8 = Srgb::new(221, 221, 221);
const WARM: Rgb8 = Srgb::new(180, 4, 38);

fn linear(c: Rgb8) -> LinSrgb {
    c.into_format::<f32>().into_linear()
}

/// Blue at -1, light grey at 0, red at +1. Values outside are clamped and
/// NaN maps to grey.
pub fn diverging(value: f64) -> Rgb8 {
    if value.is_nan() {
        return GRAY;
    }
    let v = value.clamp(-1.0, 1.0) as f32;
    let mixed = if v < 0.0 {
        linear(NEUTRAL).mix(linear(COOL), -v)
    } else {
        linear(NEUTRAL).mix(linear(WARM), v)
    };
    Srgb::<f32>::from_linear(mixed).into_format()
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: Rgb8) -> Rgb8 {
    let luma = 0.299 * f32::from(background.red)
        + 0.587 * f32::from(background.green)
        + 0.114 * f32::from(background.blue);
    if luma > 140.0 {
        Srgb::new(20, 20, 20)
    } else {
        Srgb::new(250, 250, 250)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn color_map_falls_back_to_gray() {
        let map = ColorMap::new(["0", "1"]);
        assert_ne!(map.color_for("0"), map.color_for("1"));
        assert_eq!(map.color_for("2"), GRAY);
    }

    fn near(a: Rgb8, b: Rgb8) -> bool {
        let d = |x: u8, y: u8| x.abs_diff(y) <= 1;
        d(a.red, b.red) && d(a.green, b.green) && d(a.blue, b.blue)
    }

    #[test]
    fn diverging_endpoints() {
        assert!(near(diverging(0.0), NEUTRAL));
        assert!(near(diverging(-1.0), COOL));
        assert!(near(diverging(1.0), WARM));
        assert!(near(diverging(5.0), WARM));
        assert_eq!(diverging(f64::NAN), GRAY);
    }
}
