use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Qualitative palette for the entity lines
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Diverging scale for the treemap
// ---------------------------------------------------------------------------

/// ColorBrewer RdBu, red at the low end and blue at the high end.
const RD_BU: [(u8, u8, u8); 11] = [
    (103, 0, 31),
    (178, 24, 43),
    (214, 96, 77),
    (244, 165, 130),
    (253, 219, 199),
    (247, 247, 247),
    (209, 229, 240),
    (146, 197, 222),
    (67, 147, 195),
    (33, 102, 172),
    (5, 48, 97),
];

/// Continuous RdBu scale over `[min, max]`.
#[derive(Debug, Clone)]
pub struct DivergingScale {
    min: f64,
    max: f64,
    stops: Vec<LinSrgb>,
}

impl DivergingScale {
    pub fn new(min: f64, max: f64) -> Self {
        let stops = RD_BU
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
            .collect();
        DivergingScale { min, max, stops }
    }

    /// Position of `value` on the scale in `[0, 1]`. A degenerate domain maps
    /// to the midpoint.
    pub fn position(&self, value: f64) -> f32 {
        let span = self.max - self.min;
        if !span.is_finite() || span.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.position(value) * (self.stops.len() - 1) as f32;
        let lo = (t.floor() as usize).min(self.stops.len() - 2);
        let mixed = self.stops[lo].mix(self.stops[lo + 1], t - lo as f32);
        to_color32(Srgb::from_linear(mixed))
    }

    /// Text colour readable on top of `color_for(value)`.
    pub fn text_color_for(&self, value: f64) -> Color32 {
        let t = self.position(value);
        if (0.2..=0.8).contains(&t) {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }
}
