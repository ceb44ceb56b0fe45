use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::SurvivalLabel;

// ---------------------------------------------------------------------------
// Color schemes
// ---------------------------------------------------------------------------

/// The selectable heatmap color schemes. Purely cosmetic: the pipeline never
/// sees this, only the chart widgets do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Blues,
    Viridis,
    Plasma,
    Cividis,
}

impl ColorScheme {
    /// All schemes in combo-box order.
    pub const ALL: [ColorScheme; 4] = [
        ColorScheme::Blues,
        ColorScheme::Viridis,
        ColorScheme::Plasma,
        ColorScheme::Cividis,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Blues => "Blues",
            ColorScheme::Viridis => "Viridis",
            ColorScheme::Plasma => "Plasma",
            ColorScheme::Cividis => "Cividis",
        }
    }

    /// Gradient anchor colors, low to high.
    fn stops(&self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorScheme::Blues => &[(222, 235, 247), (107, 174, 214), (8, 81, 156)],
            ColorScheme::Viridis => &[
                (68, 1, 84),
                (59, 82, 139),
                (33, 145, 140),
                (94, 201, 98),
                (253, 231, 37),
            ],
            ColorScheme::Plasma => &[
                (13, 8, 135),
                (126, 3, 168),
                (204, 71, 120),
                (248, 149, 64),
                (240, 249, 33),
            ],
            ColorScheme::Cividis => &[
                (0, 32, 76),
                (87, 92, 109),
                (170, 156, 115),
                (255, 234, 70),
            ],
        }
    }

    /// Sample the gradient at `t` in [0, 1] (clamped) by interpolating
    /// between the anchor stops in linear RGB.
    pub fn sample(&self, t: f64) -> Color32 {
        let stops = self.stops();
        let t = t.clamp(0.0, 1.0) as f32;

        let scaled = t * (stops.len() - 1) as f32;
        let lo = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - lo as f32;

        let a: LinSrgb = to_lin(stops[lo]);
        let b: LinSrgb = to_lin(stops[lo + 1]);
        let mixed = a.mix(b, frac);

        let srgb: Srgb<f32> = Srgb::from_linear(mixed);
        let rgb: Srgb<u8> = srgb.into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Series color for the histogram / bar charts: the two survival
    /// outcomes sit at opposite ends of the active gradient.
    pub fn series_color(&self, label: SurvivalLabel) -> Color32 {
        match label {
            SurvivalLabel::Died => self.sample(0.2),
            SurvivalLabel::Survived => self.sample(0.85),
        }
    }
}

fn to_lin((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}
