use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Cake palette
// ---------------------------------------------------------------------------

/// Hand-picked (hue, saturation, lightness) swatches for the top ranks, best
/// seller first: raspberry, chocolate, pistachio, lemon, blueberry, caramel,
/// lavender, mint, strawberry, cocoa.
const CAKE_SWATCHES: [(f32, f32, f32); 10] = [
    (340.0, 0.70, 0.55),
    (25.0, 0.55, 0.35),
    (95.0, 0.40, 0.50),
    (50.0, 0.85, 0.55),
    (225.0, 0.55, 0.55),
    (35.0, 0.75, 0.50),
    (270.0, 0.45, 0.65),
    (160.0, 0.45, 0.50),
    (0.0, 0.75, 0.65),
    (15.0, 0.30, 0.45),
];

/// Hue step for ranks past the swatches; successive ranks stay far apart.
const GOLDEN_ANGLE: f32 = 137.508;

/// Colour for the cake at `rank` (0 = best seller). A rank's colour does not
/// depend on how many cakes are shown, so raising top-N keeps existing colours.
pub fn cake_color(rank: usize) -> Color32 {
    let (hue, sat, light) = CAKE_SWATCHES.get(rank).copied().unwrap_or_else(|| {
        let extra = rank - CAKE_SWATCHES.len();
        let hue = (CAKE_SWATCHES[0].0 + (extra + 1) as f32 * GOLDEN_ANGLE) % 360.0;
        let light = if extra % 2 == 0 { 0.50 } else { 0.62 };
        (hue, 0.60, light)
    });
    let rgb: Srgb = Hsl::new(hue, sat, light).into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Cake name → Color32
// ---------------------------------------------------------------------------

/// Distinct colours for the cakes shown in the bar chart, so the same cake
/// keeps its colour in the chart and the detail table.
#[derive(Debug, Clone, Default)]
pub struct CakeColors {
    mapping: HashMap<String, Color32>,
}

impl CakeColors {
    /// Assign colours in ranking order.
    pub fn new<'a>(cakes: impl IntoIterator<Item = &'a str>) -> Self {
        let mapping = cakes
            .into_iter()
            .enumerate()
            .map(|(rank, name)| (name.to_string(), cake_color(rank)))
            .collect();
        CakeColors { mapping }
    }

    /// Colour for a ranked cake; `None` for cakes outside the ranking.
    pub fn color_for(&self, cake: &str) -> Option<Color32> {
        self.mapping.get(cake).copied()
    }
}
