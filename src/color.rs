use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Colour of the league-wide reference line in comparison charts.
pub const LEAGUE: Color32 = Color32::from_rgb(66, 110, 220);

/// Colour of the selected team in comparison charts.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(215, 55, 55);

/// Single-series charts cycle through a fixed palette by panel index so
/// neighbouring charts are told apart at a glance.
pub fn panel_color(panel: usize) -> Color32 {
    const PANELS: usize = 8;
    generate_palette(PANELS)[panel % PANELS]
}
