use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Donut slice colours
// ---------------------------------------------------------------------------

/// Citibike brand palette; slices cycle through it in order.
const SLICE_HEX: [&str; 7] = [
    "#1b4793", "#ef3c23", "#2178ae", "#fac92c", "#cfe5cc", "#ed8e83", "#f15a42",
];

fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Colour of the `index`-th slice.
pub fn slice_color(index: usize) -> Color32 {
    parse_hex(SLICE_HEX[index % SLICE_HEX.len()]).unwrap_or(Color32::GRAY)
}

/// A lighter variant for the highlighted slice.
pub fn highlight(color: Color32) -> Color32 {
    let rgb = Srgb::new(color.r(), color.g(), color.b()).into_format::<f32>();
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness + 0.15).min(0.95);
    let out: Srgb = hsl.into_color();
    let out = out.into_format::<u8>();
    Color32::from_rgb(out.red, out.green, out.blue)
}
