use std::str::FromStr;

use eframe::egui::Color32;
use palette::rgb::FromHexError;
use palette::Srgb;
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Curve colours
// ---------------------------------------------------------------------------

/// Colours of the two hysteresis curves, shared by the PNG and the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveColors {
    pub longitudinal: Srgb<u8>,
    pub transversal: Srgb<u8>,
}

impl Default for CurveColors {
    fn default() -> Self {
        Self {
            longitudinal: palette::named::RED,
            transversal: palette::named::BLUE,
        }
    }
}

/// Parse `#rrggbb` / `rrggbb` / `#rgb`.
pub fn parse_hex(s: &str) -> Result<Srgb<u8>, FromHexError> {
    Srgb::<u8>::from_str(s.trim())
}

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn to_rgb_color(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}
