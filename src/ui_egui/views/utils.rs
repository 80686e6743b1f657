//! Helper functions shared by the timeline painting code.

use chrono::NaiveDateTime;
use egui::Color32;

/// Fallback fill for events whose color cannot be parsed.
pub const DEFAULT_EVENT_COLOR: Color32 = Color32::from_rgb(185, 218, 255);

/// Parse a hex color string to Color32.
///
/// Accepts `RRGGBB` and the short `RGB` form, optionally prefixed with '#'.
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        }
        3 => {
            let mut channels = [0u8; 3];
            for (channel, digit) in channels.iter_mut().zip(hex.chars()) {
                *channel = u8::try_from(digit.to_digit(16)? * 17).ok()?;
            }
            Some(Color32::from_rgb(channels[0], channels[1], channels[2]))
        }
        _ => None,
    }
}

pub fn event_fill(hex: &str) -> Color32 {
    parse_color(hex).unwrap_or(DEFAULT_EVENT_COLOR)
}

/// Dark text on light fills, white text on dark ones.
pub fn text_color_for(fill: Color32) -> Color32 {
    let luminance =
        0.299 * f32::from(fill.r()) + 0.587 * f32::from(fill.g()) + 0.114 * f32::from(fill.b());
    if luminance > 150.0 {
        Color32::from_gray(30)
    } else {
        Color32::WHITE
    }
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// `09:30 - 11:00`
pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
}
