//! Colors and visual constants for segment layers

use iced::Color;

/// Marker time label text color
pub const LABEL_COLOR: Color = Color::BLACK;

/// Used when a configured color string can't be parsed
pub const FALLBACK_COLOR: Color = Color::from_rgb(0.5, 0.5, 0.5);

/// Parse a CSS hex color (`#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`)
///
/// Invalid strings log a warning and fall back to gray so a bad config value
/// never prevents a segment from being drawn.
pub fn parse_color(value: &str) -> Color {
    value.parse::<Color>().unwrap_or_else(|_| {
        log::warn!("parse_color: Invalid color {:?}, using fallback", value);
        FALLBACK_COLOR
    })
}

/// Scale a color's alpha by `opacity`
pub fn with_opacity(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_hex() {
        assert_eq!(parse_color("#ff0000"), Color::from_rgb8(255, 0, 0));
        assert_eq!(parse_color("#0f0"), Color::from_rgb8(0, 255, 0));
        assert_eq!(parse_color("#0074d9"), Color::from_rgb8(0x00, 0x74, 0xd9));
    }

    #[test]
    fn test_invalid_color_falls_back() {
        assert_eq!(parse_color("red-ish"), FALLBACK_COLOR);
    }

    #[test]
    fn test_with_opacity() {
        let color = with_opacity(Color::from_rgb(1.0, 0.0, 0.0), 0.3);
        assert!((color.a - 0.3).abs() < f32::EPSILON);
    }
}
