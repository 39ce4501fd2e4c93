//! Palette and hex parsing shared by the TUI widgets

use ratatui::style::Color;

pub const PARCHMENT: Color = Color::Rgb(0xF5, 0xE6, 0xC8);
pub const GOLD: Color = Color::Rgb(0xDA, 0xA5, 0x20);
pub const BROWN: Color = Color::Rgb(0x8B, 0x45, 0x13);
pub const ACCENT: Color = Color::Rgb(0xE5, 0x09, 0x14);
pub const MUTED: Color = Color::DarkGray;
pub const HEALTH: Color = Color::Rgb(0xC0, 0x39, 0x2B);
pub const MANA: Color = Color::Rgb(0x29, 0x80, 0xB9);
pub const EXPERIENCE: Color = Color::Rgb(0xF1, 0xC4, 0x0F);

/// Parse `#RRGGBB` (the leading `#` is optional)
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Zone colour from content, white when unparseable
pub fn zone_color(hex: &str) -> Color {
    hex_to_color(hex).unwrap_or(Color::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#8B4513"), Some(Color::Rgb(139, 69, 19)));
        assert_eq!(hex_to_color("00ced1"), Some(Color::Rgb(0, 206, 209)));
        assert_eq!(hex_to_color("#FFF"), None);
        assert_eq!(hex_to_color("#GG0000"), None);
        assert_eq!(hex_to_color("#ééé"), None);
    }

    #[test]
    fn test_zone_color_fallback() {
        assert_eq!(zone_color("not a colour"), Color::White);
    }
}
