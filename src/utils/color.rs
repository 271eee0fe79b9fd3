//! Color parsing helpers shared by the palette and block rendering.

use egui::Color32;

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g., "#FF5500" or "FF5500")
///
/// # Returns
/// * `Some(Color32)` if parsing succeeds
/// * `None` if the input is empty or invalid
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Parse a block accent color, falling back to a neutral slate tone when the
/// stored token is missing or malformed.
pub fn block_color(token: &str) -> Color32 {
    parse_color(token).unwrap_or(Color32::from_rgb(100, 116, 139))
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_with_hash() {
        assert_eq!(parse_color("#FF5500"), Some(Color32::from_rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_color_without_hash() {
        assert_eq!(parse_color("0ea5e9"), Some(Color32::from_rgb(14, 165, 233)));
    }

    #[test]
    fn test_parse_color_rejects_bad_input() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("not-a-color"), None);
    }

    #[test]
    fn test_parse_color_rejects_multibyte_token() {
        // Six bytes but two chars; must not slice mid-character.
        assert_eq!(parse_color("€€"), None);
        assert_eq!(block_color("€€"), Color32::from_rgb(100, 116, 139));
    }

    #[test]
    fn test_block_color_falls_back() {
        assert_eq!(block_color(""), Color32::from_rgb(100, 116, 139));
        assert_eq!(block_color("#10B981"), Color32::from_rgb(16, 185, 129));
    }
}
