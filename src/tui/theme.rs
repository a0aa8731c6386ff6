use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x14, 0x1C),
            text: Color::Rgb(0xC5, 0xCD, 0xD9),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x58, 0xA6, 0xFF),
            dim: Color::Rgb(0x6E, 0x76, 0x81),
            red: Color::Rgb(0xF8, 0x51, 0x49),
            green: Color::Rgb(0x3F, 0xB9, 0x50),
            yellow: Color::Rgb(0xD2, 0x99, 0x22),
            selection_bg: Color::Rgb(0x1F, 0x2A, 0x3A),
        }
    }
}

/// Parse a hex color string like "#58A6FF" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "green" => theme.green = color,
                    "yellow" => theme.yellow = color,
                    "selection_bg" => theme.selection_bg = color,
                    _ => {}
                }
            }
        }
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#F85149"),
            Some(Color::Rgb(0xF8, 0x51, 0x49))
        );
        assert_eq!(parse_hex_color("F85149"), None); // missing #
        assert_eq!(parse_hex_color("#F851"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_from_config_overrides() {
        let mut colors = HashMap::new();
        colors.insert("highlight".to_string(), "#FB4196".to_string());
        colors.insert("nonsense".to_string(), "#FFFFFF".to_string());
        let ui = UiConfig {
            colors,
            ..UiConfig::default()
        };
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.highlight, Color::Rgb(0xFB, 0x41, 0x96));
        // Everything else stays at the default
        assert_eq!(theme.text, Theme::default().text);
    }
}
