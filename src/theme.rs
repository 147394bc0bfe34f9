//! Theme colors loaded from the Omarchy/Hyprland system theme
//! Reads colors from ~/.config/omarchy/current/theme/kitty.conf

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,        // Active borders, focused fields, selection
    pub success: Color,       // LIVE badge, active poll indicators
    pub danger: Color,        // Errors, CLOSED badge
    pub warning: Color,       // Status messages
    pub text: Color,          // Primary text (foreground)
    pub text_dim: Color,      // Dimmed text (color8/bright black)
    pub bg_selected: Color,   // Selection background
    pub inactive: Color,      // Inactive borders
    pub bar: Color,           // Result bar fill
}

impl Default for Theme {
    fn default() -> Self {
        // Fallback to Catppuccin-inspired colors if theme can't be loaded
        Self {
            accent: Color::Rgb(250, 179, 135),
            success: Color::Rgb(166, 218, 149),
            danger: Color::Rgb(243, 139, 168),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            bar: Color::Rgb(205, 214, 244),
        }
    }
}

impl Theme {
    /// Load theme from the Omarchy system theme, falling back to defaults
    pub fn load() -> Self {
        Self::load_omarchy_theme().unwrap_or_default()
    }

    /// Load colors from the Omarchy kitty.conf theme file
    fn load_omarchy_theme() -> Option<Self> {
        let home = dirs::home_dir()?;
        let theme_path = home.join(".config/omarchy/current/theme/kitty.conf");

        let content = fs::read_to_string(&theme_path).ok()?;
        let colors = Self::parse_kitty_conf(&content);

        if colors.is_empty() {
            return None;
        }

        let accent = colors
            .get("color2")
            .or(colors.get("color10"))
            .copied()
            .unwrap_or(Color::Rgb(255, 193, 7));

        let danger = colors
            .get("color1")
            .copied()
            .unwrap_or(Color::Rgb(211, 95, 95));

        let warning = colors
            .get("color4")
            .or(colors.get("color12"))
            .copied()
            .unwrap_or(Color::Rgb(230, 142, 13));

        let text = colors
            .get("foreground")
            .copied()
            .unwrap_or(Color::Rgb(190, 190, 190));

        let text_dim = colors
            .get("color8")
            .copied()
            .unwrap_or(Color::Rgb(138, 138, 141));

        let bg_selected = colors
            .get("selection_background")
            .or(colors.get("color0"))
            .copied()
            .unwrap_or(Color::Rgb(51, 51, 51));

        let inactive = colors
            .get("inactive_border_color")
            .or(colors.get("color8"))
            .copied()
            .unwrap_or(Color::Rgb(89, 89, 89));

        Some(Self {
            accent,
            success: accent, // Omarchy Matte Black maps green to the accent gold
            danger,
            warning,
            text,
            text_dim,
            bg_selected,
            inactive,
            bar: text,
        })
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
            if parts.len() == 2 {
                if let Some(color) = Self::parse_hex_color(parts[1].trim()) {
                    colors.insert(parts[0].trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kitty_conf_colors() {
        let conf = "# comment\nforeground #bebebe\ncolor1 #D35F5F\n\nbadline\n";
        let colors = Theme::parse_kitty_conf(conf);
        assert_eq!(colors.get("foreground"), Some(&Color::Rgb(0xbe, 0xbe, 0xbe)));
        assert_eq!(colors.get("color1"), Some(&Color::Rgb(0xd3, 0x5f, 0x5f)));
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!(Theme::parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("nope"), None);
    }
}
