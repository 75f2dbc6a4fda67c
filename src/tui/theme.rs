use ratatui::style::Color;

use crate::model::{Priority, UiConfig};

/// Colors for every render path. Defaults are a dark blue-gray palette;
/// any role can be overridden from `[ui.colors]` in config.toml.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Background of the cursor row
    pub highlight: Color,
    /// Titles and focused-field markers
    pub accent: Color,
    pub dim: Color,
    /// Completed task text
    pub done: Color,
    pub error: Color,
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x14, 0x21),
            text: Color::Rgb(0xAB, 0xB2, 0xBF),
            text_bright: Color::Rgb(0xE6, 0xEF, 0xFF),
            highlight: Color::Rgb(0x2C, 0x3A, 0x54),
            accent: Color::Rgb(0x61, 0xAF, 0xEF),
            dim: Color::Rgb(0x5C, 0x63, 0x70),
            done: Color::Rgb(0x4B, 0x52, 0x63),
            error: Color::Rgb(0xE0, 0x55, 0x61),
            priority_high: Color::Rgb(0xE0, 0x55, 0x61),
            priority_medium: Color::Rgb(0xD8, 0xA6, 0x57),
            priority_low: Color::Rgb(0x89, 0xB4, 0x82),
        }
    }
}

/// `#RRGGBB` to an RGB color. Anything else is None.
fn parse_hex_color(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

impl Theme {
    /// The default palette with any valid `[ui.colors]` entries applied.
    /// Unknown roles and unparseable values are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (role, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value)
                && let Some(slot) = theme.role_slot(role)
            {
                *slot = color;
            }
        }
        theme
    }

    /// The field behind a `[ui.colors]` role name.
    fn role_slot(&mut self, role: &str) -> Option<&mut Color> {
        let slot = match role {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "highlight" => &mut self.highlight,
            "accent" => &mut self.accent,
            "dim" => &mut self.dim,
            "done" => &mut self.done,
            "error" => &mut self.error,
            "priority_high" => &mut self.priority_high,
            "priority_medium" => &mut self.priority_medium,
            "priority_low" => &mut self.priority_low,
            _ => return None,
        };
        Some(slot)
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.priority_high,
            Priority::Medium => self.priority_medium,
            Priority::Low => self.priority_low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_parsing() {
        assert_eq!(
            parse_hex_color("#E05561"),
            Some(Color::Rgb(0xE0, 0x55, 0x61))
        );
        assert_eq!(
            parse_hex_color("#101421"),
            Some(Color::Rgb(0x10, 0x14, 0x21))
        );
        assert_eq!(parse_hex_color("E05561"), None); // missing #
        assert_eq!(parse_hex_color("#E055"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // not hex
    }

    #[test]
    fn config_overrides_apply() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("priority_high".into(), "#FF0000".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.priority_high, Color::Rgb(0xFF, 0, 0));
        assert_eq!(theme.text, Theme::default().text);
    }

    #[test]
    fn bad_overrides_are_skipped() {
        let mut ui = UiConfig::default();
        ui.colors.insert("accent".into(), "not-a-color".into());
        ui.colors.insert("unknown_role".into(), "#123456".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.accent, Theme::default().accent);
    }

    #[test]
    fn priority_colors_map_to_roles() {
        let theme = Theme::default();
        assert_eq!(theme.priority_color(Priority::High), theme.priority_high);
        assert_eq!(
            theme.priority_color(Priority::Medium),
            theme.priority_medium
        );
        assert_eq!(theme.priority_color(Priority::Low), theme.priority_low);
    }
}
