//! Colors and per-theme palettes.

use std::fmt;

use bt_types::theme::Theme;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse `#rrggbb`. Anything else is `None`.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#')?;
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
    Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Chrome colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    /// Status bar labels (clock, coins, incognito marker).
    pub status_text: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::rgb(0xff, 0xff, 0xff),
                text: Color::rgb(0x00, 0x00, 0x00),
                status_text: Color::rgb(0x55, 0x55, 0x55),
            },
            Theme::Dark => Self {
                background: Color::rgb(0x28, 0x2c, 0x34),
                text: Color::rgb(0xff, 0xff, 0xff),
                status_text: Color::rgb(0xaa, 0xaa, 0xaa),
            },
            Theme::OrangeJuice => Self {
                background: Color::rgb(0xff, 0xe4, 0xb5),
                text: Color::rgb(0x00, 0x00, 0x00),
                status_text: Color::rgb(0x55, 0x55, 0x55),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_colors() {
        assert_eq!(parse_hex_color("#282c34"), Some(Color::rgb(0x28, 0x2c, 0x34)));
        assert_eq!(parse_hex_color("#FFE4B5"), Some(Color::rgb(0xff, 0xe4, 0xb5)));
        assert_eq!(parse_hex_color("282c34"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Color::rgb(0xff, 0xe4, 0xb5).to_string(), "#ffe4b5");
    }

    #[test]
    fn dark_palette() {
        let p = Palette::for_theme(Theme::Dark);
        assert_eq!(p.background.to_string(), "#282c34");
        assert_eq!(p.text.to_string(), "#ffffff");
        assert_eq!(p.status_text.to_string(), "#aaaaaa");
    }

    #[test]
    fn every_theme_has_readable_contrast() {
        for theme in Theme::ALL {
            let p = Palette::for_theme(theme);
            assert_ne!(p.background, p.text, "{theme}");
        }
    }
}
