//! Named color palettes. Colors are ARGB `0xAARRGGBB`, matching the canvas.

use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: u32,
    pub caption_bg: u32,
    pub caption_bg_unfocused: u32,
    pub caption_fg: u32,
    pub panel_bg: u32,
    pub panel_border: u32,
    pub tab_bg: u32,
    pub tab_active_bg: u32,
    pub text: u32,
    pub text_dim: u32,
    pub accent: u32,
    pub close_hover: u32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: 0xFF1E_1E1E,
            caption_bg: 0xFF2D_2D30,
            caption_bg_unfocused: 0xFF25_2526,
            caption_fg: 0xFFD4_D4D4,
            panel_bg: 0xFF25_2526,
            panel_border: 0xFF3F_3F46,
            tab_bg: 0xFF2D_2D30,
            tab_active_bg: 0xFF1E_1E1E,
            text: 0xFFD4_D4D4,
            text_dim: 0xFF80_8080,
            accent: 0xFF00_7ACC,
            close_hover: 0xFFE8_1123,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: 0xFFF3_F3F3,
            caption_bg: 0xFFDD_DDDD,
            caption_bg_unfocused: 0xFFE8_E8E8,
            caption_fg: 0xFF1E_1E1E,
            panel_bg: 0xFFFF_FFFF,
            panel_border: 0xFFC8_C8C8,
            tab_bg: 0xFFEC_ECEC,
            tab_active_bg: 0xFFFF_FFFF,
            text: 0xFF1E_1E1E,
            text_dim: 0xFF6E_6E6E,
            accent: 0xFF00_5FB8,
            close_hover: 0xFFE8_1123,
        }
    }

    /// Look up a theme by name. Unknown names fall back to dark with a
    /// warning; callers never fail over a palette.
    pub fn resolve(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            other => {
                warn!(theme = other, "unknown theme, falling back to dark");
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!(Theme::resolve("dark").name, "dark");
        assert_eq!(Theme::resolve("light").name, "light");
    }

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::resolve("solarized"), Theme::dark());
        assert_eq!(Theme::resolve(""), Theme::dark());
    }
}
