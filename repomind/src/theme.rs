//! Color theme system for repomind.
//!
//! Three built-in themes:
//!
//! - `repomind`: the violet-on-charcoal product palette in RGB; needs truecolor.
//! - `dark`: ANSI 16 colors only, safe on any terminal including plain SSH.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB.

use ratatui::style::Color;

/// All color values used across repomind's screens.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border of the focused panel and overlays.
    pub border_active: Color,
    pub border_inactive: Color,

    // Accents
    /// Primary brand color (title, buttons, active stage).
    pub accent: Color,
    /// Secondary brand color (prompts, gradients' far end).
    pub accent_soft: Color,
    /// Muted brand color (completed stages, bubble outlines).
    pub accent_dim: Color,

    // Text
    pub text: Color,
    pub text_muted: Color,

    // Surfaces
    /// Input boxes, user bubbles and the fake terminal.
    pub surface: Color,
    /// Pending stage cards and the system bubble.
    pub surface_alt: Color,

    // Chat
    pub user_label: Color,
    pub system_label: Color,
    pub citation: Color,
    pub code_header: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode: Color,

    // General
    pub background: Color,
}

impl Theme {
    /// The product palette.
    pub fn repomind() -> Self {
        let violet = Color::Rgb(138, 43, 226); // #8A2BE2
        let lilac = Color::Rgb(159, 95, 255); // #9F5FFF
        let plum = Color::Rgb(77, 59, 114); // #4D3B72
        let lavender = Color::Rgb(179, 136, 255); // #B388FF
        let white = Color::Rgb(248, 248, 248); // #F8F8F8
        let grey = Color::Rgb(160, 160, 160); // #A0A0A0
        let graphite = Color::Rgb(45, 45, 45); // #2D2D2D
        let coal = Color::Rgb(30, 30, 30); // #1E1E1E
        let night = Color::Rgb(18, 18, 18); // #121212

        Self {
            border_active: lilac,
            border_inactive: graphite,

            accent: violet,
            accent_soft: lilac,
            accent_dim: plum,

            text: white,
            text_muted: grey,

            surface: graphite,
            surface_alt: coal,

            user_label: white,
            system_label: lavender,
            citation: lilac,
            code_header: grey,

            status_bar_bg: graphite,
            status_bar_fg: white,
            status_mode: lilac,

            background: night,
        }
    }

    /// ANSI 16 colors only.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Magenta,
            border_inactive: Color::DarkGray,

            accent: Color::Magenta,
            accent_soft: Color::LightMagenta,
            accent_dim: Color::Blue,

            text: Color::White,
            text_muted: Color::Gray,

            surface: Color::DarkGray,
            surface_alt: Color::Black,

            user_label: Color::White,
            system_label: Color::LightMagenta,
            citation: Color::Cyan,
            code_header: Color::Gray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode: Color::LightMagenta,

            background: Color::Reset,
        }
    }

    /// Catppuccin Mocha, <https://github.com/catppuccin/catppuccin>.
    pub fn catppuccin_mocha() -> Self {
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            accent: mauve,
            accent_soft: lavender,
            accent_dim: surface1,

            text,
            text_muted: overlay1,

            surface: surface1,
            surface_alt: surface0,

            user_label: text,
            system_label: mauve,
            citation: teal,
            code_header: blue,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode: lavender,

            background: base,
        }
    }

    /// Resolves a theme name; unknown names fall back to `repomind`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "repomind" => Self::repomind(),
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!("unknown theme '{other}', falling back to 'repomind'");
                Self::repomind()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_their_palettes() {
        assert_eq!(Theme::from_name("dark").accent, Color::Magenta);
        assert_eq!(
            Theme::from_name("catppuccin_mocha").accent,
            Theme::catppuccin_mocha().accent
        );
        assert_eq!(Theme::from_name("nope").accent, Theme::repomind().accent);
    }
}
