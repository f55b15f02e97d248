//! Light and dark palettes for flixtui
//!
//! A `Theme` is a plain value built from a `ThemeMode` and handed to every
//! render function. Nothing reads the theme from global state.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User preference as stored in config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    /// Follow the terminal background
    System,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::System => write!(f, "system"),
        }
    }
}

/// Concrete scheme a mode resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl ThemeMode {
    /// Resolve to a scheme. `System` uses the detected terminal scheme,
    /// falling back to dark.
    pub fn resolve(self, detected: Option<ColorScheme>) -> ColorScheme {
        match self {
            ThemeMode::Dark => ColorScheme::Dark,
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::System => detected.unwrap_or(ColorScheme::Dark),
        }
    }
}

/// Guess the terminal background from `COLORFGBG` ("fg;bg")
pub fn detect_terminal_scheme() -> Option<ColorScheme> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| scheme_from_colorfgbg(&v))
}

pub(crate) fn scheme_from_colorfgbg(value: &str) -> Option<ColorScheme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    // 7 (light grey) and 9..=15 (bright colors) are light backgrounds
    Some(if bg == 7 || bg >= 9 {
        ColorScheme::Light
    } else {
        ColorScheme::Dark
    })
}

/// Raw colors for one scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub dim: Color,
    /// Brand red
    pub primary: Color,
    pub accent: Color,
    pub border: Color,
    pub error: Color,
    pub success: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color::Rgb(0x00, 0x00, 0x00),
        surface: Color::Rgb(0x32, 0x32, 0x32),
        text: Color::Rgb(0xff, 0xff, 0xff),
        dim: Color::Rgb(0x9a, 0x9a, 0x9a),
        primary: Color::Rgb(0xe5, 0x09, 0x14),
        accent: Color::Rgb(0x46, 0xd3, 0x69),
        border: Color::Rgb(0x4d, 0x4d, 0x4d),
        error: Color::Rgb(0xff, 0x4d, 0x4d),
        success: Color::Rgb(0x46, 0xd3, 0x69),
    };

    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(0xff, 0xff, 0xff),
        surface: Color::Rgb(0xf2, 0xf2, 0xf2),
        text: Color::Rgb(0x00, 0x00, 0x00),
        dim: Color::Rgb(0x5f, 0x5f, 0x5f),
        primary: Color::Rgb(0xb2, 0x07, 0x10),
        accent: Color::Rgb(0x1a, 0x7f, 0x37),
        border: Color::Rgb(0xb3, 0xb3, 0xb3),
        error: Color::Rgb(0xb0, 0x00, 0x20),
        success: Color::Rgb(0x1a, 0x7f, 0x37),
    };

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self::DARK,
            ColorScheme::Light => Self::LIGHT,
        }
    }
}

/// Resolved theme passed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub scheme: ColorScheme,
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_mode(ThemeMode::Dark, None)
    }
}

impl Theme {
    pub fn from_mode(mode: ThemeMode, detected: Option<ColorScheme>) -> Self {
        let scheme = mode.resolve(detected);
        Self {
            mode,
            scheme,
            palette: Palette::for_scheme(scheme),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.scheme == ColorScheme::Dark
    }

    /// Flip dark and light. A `System` theme becomes explicit.
    pub fn toggled(&self) -> Self {
        let mode = match self.scheme {
            ColorScheme::Dark => ThemeMode::Light,
            ColorScheme::Light => ThemeMode::Dark,
        };
        Self::from_mode(mode, None)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.background)
    }

    pub fn background(&self) -> Style {
        Style::default().bg(self.palette.background)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.palette.dim)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.palette.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.palette.success)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.palette.text)
            .add_modifier(Modifier::BOLD)
    }

    /// Brand logo style
    pub fn logo(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.palette.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for list items (selected/highlighted)
    pub fn list_item_selected(&self) -> Style {
        Style::default()
            .fg(self.palette.background)
            .bg(self.palette.text)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.surface)
    }

    pub fn keybind(&self) -> Style {
        Style::default().fg(self.palette.primary)
    }

    pub fn keybind_desc(&self) -> Style {
        Style::default().fg(self.palette.dim)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.surface)
    }

    /// Loading/spinner indicator
    pub fn loading(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Active tab label
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.palette.background)
            .bg(self.palette.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.surface)
    }

    /// Section title with a slow metallic shimmer driven by the UI tick
    pub fn shimmer(&self, tick: u64) -> Style {
        let frames = if self.is_dark() {
            [
                Color::Rgb(0xc0, 0xc0, 0xc0),
                Color::Rgb(0xe0, 0xe0, 0xe0),
                Color::Rgb(0xff, 0xff, 0xff),
                Color::Rgb(0xe0, 0xe0, 0xe0),
            ]
        } else {
            [
                Color::Rgb(0x40, 0x40, 0x40),
                Color::Rgb(0x20, 0x20, 0x20),
                Color::Rgb(0x00, 0x00, 0x00),
                Color::Rgb(0x20, 0x20, 0x20),
            ]
        };
        let idx = ((tick / 4) % frames.len() as u64) as usize;
        Style::default().fg(frames[idx]).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        match color {
            Color::Rgb(r, g, b) => (r, g, b),
            other => panic!("theme colors should all be RGB, got {:?}", other),
        }
    }

    fn all_colors(palette: &Palette) -> [(&'static str, Color); 9] {
        [
            ("background", palette.background),
            ("surface", palette.surface),
            ("text", palette.text),
            ("dim", palette.dim),
            ("primary", palette.primary),
            ("accent", palette.accent),
            ("border", palette.border),
            ("error", palette.error),
            ("success", palette.success),
        ]
    }

    /// WCAG relative luminance
    fn relative_luminance((r, g, b): (u8, u8, u8)) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
    }

    /// From 1 (same) to 21 (black on white)
    fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
        let l1 = relative_luminance(fg);
        let l2 = relative_luminance(bg);
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    #[test]
    fn test_all_palette_colors_are_rgb() {
        for palette in [Palette::DARK, Palette::LIGHT] {
            for (name, color) in all_colors(&palette) {
                assert!(matches!(color, Color::Rgb(..)), "{} should be RGB", name);
            }
        }
    }

    #[test]
    fn test_text_contrast_both_schemes() {
        for palette in [Palette::DARK, Palette::LIGHT] {
            let bg = rgb(palette.background);
            let ratio = contrast_ratio(rgb(palette.text), bg);
            assert!(ratio >= 4.5, "{:.2}", ratio);
            assert!(contrast_ratio(rgb(palette.dim), bg) >= 4.5);
        }
    }

    #[test]
    fn test_primary_readable_as_large_text() {
        for palette in [Palette::DARK, Palette::LIGHT] {
            assert!(contrast_ratio(rgb(palette.primary), rgb(palette.background)) >= 3.0);
        }
    }

    #[test]
    fn test_resolve_modes() {
        assert_eq!(ThemeMode::Dark.resolve(Some(ColorScheme::Light)), ColorScheme::Dark);
        assert_eq!(ThemeMode::Light.resolve(None), ColorScheme::Light);
        assert_eq!(ThemeMode::System.resolve(None), ColorScheme::Dark);
        assert_eq!(
            ThemeMode::System.resolve(Some(ColorScheme::Light)),
            ColorScheme::Light
        );
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(scheme_from_colorfgbg("15;0"), Some(ColorScheme::Dark));
        assert_eq!(scheme_from_colorfgbg("0;15"), Some(ColorScheme::Light));
        assert_eq!(scheme_from_colorfgbg("0;default;7"), Some(ColorScheme::Light));
        assert_eq!(scheme_from_colorfgbg("garbage"), None);
    }

    #[test]
    fn test_toggle_flips_scheme() {
        let dark = Theme::default();
        let light = dark.toggled();
        assert_eq!(light.scheme, ColorScheme::Light);
        assert_eq!(light.mode, ThemeMode::Light);
        assert_eq!(light.toggled().scheme, ColorScheme::Dark);

        let system_light = Theme::from_mode(ThemeMode::System, Some(ColorScheme::Light));
        assert_eq!(system_light.toggled().mode, ThemeMode::Dark);
    }

    #[test]
    fn test_shimmer_oscillates() {
        let theme = Theme::default();
        let a = theme.shimmer(0);
        let b = theme.shimmer(8);
        assert_ne!(a, b);
        // period of 16 ticks
        assert_eq!(theme.shimmer(0), theme.shimmer(16));
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1);
    }
}
