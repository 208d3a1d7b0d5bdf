use super::adapter::ColorConverter;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

const DEFAULT_ACCENT: Color = Color::Rgb(30, 111, 217);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    /// Text drawn on top of `accent`.
    pub on_accent: Color,
    /// Dark tint of the accent for panels and key hints.
    pub accent_dim: Color,
    pub heading_style: Style,
    pub base_style: Style,
    pub dimmed_style: Style,
    pub focus_style: Style,
    pub selection_style: Style,
    pub success: Color,
    pub danger: Color,
    pub star: Color,
    pub high_contrast: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_color(DEFAULT_ACCENT, false)
    }
}

impl Theme {
    pub fn new(accent_color_str: &str, high_contrast: bool) -> Self {
        Self::from_color(parse_color(accent_color_str), high_contrast)
    }

    #[must_use]
    pub fn from_color(accent: Color, high_contrast: bool) -> Self {
        let accent = if high_contrast {
            ColorConverter::tone(accent, 1.0, 0.75)
        } else {
            accent
        };
        let on_accent = ColorConverter::readable_on(accent);
        let accent_dim = ColorConverter::tone(accent, 0.5, 0.12);
        let selection_bg = ColorConverter::tone(accent, 0.3, 0.22);

        let (base_fg, dimmed_fg) = if high_contrast {
            (Color::White, Color::Gray)
        } else {
            (Color::Reset, Color::DarkGray)
        };

        Self {
            accent,
            on_accent,
            accent_dim,
            heading_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            base_style: Style::default().fg(base_fg),
            dimmed_style: Style::default().fg(dimmed_fg),
            focus_style: Style::default()
                .fg(on_accent)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            selection_style: Style::default().bg(selection_bg).fg(Color::White),
            success: if high_contrast {
                Color::LightGreen
            } else {
                Color::Green
            },
            danger: if high_contrast {
                Color::LightRed
            } else {
                Color::Red
            },
            star: Color::Rgb(245, 180, 0),
            high_contrast,
        }
    }
}

/// Parses a color name or `#rgb`/`#rrggbb`, falling back to the clinic blue.
#[must_use]
pub fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        "teal" => Color::Rgb(13, 148, 136),
        _ => DEFAULT_ACCENT,
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');

    if !s.is_ascii() {
        return None;
    }

    let expanded: String = match s.len() {
        6 => s.to_string(),
        3 => s.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
