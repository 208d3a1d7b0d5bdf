use coolor::{Hsl, Rgb};
use ratatui::style::Color;

/// WCAG AAA contrast for body text.
pub const AAA_CONTRAST: f32 = 7.0;

pub struct ColorConverter;

impl ColorConverter {
    #[must_use]
    pub fn to_rgb(color: Color) -> Rgb {
        let (r, g, b) = match color {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Black => (0, 0, 0),
            Color::Red => (170, 0, 0),
            Color::Green => (0, 170, 0),
            Color::Yellow => (170, 85, 0),
            Color::Blue => (0, 0, 170),
            Color::Magenta => (170, 0, 170),
            Color::Cyan => (0, 170, 170),
            Color::Gray => (170, 170, 170),
            Color::DarkGray => (85, 85, 85),
            Color::LightRed => (255, 85, 85),
            Color::LightGreen => (85, 255, 85),
            Color::LightYellow => (255, 255, 85),
            Color::LightBlue => (85, 85, 255),
            Color::LightMagenta => (255, 85, 255),
            Color::LightCyan => (85, 255, 255),
            Color::Indexed(i) => ansi_to_rgb(i),
            _ => (255, 255, 255),
        };
        Rgb::new(r, g, b)
    }

    #[must_use]
    pub fn to_hsl(color: Color) -> Hsl {
        Self::to_rgb(color).to_hsl()
    }

    #[must_use]
    pub fn to_ratatui(hsl: Hsl) -> Color {
        let rgb: Rgb = hsl.to_rgb();
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    /// Same hue with the given saturation and lightness.
    #[must_use]
    pub fn tone(color: Color, saturation: f32, lightness: f32) -> Color {
        let mut hsl = Self::to_hsl(color);
        hsl.s = saturation.clamp(0.0, 1.0);
        hsl.l = lightness.clamp(0.0, 1.0);
        Self::to_ratatui(hsl)
    }

    /// WCAG relative luminance in `[0, 1]`.
    #[must_use]
    pub fn relative_luminance(color: Color) -> f32 {
        let rgb = Self::to_rgb(color);
        let channel = |c: u8| {
            let c = f32::from(c) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(rgb.r) + 0.7152 * channel(rgb.g) + 0.0722 * channel(rgb.b)
    }

    /// WCAG contrast ratio between two colors, from 1 to 21.
    #[must_use]
    pub fn contrast_ratio(a: Color, b: Color) -> f32 {
        let (la, lb) = (Self::relative_luminance(a), Self::relative_luminance(b));
        let (light, dark) = if la >= lb { (la, lb) } else { (lb, la) };
        (light + 0.05) / (dark + 0.05)
    }

    /// Black or white, whichever reads better on `background`.
    #[must_use]
    pub fn readable_on(background: Color) -> Color {
        let black = Color::Rgb(0, 0, 0);
        let white = Color::Rgb(255, 255, 255);
        if Self::contrast_ratio(background, black) >= Self::contrast_ratio(background, white) {
            black
        } else {
            white
        }
    }
}

fn ansi_to_rgb(i: u8) -> (u8, u8, u8) {
    match i {
        0 => (0, 0, 0),
        1 => (170, 0, 0),
        2 => (0, 170, 0),
        3 => (170, 85, 0),
        4 => (0, 0, 170),
        5 => (170, 0, 170),
        6 => (0, 170, 170),
        7 => (170, 170, 170),
        8 => (85, 85, 85),
        9 => (255, 85, 85),
        10 => (85, 255, 85),
        11 => (255, 255, 85),
        12 => (85, 85, 255),
        13 => (255, 85, 255),
        14 => (85, 255, 255),
        15 => (255, 255, 255),

        i if (16..=231).contains(&i) => {
            let i = i - 16;
            let r = (i / 36) % 6;
            let g = (i / 6) % 6;
            let b = i % 6;

            let map = |c| if c == 0 { 0 } else { c * 40 + 55 };
            (map(r), map(g), map(b))
        }

        i if (232..=255).contains(&i) => {
            let v = (i - 232) * 10 + 8;
            (v, v, v)
        }

        _ => (255, 255, 255),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_white_contrast_is_maximal() {
        let ratio = ColorConverter::contrast_ratio(Color::Rgb(0, 0, 0), Color::Rgb(255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn test_readable_on_picks_higher_contrast() {
        assert_eq!(ColorConverter::readable_on(Color::Rgb(250, 250, 240)), Color::Rgb(0, 0, 0));
        assert_eq!(ColorConverter::readable_on(Color::Rgb(20, 40, 90)), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_tone_keeps_hue() {
        let dark = ColorConverter::tone(Color::Rgb(30, 111, 217), 0.5, 0.1);
        let Color::Rgb(r, g, b) = dark else {
            panic!("Expected RGB color");
        };
        assert!(b > r && b > g);
        assert!(ColorConverter::relative_luminance(dark) < 0.05);
    }

    #[test]
    fn test_ansi_256_cube() {
        assert_eq!(ansi_to_rgb(208), (255, 135, 0));
        assert_eq!(ansi_to_rgb(16), (0, 0, 0));
        assert_eq!(ansi_to_rgb(231), (255, 255, 255));
    }
}
