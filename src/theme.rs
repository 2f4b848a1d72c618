//! Day/night palette for the viewer chrome and overlay text.

use crate::config::ThemeMode;
use iced::{Color, Theme as IcedTheme};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub title: Color,
    pub body: Color,
    pub accent: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Day => Palette {
                background: Color::WHITE,
                title: Color::from_rgb(0.07, 0.07, 0.09),
                body: Color::from_rgb(0.30, 0.31, 0.35),
                accent: Color::from_rgb(0.15, 0.39, 0.92),
            },
            ThemeMode::Night => Palette {
                background: Color::BLACK,
                title: Color::from_rgb(0.96, 0.96, 0.97),
                body: Color::from_rgb(0.70, 0.71, 0.75),
                accent: Color::from_rgb(0.38, 0.65, 0.98),
            },
        }
    }
}

/// Scale a color's alpha by `opacity`.
pub fn faded(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}

pub fn iced_theme(mode: ThemeMode) -> IcedTheme {
    match mode {
        ThemeMode::Day => IcedTheme::Light,
        ThemeMode::Night => IcedTheme::Dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faded_keeps_rgb_and_scales_alpha() {
        let color = faded(Color::from_rgb(0.2, 0.4, 0.6), 0.25);
        assert_eq!((color.r, color.g, color.b), (0.2, 0.4, 0.6));
        assert_eq!(color.a, 0.25);
        assert_eq!(faded(Color::WHITE, 3.0).a, 1.0);
    }

    #[test]
    fn night_palette_is_light_on_dark() {
        let palette = Palette::for_mode(ThemeMode::Night);
        assert_eq!(palette.background, Color::BLACK);
        assert!(palette.title.r > 0.9);
        assert_eq!(iced_theme(ThemeMode::Night), IcedTheme::Dark);
    }
}
