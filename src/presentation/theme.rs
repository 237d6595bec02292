//! Color theme.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Brand pink used when the configured color cannot be parsed.
pub const BRAND_PINK: Color = Color::Rgb(0xD0, 0x29, 0x85);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub title_style: Style,
    pub selection_style: Style,
    pub dimmed_style: Style,
    pub base_style: Style,
    pub success: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_color(BRAND_PINK)
    }
}

impl Theme {
    #[must_use]
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        Self {
            accent,
            title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            selection_style: Style::default().bg(accent).fg(Color::White),
            dimmed_style: Style::default().fg(Color::DarkGray),
            base_style: Style::default().fg(Color::Reset),
            success: Color::Green,
            error: Color::Red,
        }
    }
}

pub fn parse_color(s: &str) -> Color {
    let s = s.trim();
    if s.starts_with('#')
        && let Ok((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    match s.to_lowercase().as_str() {
        "pink" | "rosa" => BRAND_PINK,
        "orange" => Color::Indexed(208),
        _ => BRAND_PINK,
    }
}

fn parse_hex_color(s: &str) -> Result<(u8, u8, u8), ()> {
    let s = s.trim_start_matches('#');

    if !s.is_ascii() {
        return Err(());
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ());
    match s.len() {
        6 => Ok((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => Ok((
            channel(&s[0..1].repeat(2))?,
            channel(&s[1..2].repeat(2))?,
            channel(&s[2..3].repeat(2))?,
        )),
        _ => Err(()),
    }
}
