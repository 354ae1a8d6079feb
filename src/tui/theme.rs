// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};

use crate::model::Category;

pub const PALETTE_ENV: &str = "UNARI_PALETTE";

/// Colors for every dashboard element; the terminal's own colors unless a palette is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    palette: Option<Palette>,
}

impl Theme {
    pub fn from_env() -> Result<Self, ThemeError> {
        match env::var(PALETTE_ENV) {
            Ok(value) => Self::from_palette_csv(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV.to_owned(),
                value: "<non-unicode>".to_owned(),
            }),
        }
    }

    /// Parses `fg,bg,` followed by the 16 ANSI colors; blank input keeps the defaults.
    pub fn from_palette_csv(value: &str) -> Result<Self, ThemeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let palette = Palette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
            name: PALETTE_ENV.to_owned(),
            value: format!("{trimmed} ({error})"),
        })?;
        Ok(Self { palette: Some(palette) })
    }

    pub fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi[color.idx()],
            None => color.into(),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.ansi_color(Ansi16::BrightGreen))
        } else {
            self.base_style().fg(self.ansi_color(Ansi16::BrightBlack))
        }
    }

    pub fn title_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::BrightGreen))
            .add_modifier(Modifier::BOLD)
    }

    /// Sidebar entry of the selected campus.
    pub fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub fn restaurant_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::BrightWhite))
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::BrightBlack))
    }

    pub fn error_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Red))
    }

    pub fn marker_style(&self, category: Category) -> Style {
        let color = match category {
            Category::Meal => Ansi16::Yellow,
            Category::VeganMeal => Ansi16::Green,
            Category::Side => Ansi16::Cyan,
            Category::Dessert => Ansi16::Magenta,
            Category::Unclassified => Ansi16::BrightBlack,
        };
        self.base_style().fg(self.ansi_color(color))
    }

    pub fn footer_label_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::White))
    }

    pub fn footer_key_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::Cyan))
            .add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Palette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl Palette {
    const CSV_LEN: usize = 18;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(|part| part.trim()).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,black,red,green,yellow,blue,magenta,cyan,white,bright_black,bright_red,bright_green,bright_yellow,bright_blue,bright_magenta,bright_cyan,bright_white), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let fg = parse_palette_color(parts[0])?;
        let bg = parse_palette_color(parts[1])?;

        let mut ansi = [Color::Reset; 16];
        for (slot, part) in ansi.iter_mut().zip(parts.iter().skip(2)) {
            *slot = parse_palette_color(part)?;
        }

        Ok(Self { fg, bg, ansi })
    }
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 3 {
            return Err(format!("invalid rgb: value: {trimmed}"));
        }
        let r = parse_hex_channel(parts[0])?;
        let g = parse_hex_channel(parts[1])?;
        let b = parse_hex_channel(parts[2])?;
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| format!("invalid rgb: component {value}")),
        4 => u16::from_str_radix(value, 16)
            .map(|wide| (wide >> 8) as u8)
            .map_err(|_| format!("invalid rgb: component {value}")),
        _ => Err(format!("invalid rgb: component {value} (expected 2 or 4 hex digits)")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ansi16 {
    Red,
    Green,
    Yellow,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightGreen,
    BrightWhite,
}

impl Ansi16 {
    const fn idx(self) -> usize {
        match self {
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::BrightBlack => 8,
            Self::BrightGreen => 10,
            Self::BrightWhite => 15,
        }
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Red => Color::Red,
            Ansi16::Green => Color::Green,
            Ansi16::Yellow => Color::Yellow,
            Ansi16::Magenta => Color::Magenta,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
            Ansi16::BrightGreen => Color::LightGreen,
            Ansi16::BrightWhite => Color::White,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::{Palette, Theme, ThemeError};
    use crate::model::Category;
    use ratatui::style::{Color, Style};

    const CSV: &str = "#111111,#222222,#000000,#ff0000,#00ff00,#ffff00,#0000ff,#ff00ff,#00ffff,#ffffff,#1a1a1a,#ff1111,#11ff11,#ffff11,#1111ff,#ff11ff,#11ffff,#fefefe";

    #[test]
    fn palette_override_parses_valid_csv() {
        let palette = Palette::parse_csv(CSV).expect("palette");
        assert_eq!(palette.fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.ansi[1], Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.ansi[15], Color::Rgb(0xfe, 0xfe, 0xfe));
    }

    #[test]
    fn palette_accepts_xterm_rgb_form() {
        let csv = CSV.replacen("#111111", "rgb:ffff/8000/00", 1);
        let palette = Palette::parse_csv(&csv).expect("palette");
        assert_eq!(palette.fg, Color::Rgb(0xff, 0x80, 0x00));
    }

    #[test]
    fn palette_override_rejects_invalid_csv() {
        let err = Palette::parse_csv("nope").unwrap_err();
        assert!(err.contains("expected"));

        let err = Theme::from_palette_csv("#zzzzzz,#000000").unwrap_err();
        let ThemeError::InvalidEnv { name, .. } = &err;
        assert_eq!(name, "UNARI_PALETTE");
    }

    #[test]
    fn default_theme_uses_terminal_colors() {
        let theme = Theme::from_palette_csv("   ").expect("theme");
        assert_eq!(theme, Theme::default());
        assert_eq!(theme.base_style(), Style::default());
        assert_eq!(theme.marker_style(Category::Meal).fg, Some(Color::Yellow));
    }

    #[test]
    fn palette_recolors_markers() {
        let theme = Theme::from_palette_csv(CSV).expect("theme");
        assert_eq!(theme.marker_style(Category::VeganMeal).fg, Some(Color::Rgb(0, 0xff, 0)));
        assert_eq!(theme.base_style().bg, Some(Color::Rgb(0x22, 0x22, 0x22)));
    }
}
