//! Theme and style definitions.

use ratatui::style::{Color, Modifier, Style};

/// Light or dark palette selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Theme configuration for Tessera widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary accent color (focused borders, sort indicators)
    pub accent: Color,
    /// Success color
    pub success: Color,
    /// Warning color (loading indicator)
    pub warning: Color,
    /// Error color (validation messages, invalid borders)
    pub error: Color,
    /// Muted color (placeholders, helper text, empty states)
    pub muted: Color,
    /// Regular text color
    pub text: Color,
    /// Background of filled inputs
    pub surface: Color,
    /// Background of selected rows
    pub selected: Color,
    /// Background of the cursor row in clickable tables
    pub hover: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            text: Color::Reset,
            surface: Color::Gray,
            selected: Color::Blue,
            hover: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Palette for a theme mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::default(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Dark palette: light text on a gray-800 surface.
    pub fn dark() -> Self {
        Self {
            accent: Color::LightCyan,
            muted: Color::Gray,
            text: Color::White,
            surface: Color::Rgb(31, 41, 55),
            selected: Color::Rgb(30, 58, 138),
            hover: Color::Rgb(55, 65, 81),
            ..Self::default()
        }
    }

    /// Style for focused/active borders.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for unfocused borders.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for success text.
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for warning text.
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for error text.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for muted/secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for regular text.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for bold text.
    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Style for table header cells.
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for selected table rows.
    pub fn selected_row_style(&self) -> Style {
        Style::default().bg(self.selected)
    }

    /// Style for the cursor row of a clickable table.
    pub fn hover_row_style(&self) -> Style {
        Style::default().bg(self.hover)
    }

    /// Background style of filled inputs.
    pub fn surface_style(&self) -> Style {
        Style::default().bg(self.surface).fg(self.text)
    }
}
