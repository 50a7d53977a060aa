//! Row style hooks.
//!
//! A row's final style is an ordered list of optional fragments patched
//! onto each other. None of this feeds back into table logic.

use std::fmt;
use std::sync::Arc;

use ratatui::style::Style;

/// Function computing a row's style from its record and display index.
pub type RowStyleFn<T> = Arc<dyn Fn(&T, usize) -> Style + Send + Sync>;

/// Caller-supplied style for table rows.
pub enum RowStyle<T> {
    /// Same style for every row.
    Static(Style),
    /// Style computed per row.
    PerRow(RowStyleFn<T>),
}

impl<T> RowStyle<T> {
    /// Style every row computes through `f`.
    pub fn per_row<F>(f: F) -> Self
    where
        F: Fn(&T, usize) -> Style + Send + Sync + 'static,
    {
        Self::PerRow(Arc::new(f))
    }

    /// Resolve the style of `record` shown at `index`.
    pub fn resolve(&self, record: &T, index: usize) -> Style {
        match self {
            Self::Static(style) => *style,
            Self::PerRow(f) => f(record, index),
        }
    }
}

impl<T> From<Style> for RowStyle<T> {
    fn from(style: Style) -> Self {
        Self::Static(style)
    }
}

impl<T> Clone for RowStyle<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(style) => Self::Static(*style),
            Self::PerRow(f) => Self::PerRow(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for RowStyle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(style) => f.debug_tuple("Static").field(style).finish(),
            Self::PerRow(_) => f.write_str("PerRow(..)"),
        }
    }
}

/// Patch style fragments together in order; later fragments win.
pub fn compose<I>(fragments: I) -> Style
where
    I: IntoIterator<Item = Option<Style>>,
{
    fragments
        .into_iter()
        .flatten()
        .fold(Style::default(), |acc, fragment| acc.patch(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    #[test]
    fn test_compose_skips_missing_fragments() {
        let style = compose([
            Some(Style::default().fg(Color::White)),
            None,
            Some(Style::default().bg(Color::Blue)),
        ]);
        assert_eq!(style, Style::default().fg(Color::White).bg(Color::Blue));
    }

    #[test]
    fn test_compose_later_wins() {
        let style = compose([
            Some(Style::default().bg(Color::Blue)),
            Some(Style::default().bg(Color::Red).add_modifier(Modifier::BOLD)),
        ]);
        assert_eq!(style.bg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_per_row_style() {
        let hook: RowStyle<u32> = RowStyle::per_row(|value: &u32, index| {
            if *value > 10 || index == 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            }
        });
        assert_eq!(hook.resolve(&20, 3).fg, Some(Color::Red));
        assert_eq!(hook.resolve(&1, 0).fg, Some(Color::Red));
        assert_eq!(hook.resolve(&1, 2).fg, None);

        let fixed: RowStyle<u32> = Style::default().fg(Color::Green).into();
        assert_eq!(fixed.resolve(&0, 0).fg, Some(Color::Green));
    }
}
