//! Bottom bar with key hints and the signed-in user.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::theme::Theme;

/// Key hint bar widget.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    hints: &'a [(&'a str, &'a str)],
    right: String,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Creates bar from `(key, action)` pairs.
    #[must_use]
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self {
            hints,
            right: String::new(),
            theme,
        }
    }

    /// Sets right-aligned content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    fn hint_spans(&self) -> Vec<Span<'a>> {
        let key_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(" {action}"), self.theme.dimmed_style));
        }
        spans
    }
}

impl Widget for &StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let mut spans = self.hint_spans();

        let left_len: usize = spans.iter().map(|span| span.content.width()).sum();
        let right_len = self.right.width();
        let padding = width.saturating_sub(left_len + right_len);
        if padding > 0 && !self.right.is_empty() {
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(self.right.clone(), self.theme.title_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_hints_and_user() {
        let theme = Theme::default();
        let hints = [("Enter", "abrir"), ("Esc", "volver")];
        let bar = StatusBar::new(&hints, &theme).right("Ana");

        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        (&bar).render(area, &mut buf);

        let text: String = buf.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.starts_with("Enter abrir  Esc volver"));
        assert!(text.trim_end().ends_with("Ana"));
    }
}
