//! Live password checklist shown under the sign-up form.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::PasswordPolicy;
use crate::presentation::theme::Theme;

/// Checklist of policy rules plus a confirmation match indicator.
pub struct PasswordChecklist<'a> {
    policy: &'a PasswordPolicy,
    password: &'a str,
    confirmation: &'a str,
    theme: &'a Theme,
}

impl<'a> PasswordChecklist<'a> {
    #[must_use]
    pub fn new(
        policy: &'a PasswordPolicy,
        password: &'a str,
        confirmation: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            policy,
            password,
            confirmation,
            theme,
        }
    }

    /// Number of rows the checklist needs.
    #[must_use]
    pub fn height(&self) -> u16 {
        u16::try_from(self.policy.rules().len() + 1).unwrap_or(u16::MAX)
    }

    fn entry(&self, satisfied: bool, label: String) -> Line<'static> {
        let (mark, color) = if satisfied {
            ("✓", self.theme.success)
        } else {
            ("✗", Color::DarkGray)
        };
        Line::from(vec![
            Span::styled(format!("{mark} "), Style::default().fg(color)),
            Span::styled(label, Style::default().fg(color)),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = self
            .policy
            .evaluate(self.password)
            .into_iter()
            .map(|(rule, satisfied)| self.entry(satisfied, rule.label()))
            .collect();

        let matches = !self.confirmation.is_empty() && self.password == self.confirmation;
        lines.push(self.entry(matches, "Las contraseñas coinciden".to_string()));
        lines
    }
}

impl Widget for PasswordChecklist<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines()).render(area, buf);
    }
}
