//! Centered alert and confirmation popups.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::application::{ActiveModal, ModalLayer};
use crate::domain::AlertKind;
use crate::presentation::theme::Theme;

const MAX_POPUP_WIDTH: u16 = 56;

/// Result of routing a key through a screen's modal layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalKeyOutcome<F> {
    /// No modal is visible, the screen handles the key.
    Inactive,
    /// Key was swallowed by the visible modal.
    Consumed,
    /// Modal closed and produced its follow-up.
    Resolved(F),
}

/// Routes a key to the visible modal, if any.
///
/// Alerts close on Enter, Space or Esc. Confirms accept Enter, `s` or `y`
/// and cancel on Esc or `n`. Every other key is swallowed while a modal is up.
pub fn handle_modal_key<F>(layer: &mut ModalLayer<F>, key: KeyEvent) -> ModalKeyOutcome<F> {
    let resolved = match layer.active() {
        None => return ModalKeyOutcome::Inactive,
        Some(ActiveModal::Alert(_)) => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => layer.acknowledge(),
            _ => None,
        },
        Some(ActiveModal::Confirm(_)) => match key.code {
            KeyCode::Enter | KeyCode::Char('s' | 'S' | 'y' | 'Y') => layer.confirm(),
            KeyCode::Esc | KeyCode::Char('n' | 'N') => layer.cancel(),
            _ => None,
        },
    };

    resolved.map_or(ModalKeyOutcome::Consumed, ModalKeyOutcome::Resolved)
}

/// Renders whichever modal a layer currently shows.
pub struct ModalView<'a> {
    modal: ActiveModal<'a>,
    theme: &'a Theme,
}

impl<'a> ModalView<'a> {
    #[must_use]
    pub fn new(modal: ActiveModal<'a>, theme: &'a Theme) -> Self {
        Self { modal, theme }
    }

    fn color(&self) -> Color {
        match self.modal {
            ActiveModal::Alert(alert) => match alert.kind {
                AlertKind::Info => self.theme.accent,
                AlertKind::Success => self.theme.success,
                AlertKind::Error => self.theme.error,
            },
            ActiveModal::Confirm(_) => self.theme.accent,
        }
    }

    fn parts(&self) -> (&'a str, &'a str, Line<'a>) {
        let button = |label: &'a str, color: Color| {
            Span::styled(
                format!("[ {label} ]"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        };
        match self.modal {
            ActiveModal::Alert(alert) => (
                alert.title.as_str(),
                alert.message.as_str(),
                Line::from(button(&alert.button_label, self.color())),
            ),
            ActiveModal::Confirm(prompt) => (
                prompt.title.as_str(),
                prompt.message.as_str(),
                Line::from(vec![
                    button(&prompt.cancel_label, Color::Gray),
                    Span::raw("   "),
                    button(&prompt.confirm_label, self.color()),
                ]),
            ),
        }
    }
}

impl Widget for ModalView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, message, buttons) = self.parts();
        let title = format!(" {title} ");

        let max_width = MAX_POPUP_WIDTH.min(area.width.saturating_sub(2));
        let width = u16::try_from(message.width())
            .unwrap_or(u16::MAX)
            .max(u16::try_from(title.width()).unwrap_or(0))
            .max(u16::try_from(buttons.width()).unwrap_or(0))
            .saturating_add(4)
            .min(max_width);

        let inner_width = width.saturating_sub(2).max(1);
        let content_width = u16::try_from(message.width()).unwrap_or(u16::MAX);
        let lines = content_width.div_ceil(inner_width).max(1);

        // message, blank line, buttons and borders
        let height = lines.saturating_add(4).min(area.height);

        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let popup_area = area.intersection(Rect::new(x, y, width, height));
        if popup_area.area() == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                title,
                Style::default().fg(self.color()).add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(self.color()));

        let text = vec![
            Line::from(message),
            Line::default(),
            buttons.alignment(Alignment::Center),
        ];

        Clear.render(popup_area, buf);
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(popup_area, buf);
    }
}
