//! Profile screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::application::ModalLayer;
use crate::domain::errors::{AuthError, AuthFlow, MediaError};
use crate::domain::ports::PickedImage;
use crate::domain::{Alert, ImageRef, UserProfile};
use crate::infrastructure::config::ProfileConfig;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{ModalKeyOutcome, ModalView, StatusBar, handle_modal_key};

const NOT_AVAILABLE: &str = "No disponible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ProfileAction {
    None,
    ChangePhoto,
    GoHome,
    SignOut,
}

/// Profile screen UI.
pub struct ProfileScreen {
    user: Option<UserProfile>,
    avatar: Option<ImageRef>,
    details: ProfileConfig,
    busy: bool,
    modals: ModalLayer<()>,
    theme: Theme,
}

impl ProfileScreen {
    const HINTS: [(&'static str, &'static str); 3] = [
        ("c", "cambiar foto"),
        ("Tab", "inicio"),
        ("s", "salir"),
    ];

    #[must_use]
    pub fn new(
        theme: Theme,
        user: Option<UserProfile>,
        avatar: Option<ImageRef>,
        details: ProfileConfig,
    ) -> Self {
        Self {
            user,
            avatar,
            details,
            busy: false,
            modals: ModalLayer::new(),
            theme,
        }
    }

    #[must_use]
    pub const fn avatar(&self) -> Option<&ImageRef> {
        self.avatar.as_ref()
    }

    #[must_use]
    pub const fn modals(&self) -> &ModalLayer<()> {
        &self.modals
    }

    /// Marks a sign-out request as in flight.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Applies a media picker result. Cancellation keeps the current avatar.
    pub fn on_avatar_picked(&mut self, result: Result<Option<PickedImage>, MediaError>) {
        match result {
            Ok(Some(picked)) => self.avatar = Some(ImageRef::Local(picked.path)),
            Ok(None) => {}
            Err(err) => self
                .modals
                .notify(Alert::error("Error", err.user_message())),
        }
    }

    /// Shows a failed sign-out. Success is handled by navigation.
    pub fn on_sign_out_result(&mut self, result: Result<(), AuthError>) {
        self.busy = false;
        if let Err(err) = result {
            self.modals.notify(Alert::error(
                "⚠️ Atención",
                err.user_message(AuthFlow::SignOut),
            ));
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> ProfileAction {
        if handle_modal_key(&mut self.modals, key) != ModalKeyOutcome::Inactive {
            return ProfileAction::None;
        }
        if self.busy {
            return ProfileAction::None;
        }

        match key.code {
            KeyCode::Char('c') | KeyCode::Enter => ProfileAction::ChangePhoto,
            KeyCode::Tab | KeyCode::Char('i') | KeyCode::Esc => ProfileAction::GoHome,
            KeyCode::Char('s') => {
                self.busy = true;
                ProfileAction::SignOut
            }
            _ => ProfileAction::None,
        }
    }

    fn personal_data(&self) -> [(&'static str, String); 4] {
        let or_missing = |value: Option<&String>| {
            value
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        };
        let name = self
            .user
            .as_ref()
            .and_then(|user| user.display_name.as_ref());
        [
            ("Nombre", or_missing(name)),
            ("Teléfono", or_missing(self.details.phone.as_ref())),
            ("Dirección", or_missing(self.details.address.as_ref())),
            ("CUIT", or_missing(self.details.tax_id.as_ref())),
        ]
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let [header, avatar, identity, data, _, tabs, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(vec![
            Line::from(Span::styled("★ Pchelá", self.theme.title_style)),
            Line::from(Span::styled("Universal Beauty", self.theme.dimmed_style)),
        ])
        .render(header, buf);

        let picture = self
            .avatar
            .as_ref()
            .map_or_else(|| "👤".to_string(), |image| format!("🖼 {}", image.display_name()));
        Paragraph::new(vec![
            Line::default(),
            Line::from(picture),
            Line::from(Span::styled("Cambiar foto", self.theme.title_style)),
        ])
        .alignment(Alignment::Center)
        .render(avatar, buf);

        let (name, email) = self.user.as_ref().map_or(("Usuario", ""), |user| {
            (user.display_name_or_default(), user.email.as_str())
        });
        Paragraph::new(vec![
            Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(email, self.theme.dimmed_style)),
        ])
        .alignment(Alignment::Center)
        .render(identity, buf);

        let lines: Vec<Line> = self
            .personal_data()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), self.theme.dimmed_style),
                    Span::raw(value),
                ])
            })
            .collect();
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent))
                    .title(Span::styled(" Datos Personales ", self.theme.title_style)),
            )
            .render(data, buf);

        Paragraph::new(Line::from(vec![
            Span::styled(" Inicio ", self.theme.dimmed_style),
            Span::styled("│", self.theme.dimmed_style),
            Span::styled(" Salir ", self.theme.title_style),
        ]))
        .render(tabs, buf);

        let status = if self.busy { "Cerrando sesión..." } else { "" };
        (&StatusBar::new(&Self::HINTS, &self.theme).right(status)).render(footer, buf);

        if let Some(modal) = self.modals.active() {
            ModalView::new(modal, &self.theme).render(area, buf);
        }
    }
}

impl Widget for &ProfileScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}
