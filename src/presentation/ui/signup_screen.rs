//! Registration screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::{ModalLayer, SignUpRequest, SignUpResponse};
use crate::domain::entities::{Email, is_name_char};
use crate::domain::errors::{AuthError, AuthFlow};
use crate::domain::{Alert, PasswordPolicy};
use crate::presentation::events::EventHandler;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ModalKeyOutcome, ModalView, PasswordChecklist, StatusBar, TextInput, handle_modal_key,
};

const EMAIL_HINT: &str = "Formato de correo inválido.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignUpField {
    FirstName,
    LastName,
    Email,
    Password,
    Confirmation,
}

impl SignUpField {
    const ORDER: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Password,
        Self::Confirmation,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What acknowledging a registration alert leads to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignUpFollowUp {
    /// Stay on the form.
    #[default]
    Stay,
    /// Return to login.
    GoLogin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SignUpAction {
    None,
    Submit,
    GoLogin,
}

/// Registration screen UI.
pub struct SignUpScreen {
    first_name: TextInput,
    last_name: TextInput,
    email: TextInput,
    password: TextInput,
    confirmation: TextInput,
    focus: SignUpField,
    email_hint: Option<&'static str>,
    policy: PasswordPolicy,
    busy: bool,
    modals: ModalLayer<SignUpFollowUp>,
    theme: Theme,
}

impl SignUpScreen {
    const HINTS: [(&'static str, &'static str); 4] = [
        ("Tab", "siguiente"),
        ("Enter", "registrarse"),
        ("F2", "ver contraseña"),
        ("Esc", "volver"),
    ];

    /// Creates new registration screen.
    #[must_use]
    pub fn new(theme: Theme, policy: PasswordPolicy) -> Self {
        let input = |label: &str| TextInput::new(label).accent(theme.accent);
        let mut screen = Self {
            first_name: input(" Nombre ").filter(is_name_char),
            last_name: input(" Apellido ").filter(is_name_char),
            email: input(" Correo electrónico ").placeholder("usuario@example.com"),
            password: input(" Contraseña ").password(),
            confirmation: input(" Confirmar contraseña ").password(),
            focus: SignUpField::FirstName,
            email_hint: None,
            policy,
            busy: false,
            modals: ModalLayer::new(),
            theme,
        };
        screen.set_focus(SignUpField::FirstName);
        screen
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Marks a sign-up request as in flight.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    #[must_use]
    pub const fn modals(&self) -> &ModalLayer<SignUpFollowUp> {
        &self.modals
    }

    #[must_use]
    pub const fn email_hint(&self) -> Option<&'static str> {
        self.email_hint
    }

    /// Returns the form contents.
    #[must_use]
    pub fn request(&self) -> SignUpRequest {
        SignUpRequest {
            first_name: self.first_name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
            confirmation: self.confirmation.value().to_string(),
        }
    }

    fn input_mut(&mut self, field: SignUpField) -> &mut TextInput {
        match field {
            SignUpField::FirstName => &mut self.first_name,
            SignUpField::LastName => &mut self.last_name,
            SignUpField::Email => &mut self.email,
            SignUpField::Password => &mut self.password,
            SignUpField::Confirmation => &mut self.confirmation,
        }
    }

    fn set_focus(&mut self, field: SignUpField) {
        if self.focus == SignUpField::Email && field != SignUpField::Email {
            self.email_hint = (!Email::is_well_formed(self.email.value())).then_some(EMAIL_HINT);
        }
        self.focus = field;
        for candidate in SignUpField::ORDER {
            self.input_mut(candidate).set_focused(candidate == field);
        }
    }

    fn show_checklist(&self) -> bool {
        self.focus == SignUpField::Password || !self.password.value().is_empty()
    }

    /// Shows the outcome of a registration attempt.
    pub fn on_sign_up_result(&mut self, result: Result<SignUpResponse, AuthError>) {
        self.busy = false;
        match result {
            Ok(_) => {
                self.password.clear();
                self.confirmation.clear();
                self.modals.show(
                    Alert::success("Registro exitoso", "Inicia sesión."),
                    SignUpFollowUp::GoLogin,
                );
            }
            Err(err) => {
                self.modals.notify(Alert::error(
                    " ⚠️ Atención",
                    err.user_message(AuthFlow::SignUp),
                ));
            }
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> SignUpAction {
        match handle_modal_key(&mut self.modals, key) {
            ModalKeyOutcome::Inactive => {}
            ModalKeyOutcome::Consumed | ModalKeyOutcome::Resolved(SignUpFollowUp::Stay) => {
                return SignUpAction::None;
            }
            ModalKeyOutcome::Resolved(SignUpFollowUp::GoLogin) => return SignUpAction::GoLogin,
        }

        if self.busy {
            return SignUpAction::None;
        }

        if EventHandler::is_focus_next(&key) {
            self.set_focus(self.focus.next());
            return SignUpAction::None;
        }
        if EventHandler::is_focus_prev(&key) {
            self.set_focus(self.focus.prev());
            return SignUpAction::None;
        }

        match key.code {
            KeyCode::Enter if self.focus == SignUpField::Confirmation => {
                return SignUpAction::Submit;
            }
            KeyCode::Enter => self.set_focus(self.focus.next()),
            KeyCode::Esc => return SignUpAction::GoLogin,
            KeyCode::F(2) => {
                let masked = self.password.is_masked();
                self.password.set_masked(!masked);
                self.confirmation.set_masked(!masked);
            }
            _ => {
                let field = self.focus;
                if self.input_mut(field).handle_key(key) && field == SignUpField::Email {
                    self.email_hint = None;
                }
            }
        }

        SignUpAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let [body, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let checklist = PasswordChecklist::new(
            &self.policy,
            self.password.value(),
            self.confirmation.value(),
            &self.theme,
        );
        let checklist_height = if self.show_checklist() {
            checklist.height()
        } else {
            0
        };

        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(16 + checklist_height),
            Constraint::Fill(1),
        ])
        .areas(body);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(Span::styled(" Crear cuenta ", self.theme.title_style))
            .title_alignment(Alignment::Center);
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [names, email, hint, password, confirmation, rules, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(checklist_height),
            Constraint::Length(1),
        ])
        .areas(inner);

        let [first, last] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(names);
        (&self.first_name).render(first, buf);
        (&self.last_name).render(last, buf);
        (&self.email).render(email, buf);

        if let Some(text) = self.email_hint {
            Paragraph::new(Span::styled(text, Style::default().fg(self.theme.error)))
                .render(hint, buf);
        }

        (&self.password).render(password, buf);
        (&self.confirmation).render(confirmation, buf);

        if self.show_checklist() {
            checklist.render(rules, buf);
        }

        if self.busy {
            Paragraph::new(Span::styled(
                "Registrando...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .render(status, buf);
        }

        (&StatusBar::new(&Self::HINTS, &self.theme)).render(footer, buf);

        if let Some(modal) = self.modals.active() {
            ModalView::new(modal, &self.theme).render(area, buf);
        }
    }
}

impl Default for SignUpScreen {
    fn default() -> Self {
        Self::new(Theme::default(), PasswordPolicy::default())
    }
}

impl Widget for &SignUpScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}
