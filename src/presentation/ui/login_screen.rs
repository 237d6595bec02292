//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::{ModalLayer, SignInRequest, SignInResponse};
use crate::domain::errors::{AuthError, AuthFlow};
use crate::domain::Alert;
use crate::presentation::events::EventHandler;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ModalKeyOutcome, ModalView, StatusBar, TextInput, handle_modal_key,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Email,
    Password,
}

/// What acknowledging a login alert leads to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginFollowUp {
    /// Stay on the form.
    #[default]
    Stay,
    /// Enter the app.
    GoHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LoginAction {
    None,
    Submit,
    OpenSignUp,
    GoHome,
    Quit,
}

/// Login screen UI.
pub struct LoginScreen {
    email_input: TextInput,
    password_input: TextInput,
    focus: LoginField,
    remember: bool,
    busy: bool,
    modals: ModalLayer<LoginFollowUp>,
    theme: Theme,
}

impl LoginScreen {
    const HINTS: [(&'static str, &'static str); 5] = [
        ("Enter", "ingresar"),
        ("F2", "ver contraseña"),
        ("Ctrl+R", "recordar"),
        ("Ctrl+N", "registrarse"),
        ("Esc", "salir"),
    ];

    /// Creates new login screen.
    #[must_use]
    pub fn new(theme: Theme, remember: bool) -> Self {
        let mut email_input = TextInput::new(" Correo electrónico ")
            .placeholder("usuario@example.com")
            .accent(theme.accent);
        email_input.set_focused(true);
        let password_input = TextInput::new(" Contraseña ")
            .password()
            .accent(theme.accent);

        Self {
            email_input,
            password_input,
            focus: LoginField::Email,
            remember,
            busy: false,
            modals: ModalLayer::new(),
            theme,
        }
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub const fn remember(&self) -> bool {
        self.remember
    }

    /// Marks a sign-in request as in flight.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    #[must_use]
    pub const fn modals(&self) -> &ModalLayer<LoginFollowUp> {
        &self.modals
    }

    fn set_focus(&mut self, field: LoginField) {
        self.focus = field;
        self.email_input.set_focused(field == LoginField::Email);
        self.password_input.set_focused(field == LoginField::Password);
    }

    fn toggle_focus(&mut self) {
        let next = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        self.set_focus(next);
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Email => &mut self.email_input,
            LoginField::Password => &mut self.password_input,
        }
    }

    /// Returns the form contents.
    #[must_use]
    pub fn request(&self) -> SignInRequest {
        let request = SignInRequest::new(self.email_input.value(), self.password_input.value());
        if self.remember {
            request
        } else {
            request.without_persistence()
        }
    }

    /// Shows the outcome of a sign-in attempt.
    pub fn on_sign_in_result(&mut self, result: Result<SignInResponse, AuthError>) {
        self.busy = false;
        match result {
            Ok(response) => {
                self.password_input.clear();
                let name = response.user.display_name_or_default();
                self.modals.show(
                    Alert::success("Bienvenido 🎉", format!("Te logueaste como {name}")),
                    LoginFollowUp::GoHome,
                );
            }
            Err(err) => {
                let title = if err.is_validation() {
                    "Atención ⚠️"
                } else {
                    "Error"
                };
                self.modals
                    .notify(Alert::error(title, err.user_message(AuthFlow::SignIn)));
            }
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        match handle_modal_key(&mut self.modals, key) {
            ModalKeyOutcome::Inactive => {}
            ModalKeyOutcome::Consumed | ModalKeyOutcome::Resolved(LoginFollowUp::Stay) => {
                return LoginAction::None;
            }
            ModalKeyOutcome::Resolved(LoginFollowUp::GoHome) => return LoginAction::GoHome,
        }

        if self.busy {
            return LoginAction::None;
        }

        if EventHandler::is_focus_next(&key) || EventHandler::is_focus_prev(&key) {
            self.toggle_focus();
            return LoginAction::None;
        }

        match key.code {
            KeyCode::Enter if self.focus == LoginField::Email => {
                self.set_focus(LoginField::Password);
            }
            KeyCode::Enter => return LoginAction::Submit,
            KeyCode::Esc => return LoginAction::Quit,
            KeyCode::F(2) => {
                let masked = self.password_input.is_masked();
                self.password_input.set_masked(!masked);
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.remember = !self.remember;
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return LoginAction::OpenSignUp;
            }
            _ => {
                self.focused_input().handle_key(key);
            }
        }

        LoginAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let [body, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(15),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(body);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(Span::styled(" Pchelá ", self.theme.title_style))
            .title_alignment(Alignment::Center);

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let areas = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<8>(inner);

        Paragraph::new("Iniciar sesión")
            .style(self.theme.title_style)
            .alignment(Alignment::Center)
            .render(areas[0], buf);

        (&self.email_input).render(areas[2], buf);
        (&self.password_input).render(areas[3], buf);

        let checkbox = if self.remember { "[x]" } else { "[ ]" };
        Paragraph::new(Line::from(vec![
            Span::styled(checkbox, Style::default().fg(self.theme.accent)),
            Span::raw(" Recordar sesión"),
        ]))
        .render(areas[5], buf);

        if self.busy {
            Paragraph::new(Span::styled(
                "Iniciando sesión...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .render(areas[7], buf);
        } else {
            Paragraph::new(Line::from(vec![
                Span::styled("¿No tienes cuenta? ", self.theme.dimmed_style),
                Span::styled("Regístrate (Ctrl+N)", self.theme.title_style),
            ]))
            .render(areas[7], buf);
        }

        (&StatusBar::new(&Self::HINTS, &self.theme)).render(footer, buf);

        if let Some(modal) = self.modals.active() {
            ModalView::new(modal, &self.theme).render(area, buf);
        }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new(Theme::default(), true)
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SessionSource;
    use crate::domain::errors::{FormField, ProviderCode, ValidationError};
    use crate::domain::UserProfile;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn visible_alert(screen: &LoginScreen) -> (String, String) {
        screen
            .modals()
            .active()
            .map(|modal| (modal.title().to_string(), modal.message().to_string()))
            .unwrap_or_default()
    }

    #[test]
    fn test_initial_state() {
        let screen = LoginScreen::default();
        assert!(!screen.is_busy());
        assert!(screen.remember());
        assert!(!screen.modals().is_active());
    }

    #[test]
    fn test_submit_carries_form() {
        let mut screen = LoginScreen::default();
        type_text(&mut screen, "ana@pchela.com");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "Secreta1");
        screen.handle_key(ctrl('r'));

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
        let request = screen.request();
        assert_eq!(request.email, "ana@pchela.com");
        assert_eq!(request.password, "Secreta1");
        assert!(!request.remember);
    }

    #[test]
    fn test_enter_on_email_moves_to_password() {
        let mut screen = LoginScreen::default();
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
    }

    #[test]
    fn test_shortcuts() {
        let mut screen = LoginScreen::default();
        assert_eq!(screen.handle_key(ctrl('n')), LoginAction::OpenSignUp);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), LoginAction::Quit);

        screen.handle_key(key(KeyCode::Tab));
        assert!(screen.password_input.is_masked());
        screen.handle_key(key(KeyCode::F(2)));
        assert!(!screen.password_input.is_masked());
    }

    #[test]
    fn test_busy_ignores_keys() {
        let mut screen = LoginScreen::default();
        screen.set_busy(true);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), LoginAction::None);
        assert_eq!(screen.email_input.value(), "");
    }

    #[test]
    fn test_success_alert_leads_home() {
        let mut screen = LoginScreen::default();
        screen.set_busy(true);
        let user = UserProfile::new("u1", "ana@pchela.com").with_display_name("Ana");
        screen.on_sign_in_result(Ok(SignInResponse::new(user, SessionSource::Credentials, true)));

        assert!(!screen.is_busy());
        assert_eq!(
            visible_alert(&screen),
            ("Bienvenido 🎉".to_string(), "Te logueaste como Ana".to_string())
        );
        assert_eq!(screen.handle_key(key(KeyCode::Char('x'))), LoginAction::None);
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::GoHome);
    }

    #[test]
    fn test_success_without_name_uses_default() {
        let mut screen = LoginScreen::default();
        let user = UserProfile::new("u1", "ana@pchela.com");
        screen.on_sign_in_result(Ok(SignInResponse::new(user, SessionSource::Credentials, false)));

        assert_eq!(visible_alert(&screen).1, "Te logueaste como Usuario");
    }

    #[test]
    fn test_validation_error_alert() {
        let mut screen = LoginScreen::default();
        screen.on_sign_in_result(Err(ValidationError::required(FormField::Email).into()));

        assert_eq!(
            visible_alert(&screen),
            ("Atención ⚠️".to_string(), "Por favor ingrese ambos campos.".to_string())
        );
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
        assert!(!screen.modals().is_active());
    }

    #[test]
    fn test_unmapped_error_shows_fallback() {
        let mut screen = LoginScreen::default();
        screen.on_sign_in_result(Err(AuthError::provider(
            ProviderCode::from_code("auth/too-many-requests"),
            "TOO_MANY_ATTEMPTS_TRY_LATER",
        )));

        assert_eq!(
            visible_alert(&screen),
            ("Error".to_string(), "Hubo un problema al iniciar sesión.".to_string())
        );
    }
}
