//! Home screen with the section cards.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Tabs, Widget},
};

use crate::application::ModalLayer;
use crate::domain::errors::{AuthError, AuthFlow};
use crate::domain::{Alert, ConfirmPrompt, UserProfile};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{ModalKeyOutcome, ModalView, StatusBar, handle_modal_key};

/// Home section card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Card title.
    pub title: &'static str,
    /// Fields the section manages.
    pub subtitle: &'static str,
    /// Whether the card opens the product list.
    pub opens_products: bool,
}

impl Section {
    const fn new(title: &'static str, subtitle: &'static str) -> Self {
        Self {
            title,
            subtitle,
            opens_products: false,
        }
    }
}

/// Cards in display order.
pub const SECTIONS: [Section; 6] = [
    Section::new("Clientes", "Nombre, Apellido, Dni, Teléfono"),
    Section::new("Proveedores", "Nombre, Cuit/Cuil, Dirección"),
    Section::new("Compras", "Fecha, Monto"),
    Section::new("Ventas", "Fecha, Monto, Estado"),
    Section {
        title: "Productos",
        subtitle: "Nombre, Precio, Stock",
        opens_products: true,
    },
    Section::new("Caja", "Fecha, Hora, Monto"),
];

/// Follow-up of a home modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum HomeFollowUp {
    #[default]
    None,
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum HomeAction {
    None,
    OpenProducts,
    OpenProfile,
    SignOut,
}

/// Home screen UI.
pub struct HomeScreen {
    user_name: String,
    selected: usize,
    busy: bool,
    modals: ModalLayer<HomeFollowUp>,
    theme: Theme,
}

impl HomeScreen {
    const HINTS: [(&'static str, &'static str); 4] = [
        ("↑↓", "elegir"),
        ("Enter", "abrir"),
        ("Tab", "perfil"),
        ("s", "salir"),
    ];

    #[must_use]
    pub fn new(theme: Theme, user: Option<&UserProfile>) -> Self {
        Self {
            user_name: user
                .map_or("Usuario", UserProfile::display_name_or_default)
                .to_string(),
            selected: 0,
            busy: false,
            modals: ModalLayer::new(),
            theme,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Section {
        SECTIONS[self.selected]
    }

    #[must_use]
    pub const fn modals(&self) -> &ModalLayer<HomeFollowUp> {
        &self.modals
    }

    /// Marks a sign-out request as in flight.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
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

    fn ask_sign_out(&mut self) {
        let prompt = ConfirmPrompt::new("Cerrar sesión", "¿Estás seguro que deseas cerrar sesión?")
            .confirm_label("Salir");
        if let Err(err) = self.modals.ask(prompt, HomeFollowUp::SignOut, HomeFollowUp::None) {
            tracing::debug!(error = %err, "Logout prompt refused");
        }
    }

    fn open_selected(&mut self) -> HomeAction {
        let section = self.selected();
        if section.opens_products {
            return HomeAction::OpenProducts;
        }
        self.modals
            .notify(Alert::info(section.title, format!("Abrir {}", section.title)));
        HomeAction::None
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> HomeAction {
        match handle_modal_key(&mut self.modals, key) {
            ModalKeyOutcome::Inactive => {}
            ModalKeyOutcome::Resolved(HomeFollowUp::SignOut) => {
                self.busy = true;
                return HomeAction::SignOut;
            }
            ModalKeyOutcome::Consumed | ModalKeyOutcome::Resolved(HomeFollowUp::None) => {
                return HomeAction::None;
            }
        }

        if self.busy {
            return HomeAction::None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(SECTIONS.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % SECTIONS.len();
            }
            KeyCode::Enter => return self.open_selected(),
            KeyCode::Tab | KeyCode::Char('p') => return HomeAction::OpenProfile,
            KeyCode::Char('s') | KeyCode::Esc => self.ask_sign_out(),
            _ => {}
        }
        HomeAction::None
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let [brand, logout] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(8)]).areas(area);

        Paragraph::new(vec![
            Line::from(Span::styled("★ Pchelá", self.theme.title_style)),
            Line::from(Span::styled("Universal Beauty", self.theme.dimmed_style)),
        ])
        .render(brand, buf);

        Paragraph::new(Span::styled("Salir ⏻", self.theme.title_style))
            .alignment(Alignment::Right)
            .render(logout, buf);
    }

    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = SECTIONS
            .iter()
            .map(|section| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        section.title,
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(section.subtitle, self.theme.dimmed_style)),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent)),
            )
            .highlight_style(self.theme.selection_style)
            .highlight_symbol("▶ ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let [header, welcome, cards, tabs, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(header, buf);

        Paragraph::new(vec![
            Line::default(),
            Line::from("Bienvenido/a"),
            Line::from(Span::styled(self.user_name.as_str(), self.theme.title_style)),
        ])
        .alignment(Alignment::Center)
        .render(welcome, buf);

        self.render_cards(cards, buf);

        Tabs::new(["Inicio", "Perfil"])
            .select(0)
            .style(self.theme.dimmed_style)
            .highlight_style(self.theme.title_style)
            .render(tabs, buf);

        let status = if self.busy { "Cerrando sesión..." } else { "" };
        (&StatusBar::new(&Self::HINTS, &self.theme).right(status)).render(footer, buf);

        if let Some(modal) = self.modals.active() {
            ModalView::new(modal, &self.theme).render(area, buf);
        }
    }
}

impl Widget for &HomeScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ActiveModal;
    use crate::domain::errors::ProviderCode;
    use crossterm::event::KeyModifiers;
    use test_case::test_case;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen() -> HomeScreen {
        let user = UserProfile::new("u1", "ana@pchela.com").with_display_name("Ana");
        HomeScreen::new(Theme::default(), Some(&user))
    }

    fn select(screen: &mut HomeScreen, title: &str) {
        while screen.selected().title != title {
            screen.handle_key(key(KeyCode::Down));
        }
    }

    #[test]
    fn test_products_card_navigates() {
        let mut screen = screen();
        select(&mut screen, "Productos");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), HomeAction::OpenProducts);
        assert!(!screen.modals().is_active());
    }

    #[test_case("Clientes" ; "clientes")]
    #[test_case("Proveedores" ; "proveedores")]
    #[test_case("Compras" ; "compras")]
    #[test_case("Ventas" ; "ventas")]
    #[test_case("Caja" ; "caja")]
    fn test_other_cards_show_info_alert(title: &str) {
        let mut screen = screen();
        select(&mut screen, title);
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), HomeAction::None);

        let Some(ActiveModal::Alert(alert)) = screen.modals().active() else {
            panic!("expected alert");
        };
        assert_eq!(alert.title, title);
        assert_eq!(alert.message, format!("Abrir {title}"));
    }

    #[test]
    fn test_selection_wraps() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Up));
        assert_eq!(screen.selected().title, "Caja");
        screen.handle_key(key(KeyCode::Down));
        assert_eq!(screen.selected().title, "Clientes");
    }

    #[test]
    fn test_logout_requires_confirmation() {
        let mut screen = screen();
        assert_eq!(screen.handle_key(key(KeyCode::Char('s'))), HomeAction::None);

        let Some(ActiveModal::Confirm(prompt)) = screen.modals().active() else {
            panic!("expected confirm");
        };
        assert_eq!(prompt.confirm_label, "Salir");

        assert_eq!(screen.handle_key(key(KeyCode::Esc)), HomeAction::None);
        assert!(!screen.modals().is_active());

        screen.handle_key(key(KeyCode::Char('s')));
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), HomeAction::SignOut);
        assert_eq!(screen.handle_key(key(KeyCode::Tab)), HomeAction::None);
    }

    #[test]
    fn test_sign_out_failure_alert() {
        let mut screen = screen();
        screen.set_busy(true);
        screen.on_sign_out_result(Err(AuthError::provider(
            ProviderCode::Other("auth/internal-error".to_string()),
            "boom",
        )));

        let modal = screen.modals().active().unwrap();
        assert_eq!(modal.message(), "Hubo un problema al cerrar sesión.");
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.handle_key(key(KeyCode::Tab)), HomeAction::OpenProfile);
    }
}
