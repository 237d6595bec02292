//! Product list screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::application::{CatalogChange, ModalLayer, ProductCatalog};
use crate::domain::errors::CatalogError;
use crate::domain::{Product, ProductId};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{ModalKeyOutcome, ModalView, StatusBar, handle_modal_key};

/// Follow-up of a product list modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ProductsFollowUp {
    #[default]
    None,
    Delete(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ProductsAction {
    None,
    Add,
    Edit(ProductId),
    Delete(ProductId),
    Back,
}

/// Product list screen state.
pub struct ProductsScreen {
    selected: usize,
    modals: ModalLayer<ProductsFollowUp>,
    theme: Theme,
}

impl ProductsScreen {
    const HINTS: [(&'static str, &'static str); 5] = [
        ("↑↓", "elegir"),
        ("a", "agregar"),
        ("e", "editar"),
        ("d", "eliminar"),
        ("Esc", "volver"),
    ];

    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            selected: 0,
            modals: ModalLayer::new(),
            theme,
        }
    }

    #[must_use]
    pub const fn modals(&self) -> &ModalLayer<ProductsFollowUp> {
        &self.modals
    }

    /// Returns the highlighted product.
    #[must_use]
    pub fn selected<'a>(&self, catalog: &'a ProductCatalog) -> Option<&'a Product> {
        catalog.list().get(self.selected)
    }

    /// Highlights the product with the given id, if listed.
    pub fn select(&mut self, catalog: &ProductCatalog, id: ProductId) {
        if let Some(index) = catalog.list().iter().position(|p| p.id() == id) {
            self.selected = index;
        }
    }

    /// Shows the outcome of a delete.
    pub fn on_catalog_result(
        &mut self,
        catalog: &ProductCatalog,
        result: Result<CatalogChange, CatalogError>,
    ) {
        match result {
            Ok(change) => {
                self.selected = self.selected.min(catalog.len().saturating_sub(1));
                self.modals.notify(change.alert());
            }
            Err(err) => self.modals.notify(err.alert()),
        }
    }

    fn ask_delete(&mut self, catalog: &ProductCatalog) {
        let Some(product) = self.selected(catalog) else {
            return;
        };
        let id = product.id();
        let Some(prompt) = catalog.delete_prompt(id) else {
            return;
        };
        if let Err(err) = self
            .modals
            .ask(prompt, ProductsFollowUp::Delete(id), ProductsFollowUp::None)
        {
            tracing::debug!(error = %err, "Delete prompt refused");
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent, catalog: &ProductCatalog) -> ProductsAction {
        match handle_modal_key(&mut self.modals, key) {
            ModalKeyOutcome::Inactive => {}
            ModalKeyOutcome::Resolved(ProductsFollowUp::Delete(id)) => {
                return ProductsAction::Delete(id);
            }
            ModalKeyOutcome::Consumed | ModalKeyOutcome::Resolved(ProductsFollowUp::None) => {
                return ProductsAction::None;
            }
        }

        let count = catalog.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Char('a') => return ProductsAction::Add,
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(product) = self.selected(catalog) {
                    return ProductsAction::Edit(product.id());
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.ask_delete(catalog),
            KeyCode::Esc | KeyCode::Backspace => return ProductsAction::Back,
            _ => {}
        }
        ProductsAction::None
    }
}

/// Renders the product list screen against the catalog.
pub struct ProductsView<'a> {
    screen: &'a ProductsScreen,
    catalog: &'a ProductCatalog,
}

impl<'a> ProductsView<'a> {
    #[must_use]
    pub fn new(screen: &'a ProductsScreen, catalog: &'a ProductCatalog) -> Self {
        Self { screen, catalog }
    }

    fn card(&self, product: &Product) -> ListItem<'static> {
        let theme = &self.screen.theme;
        ListItem::new(vec![
            Line::from(Span::styled(
                product.name().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                product.price_label(),
                Style::default().fg(theme.accent),
            )),
            Line::from(vec![
                Span::raw(format!("Cantidad: {}", product.quantity())),
                Span::styled(
                    format!("  · {}", product.image().display_name()),
                    theme.dimmed_style,
                ),
            ]),
        ])
    }
}

impl Widget for ProductsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.screen.theme;
        let [header, banner, title, list_area, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(vec![
            Line::from(Span::styled("★ Pchelá", theme.title_style)),
            Line::from(Span::styled("Universal Beauty", theme.dimmed_style)),
        ])
        .render(header, buf);

        Paragraph::new(vec![
            Line::from(Span::styled("🔥 Lo más vendido 🔥", theme.title_style)),
            Line::from("✨ Tijera Premium ✨"),
        ])
        .alignment(Alignment::Center)
        .render(banner, buf);

        Paragraph::new(Span::styled(
            "Productos disponibles",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .render(title, buf);

        let items: Vec<ListItem> = self
            .catalog
            .list()
            .iter()
            .map(|product| self.card(product))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent)),
            )
            .highlight_style(theme.selection_style)
            .highlight_symbol("▶ ");
        let selected = (!self.catalog.is_empty()).then_some(self.screen.selected);
        let mut state = ListState::default().with_selected(selected);
        StatefulWidget::render(list, list_area, buf, &mut state);

        let count = format!("{} productos", self.catalog.len());
        (&StatusBar::new(&ProductsScreen::HINTS, theme).right(count)).render(footer, buf);

        if let Some(modal) = self.screen.modals.active() {
            ModalView::new(modal, theme).render(area, buf);
        }
    }
}
