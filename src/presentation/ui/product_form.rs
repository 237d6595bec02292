//! Add and edit product forms.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::{CatalogChange, ModalLayer};
use crate::domain::errors::{CatalogError, MediaError};
use crate::domain::ports::PickedImage;
use crate::domain::{Alert, ImageRef, Product, ProductDraft, ProductId};
use crate::presentation::events::EventHandler;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ModalKeyOutcome, ModalView, StatusBar, TextInput, handle_modal_key,
};

/// Which record the form writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFormMode {
    /// New record.
    Add,
    /// Existing record.
    Edit(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Price,
    Quantity,
}

/// Follow-up of a form modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ProductFormFollowUp {
    #[default]
    Stay,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ProductFormAction {
    None,
    Save,
    PickImage,
    Back,
}

/// Product form screen UI.
pub struct ProductFormScreen {
    mode: ProductFormMode,
    name: TextInput,
    price: TextInput,
    quantity: TextInput,
    image: Option<ImageRef>,
    focus: FormField,
    modals: ModalLayer<ProductFormFollowUp>,
    theme: Theme,
}

impl ProductFormScreen {
    const HINTS: [(&'static str, &'static str); 4] = [
        ("Tab", "siguiente"),
        ("Enter", "guardar"),
        ("Ctrl+O", "imagen"),
        ("Esc", "cancelar"),
    ];

    /// Creates an empty add form.
    #[must_use]
    pub fn add(theme: Theme) -> Self {
        let input = |label: &str, placeholder: &str| {
            TextInput::new(label)
                .placeholder(placeholder)
                .accent(theme.accent)
        };
        let mut screen = Self {
            mode: ProductFormMode::Add,
            name: input(" Nombre ", "Nombre del producto"),
            price: input(" Precio ", "Precio"),
            quantity: input(" Cantidad ", "Cantidad a agregar"),
            image: None,
            focus: FormField::Name,
            modals: ModalLayer::new(),
            theme,
        };
        screen.set_focus(FormField::Name);
        screen
    }

    /// Creates an edit form pre-populated from `product`.
    #[must_use]
    pub fn edit(theme: Theme, product: &Product) -> Self {
        let draft = ProductDraft::from_product(product);
        let mut screen = Self::add(theme);
        screen.mode = ProductFormMode::Edit(product.id());
        screen.name.set_value(draft.name);
        screen.price.set_value(draft.price);
        screen.quantity.set_value(draft.quantity);
        screen.image = draft.image;
        screen
    }

    #[must_use]
    pub const fn mode(&self) -> ProductFormMode {
        self.mode
    }

    #[must_use]
    pub const fn modals(&self) -> &ModalLayer<ProductFormFollowUp> {
        &self.modals
    }

    /// Returns the form contents.
    #[must_use]
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.value().to_string(),
            price: self.price.value().to_string(),
            quantity: self.quantity.value().to_string(),
            image: self.image.clone(),
        }
    }

    fn title(&self) -> &'static str {
        match self.mode {
            ProductFormMode::Add => " Agregar Producto ",
            ProductFormMode::Edit(_) => " Editar Producto ",
        }
    }

    fn set_focus(&mut self, field: FormField) {
        self.focus = field;
        self.name.set_focused(field == FormField::Name);
        self.price.set_focused(field == FormField::Price);
        self.quantity.set_focused(field == FormField::Quantity);
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Price => &mut self.price,
            FormField::Quantity => &mut self.quantity,
        }
    }

    /// Shows the outcome of a save. Success returns to the list once seen.
    pub fn on_save_result(&mut self, result: Result<CatalogChange, CatalogError>) {
        match result {
            Ok(change) => self.modals.show(change.alert(), ProductFormFollowUp::Back),
            Err(err) => self.modals.notify(err.alert()),
        }
    }

    /// Applies a media picker result. Cancellation keeps the current image.
    pub fn on_image_picked(&mut self, result: Result<Option<PickedImage>, MediaError>) {
        match result {
            Ok(Some(picked)) => self.image = Some(ImageRef::Local(picked.path)),
            Ok(None) => {}
            Err(err) => self
                .modals
                .notify(Alert::error("Error", err.user_message())),
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> ProductFormAction {
        match handle_modal_key(&mut self.modals, key) {
            ModalKeyOutcome::Inactive => {}
            ModalKeyOutcome::Resolved(ProductFormFollowUp::Back) => {
                return ProductFormAction::Back;
            }
            ModalKeyOutcome::Consumed | ModalKeyOutcome::Resolved(ProductFormFollowUp::Stay) => {
                return ProductFormAction::None;
            }
        }

        if EventHandler::is_focus_next(&key) {
            let next = match self.focus {
                FormField::Name => FormField::Price,
                FormField::Price => FormField::Quantity,
                FormField::Quantity => FormField::Name,
            };
            self.set_focus(next);
            return ProductFormAction::None;
        }
        if EventHandler::is_focus_prev(&key) {
            let prev = match self.focus {
                FormField::Name => FormField::Quantity,
                FormField::Price => FormField::Name,
                FormField::Quantity => FormField::Price,
            };
            self.set_focus(prev);
            return ProductFormAction::None;
        }

        match key.code {
            KeyCode::Enter => return ProductFormAction::Save,
            KeyCode::Esc => return ProductFormAction::Back,
            KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ProductFormAction::PickImage;
            }
            _ => {
                self.focused_input().handle_key(key);
            }
        }
        ProductFormAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let [body, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(15),
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
            .title(Span::styled(self.title(), self.theme.title_style))
            .title_alignment(Alignment::Center);
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [name, price, quantity, _, image, save] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        (&self.name).render(name, buf);
        (&self.price).render(price, buf);
        (&self.quantity).render(quantity, buf);

        let image_name = self
            .image
            .as_ref()
            .map_or_else(|| "sin imagen".to_string(), ImageRef::display_name);
        Paragraph::new(Line::from(vec![
            Span::styled("Imagen: ", self.theme.dimmed_style),
            Span::raw(image_name),
        ]))
        .render(image, buf);

        let save_label = match self.mode {
            ProductFormMode::Add => "[ Guardar ]",
            ProductFormMode::Edit(_) => "[ Guardar cambios ]",
        };
        Paragraph::new(Span::styled(save_label, self.theme.title_style))
            .alignment(Alignment::Center)
            .render(save, buf);

        (&StatusBar::new(&Self::HINTS, &self.theme)).render(footer, buf);

        if let Some(modal) = self.modals.active() {
            ModalView::new(modal, &self.theme).render(area, buf);
        }
    }
}

impl Widget for &ProductFormScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ProductCatalog;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut ProductFormScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_add_form_builds_draft() {
        let mut screen = ProductFormScreen::add(Theme::default());
        type_text(&mut screen, "Tijera");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "15000");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "20");

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), ProductFormAction::Save);
        assert_eq!(screen.draft(), ProductDraft::new("Tijera", "15000", "20"));
    }

    #[test]
    fn test_add_then_acknowledge_goes_back() {
        let mut catalog = ProductCatalog::seeded();
        let mut screen = ProductFormScreen::add(Theme::default());
        type_text(&mut screen, "Tijera");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "15000");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "20");

        let result = catalog.add(&screen.draft());
        assert_eq!(result, Ok(CatalogChange::Added(ProductId(6))));
        screen.on_save_result(result);

        assert_eq!(screen.modals().active().unwrap().message(), "Producto agregado correctamente.");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), ProductFormAction::Back);
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_validation_error_stays() {
        let mut catalog = ProductCatalog::seeded();
        let mut screen = ProductFormScreen::add(Theme::default());
        type_text(&mut screen, "Tijera");

        screen.on_save_result(catalog.add(&screen.draft()));

        let modal = screen.modals().active().unwrap();
        assert_eq!(modal.title(), "Error");
        assert_eq!(modal.message(), "Todos los campos son obligatorios.");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), ProductFormAction::None);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_edit_prepopulates() {
        let catalog = ProductCatalog::seeded();
        let product = catalog.get(ProductId(2)).unwrap();
        let screen = ProductFormScreen::edit(Theme::default(), product);

        assert_eq!(screen.mode(), ProductFormMode::Edit(ProductId(2)));
        assert_eq!(screen.draft(), ProductDraft::from_product(product));
    }

    #[test]
    fn test_image_pick_and_cancel() {
        let mut screen = ProductFormScreen::add(Theme::default());
        let ctrl_o = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_key(ctrl_o), ProductFormAction::PickImage);

        screen.on_image_picked(Ok(Some(PickedImage {
            path: PathBuf::from("/tmp/tijera.png"),
            width: 64,
            height: 64,
        })));
        screen.on_image_picked(Ok(None));

        assert_eq!(
            screen.draft().image,
            Some(ImageRef::Local(PathBuf::from("/tmp/tijera.png")))
        );
        assert!(!screen.modals().is_active());
    }

    #[test]
    fn test_picker_failure_alert() {
        let mut screen = ProductFormScreen::add(Theme::default());
        screen.on_image_picked(Err(MediaError::PickerFailed { code: Some(2) }));

        assert_eq!(
            screen.modals().active().unwrap().message(),
            "No se pudo abrir el selector de imágenes."
        );
    }
}
