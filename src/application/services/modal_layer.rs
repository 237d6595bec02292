use super::{AlertPresenter, ConfirmPresenter};
use crate::domain::errors::ModalError;
use crate::domain::{Alert, ConfirmPrompt};

/// Modal currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ActiveModal<'a> {
    Alert(&'a Alert),
    Confirm(&'a ConfirmPrompt),
}

impl ActiveModal<'_> {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Alert(alert) => &alert.title,
            Self::Confirm(prompt) => &prompt.title,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Alert(alert) => &alert.message,
            Self::Confirm(prompt) => &prompt.message,
        }
    }
}

/// Per-screen pair of presenters keeping at most one modal visible.
///
/// A pending confirm takes priority; alerts raised meanwhile wait in the
/// queue until it resolves.
#[derive(Debug)]
pub struct ModalLayer<F> {
    alerts: AlertPresenter<F>,
    confirm: ConfirmPresenter<F>,
}

impl<F> Default for ModalLayer<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> ModalLayer<F> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            alerts: AlertPresenter::new(),
            confirm: ConfirmPresenter::new(),
        }
    }

    pub fn show(&mut self, alert: Alert, follow_up: F) {
        self.alerts.show(alert, follow_up);
    }

    /// Asks for confirmation.
    ///
    /// # Errors
    /// Returns `ConfirmPending` or `AlertVisible` when another modal is up.
    pub fn ask(
        &mut self,
        prompt: ConfirmPrompt,
        on_confirm: F,
        on_cancel: F,
    ) -> Result<(), ModalError> {
        if self.confirm.is_visible() {
            return Err(ModalError::ConfirmPending);
        }
        if self.alerts.is_visible() {
            return Err(ModalError::AlertVisible);
        }
        self.confirm.ask(prompt, on_confirm, on_cancel)
    }

    #[must_use]
    pub fn active(&self) -> Option<ActiveModal<'_>> {
        self.confirm
            .current()
            .map(ActiveModal::Confirm)
            .or_else(|| self.alerts.current().map(ActiveModal::Alert))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.confirm.is_visible() || self.alerts.is_visible()
    }

    /// Acknowledges the visible alert. No-op while a confirm is up.
    pub fn acknowledge(&mut self) -> Option<F> {
        if self.confirm.is_visible() {
            return None;
        }
        self.alerts.acknowledge()
    }

    pub fn confirm(&mut self) -> Option<F> {
        self.confirm.confirm()
    }

    pub fn cancel(&mut self) -> Option<F> {
        self.confirm.cancel()
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
        self.confirm.clear();
    }
}

impl<F: Default> ModalLayer<F> {
    pub fn notify(&mut self, alert: Alert) {
        self.alerts.notify(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    enum FollowUp {
        #[default]
        None,
        SignOut,
        Back,
    }

    fn logout_prompt() -> ConfirmPrompt {
        ConfirmPrompt::new("Cerrar sesión", "¿Estás seguro que deseas cerrar sesión?")
            .confirm_label("Salir")
    }

    #[test]
    fn test_ask_refused_while_alert_visible() {
        let mut layer = ModalLayer::new();
        layer.notify(Alert::info("Clientes", "Abrir Clientes"));

        assert_eq!(
            layer.ask(logout_prompt(), FollowUp::SignOut, FollowUp::None),
            Err(ModalError::AlertVisible)
        );
        assert!(matches!(layer.active(), Some(ActiveModal::Alert(_))));
    }

    #[test]
    fn test_confirm_has_priority_over_alerts() {
        let mut layer = ModalLayer::new();
        layer
            .ask(logout_prompt(), FollowUp::SignOut, FollowUp::None)
            .unwrap();
        layer.show(Alert::success("Éxito", "Listo"), FollowUp::Back);

        assert!(matches!(layer.active(), Some(ActiveModal::Confirm(_))));
        assert_eq!(layer.acknowledge(), None);

        assert_eq!(layer.cancel(), Some(FollowUp::None));
        assert!(matches!(layer.active(), Some(ActiveModal::Alert(a)) if a.message == "Listo"));
        assert_eq!(layer.acknowledge(), Some(FollowUp::Back));
        assert!(!layer.is_active());
    }

    #[test]
    fn test_confirm_label_override_visible() {
        let mut layer: ModalLayer<FollowUp> = ModalLayer::new();
        layer
            .ask(logout_prompt(), FollowUp::SignOut, FollowUp::None)
            .unwrap();

        let Some(ActiveModal::Confirm(prompt)) = layer.active() else {
            panic!("expected confirm");
        };
        assert_eq!(prompt.confirm_label, "Salir");
        assert_eq!(prompt.cancel_label, "Cancelar");
    }
}
