use crate::domain::ConfirmPrompt;
use crate::domain::errors::ModalError;

#[derive(Debug)]
struct PendingConfirm<A> {
    prompt: ConfirmPrompt,
    on_confirm: A,
    on_cancel: A,
}

/// Two-button decision modal. Each `ask` resolves to exactly one outcome.
#[derive(Debug)]
pub struct ConfirmPresenter<A> {
    pending: Option<PendingConfirm<A>>,
}

impl<A> Default for ConfirmPresenter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ConfirmPresenter<A> {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Shows prompt with distinct follow-ups for each button.
    ///
    /// # Errors
    /// Returns `ConfirmPending` if a previous prompt is unresolved.
    pub fn ask(
        &mut self,
        prompt: ConfirmPrompt,
        on_confirm: A,
        on_cancel: A,
    ) -> Result<(), ModalError> {
        if self.pending.is_some() {
            return Err(ModalError::ConfirmPending);
        }
        tracing::debug!(title = %prompt.title, "Confirmation requested");
        self.pending = Some(PendingConfirm {
            prompt,
            on_confirm,
            on_cancel,
        });
        Ok(())
    }

    /// Resolves prompt as confirmed.
    pub fn confirm(&mut self) -> Option<A> {
        self.pending.take().map(|pending| pending.on_confirm)
    }

    /// Resolves prompt as cancelled.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|pending| pending.on_cancel)
    }

    #[must_use]
    pub fn current(&self) -> Option<&ConfirmPrompt> {
        self.pending.as_ref().map(|pending| &pending.prompt)
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Outcome {
        Delete,
        Keep,
    }

    fn prompt() -> ConfirmPrompt {
        ConfirmPrompt::new("Eliminar Producto", "¿Desea eliminar el producto \"Lima\"?")
    }

    #[test]
    fn test_confirm_fires_only_confirm() {
        let mut presenter = ConfirmPresenter::new();
        presenter.ask(prompt(), Outcome::Delete, Outcome::Keep).unwrap();

        assert_eq!(presenter.confirm(), Some(Outcome::Delete));
        assert!(!presenter.is_visible());
        assert_eq!(presenter.cancel(), None);
    }

    #[test]
    fn test_cancel_fires_only_cancel() {
        let mut presenter = ConfirmPresenter::new();
        presenter.ask(prompt(), Outcome::Delete, Outcome::Keep).unwrap();

        assert_eq!(presenter.cancel(), Some(Outcome::Keep));
        assert_eq!(presenter.confirm(), None);
    }

    #[test]
    fn test_second_ask_rejected() {
        let mut presenter = ConfirmPresenter::new();
        presenter.ask(prompt(), Outcome::Delete, Outcome::Keep).unwrap();

        assert_eq!(
            presenter.ask(prompt(), Outcome::Keep, Outcome::Keep),
            Err(ModalError::ConfirmPending)
        );
        assert_eq!(presenter.confirm(), Some(Outcome::Delete));
    }
}
