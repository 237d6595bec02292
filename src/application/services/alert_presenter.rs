use std::collections::VecDeque;

use crate::domain::Alert;

#[derive(Debug)]
struct PendingAlert<F> {
    alert: Alert,
    follow_up: F,
}

/// FIFO queue of single-button alerts.
///
/// Only the front alert is visible. Each alert carries a typed follow-up
/// that [`AlertPresenter::acknowledge`] hands back to the caller.
#[derive(Debug)]
pub struct AlertPresenter<F> {
    queue: VecDeque<PendingAlert<F>>,
}

impl<F> Default for AlertPresenter<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> AlertPresenter<F> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queues alert behind any visible one.
    pub fn show(&mut self, alert: Alert, follow_up: F) {
        tracing::debug!(title = %alert.title, queued = self.queue.len(), "Alert queued");
        self.queue.push_back(PendingAlert { alert, follow_up });
    }

    /// Hides the visible alert and returns its follow-up.
    pub fn acknowledge(&mut self) -> Option<F> {
        self.queue.pop_front().map(|pending| pending.follow_up)
    }

    #[must_use]
    pub fn current(&self) -> Option<&Alert> {
        self.queue.front().map(|pending| &pending.alert)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<F: Default> AlertPresenter<F> {
    /// Queues alert whose acknowledgement does nothing.
    pub fn notify(&mut self, alert: Alert) {
        self.show(alert, F::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Eq)]
    enum FollowUp {
        #[default]
        Nothing,
        GoHome,
    }

    #[test]
    fn test_show_then_acknowledge_once() {
        let mut presenter = AlertPresenter::new();
        presenter.show(Alert::success("Bienvenido 🎉", "Te logueaste como Ana"), FollowUp::GoHome);
        assert!(presenter.is_visible());

        assert_eq!(presenter.acknowledge(), Some(FollowUp::GoHome));
        assert!(!presenter.is_visible());
        assert_eq!(presenter.acknowledge(), None);
    }

    #[test]
    fn test_alerts_shown_in_fifo_order() {
        let mut presenter: AlertPresenter<FollowUp> = AlertPresenter::new();
        presenter.notify(Alert::info("1", "First"));
        presenter.notify(Alert::info("2", "Second"));

        assert_eq!(presenter.current().unwrap().title, "1");
        presenter.acknowledge();
        assert_eq!(presenter.current().unwrap().title, "2");
        assert_eq!(presenter.len(), 1);
    }

    #[test]
    fn test_second_show_does_not_overwrite() {
        let mut presenter = AlertPresenter::new();
        presenter.show(Alert::error("Error", "A"), FollowUp::Nothing);
        presenter.show(Alert::success("Éxito", "B"), FollowUp::GoHome);

        assert_eq!(presenter.current().unwrap().message, "A");
        assert_eq!(presenter.acknowledge(), Some(FollowUp::Nothing));
        assert_eq!(presenter.acknowledge(), Some(FollowUp::GoHome));
    }
}
