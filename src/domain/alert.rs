//! Alert and confirmation payloads shown by the modal presenters.

/// Severity of an informational alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertKind {
    /// Neutral information.
    #[default]
    Info,
    /// Operation completed.
    Success,
    /// Operation failed or input was rejected.
    Error,
}

/// Single-acknowledgement alert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Alert severity.
    pub kind: AlertKind,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Label of the acknowledge button.
    pub button_label: String,
}

impl Alert {
    const DEFAULT_BUTTON: &'static str = "Aceptar";

    /// Creates alert of the given kind.
    #[must_use]
    pub fn new(kind: AlertKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            button_label: Self::DEFAULT_BUTTON.to_string(),
        }
    }

    /// Creates informational alert.
    #[must_use]
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, title, message)
    }

    /// Creates success alert.
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, title, message)
    }

    /// Creates error alert.
    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, title, message)
    }
}

/// Two-outcome confirmation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Title line.
    pub title: String,
    /// Question text.
    pub message: String,
    /// Label of the confirm button.
    pub confirm_label: String,
    /// Label of the cancel button.
    pub cancel_label: String,
}

impl ConfirmPrompt {
    /// Creates prompt with the default "Aceptar"/"Cancelar" labels.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Aceptar".to_string(),
            cancel_label: "Cancelar".to_string(),
        }
    }

    /// Overrides the confirm button label.
    #[must_use]
    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }
}
