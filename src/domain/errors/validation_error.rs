//! Local form validation errors.

use std::fmt;

use thiserror::Error;

use crate::domain::password_policy::PasswordRule;

/// Input field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FormField {
    Email,
    Password,
    PasswordConfirmation,
    FirstName,
    LastName,
    ProductName,
    Price,
    Quantity,
}

impl FormField {
    /// Returns the on-screen label of the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Correo",
            Self::Password => "Contraseña",
            Self::PasswordConfirmation => "Confirmar Contraseña",
            Self::FirstName => "Nombre",
            Self::LastName => "Apellido",
            Self::ProductName => "Nombre",
            Self::Price => "Precio",
            Self::Quantity => "Cantidad",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::PasswordConfirmation => "password confirmation",
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::ProductName => "product name",
            Self::Price => "price",
            Self::Quantity => "quantity",
        };
        f.write_str(name)
    }
}

/// Validation error variants raised before any external call or mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    Required {
        /// Offending field.
        field: FormField,
    },

    /// A numeric field does not hold a non-negative whole number.
    #[error("{field} must be a non-negative whole number")]
    InvalidNumber {
        /// Offending field.
        field: FormField,
    },

    /// Email does not look like `user@domain.tld`.
    #[error("invalid email address")]
    InvalidEmail,

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password misses one or more composition rules.
    #[error("password misses {} composition rule(s)", missing.len())]
    WeakPassword {
        /// Rules the password does not satisfy.
        missing: Vec<PasswordRule>,
    },
}

impl ValidationError {
    /// Creates required-field error.
    #[must_use]
    pub const fn required(field: FormField) -> Self {
        Self::Required { field }
    }

    /// Creates invalid-number error.
    #[must_use]
    pub const fn invalid_number(field: FormField) -> Self {
        Self::InvalidNumber { field }
    }

    /// Returns the message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Required { .. } => "Todos los campos son obligatorios.".to_string(),
            Self::InvalidNumber {
                field: FormField::Price,
            } => "Precio debe ser un número no negativo, con hasta dos decimales.".to_string(),
            Self::InvalidNumber { field } => {
                format!("{} debe ser un número entero no negativo.", field.label())
            }
            Self::InvalidEmail => {
                "Ingrese un correo electrónico válido. Ejemplo: usuario@example.com".to_string()
            }
            Self::PasswordMismatch => "Las contraseñas no coinciden.".to_string(),
            Self::WeakPassword { missing } => {
                let rules: Vec<String> = missing.iter().map(PasswordRule::label).collect();
                format!(
                    "La contraseña debe estar conformada por: {}.",
                    rules.join(", ").to_lowercase()
                )
            }
        }
    }
}
