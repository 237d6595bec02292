//! Credential value objects used by the authentication screens.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::errors::{FormField, ValidationError};

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Email address in `user@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Returns whether text looks like an email address.
    ///
    /// Surrounding whitespace counts as malformed; `parse` trims first.
    #[must_use]
    pub fn is_well_formed(value: &str) -> bool {
        EMAIL_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(value))
    }

    /// Parses email address.
    ///
    /// # Errors
    /// Returns `Required` for blank input and `InvalidEmail` for malformed input.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::required(FormField::Email));
        }
        if !Self::is_well_formed(value) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(value.to_string()))
    }

    /// Creates email without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain-text password held only for the duration of a request.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Wraps password, rejecting empty input.
    ///
    /// # Errors
    /// Returns `Required` when the password is empty.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::required(FormField::Password));
        }
        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Returns whether character may appear in a person name.
#[must_use]
pub fn is_name_char(c: char) -> bool {
    c == ' '
        || c.is_ascii_alphabetic()
        || matches!(
            c,
            'á' | 'é' | 'í' | 'ó' | 'ú' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'ñ' | 'Ñ' | 'ü' | 'Ü'
        )
}

/// Drops every character not allowed in a person name.
#[must_use]
pub fn filter_name(input: &str) -> String {
    input.chars().filter(|c| is_name_char(*c)).collect()
}
