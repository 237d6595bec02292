//! Session token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque provider token, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionToken {
    value: String,
}

impl SessionToken {
    /// Creates token, rejecting blank values.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self { value })
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let len = self.value.chars().count();
        if len <= 10 {
            return "*".repeat(len);
        }

        let prefix: String = self.value.chars().take(4).collect();
        let suffix: String = self.value.chars().skip(len - 4).collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "AMf-vBxr8QzP3kY7Jd2L0nW5sT9uV4cE1aH6gI";

    #[test]
    fn test_blank_token_rejected() {
        assert!(SessionToken::new("   ").is_none());
        assert!(SessionToken::new(RAW).is_some());
    }

    #[test]
    fn test_token_masking() {
        let masked = SessionToken::new_unchecked(RAW).masked();
        assert_eq!(masked, "AMf-...H6gI");
    }

    #[test]
    fn test_short_token_fully_masked() {
        assert_eq!(SessionToken::new_unchecked("abc").masked(), "***");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let debug_output = format!("{:?}", SessionToken::new_unchecked(RAW));
        assert!(!debug_output.contains(RAW));
    }
}
