//! Password composition rules checked before sign-up.

use crate::domain::errors::ValidationError;

/// Single password composition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    /// At least this many characters.
    MinLength(usize),
    /// At least one uppercase ASCII letter.
    Uppercase,
    /// At least one lowercase ASCII letter.
    Lowercase,
    /// At least one ASCII digit.
    Digit,
    /// At least one character that is not an ASCII letter or digit.
    Special,
}

impl PasswordRule {
    /// Returns checklist label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::MinLength(n) => format!("Mínimo {n} caracteres"),
            Self::Uppercase => "Al menos una mayúscula".to_string(),
            Self::Lowercase => "Al menos una minúscula".to_string(),
            Self::Digit => "Al menos un número".to_string(),
            Self::Special => "Al menos un carácter especial".to_string(),
        }
    }

    /// Returns whether the password satisfies this rule.
    #[must_use]
    pub fn is_satisfied_by(&self, password: &str) -> bool {
        match self {
            Self::MinLength(n) => password.chars().count() >= *n,
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
            Self::Special => password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }
}

/// Configured set of password rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    rules: Vec<PasswordRule>,
}

impl PasswordPolicy {
    /// Minimum length accepted by the provider.
    pub const DEFAULT_MIN_LENGTH: usize = 6;

    /// Creates policy from explicit rules.
    #[must_use]
    pub fn new(rules: Vec<PasswordRule>) -> Self {
        Self { rules }
    }

    /// Builds policy from feature switches.
    #[must_use]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn from_flags(
        min_length: usize,
        uppercase: bool,
        lowercase: bool,
        digit: bool,
        special: bool,
    ) -> Self {
        let mut rules = vec![PasswordRule::MinLength(min_length)];
        if uppercase {
            rules.push(PasswordRule::Uppercase);
        }
        if lowercase {
            rules.push(PasswordRule::Lowercase);
        }
        if digit {
            rules.push(PasswordRule::Digit);
        }
        if special {
            rules.push(PasswordRule::Special);
        }
        Self { rules }
    }

    /// Returns configured rules in display order.
    #[must_use]
    pub fn rules(&self) -> &[PasswordRule] {
        &self.rules
    }

    /// Evaluates every rule, for the live checklist.
    #[must_use]
    pub fn evaluate(&self, password: &str) -> Vec<(PasswordRule, bool)> {
        self.rules
            .iter()
            .map(|rule| (*rule, rule.is_satisfied_by(password)))
            .collect()
    }

    /// Checks password against all rules.
    ///
    /// # Errors
    /// Returns `WeakPassword` listing every unsatisfied rule.
    pub fn check(&self, password: &str) -> Result<(), ValidationError> {
        let missing: Vec<PasswordRule> = self
            .rules
            .iter()
            .copied()
            .filter(|rule| !rule.is_satisfied_by(password))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::WeakPassword { missing })
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::from_flags(Self::DEFAULT_MIN_LENGTH, true, true, true, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Abc123", true ; "meets_all_default_rules")]
    #[test_case("abc123", false ; "missing_uppercase")]
    #[test_case("ABC123", false ; "missing_lowercase")]
    #[test_case("Abcdef", false ; "missing_digit")]
    #[test_case("Ab1", false ; "too_short")]
    fn test_default_policy(password: &str, accepted: bool) {
        assert_eq!(PasswordPolicy::default().check(password).is_ok(), accepted);
    }

    #[test]
    fn test_special_rule_is_opt_in() {
        let policy = PasswordPolicy::from_flags(6, true, true, true, true);
        assert!(policy.check("Abc123").is_err());
        assert!(policy.check("Abc12!").is_ok());
    }

    #[test]
    fn test_check_reports_every_missing_rule() {
        let err = PasswordPolicy::default().check("abc").unwrap_err();
        assert_eq!(
            err,
            ValidationError::WeakPassword {
                missing: vec![
                    PasswordRule::MinLength(6),
                    PasswordRule::Uppercase,
                    PasswordRule::Digit,
                ],
            }
        );
    }

    #[test]
    fn test_evaluate_preserves_order() {
        let report = PasswordPolicy::default().evaluate("A");
        let rules: Vec<PasswordRule> = report.iter().map(|(rule, _)| *rule).collect();
        assert_eq!(rules, PasswordPolicy::default().rules());
        assert_eq!(report[1], (PasswordRule::Uppercase, true));
    }

    #[test]
    fn test_min_length_counts_characters() {
        assert!(PasswordRule::MinLength(6).is_satisfied_by("ñandú1"));
    }
}
