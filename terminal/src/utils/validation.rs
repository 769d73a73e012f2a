/// Validation utilities for user input
use crate::core::error::AppError;

/// Shortest password accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;
/// Longest display name accepted at signup.
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<(), AppError> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    if !email.contains('@') {
        return ValidationResult::err("Invalid email format");
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return ValidationResult::err("Invalid email format");
    }

    if parts[0].is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if parts[1].is_empty() || !parts[1].contains('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Validate display name
pub fn validate_name(name: &str) -> ValidationResult {
    let name = name.trim();
    if name.is_empty() {
        return ValidationResult::err("Name is required");
    }

    if name.chars().count() > MAX_NAME_LEN {
        return ValidationResult::err(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        ));
    }

    ValidationResult::ok()
}

/// Validate a new password. Login only checks that one was given.
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return ValidationResult::err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }

    ValidationResult::ok()
}

/// Validate a trade price or deposit: finite and strictly positive
pub fn validate_amount(amount: f64) -> ValidationResult {
    if !amount.is_finite() {
        return ValidationResult::err("Amount must be a number");
    }

    if amount <= 0.0 {
        return ValidationResult::err("Amount must be greater than zero");
    }

    ValidationResult::ok()
}

/// Validate a wallet balance: finite and not negative
pub fn validate_balance(balance: f64) -> ValidationResult {
    if !balance.is_finite() {
        return ValidationResult::err("Balance must be a number");
    }

    if balance < 0.0 {
        return ValidationResult::err("Balance cannot be negative");
    }

    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("a@b.com").is_valid);
        assert!(validate_email("user@domain.co.in").is_valid);
        assert!(!validate_email("").is_valid);
        assert!(!validate_email("invalid").is_valid);
        assert!(!validate_email("@example.com").is_valid);
        assert!(!validate_email("test@").is_valid);
        assert!(!validate_email("a@b@c.com").is_valid);
    }

    #[test]
    fn test_name_validation() {
        assert!(validate_name("Asha").is_valid);
        assert!(!validate_name("   ").is_valid);
        assert!(!validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_valid);
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("secret").is_valid);
        assert!(!validate_password("").is_valid);
        assert!(!validate_password("short").is_valid);
    }

    #[test]
    fn test_amount_validation() {
        assert!(validate_amount(0.01).is_valid);
        assert!(!validate_amount(0.0).is_valid);
        assert!(!validate_amount(-5.0).is_valid);
        assert!(!validate_amount(f64::INFINITY).is_valid);

        assert!(validate_balance(0.0).is_valid);
        assert!(!validate_balance(-1.0).is_valid);
        assert!(!validate_balance(f64::NAN).is_valid);
    }

    #[test]
    fn test_into_result() {
        assert!(validate_amount(1.0).into_result().is_ok());
        let err = validate_amount(-1.0).into_result().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Amount must be greater than zero");
    }
}
