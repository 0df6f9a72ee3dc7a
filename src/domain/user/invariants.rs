use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{DomainResult, ValidationErrors};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Signup form rules. Every violation is reported.
pub fn validate_credentials(name: &str, email: &str, password: &str) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();

    if name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(
            "name",
            format!("Name must be at least {} characters", MIN_NAME_LEN),
        );
    }
    check_email(email, &mut errors);
    check_password(password, &mut errors);

    errors.into_result()
}

/// Login form rules (shape only, the credential check happens elsewhere)
pub fn validate_login(email: &str, password: &str) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();
    check_email(email, &mut errors);
    check_password(password, &mut errors);
    errors.into_result()
}

fn check_email(email: &str, errors: &mut ValidationErrors) {
    if !email_pattern().is_match(email) {
        errors.push("email", "Please enter a valid email address");
    }
}

fn check_password(password: &str, errors: &mut ValidationErrors) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
}
