//! Input validation helpers for request payloads

use crate::utils::error::{DashboardError, Result};

/// Validate a username: 3-32 chars, alphanumeric plus `._-`
pub fn validate_username(username: &str) -> Result<()> {
    if username.len() < 3 || username.len() > 32 {
        return Err(DashboardError::validation(
            "Username must be between 3 and 32 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(DashboardError::validation(
            "Username may only contain letters, digits, '.', '_' and '-'",
        ));
    }
    Ok(())
}

/// Validate an email address (structural check only)
pub fn validate_email(email: &str) -> Result<()> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(DashboardError::validation("Email must contain '@'"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(DashboardError::validation("Email address is malformed"));
    }
    Ok(())
}

/// Validate a password: minimum length and at least one digit
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(DashboardError::validation(
            "Password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DashboardError::validation(
            "Password must contain at least one digit",
        ));
    }
    Ok(())
}

/// Validate a progress percentage claim
pub fn validate_progress_percent(percent: u8) -> Result<()> {
    if percent > 100 {
        return Err(DashboardError::validation(
            "Progress percent must be between 0 and 100",
        ));
    }
    Ok(())
}
