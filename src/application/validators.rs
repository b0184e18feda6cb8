use validator::ValidateEmail;

use crate::app_error::{AppError, AppResult};

pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_REFERRAL_SOURCE_LEN: usize = 100;

/// Canonical form used for uniqueness: surrounding whitespace removed, lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validates that the input looks like a valid email address with a dotted domain
/// (`local@example.com`, not `local@localhost`).
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    !local.is_empty() && has_dotted_domain(domain) && email.validate_email()
}

fn has_dotted_domain(domain: &str) -> bool {
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Trims an optional free-text field. Blank values become `None`; values longer
/// than `max_chars` are rejected.
pub fn clean_optional_text(
    value: Option<&str>,
    max_chars: usize,
    field: &str,
) -> AppResult<Option<String>> {
    let Some(trimmed) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if trimmed.chars().count() > max_chars {
        return Err(AppError::InvalidInput(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }

    Ok(Some(trimmed.to_string()))
}
