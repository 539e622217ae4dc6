//! Log sanitization utilities for masking sensitive data.
//!
//! Emails and bearer tokens pass through the gateway on every login and
//! navigation; only masked forms are written to the logs.

/// Mask an email address for safe logging.
///
/// Shows only the first 3 characters of the local part (or fewer if it is
/// shorter) followed by asterisks and the domain.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_email("owner@cravings.io"), "own***@cravings.io");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}***@{}", visible_head(local, 3), domain),
        None => format!("{}***", visible_head(email, 3)),
    }
}

/// Mask a bearer token, keeping a short head and the length so two log lines
/// about the same token can be correlated.
pub fn mask_token(token: &str) -> String {
    format!("{}…({} chars)", visible_head(token, 8), token.chars().count())
}

fn visible_head(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
