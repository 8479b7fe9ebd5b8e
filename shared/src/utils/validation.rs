//! Email address rules shared by the HTTP layer and the workflows

use once_cell::sync::Lazy;
use regex::Regex;

/// Top-level domains accepted for account emails
pub const ALLOWED_EMAIL_TLDS: &[&str] = &["com", "net"];

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+([a-z]{2,})$")
        .expect("email pattern is valid")
});

/// Trim and lowercase an email before any lookup or comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether `email` is a syntactically valid address under an allowed TLD.
///
/// The check runs against the normalized form, so `Foo@Example.COM` passes.
pub fn is_valid_email(email: &str) -> bool {
    let email = normalize_email(email);
    if email.len() > 254 {
        return false;
    }
    match EMAIL_PATTERN.captures(&email) {
        Some(caps) => caps
            .get(caps.len() - 1)
            .map(|tld| ALLOWED_EMAIL_TLDS.contains(&tld.as_str()))
            .unwrap_or(false),
        None => false,
    }
}

/// Whether `value` has between `min` and `max` characters (inclusive)
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}
