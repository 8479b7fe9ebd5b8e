//! Slug normalization helpers used when naming surveys.
//!
//! Slugs are lowercase `a-z0-9-` with collapsing separators. Callers resolve
//! collisions with [`with_suffix`].

/// Maximum slug length stored for a survey
pub const MAX_SLUG_LEN: usize = 100;

/// Normalizes a title into a URL-safe slug of at most `max` characters.
/// Returns `None` when nothing alphanumeric survives.
pub fn normalize_slug(input: &str, max: usize) -> Option<String> {
    let mut slug = String::new();
    let mut prev_dash = false;
    for ch in input.trim().to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    let truncated: String = slug.trim_matches('-').chars().take(max).collect();
    let normalized = truncated.trim_end_matches('-').to_string();
    if normalized.is_empty() {
        return None;
    }
    Some(normalized)
}

/// Appends `-{suffix}` to `base`, shortening the base to stay within `max_len`.
pub fn with_suffix(base: &str, suffix: usize, max_len: usize) -> Option<String> {
    let suffix = format!("-{suffix}");
    if suffix.len() >= max_len {
        return None;
    }
    let allowed = max_len - suffix.len();
    let base_part: String = base.chars().take(allowed).collect();
    let base_part = base_part.trim_end_matches('-');
    if base_part.is_empty() {
        return None;
    }
    Some(format!("{base_part}{suffix}"))
}
