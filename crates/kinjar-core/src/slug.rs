//! Tenant slug rules.
//!
//! A slug is a single lowercase DNS label: `[a-z0-9-]`, 1..=63 chars, no
//! leading or trailing hyphen.

use crate::error::{KinjarError, Result};

/// Labels that never name a tenant.
pub const RESERVED_LABELS: [&str; 4] = ["www", "app", "kinjar", "localhost"];

pub const MAX_LABEL_LEN: usize = 63;

pub fn is_reserved(label: &str) -> bool {
    label.is_empty() || RESERVED_LABELS.contains(&label)
}

/// DNS-label charset check on an already-lowercased label.
pub fn is_dns_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Normalize (trim + lowercase) and validate a requested slug.
pub fn validate_slug(raw: &str) -> Result<String> {
    let slug = raw.trim().to_ascii_lowercase();
    if !is_dns_label(&slug) {
        return Err(KinjarError::BadRequest(format!(
            "invalid slug {raw:?}: use 1-{MAX_LABEL_LEN} of a-z, 0-9 and '-', \
             not starting or ending with '-'"
        )));
    }
    if is_reserved(&slug) {
        return Err(KinjarError::BadRequest(format!("slug {slug:?} is reserved")));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(validate_slug("  Slaughterbecks ").unwrap(), "slaughterbecks");
    }

    #[test]
    fn rejects_bad_labels() {
        let long = "x".repeat(MAX_LABEL_LEN + 1);
        for bad in ["", "-abc", "abc-", "a_b", "a.b", "fam ily", long.as_str()] {
            assert!(validate_slug(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_reserved() {
        for r in RESERVED_LABELS {
            assert!(validate_slug(r).is_err());
        }
        assert!(validate_slug("WWW").is_err());
    }

    #[test]
    fn accepts_digits_and_inner_hyphens() {
        assert_eq!(validate_slug("the-smiths-2").unwrap(), "the-smiths-2");
    }
}
