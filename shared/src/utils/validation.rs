//! Input validation helpers for account fields.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("valid username regex"));

/// Check email shape. Final authority stays with the mail provider; this
/// only rejects obviously malformed addresses.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// Check username shape (letters, digits, underscore, 3-30 chars).
/// Must stay in step with the `VARCHAR(30)` username columns.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Minimum password length check.
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
}

/// Mask an email address for logs: keeps the first character of the local
/// part and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => String::from("***"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_usernames() {
        assert!(is_valid_username("jobseeker_42"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("has spaces"));
    }

    #[test]
    fn test_username_length_and_charset_bounds() {
        assert!(is_valid_username(&"a".repeat(30)));
        assert!(!is_valid_username(&"a".repeat(31)));
        assert!(!is_valid_username(&"a".repeat(40)));
        // Email-looking handles are not usernames
        assert!(!is_valid_username("user@example.com"));
        assert!(!is_valid_username("dot.ted"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("bad-input"), "***");
    }
}
