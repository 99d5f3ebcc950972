//! Boundary validators for customer contact details.
//!
//! These are pure predicates returning `bool`. Code past this layer assumes
//! validated input; turning a `false` into an error is the caller's job.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum number of digits in a phone number (area code plus mobile number).
pub const MIN_PHONE_DIGITS: usize = 10;

/// Minimum number of characters in a trimmed name.
pub const MIN_NAME_CHARS: usize = 3;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Returns true if `email` has a local part, an `@`, and a domain with a dot.
///
/// # Examples
///
/// ```
/// use barbershop_engine::validation::validate_email;
///
/// assert!(validate_email("test@example.com"));
/// assert!(!validate_email("user@"));
/// assert!(!validate_email("@domain.com"));
/// ```
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Returns true if `phone` contains at least [`MIN_PHONE_DIGITS`] digits.
///
/// Punctuation and spaces are ignored.
///
/// # Examples
///
/// ```
/// use barbershop_engine::validation::validate_phone;
///
/// assert!(validate_phone("(11) 98765-4321"));
/// assert!(!validate_phone("123"));
/// ```
pub fn validate_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Returns true if the trimmed `name` has at least [`MIN_NAME_CHARS`] characters.
pub fn validate_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_CHARS
}
