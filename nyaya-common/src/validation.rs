//! Input checks shared by the backend and the terminal client

use regex::Regex;
use std::sync::OnceLock;

/// Something@something.something, no whitespace
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("Invalid email pattern"))
}

/// Surrounding whitespace is ignored
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Ten ASCII digits
pub fn is_valid_mobile(mobile: &str) -> bool {
    let mobile = mobile.trim();
    mobile.len() == 10 && mobile.chars().all(|c| c.is_ascii_digit())
}
