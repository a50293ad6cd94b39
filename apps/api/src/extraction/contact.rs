//! Contact heuristics — best-effort name/email/phone from extracted text.
//!
//! Absence of a match yields an empty string, never an error. The result is
//! a pre-fill suggestion for the candidate form, not ground truth; the UI
//! lets the user edit every field before continuing.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Runs all three heuristics over the raw extracted text.
pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        name: extract_name(text),
        email: extract_email(text),
        phone: extract_phone(text),
    }
}

/// First `local@domain.tld` match, case-insensitive.
pub fn extract_email(text: &str) -> String {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("valid regex")
    });
    re.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}

/// First match of an optionally international-prefixed 10-digit run or a
/// `ddd-ddd-dddd`-style grouped number.
pub fn extract_phone(text: &str) -> String {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PHONE_RE.get_or_init(|| {
        Regex::new(r"(\+?\d{1,3}[\s-]?)?(\d{10}|\d{3}[\s-]\d{3}[\s-]\d{4})").expect("valid regex")
    });
    re.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}

/// First non-blank line. Lines that look like a capitalized multi-word name
/// or an all-caps header of length >= 4 are accepted outright; anything else
/// falls through to the same line verbatim.
pub fn extract_name(text: &str) -> String {
    static CAPITALIZED_RE: OnceLock<Regex> = OnceLock::new();
    static ALL_CAPS_RE: OnceLock<Regex> = OnceLock::new();

    let Some(first_line) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return String::new();
    };

    let capitalized = CAPITALIZED_RE.get_or_init(|| {
        Regex::new(r"^[A-Z][a-zA-Z]+(\s+[A-Z][a-zA-Z]+)+$").expect("valid regex")
    });
    let all_caps = ALL_CAPS_RE.get_or_init(|| Regex::new(r"^[A-Z\s]{4,}$").expect("valid regex"));

    if capitalized.is_match(first_line) || all_caps.is_match(first_line) {
        return first_line.to_string();
    }
    first_line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jane_doe_resume_header() {
        let contact = extract_contact("Jane Doe\njane@x.com\n555-123-4567");
        assert_eq!(contact.name, "Jane Doe");
        assert_eq!(contact.email, "jane@x.com");
        assert_eq!(contact.phone, "555-123-4567");
    }

    #[test]
    fn test_email_is_first_match_case_insensitive() {
        let text = "Contact: Jane.DOE+work@Example.COM or backup@example.org";
        assert_eq!(extract_email(text), "Jane.DOE+work@Example.COM");
    }

    #[test]
    fn test_phone_accepts_international_prefix() {
        assert_eq!(extract_phone("call +91 9876543210 now"), "+91 9876543210");
        assert_eq!(extract_phone("tel 555 123 4567"), "555 123 4567");
    }

    #[test]
    fn test_no_matches_yield_empty_strings() {
        let contact = extract_contact("no structured data here");
        assert_eq!(contact.email, "");
        assert_eq!(contact.phone, "");
        assert_eq!(contact.name, "no structured data here");
    }

    #[test]
    fn test_name_skips_blank_lines() {
        assert_eq!(extract_name("\n\n   \nJANE DOE\nmore"), "JANE DOE");
    }

    #[test]
    fn test_name_of_empty_text_is_empty() {
        assert_eq!(extract_name("   \n  "), "");
    }

    #[test]
    fn test_lowercase_first_line_is_returned_verbatim() {
        assert_eq!(extract_name("jane doe\njane@x.com"), "jane doe");
    }
}
