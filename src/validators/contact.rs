use serde::Serialize;

use crate::patterns::{EMAIL, PHONE_NO};

/// Default minimum number of digits for a phone number.
pub const PHONE_MIN_LEN: usize = 11;

/// More digits than this is not a phone number (E.164).
const PHONE_MAX_LEN: usize = 15;

/// The pieces of an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailResult {
    pub name: String,       // Display name, may be empty
    pub user: String,       // Local part without the +label
    pub label: String,      // The part before '+', may be empty
    pub domain: String,
    pub email: String,      // user@domain
    pub full_email: String, // label+user@domain as written
}

/// The pieces of a phone number. Missing parts are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneResult {
    pub country: String,
    pub area: String,
    pub line: String,
    pub pretty: String, // Human readable, e.g. +1 800-123-4567
    pub full: String,   // Digits only
}

/// Check whether `value` holds an email address, optionally with a display
/// name in front of it (`Name <user@host>`, `Name: user@host`,
/// `Name user@host`).
///
/// # Arguments
/// * `value` - The text to inspect
///
/// # Returns
/// * `Option<EmailResult>` - The address broken into parts, or `None`
pub fn is_email(value: &str) -> Option<EmailResult> {
    let caps = EMAIL.captures(value)?;
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());

    Some(EmailResult {
        name: group("name").trim().to_string(),
        user: group("userid").to_string(),
        label: group("label").trim().to_string(),
        domain: group("domain").to_string(),
        email: group("email").to_string(),
        full_email: group("full_email").to_string(),
    })
}

/// [`is_phone_no_min`] with the default eleven digit minimum.
pub fn is_phone_no(value: &str) -> Option<PhoneResult> {
    is_phone_no_min(value, PHONE_MIN_LEN)
}

/// Check whether `value` looks like a phone number with at least `min_len`
/// digits.
///
/// Only digits, whitespace, `+`, `-` and parentheses are allowed. A
/// `min_len` of zero lets input made of separators alone through as an
/// all-empty result.
pub fn is_phone_no_min(value: &str, min_len: usize) -> Option<PhoneResult> {
    let caps = PHONE_NO.captures(value)?;
    let digits: String = caps["phone"].chars().filter(char::is_ascii_digit).collect();

    if digits.len() > PHONE_MAX_LEN || digits.len() < min_len {
        return None;
    }

    let mut result = PhoneResult {
        country: String::new(),
        area: String::new(),
        line: String::new(),
        pretty: String::new(),
        full: digits.clone(),
    };

    match digits.len() {
        7 => {
            result.line = digits.clone();
            result.pretty = format!("{}-{}", &digits[..3], &digits[3..]);
        }
        10 => {
            result.area = digits[..3].to_string();
            result.line = digits[3..].to_string();
            result.pretty = format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]);
        }
        n if n > 10 => {
            let split = n - 10;
            result.country = digits[..split].to_string();
            result.area = digits[split..split + 3].to_string();
            result.line = digits[split + 3..].to_string();
            result.pretty = format!(
                "+{} {}-{}-{}",
                result.country,
                result.area,
                &digits[split + 3..split + 6],
                &digits[split + 6..]
            );
        }
        _ => {
            result.line = digits.clone();
            result.pretty = digits;
        }
    }

    Some(result)
}
