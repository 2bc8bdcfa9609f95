//! Scanners that pull URLs, email addresses and phone numbers out of free
//! text.
//!
//! A token ends at the earliest point where either the text runs out or the
//! following text starts another token of the same kind. Delimiters that are
//! not followed by a new token stay inside the current one, which is what
//! keeps commas in a URL's query string intact.

use regex::Regex;

use crate::patterns::{EMAIL_BOUNDARY, PHONE_BOUNDARY, URL_BOUNDARY, URL_HEAD};

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn is_phone_body(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '(' | ')' | '-')
}

/// End of input, or only a final newline left.
fn at_end(text: &str, idx: usize) -> bool {
    idx == text.len() || &text[idx..] == "\n"
}

/// Shortest token body starting at `start` that is followed by the end of
/// input or by `boundary`. Bodies never span a newline.
fn lazy_end(text: &str, start: usize, boundary: &Regex) -> Option<usize> {
    let limit = text[start..].find('\n').map_or(text.len(), |i| start + i);

    (start..=limit)
        .filter(|&idx| text.is_char_boundary(idx))
        .find(|&idx| at_end(text, idx) || boundary.is_match(&text[idx..]))
}

/// Every `schema://...` token in `text`, in order.
pub fn find_urls(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(head) = URL_HEAD.find_at(text, pos) {
        match lazy_end(text, head.end(), &URL_BOUNDARY) {
            Some(end) => {
                found.push(text[head.start()..end].trim_end());
                pos = end;
            }
            None => pos = head.end(),
        }
        if pos >= text.len() {
            break;
        }
    }

    found
}

/// Every `[Name ]user@domain` token in `text`, in order.
pub fn find_emails(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let start = pos + rest.len() - rest.trim_start_matches(is_delimiter).len();

        let Some(at) = text[start..].find('@').map(|i| start + i) else {
            break;
        };
        if at == start {
            pos = at + 1;
            continue;
        }

        match lazy_end(text, at + 1, &EMAIL_BOUNDARY) {
            Some(end) => {
                found.push(text[start..end].trim_end());
                pos = end;
            }
            None => pos = at + 1,
        }
    }

    found
}

/// Every phone-number-shaped token in `text`, in order. A number may start
/// with `+`, `(` or spaces, must start and end with a digit and must be at
/// least three characters long from its first digit on.
pub fn find_phone_numbers(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        match phone_at(text, pos) {
            Some((start, end)) => {
                found.push(&text[start..end]);
                pos = end;
            }
            None => pos += text[pos..].chars().next().map_or(1, char::len_utf8),
        }
    }

    found
}

fn phone_at(text: &str, pos: usize) -> Option<(usize, usize)> {
    let rest = &text[pos..];
    let start = pos + rest.len() - rest.trim_start().len();

    let rest = &text[start..];
    let first_digit = start + rest.len()
        - rest
            .trim_start_matches(|c: char| c == '+' || c == '(' || c.is_whitespace())
            .len();
    if !text[first_digit..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let body_start = first_digit + 1;
    let run_end = text[body_start..]
        .find(|c: char| !is_phone_body(c))
        .map_or(text.len(), |i| body_start + i);

    let bytes = text.as_bytes();
    (body_start + 2..=run_end)
        .rev()
        .find(|&end| {
            bytes[end - 1].is_ascii_digit()
                && (at_end(text, end) || PHONE_BOUNDARY.is_match(&text[end..]))
        })
        .map(|end| (start, end))
}
