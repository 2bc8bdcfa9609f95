//! Tag filtering.
//!
//! Logic is a disjunction of conjunctions: every element of the logic list
//! is a group of tags that must all be present, and the first group that is
//! satisfied makes the whole expression match.

use std::collections::BTreeSet;

use tracing::trace;

use crate::bulk::{parse_list, Entry};

/// Tag that every item is considered to carry.
pub const MATCH_ALL_TAG: &str = "all";

/// [`is_exclusive_match_with`] using `all` as the match-everything tag.
pub fn is_exclusive_match(logic: impl Into<Entry>, data: impl Into<Entry>) -> bool {
    is_exclusive_match_with(logic, data, MATCH_ALL_TAG)
}

/// Decide whether the tags in `data` satisfy `logic`.
///
/// A string logic is split into tokens that are OR'd together. In a list,
/// a string element is split into tokens that are AND'd together, as is a
/// nested list. Empty logic only matches empty data. Any element that is
/// neither text nor a list fails the whole match.
///
/// # Arguments
/// * `logic` - The tag expression
/// * `data` - The tags to test, as a list or a delimited string
/// * `match_all` - A tag that is treated as present in every `data`
///
/// # Returns
/// * `bool` - Whether any group of `logic` is fully contained in `data`
pub fn is_exclusive_match_with(
    logic: impl Into<Entry>,
    data: impl Into<Entry>,
    match_all: &str,
) -> bool {
    let data: BTreeSet<String> = parse_list(data).into_iter().collect();

    let groups: Vec<Entry> = match logic.into() {
        Entry::Text(text) => parse_list(text).into_iter().map(Entry::Text).collect(),
        Entry::Seq(groups) => groups,
        Entry::Other => {
            trace!("Logic is neither text nor a list");
            return false;
        }
    };

    if groups.is_empty() {
        return data.is_empty();
    }

    for group in groups {
        if matches!(group, Entry::Other) {
            trace!("Unusable element in tag logic");
            return false;
        }

        let required = parse_list(group);
        if required.is_empty() {
            return data.is_empty();
        }

        if required
            .iter()
            .all(|tag| tag == match_all || data.contains(tag))
        {
            return true;
        }
    }

    false
}
