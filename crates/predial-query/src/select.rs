//! Generic property selection and code-set comparison.

use std::collections::HashSet;

use predial_model::QueryResult;
use predial_xml::{XmlDocument, XmlElement};

use crate::tags::{CODIGO_PREDIAL_NACIONAL, PREDIO};

/// National property code of a `predio`, when present and non-empty.
///
/// The text is returned as written; surrounding whitespace is not trimmed.
pub fn property_code(predio: &XmlElement) -> Option<&str> {
    predio
        .child(CODIGO_PREDIAL_NACIONAL)
        .and_then(XmlElement::text)
        .filter(|code| !code.is_empty())
}

/// Codes of every property that satisfies `predicate`.
///
/// Properties without a code are ignored. Duplicate codes are reported once
/// and `count` is the number of unique codes.
pub fn select_properties<F>(document: &XmlDocument, predicate: F) -> QueryResult
where
    F: Fn(&XmlElement) -> bool,
{
    let codes = document
        .root
        .descendants_named(PREDIO)
        .filter(|predio| predicate(*predio))
        .filter_map(property_code);
    QueryResult::from_codes(unique_in_order(codes))
}

/// Codes present in `current` but not in `previous`, in `current` order.
pub fn compare_codes(previous: &[String], current: &[String]) -> Vec<String> {
    let known: HashSet<&str> = previous.iter().map(String::as_str).collect();
    unique_in_order(
        current
            .iter()
            .map(String::as_str)
            .filter(|code| !known.contains(code)),
    )
}

fn unique_in_order<'a>(codes: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .filter(|code| seen.insert(*code))
        .map(str::to_string)
        .collect()
}
