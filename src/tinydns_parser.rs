// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TinyDNS data line parser
//!
//! This module classifies raw TinyDNS data lines using nom and provides the
//! name helpers the populator needs: zone suffix matching and IPv4 reverse
//! pointer computation.
//!
//! # Examples
//!
//! ```rust
//! use tinyport::tinydns_parser::classify_line;
//! use tinyport::tinydns_types::{Classified, NormalizedType, ZoneMode};
//!
//! let Classified::Entry(entry) = classify_line("+www.example.com:192.0.2.1:300", ZoneMode::Forward) else {
//!     panic!("expected an entry");
//! };
//! assert_eq!(entry.record_type, NormalizedType::A);
//! assert_eq!(entry.fields, vec!["www.example.com", "192.0.2.1", "300"]);
//! ```
//!
//! Comment stripping cuts at the first `#` on the line. There is no escape
//! for a literal `#` inside a value.

use crate::tinydns_types::{Classified, ClassifiedEntry, TypeTag, ZoneMode};
use crate::types::PopulateError;
use nom::{
    bytes::complete::take_till,
    character::complete::{anychar, char},
    combinator::map_opt,
    multi::{many1_count, separated_list0},
    IResult,
};
use std::net::Ipv4Addr;

/// Suffix of IPv4 reverse lookup names, without the trailing dot
pub const IN_ADDR_ARPA: &str = "in-addr.arpa";

// ========== Parser Primitives ==========

/// Parse the leading type character
pub(crate) fn type_tag(input: &str) -> IResult<&str, TypeTag> {
    map_opt(anychar, TypeTag::from_char)(input)
}

/// Take everything before the first `#`
pub(crate) fn strip_comment(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == '#')(input)
}

/// Split on runs of one or more `:`
///
/// Empty leading or trailing pieces are kept, so `a:` yields `["a", ""]`.
pub(crate) fn raw_fields(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(many1_count(char(':')), take_till(|c: char| c == ':'))(input)
}

// ========== Line Classifier ==========

/// Classify one raw line for the given zone mode
///
/// Empty lines and unknown type characters are [`Classified::Skipped`].
/// Tags that are known but produce nothing in `mode` are
/// [`Classified::Ignored`] in forward mode and skipped in reverse mode.
pub fn classify_line(line: &str, mode: ZoneMode) -> Classified {
    let (rest, tag) = match type_tag(line) {
        Ok(parsed) => parsed,
        Err(_) => return Classified::Skipped,
    };

    if !tag.is_recognized(mode) {
        return Classified::Skipped;
    }

    let record_type = match tag.normalized_type(mode) {
        Some(record_type) => record_type,
        None => return Classified::Ignored(tag),
    };

    Classified::Entry(ClassifiedEntry {
        tag,
        record_type,
        fields: split_fields(rest),
    })
}

/// Strip the trailing comment, split on colons and trim every field
pub fn split_fields(content: &str) -> Vec<String> {
    let content = strip_comment(content).map_or(content, |(_, kept)| kept);
    let parts = raw_fields(content).map_or_else(|_| vec![content], |(_, parts)| parts);
    parts.into_iter().map(|p| p.trim().to_string()).collect()
}

// ========== Name Matcher ==========

/// Zone-relative label of `name` within `zone_name`
///
/// Returns `Some("")` for the zone apex and `None` when the name lies
/// outside the zone or contains an empty label. Comparison ignores ASCII
/// case and trailing dots; the label comes back lowercased.
pub fn relative_name(name: &str, zone_name: &str) -> Option<String> {
    let zone = zone_name.trim_end_matches('.');
    let name = name.trim_end_matches('.');

    if zone.is_empty() || name.is_empty() {
        return None;
    }

    if name.eq_ignore_ascii_case(zone) {
        return Some(String::new());
    }

    if name.len() <= zone.len() + 1 {
        return None;
    }

    let split = name.len() - zone.len();
    if !name.is_char_boundary(split) {
        return None;
    }

    let (label, suffix) = name.split_at(split);
    let label = label.strip_suffix('.')?;
    if !suffix.eq_ignore_ascii_case(zone) || label.split('.').any(str::is_empty) {
        return None;
    }

    Some(label.to_ascii_lowercase())
}

/// Like [`relative_name`] but the apex never matches
pub fn reverse_relative_name(name: &str, zone_name: &str) -> Option<String> {
    relative_name(name, zone_name).filter(|label| !label.is_empty())
}

// ========== Reverse-Pointer Resolver ==========

/// Whether a name is already written in reverse-pointer form
pub fn is_reverse_pointer(name: &str) -> bool {
    name.trim_end_matches('.')
        .to_ascii_lowercase()
        .ends_with(IN_ADDR_ARPA)
}

/// Reverse lookup name of an IPv4 literal, e.g. `4.3.2.1.in-addr.arpa`
pub fn reverse_pointer(address: &str) -> Result<String, PopulateError> {
    let addr: Ipv4Addr = address
        .parse()
        .map_err(|_| PopulateError::InvalidAddress(address.to_string()))?;
    let [a, b, c, d] = addr.octets();
    Ok(format!("{}.{}.{}.{}.{}", d, c, b, a, IN_ADDR_ARPA))
}
