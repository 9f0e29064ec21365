// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Per-type record normalizers
//!
//! Each normalizer turns the field lists collected for one name and type
//! into a single [`NormalizedRecord`]. Field lists have the owner name
//! column removed, so for an `@` line the layout is `[target, priority, ttl]`.
//!
//! TTLs are taken from the first contributing line only. A missing, empty
//! or non-numeric TTL field falls back to the configured default.

use crate::{
    aggregate::AggregationKey,
    tinydns_types::{MxValue, NormalizedRecord, NormalizedType, RecordData},
};

/// IPv4 literal used in legacy data for "no address"
pub const SENTINEL_ADDRESS: &str = "0.0.0.0";

/// Preference used when an MX line carries none
pub const DEFAULT_MX_PRIORITY: u16 = 0;

/// Normalize one aggregation group
///
/// Returns `None` when nothing should be emitted for the group.
pub fn normalize(
    key: &AggregationKey,
    lines: &[Vec<String>],
    default_ttl: u32,
) -> Option<NormalizedRecord> {
    match key.record_type {
        NormalizedType::A => data_for_a(&key.name, lines, default_ttl),
        NormalizedType::Cname => data_for_cname(&key.name, lines, default_ttl),
        NormalizedType::Mx => data_for_mx(&key.name, lines, default_ttl),
        NormalizedType::Ns => data_for_ns(&key.name, lines, default_ttl),
        // PTRs are built per line by the reverse pass, never from a group
        NormalizedType::Ptr => None,
    }
}

/// A records: `[address, ttl]`
///
/// Sentinel addresses are dropped. Nothing is emitted when no address remains.
pub fn data_for_a(name: &str, lines: &[Vec<String>], default_ttl: u32) -> Option<NormalizedRecord> {
    let values: Vec<String> = lines
        .iter()
        .filter_map(|line| line.first())
        .filter(|address| address.as_str() != SENTINEL_ADDRESS)
        .cloned()
        .collect();

    if values.is_empty() {
        return None;
    }

    Some(NormalizedRecord {
        name: name.to_string(),
        record_type: NormalizedType::A,
        ttl: first_line_ttl(lines, 1, default_ttl),
        data: RecordData::Values(values),
    })
}

/// CNAME records: `[target, ttl]`
///
/// Only the first line counts. Later lines for the same name are ignored.
pub fn data_for_cname(
    name: &str,
    lines: &[Vec<String>],
    default_ttl: u32,
) -> Option<NormalizedRecord> {
    let target = lines.first()?.first()?;

    Some(NormalizedRecord {
        name: name.to_string(),
        record_type: NormalizedType::Cname,
        ttl: first_line_ttl(lines, 1, default_ttl),
        data: RecordData::Value(absolute(target)),
    })
}

/// MX records: `[target, priority, ttl]`
pub fn data_for_mx(name: &str, lines: &[Vec<String>], default_ttl: u32) -> Option<NormalizedRecord> {
    let values: Vec<MxValue> = lines
        .iter()
        .filter_map(|line| {
            let target = line.first()?;
            let priority = line
                .get(1)
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_MX_PRIORITY);
            Some(MxValue {
                priority,
                value: absolute(target),
            })
        })
        .collect();

    if values.is_empty() {
        return None;
    }

    Some(NormalizedRecord {
        name: name.to_string(),
        record_type: NormalizedType::Mx,
        ttl: first_line_ttl(lines, 2, default_ttl),
        data: RecordData::MxValues(values),
    })
}

/// NS records: `[target, ttl]`
pub fn data_for_ns(name: &str, lines: &[Vec<String>], default_ttl: u32) -> Option<NormalizedRecord> {
    let values: Vec<String> = lines
        .iter()
        .filter_map(|line| line.first())
        .map(|target| absolute(target))
        .collect();

    if values.is_empty() {
        return None;
    }

    Some(NormalizedRecord {
        name: name.to_string(),
        record_type: NormalizedType::Ns,
        ttl: first_line_ttl(lines, 1, default_ttl),
        data: RecordData::Values(values),
    })
}

/// PTR record for a single line
pub fn data_for_ptr(
    name: &str,
    target: &str,
    ttl: Option<&str>,
    default_ttl: u32,
) -> NormalizedRecord {
    NormalizedRecord {
        name: name.to_string(),
        record_type: NormalizedType::Ptr,
        ttl: parse_ttl(ttl, default_ttl),
        data: RecordData::Value(absolute(target)),
    }
}

/// Parse a TTL field, falling back to `default_ttl`
pub fn parse_ttl(field: Option<&str>, default_ttl: u32) -> u32 {
    field
        .and_then(|ttl| ttl.parse().ok())
        .unwrap_or(default_ttl)
}

fn first_line_ttl(lines: &[Vec<String>], index: usize, default_ttl: u32) -> u32 {
    let field = lines
        .first()
        .and_then(|line| line.get(index))
        .map(String::as_str);
    parse_ttl(field, default_ttl)
}

/// Hostname with a trailing dot
fn absolute(target: &str) -> String {
    if target.ends_with('.') {
        target.to_string()
    } else {
        format!("{}.", target)
    }
}
