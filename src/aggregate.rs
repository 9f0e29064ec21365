// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Forward zone record aggregation
//!
//! Several TinyDNS lines can contribute to one record (multiple `@` lines
//! for the same name, for example). The aggregator groups field lists by
//! zone-relative name and normalized type, keeping input order both across
//! groups and within each group.

use std::collections::HashMap;

use crate::tinydns_types::NormalizedType;

/// Grouping key for forward zone lines
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    /// Zone-relative name, empty for the apex
    pub name: String,
    pub record_type: NormalizedType,
}

impl AggregationKey {
    pub fn new(name: impl Into<String>, record_type: NormalizedType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}

/// Field lists grouped by [`AggregationKey`]
#[derive(Debug, Default)]
pub struct RecordAggregator {
    index: HashMap<AggregationKey, usize>,
    groups: Vec<(AggregationKey, Vec<Vec<String>>)>,
}

impl RecordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line's fields (name column already removed) to its group
    ///
    /// Duplicates are kept; the normalizers decide what they mean.
    pub fn insert(&mut self, key: AggregationKey, fields: Vec<String>) {
        match self.index.get(&key) {
            Some(&position) => self.groups[position].1.push(fields),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![fields]));
            }
        }
    }

    /// Lines collected for `key`, in input order
    pub fn get(&self, key: &AggregationKey) -> Option<&[Vec<String>]> {
        self.index
            .get(key)
            .map(|&position| self.groups[position].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in the order their keys were first seen
    pub fn groups(&self) -> impl Iterator<Item = (&AggregationKey, &[Vec<String>])> {
        self.groups
            .iter()
            .map(|(key, lines)| (key, lines.as_slice()))
    }
}
