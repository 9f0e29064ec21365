// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone sink
//!
//! This module defines the contract the populator uses to hand records to
//! a zone, plus an in-memory [`Zone`] implementation:
//! - Exposing the zone's fully-qualified name and record count
//! - Adding records, reporting duplicate and sub-zone rejections as outcomes
//! - Tracking delegated sub-zones

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::{
    tinydns_types::{NormalizedRecord, NormalizedType},
    types::ZoneError,
};

/// Reason a zone declined a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A record with the same name and type already exists
    DuplicateRecord,
    /// The name belongs to a delegated sub-zone
    SubzoneRecord,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::DuplicateRecord => "duplicate record",
            Rejection::SubzoneRecord => "subzone record",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful `add_record` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Rejected(Rejection),
}

/// Destination for normalized records
pub trait ZoneSink {
    /// Fully-qualified zone name, with trailing dot
    fn name(&self) -> &str;

    /// Number of records currently held
    fn record_count(&self) -> usize;

    /// Add a record
    ///
    /// Expected refusals come back as [`AddOutcome::Rejected`]; `Err` is
    /// reserved for failures the caller cannot recover from.
    fn add_record(&mut self, record: NormalizedRecord) -> Result<AddOutcome, ZoneError>;
}

/// In-memory zone
#[derive(Debug, Clone, Serialize)]
pub struct Zone {
    name: String,
    #[serde(skip)]
    sub_zones: HashSet<String>,
    records: Vec<NormalizedRecord>,
}

impl Zone {
    /// Create an empty zone
    ///
    /// # Errors
    /// Returns an error if the name is empty or lacks the trailing dot
    pub fn new(name: impl Into<String>) -> Result<Self, ZoneError> {
        let name = name.into();
        if name.len() < 2 || !name.ends_with('.') {
            return Err(ZoneError::InvalidZoneName(format!(
                "{} must be fully qualified with a trailing dot",
                name
            )));
        }

        Ok(Self {
            name,
            sub_zones: HashSet::new(),
            records: Vec::new(),
        })
    }

    /// Declare delegated sub-zones by their zone-relative label
    pub fn with_sub_zones<I, S>(mut self, sub_zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_zones
            .extend(sub_zones.into_iter().map(|s| s.into().to_ascii_lowercase()));
        self
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    /// Look up a record by name and type
    pub fn find(&self, name: &str, record_type: NormalizedType) -> Option<&NormalizedRecord> {
        self.records
            .iter()
            .find(|r| r.record_type == record_type && r.name.eq_ignore_ascii_case(name))
    }

    /// A record under a sub-zone is refused; at the sub-zone only NS is allowed
    fn is_subzone_record(&self, record: &NormalizedRecord) -> bool {
        let lowered = record.name.to_ascii_lowercase();
        let last = lowered.rsplit('.').next().unwrap_or_default();
        if last.is_empty() || !self.sub_zones.contains(last) {
            return false;
        }
        lowered != last || record.record_type != NormalizedType::Ns
    }
}

impl ZoneSink for Zone {
    fn name(&self) -> &str {
        &self.name
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn add_record(&mut self, record: NormalizedRecord) -> Result<AddOutcome, ZoneError> {
        if record.name.ends_with('.') {
            return Err(ZoneError::InvalidRecord(format!(
                "{} is not zone-relative",
                record.name
            )));
        }

        if self.is_subzone_record(&record) {
            return Ok(AddOutcome::Rejected(Rejection::SubzoneRecord));
        }

        if self.find(&record.name, record.record_type).is_some() {
            return Ok(AddOutcome::Rejected(Rejection::DuplicateRecord));
        }

        self.records.push(record);
        Ok(AddOutcome::Added)
    }
}
