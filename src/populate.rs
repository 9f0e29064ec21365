// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone populator
//!
//! Drives one import pass over a sequence of raw TinyDNS lines:
//! - Forward zones: classify, match the zone suffix, aggregate by name and
//!   type, then normalize each group into one record
//! - Reverse zones (`in-addr.arpa.`): one PTR record per `=` or `^` line
//!
//! The pass is synchronous and keeps no state between calls.

use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::{
    aggregate::{AggregationKey, RecordAggregator},
    metrics, records,
    tinydns_parser::{
        classify_line, is_reverse_pointer, relative_name, reverse_pointer, reverse_relative_name,
    },
    tinydns_types::{Classified, ClassifiedEntry, NormalizedType, ZoneMode},
    types::PopulateError,
    zones::{AddOutcome, Rejection, ZoneSink},
};

/// Default TTL used when a line carries none
pub const DEFAULT_TTL: u32 = 3600;

/// TinyDNS importer
#[derive(Debug, Clone)]
pub struct TinyDnsSource {
    id: String,
    default_ttl: u32,
}

impl TinyDnsSource {
    /// Record types this source can produce
    pub const SUPPORTS: &'static [NormalizedType] = &[
        NormalizedType::A,
        NormalizedType::Cname,
        NormalizedType::Mx,
        NormalizedType::Ns,
        NormalizedType::Ptr,
    ];

    /// TinyDNS location (`%lo`) data is not imported
    pub const SUPPORTS_GEO: bool = false;

    /// Create a new importer
    ///
    /// # Arguments
    /// * `id` - Source identifier, used for logging only
    /// * `default_ttl` - TTL for lines without one
    pub fn new(id: impl Into<String>, default_ttl: u32) -> Self {
        Self {
            id: id.into(),
            default_ttl,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn default_ttl(&self) -> u32 {
        self.default_ttl
    }

    pub fn supports(&self, record_type: NormalizedType) -> bool {
        Self::SUPPORTS.contains(&record_type)
    }

    /// Import `lines` into `zone`
    ///
    /// # Returns
    /// The number of records the zone gained
    ///
    /// # Errors
    /// Returns an error for an unparseable address on a reverse line, an
    /// unexpected sink rejection, or a sink failure. Records added before
    /// the error stay in the zone.
    pub fn populate<Z, I, S>(&self, zone: &mut Z, lines: I) -> Result<usize, PopulateError>
    where
        Z: ZoneSink + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        debug!("populate: source={}, zone={}", self.id, zone.name());

        let mode = ZoneMode::for_zone(zone.name());
        let before = zone.record_count();
        let start = Instant::now();

        let result = match mode {
            ZoneMode::Forward => self.populate_forward(zone, lines),
            ZoneMode::Reverse => self.populate_reverse(zone, lines),
        };

        let found = zone.record_count().saturating_sub(before);
        let duration = start.elapsed().as_secs_f64();
        metrics::record_populate(mode.as_str(), result.is_ok(), found, duration);

        if let Err(e) = result {
            error!(
                "populate: source={}, zone={} failed after {} records: {}",
                self.id,
                zone.name(),
                found,
                e
            );
            return Err(e);
        }

        info!("populate: found {} records", found);
        Ok(found)
    }

    fn populate_forward<Z, I, S>(&self, zone: &mut Z, lines: I) -> Result<(), PopulateError>
    where
        Z: ZoneSink + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mode = ZoneMode::Forward;
        let zone_name = zone.name().to_string();
        let mut aggregator = RecordAggregator::new();

        for line in lines {
            let Some(entry) = classified_entry(line.as_ref(), mode) else {
                continue;
            };

            let mut fields = entry.fields.into_iter();
            let owner = fields.next().unwrap_or_default();
            let Some(name) = relative_name(&owner, &zone_name) else {
                metrics::record_line(mode.as_str(), "out_of_zone");
                continue;
            };

            metrics::record_line(mode.as_str(), "accepted");
            aggregator.insert(
                AggregationKey::new(name, entry.record_type),
                fields.collect(),
            );
        }

        debug!(
            "populate: zone={}, {} record groups",
            zone_name,
            aggregator.len()
        );

        for (key, group) in aggregator.groups() {
            let Some(record) = records::normalize(key, group, self.default_ttl) else {
                continue;
            };

            let description = record.to_string();
            match zone.add_record(record)? {
                AddOutcome::Added => {}
                AddOutcome::Rejected(Rejection::SubzoneRecord) => {
                    metrics::record_rejection(Rejection::SubzoneRecord.as_str());
                    debug!("populate: skipping subzone record={}", description);
                }
                AddOutcome::Rejected(rejection) => {
                    metrics::record_rejection(rejection.as_str());
                    return Err(PopulateError::UnexpectedRejection {
                        rejection,
                        name: key.name.clone(),
                        record_type: key.record_type,
                    });
                }
            }
        }

        Ok(())
    }

    fn populate_reverse<Z, I, S>(&self, zone: &mut Z, lines: I) -> Result<(), PopulateError>
    where
        Z: ZoneSink + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mode = ZoneMode::Reverse;
        let zone_name = zone.name().to_string();

        for line in lines {
            let Some(entry) = classified_entry(line.as_ref(), mode) else {
                continue;
            };

            let (Some(first), Some(second)) = (entry.field(0), entry.field(1)) else {
                metrics::record_line(mode.as_str(), "skipped");
                continue;
            };

            // `^` lines usually carry the reverse name already; `=` lines carry host and address
            let (reverse_name, target, address) = if is_reverse_pointer(first) {
                (first.to_string(), second, first)
            } else {
                (reverse_pointer(second)?, first, second)
            };

            let Some(name) = reverse_relative_name(&reverse_name, &zone_name) else {
                metrics::record_line(mode.as_str(), "out_of_zone");
                continue;
            };

            metrics::record_line(mode.as_str(), "accepted");
            let record = records::data_for_ptr(&name, target, entry.field(2), self.default_ttl);

            match zone.add_record(record)? {
                AddOutcome::Added => {}
                AddOutcome::Rejected(Rejection::DuplicateRecord) => {
                    metrics::record_rejection(Rejection::DuplicateRecord.as_str());
                    warn!("Duplicate PTR record for {}, skipping", address);
                }
                AddOutcome::Rejected(rejection) => {
                    metrics::record_rejection(rejection.as_str());
                    return Err(PopulateError::UnexpectedRejection {
                        rejection,
                        name,
                        record_type: NormalizedType::Ptr,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Classify a line, counting the ones that produce nothing
fn classified_entry(line: &str, mode: ZoneMode) -> Option<ClassifiedEntry> {
    match classify_line(line, mode) {
        Classified::Entry(entry) => Some(entry),
        Classified::Ignored(tag) => {
            debug!("populate: ignoring tag={} in {} mode", tag.as_char(), mode.as_str());
            metrics::record_line(mode.as_str(), "ignored");
            None
        }
        Classified::Skipped => {
            metrics::record_line(mode.as_str(), "skipped");
            None
        }
    }
}
