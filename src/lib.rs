// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! tinyport - import legacy TinyDNS zone data
//!
//! A small library that converts TinyDNS `data` lines into normalized,
//! provider-agnostic DNS records for a downstream zone.
//!
//! # Features
//!
//! - Classify TinyDNS lines (`=`, `+`, `C`, `.`, `@`, `^`) and split their fields
//! - Aggregate forward zone lines by name and type (multi-value A, NS, MX)
//! - Build PTR records for `in-addr.arpa.` zones from `=` and `^` lines
//! - TTL defaulting, sentinel address filtering, sub-zone and duplicate handling
//! - Directory-backed line source with a one-shot memoized load
//! - Prometheus metrics integration
//!
//! # Usage
//!
//! ## As a Library
//!
//! ```rust
//! use tinyport::{TinyDnsSource, Zone, ZoneSink};
//!
//! let source = TinyDnsSource::new("legacy", 3600);
//! let mut zone = Zone::new("example.com.").unwrap();
//!
//! let lines = [
//!     "+www.example.com:192.0.2.1:300",
//!     "@example.com::mx1.example.com:10",
//!     "Zsomething we ignore",
//! ];
//! let added = source.populate(&mut zone, lines).unwrap();
//!
//! assert_eq!(added, 2);
//! assert_eq!(zone.record_count(), 2);
//! ```
//!
//! ## Reading a Directory
//!
//! ```rust,no_run
//! use tinyport::{SourceConfig, TinyDnsFileSource, Zone};
//!
//! let source = TinyDnsFileSource::new(SourceConfig::new("tinydns", "./zones")).unwrap();
//! let mut zone = Zone::new("2.0.192.in-addr.arpa.").unwrap();
//! source.populate(&mut zone).unwrap();
//! ```
//!
//! ## As a Binary
//!
//! ```bash
//! TINYDNS_DIR=./zones TINYDNS_ZONES=example.com.,2.0.192.in-addr.arpa. tinyport
//! ```

// Re-export public modules
pub mod aggregate;
pub mod metrics;
pub mod populate;
pub mod records;
pub mod source;
pub mod tinydns_parser;
pub mod tinydns_types;
pub mod types;
pub mod zones;

// Re-export commonly used types

// Importers
pub use populate::{TinyDnsSource, DEFAULT_TTL};
pub use source::{DirectoryLineSource, SourceConfig, TinyDnsFileSource};

// Error types
pub use types::{PopulateError, SourceError, ZoneError};

// Record model
pub use tinydns_types::{MxValue, NormalizedRecord, NormalizedType, RecordData, ZoneMode};

// Zone sink
pub use zones::{AddOutcome, Rejection, Zone, ZoneSink};

#[cfg(test)]
mod source_test;
#[cfg(test)]
mod tinydns_parser_tests;
