// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common error types used throughout the tinyport library

use crate::{tinydns_types::NormalizedType, zones::Rejection};

/// Zone sink error type
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    #[error("Invalid zone name: {0}")]
    InvalidZoneName(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Populate error type
///
/// Every variant aborts the populate call. Records already handed to the
/// sink stay there.
#[derive(Debug, thiserror::Error)]
pub enum PopulateError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Unexpected {rejection} for {record_type} record {name:?}")]
    UnexpectedRejection {
        rejection: Rejection,
        name: String,
        record_type: NormalizedType,
    },

    #[error("Zone error: {0}")]
    Zone(#[from] ZoneError),
}

/// Line source error type
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Populate(#[from] PopulateError),
}
