// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TinyDNS data types
//!
//! This module defines the core data structures shared by the line
//! classifier, the record aggregator and the type normalizers.

use serde::Serialize;
use std::fmt;

/// Zone processing mode, selected from the zone name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneMode {
    /// Names to addresses and services (A, CNAME, MX, NS)
    Forward,
    /// `in-addr.arpa.` zones (PTR)
    Reverse,
}

impl ZoneMode {
    /// Reverse zones are recognized by their `in-addr.arpa.` suffix
    pub fn for_zone(zone_name: &str) -> Self {
        if zone_name.ends_with("in-addr.arpa.") {
            ZoneMode::Reverse
        } else {
            ZoneMode::Forward
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneMode::Forward => "forward",
            ZoneMode::Reverse => "reverse",
        }
    }
}

/// Leading type character of a TinyDNS data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `=` address plus matching PTR
    AddressWithPointer,
    /// `+` address only
    Address,
    /// `C` canonical name
    Alias,
    /// `.` name server (with SOA in tinydns-data)
    NameServer,
    /// `@` mail exchanger
    MailExchanger,
    /// `^` PTR only
    Pointer,
}

impl TypeTag {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(TypeTag::AddressWithPointer),
            '+' => Some(TypeTag::Address),
            'C' => Some(TypeTag::Alias),
            '.' => Some(TypeTag::NameServer),
            '@' => Some(TypeTag::MailExchanger),
            '^' => Some(TypeTag::Pointer),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            TypeTag::AddressWithPointer => '=',
            TypeTag::Address => '+',
            TypeTag::Alias => 'C',
            TypeTag::NameServer => '.',
            TypeTag::MailExchanger => '@',
            TypeTag::Pointer => '^',
        }
    }

    /// Whether the tag means anything for the given mode.
    ///
    /// `^` is recognized in forward mode but produces nothing there; tags
    /// other than `=` and `^` are not applicable to reverse zones.
    pub fn is_recognized(&self, mode: ZoneMode) -> bool {
        match mode {
            ZoneMode::Forward => true,
            ZoneMode::Reverse => matches!(self, TypeTag::AddressWithPointer | TypeTag::Pointer),
        }
    }

    /// Normalized record type for this tag, `None` when the tag is ignored
    pub fn normalized_type(&self, mode: ZoneMode) -> Option<NormalizedType> {
        match (mode, self) {
            (ZoneMode::Forward, TypeTag::AddressWithPointer | TypeTag::Address) => {
                Some(NormalizedType::A)
            }
            (ZoneMode::Forward, TypeTag::Alias) => Some(NormalizedType::Cname),
            (ZoneMode::Forward, TypeTag::NameServer) => Some(NormalizedType::Ns),
            (ZoneMode::Forward, TypeTag::MailExchanger) => Some(NormalizedType::Mx),
            (ZoneMode::Forward, TypeTag::Pointer) => None,
            (ZoneMode::Reverse, TypeTag::AddressWithPointer | TypeTag::Pointer) => {
                Some(NormalizedType::Ptr)
            }
            (ZoneMode::Reverse, _) => None,
        }
    }
}

/// Record types produced by the importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NormalizedType {
    A,
    Cname,
    Mx,
    Ns,
    Ptr,
}

impl NormalizedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizedType::A => "A",
            NormalizedType::Cname => "CNAME",
            NormalizedType::Mx => "MX",
            NormalizedType::Ns => "NS",
            NormalizedType::Ptr => "PTR",
        }
    }
}

impl fmt::Display for NormalizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data line with its type tag removed and its fields split out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub tag: TypeTag,
    /// Normalized type for the mode the line was classified in
    pub record_type: NormalizedType,
    /// Trimmed fields in TinyDNS column order
    pub fields: Vec<String>,
}

impl ClassifiedEntry {
    /// Field at `index`, `None` when the line is too short
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Result of classifying one raw line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Empty line or unrecognized type tag
    Skipped,
    /// Recognized tag that produces no record in this mode
    Ignored(TypeTag),
    Entry(ClassifiedEntry),
}

/// MX value with its preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxValue {
    pub priority: u16,
    pub value: String,
}

/// Value part of a normalized record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordData {
    /// Single value (CNAME, PTR)
    #[serde(rename = "value")]
    Value(String),
    /// Ordered values (A, NS)
    #[serde(rename = "values")]
    Values(Vec<String>),
    /// Ordered MX values
    #[serde(rename = "values")]
    MxValues(Vec<MxValue>),
}

/// Provider-agnostic record descriptor handed to the zone sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    /// Zone-relative name, empty for the apex
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: NormalizedType,

    pub ttl: u32,

    #[serde(flatten)]
    pub data: RecordData,
}

impl fmt::Display for NormalizedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "@" } else { &self.name };
        write!(f, "{} {} {}", name, self.ttl, self.record_type)?;
        match &self.data {
            RecordData::Value(value) => write!(f, " {}", value),
            RecordData::Values(values) => write!(f, " {}", values.join(" ")),
            RecordData::MxValues(values) => {
                for mx in values {
                    write!(f, " {} {}", mx.priority, mx.value)?;
                }
                Ok(())
            }
        }
    }
}
