// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TinyDNS import tool
//!
//! Reads every TinyDNS data file in a directory, imports the records for
//! each configured zone and prints the normalized records as JSON:
//! - `TINYDNS_DIR`, `TINYDNS_SOURCE_ID`, `TINYDNS_DEFAULT_TTL` configure the source
//! - `TINYDNS_ZONES` lists the zones to populate (comma-separated, trailing dots)
//! - `TINYDNS_SUBZONES` lists delegated sub-zone labels (comma-separated)
//! - `PRINT_METRICS=true` writes Prometheus metrics to stderr when done

use anyhow::Context;
use serde::Serialize;
use tracing::{error, info};

use tinyport::{metrics, SourceConfig, TinyDnsFileSource, Zone};

/// Output for one populated zone
#[derive(Serialize)]
struct ZoneOutput {
    added: usize,
    #[serde(flatten)]
    zone: Zone,
}

fn env_list(name: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    info!("starting tinydns import v{}", env!("CARGO_PKG_VERSION"));

    // initialize metrics
    metrics::init_metrics();

    // get configuration from environment
    let config = SourceConfig::from_env().context("invalid source configuration")?;
    let zones = env_list("TINYDNS_ZONES");
    let sub_zones = env_list("TINYDNS_SUBZONES");
    let print_metrics = std::env::var("PRINT_METRICS")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    info!("data directory: {}", config.directory.display());
    info!("default ttl: {}", config.default_ttl);

    if zones.is_empty() {
        error!("no zones configured!");
        return Err(anyhow::anyhow!(
            "zones required: set TINYDNS_ZONES to a comma-separated list of zone names"
        ));
    }

    let source = TinyDnsFileSource::new(config).context("failed to create tinydns source")?;

    let mut output = Vec::with_capacity(zones.len());
    for zone_name in &zones {
        let mut zone = Zone::new(zone_name.as_str())
            .with_context(|| format!("invalid zone {}", zone_name))?
            .with_sub_zones(sub_zones.iter().cloned());

        let added = source
            .populate(&mut zone)
            .with_context(|| format!("failed to populate zone {}", zone_name))?;

        info!("zone {}: {} records", zone_name, added);
        output.push(ZoneOutput { added, zone });
    }

    let json = serde_json::to_string_pretty(&output).context("failed to serialize records")?;
    println!("{}", json);

    if print_metrics {
        match metrics::gather_metrics() {
            Ok(text) => eprintln!("{}", text),
            Err(e) => error!("failed to gather metrics: {}", e),
        }
    }

    Ok(())
}
