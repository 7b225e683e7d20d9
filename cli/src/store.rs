//! # Result Persistence
//!
//! CSV files connect the two measurement stages: the scan stage writes
//! `ip.csv`, the test stage re-reads it, filters, and writes the ranked
//! `result.csv` (or `<COLO>.csv`). Plain newline lists carry addresses to
//! whatever consumes them next.

use anyhow::Context;
use edgescout_common::network::record::{ProbeResult, TrialOutcome};

/// Discovery results, sorted by connect latency.
pub const SCAN_FILE: &str = "ip.csv";
/// Ranked trial outcomes of an unfiltered test run.
pub const RESULT_FILE: &str = "result.csv";
/// Addresses handed to the latency test stage, one per line.
pub const ADDRESS_FILE: &str = "ip.txt";
/// Top-ranked addresses extracted by the `top` command.
pub const TOP_FILE: &str = "cf-ip.txt";

const SCAN_HEADER: [&str; 5] = ["ip", "colo", "region", "city", "latency_ms"];
const RESULT_HEADER: [&str; 5] = ["ip", "min_ms", "max_ms", "avg_ms", "loss_pct"];

pub fn write_scan_results(path: &str, results: &[ProbeResult]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(SCAN_HEADER)?;
    for result in results {
        writer.write_record([
            result.addr.as_str(),
            result.colo.as_str(),
            result.region.as_str(),
            result.city.as_str(),
            &result.latency_ms.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_scan_results(path: &str) -> anyhow::Result<Vec<ProbeResult>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {path}, run `edgescout scan` first"))?;

    let mut results = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("reading {path}"))?;
        if record.len() < SCAN_HEADER.len() {
            continue;
        }
        results.push(ProbeResult {
            addr: record[0].to_string(),
            colo: record[1].to_string(),
            region: record[2].to_string(),
            city: record[3].to_string(),
            latency_ms: record[4].parse().unwrap_or(0),
        });
    }
    Ok(results)
}

pub fn write_test_results(path: &str, outcomes: &[TrialOutcome]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(RESULT_HEADER)?;
    for outcome in outcomes {
        writer.write_record([
            outcome.addr.as_str(),
            &outcome.min_ms.to_string(),
            &outcome.max_ms.to_string(),
            &outcome.avg_ms.to_string(),
            &((outcome.loss_rate * 100.0) as u32).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// First column of the first `count` rows; the file is already ranked.
pub fn read_top_addresses(path: &str, count: usize) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {path}, run `edgescout test` first"))?;

    let mut addresses = Vec::with_capacity(count);
    for record in reader.records().take(count) {
        let record = record.with_context(|| format!("reading {path}"))?;
        if let Some(addr) = record.get(0) {
            addresses.push(addr.to_string());
        }
    }
    Ok(addresses)
}

pub fn write_address_list(path: &str, addresses: &[String]) -> anyhow::Result<()> {
    let mut content = addresses.join("\n");
    content.push('\n');
    std::fs::write(path, content).with_context(|| format!("writing {path}"))
}
