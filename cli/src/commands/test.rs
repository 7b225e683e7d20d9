use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::bail;
use colored::*;

use edgescout_common::config::TrialOptions;
use edgescout_common::error::SetupError;
use edgescout_common::network::record::{ProbeResult, sort_ranked};
use edgescout_common::{info, success};
use edgescout_core::{histogram, latency};

use crate::commands::TestArgs;
use crate::terminal::progress;
use crate::store;

/// Stage two: re-read the scan results, optionally narrow to one PoP, run
/// the repeated-trial latency test and persist the ranked outcomes plus a
/// loss-rate histogram.
pub async fn test(args: TestArgs) -> anyhow::Result<()> {
    let records = store::read_scan_results(store::SCAN_FILE)?;
    if records.is_empty() {
        bail!(SetupError::NoUsableAddresses);
    }

    print_colo_summary(&records);

    let addresses = select_addresses(&records, args.colo.as_deref());
    if addresses.is_empty() {
        bail!(SetupError::EmptyAddressList);
    }
    match &args.colo {
        Some(colo) => info!("{} addresses selected for PoP {}", addresses.len(), colo),
        None => info!("{} addresses selected across all PoPs", addresses.len()),
    }
    store::write_address_list(store::ADDRESS_FILE, &addresses)?;

    let opts = TrialOptions {
        port: args.port,
        max_latency: Duration::from_millis(args.max_latency),
        trials: args.trials,
        concurrency: args.concurrency,
    };

    // The histogram's 100% band is reconstructed against this submitted
    // total, not the scan-stage candidate count.
    let submitted = addresses.len();

    let bar = progress::stage_bar(submitted as u64, "testing");
    let report = progress::callback(&bar);
    let mut outcomes = latency::test(addresses, &opts, Some(report)).await;
    bar.finish_and_clear();

    if outcomes.is_empty() {
        bail!(SetupError::NoUsableAddresses);
    }

    sort_ranked(&mut outcomes);

    let out_file = match &args.colo {
        Some(colo) => format!("{}.csv", colo.to_uppercase()),
        None => store::RESULT_FILE.to_string(),
    };
    store::write_test_results(&out_file, &outcomes)?;
    success!("{} ranked addresses written to {}", outcomes.len(), out_file);

    println!("{}", "── loss-rate distribution ──".bold());
    print!("{}", histogram::aggregate(&outcomes, submitted).render());
    Ok(())
}

/// Per-PoP roll-up of the scan results: address count and best latency.
fn print_colo_summary(records: &[ProbeResult]) {
    struct Summary<'a> {
        city: &'a str,
        count: usize,
        min_latency: u64,
    }

    let mut summaries: BTreeMap<&str, Summary> = BTreeMap::new();
    for record in records {
        summaries
            .entry(record.colo.as_str())
            .and_modify(|s| {
                s.count += 1;
                s.min_latency = s.min_latency.min(record.latency_ms);
            })
            .or_insert(Summary {
                city: &record.city,
                count: 1,
                min_latency: record.latency_ms,
            });
    }

    info!("discovered PoPs:");
    for (colo, summary) in &summaries {
        let city = if summary.city.is_empty() { "unknown location" } else { summary.city };
        info!(
            "  {} ({}) - {} addrs, best {} ms",
            colo, city, summary.count, summary.min_latency
        );
    }
}

/// Addresses to submit to the trial stage. The PoP filter matches
/// case-insensitively; no filter selects everything.
fn select_addresses(records: &[ProbeResult], colo: Option<&str>) -> Vec<String> {
    records
        .iter()
        .filter(|record| match colo {
            Some(code) => record.colo.eq_ignore_ascii_case(code),
            None => true,
        })
        .map(|record| record.addr.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(addr: &str, colo: &str) -> ProbeResult {
        ProbeResult {
            addr: addr.to_string(),
            colo: colo.to_string(),
            region: String::new(),
            city: String::new(),
            latency_ms: 10,
        }
    }

    #[test]
    fn colo_filter_is_case_insensitive() {
        let records = vec![record("a", "NRT"), record("b", "LAX"), record("c", "NRT")];
        assert_eq!(select_addresses(&records, Some("nrt")), vec!["a", "c"]);
    }

    #[test]
    fn no_filter_selects_everything() {
        let records = vec![record("a", "NRT"), record("b", "LAX")];
        assert_eq!(select_addresses(&records, None).len(), 2);
    }

    #[test]
    fn unknown_colo_selects_nothing() {
        let records = vec![record("a", "NRT")];
        assert!(select_addresses(&records, Some("FRA")).is_empty());
    }
}
