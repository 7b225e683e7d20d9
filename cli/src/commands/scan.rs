use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use rand::SeedableRng;
use rand::rngs::StdRng;

use edgescout_common::config::ProbeOptions;
use edgescout_common::error::SetupError;
use edgescout_common::network::record::sort_by_latency;
use edgescout_common::{info, success};
use edgescout_core::{probe, sampler};

use crate::commands::ScanArgs;
use crate::terminal::progress;
use crate::{sources, store};

/// Stage one: sample one candidate per published block, probe them all,
/// persist the survivors sorted by connect latency.
pub async fn scan(args: ScanArgs) -> anyhow::Result<()> {
    let blocks = sources::load_blocks(args.family).await?;
    info!("{} published {} blocks loaded", blocks.len(), args.family);

    // The core takes any Rng; production seeds from OS entropy.
    let mut rng = StdRng::from_os_rng();
    let candidates = sampler::sample(&blocks, &mut rng);
    if candidates.is_empty() {
        bail!(SetupError::EmptyCandidateList);
    }
    info!("{} candidate addresses sampled", candidates.len());

    let directory = Arc::new(sources::load_locations().await?);
    info!("location directory ready, {} sites", directory.len());

    let opts = ProbeOptions {
        port: args.port,
        connect_timeout: Duration::from_secs(1),
        read_timeout: Duration::from_secs(2),
        concurrency: args.concurrency,
    };

    let bar = progress::stage_bar(candidates.len() as u64, "probing");
    let report = progress::callback(&bar);
    let mut results = probe::probe(candidates, &opts, directory, Some(report)).await;
    bar.finish_and_clear();

    if results.is_empty() {
        bail!(SetupError::NoUsableAddresses);
    }

    sort_by_latency(&mut results);
    store::write_scan_results(store::SCAN_FILE, &results)?;
    success!(
        "{} live addresses written to {}",
        results.len(),
        store::SCAN_FILE
    );
    Ok(())
}
