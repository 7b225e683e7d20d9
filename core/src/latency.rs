//! # Repeated-Trial Latency Tester
//!
//! Measures sustained reachability of already-discovered addresses. Each
//! worker owns one address and runs its trials strictly in sequence, a
//! fresh connect per trial, so the numbers reflect reachability over time
//! rather than a single burst. Workers run concurrently under a bounded
//! pool.
//!
//! Policy: a connect that lands at or above the latency threshold counts
//! as lost even though it nominally succeeded. Too slow to be useful is
//! the same as unreachable for ranking purposes.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::debug;

use edgescout_common::config::TrialOptions;
use edgescout_common::network::record::TrialOutcome;

use crate::ProgressFn;

/// Runs the full trial sequence against every address.
///
/// Addresses with zero successful trials are absent from the output; the
/// histogram stage reconstructs them from the submitted total. Output order
/// is unspecified, callers rank with
/// [`edgescout_common::network::record::sort_ranked`].
pub async fn test(
    addresses: Vec<String>,
    opts: &TrialOptions,
    on_progress: Option<ProgressFn>,
) -> Vec<TrialOutcome> {
    let total = addresses.len();
    let semaphore = Arc::new(Semaphore::new(opts.concurrency.max(1)));
    let completed = Arc::new(AtomicUsize::new(0));
    let mut pool: JoinSet<Option<TrialOutcome>> = JoinSet::new();

    for addr in addresses {
        let opts = opts.clone();
        let semaphore = semaphore.clone();
        let completed = completed.clone();
        let on_progress = on_progress.clone();

        pool.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return None;
            };
            let outcome = run_trials(&addr, &opts).await;

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(report) = &on_progress {
                report(done, total);
            }
            outcome
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = pool.join_next().await {
        if let Ok(Some(outcome)) = joined {
            outcomes.push(outcome);
        }
    }
    outcomes
}

async fn run_trials(addr: &str, opts: &TrialOptions) -> Option<TrialOutcome> {
    let ip: IpAddr = addr.parse().ok()?;
    let target = SocketAddr::new(ip, opts.port);

    let mut stats = TrialStats::default();
    for _ in 0..opts.trials {
        // No retry: a failed trial is final for that trial.
        if let Some(latency_ms) = one_trial(target, opts.max_latency).await {
            stats.record(latency_ms);
        }
    }

    let outcome = stats.finish(addr.to_string(), opts.trials);
    match &outcome {
        Some(o) => debug!(
            addr = %o.addr,
            min_ms = o.min_ms,
            max_ms = o.max_ms,
            avg_ms = o.avg_ms,
            loss_rate = o.loss_rate,
            "trials complete"
        ),
        None => debug!(addr, "all trials lost, address dropped"),
    }
    outcome
}

/// One fresh connect, closed immediately. Returns the measured latency for
/// a successful trial, `None` for a lost one. The threshold boundary is
/// exclusive: a trial measuring exactly `max_latency` is lost.
async fn one_trial(target: SocketAddr, max_latency: Duration) -> Option<u64> {
    let started = Instant::now();
    let stream = timeout(max_latency, TcpStream::connect(target))
        .await
        .ok()?
        .ok()?;
    let elapsed = started.elapsed();
    drop(stream);

    if elapsed >= max_latency {
        return None;
    }
    Some(elapsed.as_millis() as u64)
}

/// Running min/max/sum over the successful trials of one address.
#[derive(Debug, Default)]
struct TrialStats {
    successes: u32,
    min_ms: u64,
    max_ms: u64,
    sum_ms: u64,
}

impl TrialStats {
    fn record(&mut self, latency_ms: u64) {
        if self.successes == 0 || latency_ms < self.min_ms {
            self.min_ms = latency_ms;
        }
        if latency_ms > self.max_ms {
            self.max_ms = latency_ms;
        }
        self.sum_ms += latency_ms;
        self.successes += 1;
    }

    fn finish(self, addr: String, trials: u32) -> Option<TrialOutcome> {
        if self.successes == 0 {
            return None;
        }
        Some(TrialOutcome {
            addr,
            min_ms: self.min_ms,
            max_ms: self.max_ms,
            avg_ms: self.sum_ms / u64::from(self.successes),
            loss_rate: f64::from(trials - self.successes) / f64::from(trials),
        })
    }
}
