//! # Discovery Probe Engine
//!
//! Concurrently checks candidate addresses for liveness and PoP identity.
//! Each worker opens one TCP connection, measures connect latency, runs the
//! fixed diagnostic exchange from [`crate::trace`] and joins the reported
//! PoP code against the location directory.
//!
//! Most candidates are expected to be unreachable; every per-candidate
//! failure is a silent non-result, never an error. Results come back in
//! completion order, callers sort by latency when they need a ranking.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::debug;

use edgescout_common::config::ProbeOptions;
use edgescout_common::network::location::LocationDirectory;
use edgescout_common::network::record::ProbeResult;

use crate::ProgressFn;
use crate::trace;

const READ_CHUNK: usize = 4096;

/// Probes every candidate with a bounded worker pool and returns the
/// successful results in unspecified order.
///
/// An empty candidate list yields an empty result; the caller owns the
/// decision to treat that as the fatal "no usable addresses" condition.
pub async fn probe(
    candidates: Vec<String>,
    opts: &ProbeOptions,
    directory: Arc<LocationDirectory>,
    on_progress: Option<ProgressFn>,
) -> Vec<ProbeResult> {
    let total = candidates.len();
    let semaphore = Arc::new(Semaphore::new(opts.concurrency.max(1)));
    let completed = Arc::new(AtomicUsize::new(0));
    let mut pool: JoinSet<Option<ProbeResult>> = JoinSet::new();

    for addr in candidates {
        let opts = opts.clone();
        let directory = directory.clone();
        let semaphore = semaphore.clone();
        let completed = completed.clone();
        let on_progress = on_progress.clone();

        pool.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return None;
            };
            let result = probe_candidate(&addr, &opts, &directory).await;

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(report) = &on_progress {
                report(done, total);
            }
            result
        });
    }

    // Workers hand their local result back through the join; the pool owner
    // combines them, so no lock sits on the probe path.
    let mut results = Vec::new();
    while let Some(joined) = pool.join_next().await {
        if let Ok(Some(result)) = joined {
            results.push(result);
        }
    }
    results
}

/// One full probe: connect, exchange, parse, locate.
///
/// Any failure along the way is the expected outcome for an address that is
/// not a reachable member of the target network, hence `Option`.
async fn probe_candidate(
    addr: &str,
    opts: &ProbeOptions,
    directory: &LocationDirectory,
) -> Option<ProbeResult> {
    let ip: IpAddr = addr.parse().ok()?;
    let target = SocketAddr::new(ip, opts.port);

    let started = Instant::now();
    let mut stream = timeout(opts.connect_timeout, TcpStream::connect(target))
        .await
        .ok()?
        .ok()?;
    let latency_ms = started.elapsed().as_millis() as u64;

    let request = trace::build_request(addr);
    timeout(opts.read_timeout, stream.write_all(request.as_bytes()))
        .await
        .ok()?
        .ok()?;

    let raw = read_response(&mut stream, opts.read_timeout).await?;
    let response = String::from_utf8_lossy(&raw);
    let colo = trace::parse_pop_code(&response)?;

    let result = match directory.get(&colo) {
        Some(location) => ProbeResult {
            addr: addr.to_string(),
            colo,
            region: location.region.clone(),
            city: location.city.clone(),
            latency_ms,
        },
        // An unrecognized PoP code is still a live, identified member of
        // the network; keep it with empty location fields.
        None => ProbeResult {
            addr: addr.to_string(),
            colo,
            region: String::new(),
            city: String::new(),
            latency_ms,
        },
    };

    debug!(
        addr = %result.addr,
        colo = %result.colo,
        latency_ms = result.latency_ms,
        "candidate responded"
    );
    Some(result)
}

/// Reads until the header/body separator shows up or the peer closes.
async fn read_response(stream: &mut TcpStream, read_timeout: Duration) -> Option<Vec<u8>> {
    let mut response = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = timeout(read_timeout, stream.read(&mut chunk))
            .await
            .ok()?
            .ok()?;
        if n == 0 {
            break;
        }
        response.extend_from_slice(&chunk[..n]);
        if response.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    if response.is_empty() { None } else { Some(response) }
}
