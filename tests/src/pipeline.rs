//! End-to-end pipeline tests against local mock responders.
//!
//! A loopback listener stands in for the target network's diagnostic
//! endpoint; candidates from TEST-NET-1 stand in for the unreachable
//! majority of a real sampling pass.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use edgescout_common::config::{ProbeOptions, TrialOptions};
use edgescout_common::network::location::{Location, LocationDirectory};
use edgescout_common::network::record::{sort_by_latency, sort_ranked};
use edgescout_core::{histogram, latency, probe};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves a fixed trace-style response to every connection.
async fn spawn_trace_responder(body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\n{body}"
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });
    addr
}

/// Accepts and immediately closes connections, enough for connect trials.
async fn spawn_accept_only() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            drop(socket);
        }
    });
    addr
}

fn tokyo_directory() -> Arc<LocationDirectory> {
    Arc::new(LocationDirectory::from_locations(vec![Location {
        iata: "NRT".to_string(),
        lat: 35.76,
        lon: 140.38,
        cca2: "JP".to_string(),
        region: "Asia Pacific".to_string(),
        city: "Tokyo".to_string(),
    }]))
}

fn probe_opts(port: u16) -> ProbeOptions {
    ProbeOptions {
        port,
        connect_timeout: Duration::from_millis(500),
        read_timeout: Duration::from_millis(500),
        concurrency: 8,
    }
}

#[tokio::test]
async fn discovery_then_trials_then_histogram() {
    let trace_addr = spawn_trace_responder("uag=Mozilla/5.0\ncolo=NRT\nloc=JP\n").await;
    let directory = tokyo_directory();

    // Stage one: one live candidate among unreachable ones.
    let candidates = vec![
        "127.0.0.1".to_string(),
        "192.0.2.10".to_string(),
        "192.0.2.11".to_string(),
    ];
    let mut results = probe::probe(
        candidates,
        &probe_opts(trace_addr.port()),
        directory,
        None,
    )
    .await;
    sort_by_latency(&mut results);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].colo, "NRT");
    assert_eq!(results[0].city, "Tokyo");

    // Stage two: trial the survivor plus one dead address.
    let trial_addr = spawn_accept_only().await;
    let addresses: Vec<String> = results
        .iter()
        .map(|r| r.addr.clone())
        .chain(["192.0.2.10".to_string()])
        .collect();
    let submitted = addresses.len();

    let opts = TrialOptions {
        port: trial_addr.port(),
        max_latency: Duration::from_millis(300),
        trials: 10,
        concurrency: 4,
    };
    let mut outcomes = latency::test(addresses, &opts, None).await;
    sort_ranked(&mut outcomes);

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].addr, "127.0.0.1");
    assert_eq!(outcomes[0].loss_rate, 0.0);

    // Aggregation: the dead address reappears as the 100% band.
    let histogram = histogram::aggregate(&outcomes, submitted);
    let counted: usize = histogram.bands.iter().map(|b| b.count).sum();
    assert_eq!(counted, submitted);
    assert_eq!(histogram.bands.first().unwrap().count, 1);
    assert_eq!(histogram.bands.last().unwrap().count, 1);
}

#[tokio::test]
async fn run_with_no_live_candidates_ends_empty_not_crashing() {
    let directory = tokyo_directory();

    // Port 1 on TEST-NET-1 addresses: every connect fails fast or times out.
    let candidates = vec!["192.0.2.20".to_string(), "192.0.2.21".to_string()];
    let results = probe::probe(candidates, &probe_opts(1), directory, None).await;

    // The empty result is the caller's cue to report the terminal
    // "no usable addresses found" condition.
    assert!(results.is_empty());
}

#[tokio::test]
async fn proxied_responder_is_not_mistaken_for_the_target_network() {
    // A middlebox that answers but does not echo our User-Agent.
    let trace_addr = spawn_trace_responder("some other payload\ncolo=NRT\n").await;
    let directory = tokyo_directory();

    let results = probe::probe(
        vec!["127.0.0.1".to_string()],
        &probe_opts(trace_addr.port()),
        directory,
        None,
    )
    .await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn progress_is_reported_for_both_stages() {
    let trace_addr = spawn_trace_responder("uag=Mozilla/5.0\ncolo=NRT\n").await;
    let directory = tokyo_directory();

    let probe_updates = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = probe_updates.clone();
    let results = probe::probe(
        vec!["127.0.0.1".to_string(), "127.0.0.1".to_string()],
        &probe_opts(trace_addr.port()),
        directory,
        Some(Arc::new(move |done, total| {
            sink.lock().unwrap().push((done, total));
        })),
    )
    .await;
    assert_eq!(results.len(), 2);

    let mut updates = probe_updates.lock().unwrap().clone();
    updates.sort_unstable();
    assert_eq!(updates, vec![(1, 2), (2, 2)]);

    let trial_addr = spawn_accept_only().await;
    let trial_updates = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = trial_updates.clone();
    let opts = TrialOptions {
        port: trial_addr.port(),
        max_latency: Duration::from_millis(300),
        trials: 3,
        concurrency: 2,
    };
    let outcomes = latency::test(
        vec!["127.0.0.1".to_string()],
        &opts,
        Some(Arc::new(move |done, total| {
            sink.lock().unwrap().push((done, total));
        })),
    )
    .await;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(*trial_updates.lock().unwrap(), vec![(1, 1)]);
}
