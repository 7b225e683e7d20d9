//! Result records produced by the two measurement stages.

/// Outcome of one successful discovery probe.
///
/// `region`/`city` stay empty when the reported PoP code is absent from the
/// location directory; an unrecognized code is still a useful signal.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeResult {
    pub addr: String,
    pub colo: String,
    pub region: String,
    pub city: String,
    pub latency_ms: u64,
}

/// Outcome of one address's full trial sequence.
///
/// Addresses with zero successful trials never produce an outcome; they are
/// reconstructed later as the histogram's 100%-loss band.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialOutcome {
    pub addr: String,
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: u64,
    /// Fraction of trials lost, always a multiple of 1/trials in [0, 1].
    pub loss_rate: f64,
}

/// Sorts discovery results by connect latency ascending.
pub fn sort_by_latency(results: &mut [ProbeResult]) {
    results.sort_by_key(|r| r.latency_ms);
}

/// Ranking policy for trial outcomes: fewer drops always outranks lower
/// latency, so sort by loss rate first and average latency second.
pub fn sort_ranked(outcomes: &mut [TrialOutcome]) {
    outcomes.sort_by(|a, b| {
        a.loss_rate
            .total_cmp(&b.loss_rate)
            .then(a.avg_ms.cmp(&b.avg_ms))
    });
}
