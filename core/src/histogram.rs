//! # Loss-Rate Histogram
//!
//! Buckets trial outcomes into eleven loss-rate bands (0%, 10%, …, 100%)
//! and renders a fixed-width proportional bar per band. The 100% band is
//! never measured directly: addresses that lost every trial produce no
//! outcome at all, so its population is reconstructed from the count of
//! addresses submitted to the test stage.
//!
//! Bands 0..90 display the mean of their members' *minimum* latency. Best
//! case responsiveness separates "reliable but occasionally slow" from
//! "reliable and fast", which the per-address average would blur.

use std::fmt::Write;

use edgescout_common::network::record::TrialOutcome;

/// Width of the proportional bar in columns.
const BAR_COLUMNS: usize = 50;

/// Number of loss-rate bands, 0% through 100% in steps of 10.
const BANDS: usize = 11;

/// One loss-rate band of the histogram.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    /// Lower edge of the band as an integer percentage (0, 10, …, 100).
    pub loss_pct: u32,
    pub count: usize,
    /// Mean of member minimum latencies; `None` for empty bands and always
    /// `None` for the reconstructed 100% band.
    pub avg_min_ms: Option<f64>,
}

/// Aggregated view over one latency-test run.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub bands: Vec<Band>,
    /// Count of addresses submitted to the test stage, the denominator for
    /// every proportion and for the 100% band reconstruction.
    pub total: usize,
}

/// Band lower edge for a loss rate: truncate to an integer percentage, then
/// floor-divide by ten. With the default ten trials every loss rate is an
/// exact multiple of 10% and no rounding ambiguity arises; other trial
/// counts truncate toward zero (19% lands in the 10% band).
fn band_of(loss_rate: f64) -> usize {
    ((loss_rate * 100.0) as usize / 10).min(BANDS - 2)
}

/// Buckets `outcomes` into bands over a population of `total` submitted
/// addresses. `total` must be at least `outcomes.len()`; the difference
/// becomes the 100% band.
pub fn aggregate(outcomes: &[TrialOutcome], total: usize) -> Histogram {
    let mut counts = [0usize; BANDS - 1];
    let mut min_sums = [0u64; BANDS - 1];

    for outcome in outcomes {
        let band = band_of(outcome.loss_rate);
        counts[band] += 1;
        min_sums[band] += outcome.min_ms;
    }

    let mut bands: Vec<Band> = (0..BANDS - 1)
        .map(|i| Band {
            loss_pct: (i as u32) * 10,
            count: counts[i],
            avg_min_ms: (counts[i] > 0).then(|| min_sums[i] as f64 / counts[i] as f64),
        })
        .collect();

    bands.push(Band {
        loss_pct: 100,
        count: total.saturating_sub(outcomes.len()),
        avg_min_ms: None,
    });

    Histogram { bands, total }
}

impl Histogram {
    /// Renders the fixed-width horizontal bar chart. Pure formatting, the
    /// caller decides where the text goes.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for band in &self.bands {
            let proportion = if self.total == 0 {
                0.0
            } else {
                band.count as f64 / self.total as f64 * 100.0
            };
            let bar_len = (proportion / 100.0 * BAR_COLUMNS as f64) as usize;
            let bar = "#".repeat(bar_len);
            let latency = match band.avg_min_ms {
                Some(ms) => format!("{ms:.0} ms"),
                None => "N/A".to_string(),
            };

            let _ = writeln!(
                out,
                "loss {:3}% |{:<50}| ({:.2}%, {} addrs, avg latency: {})",
                band.loss_pct, bar, proportion, band.count, latency
            );
        }
        out
    }
}
