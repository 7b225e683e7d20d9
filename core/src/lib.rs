//! The edgescout measurement pipeline.
//!
//! Two concurrent stages plus the pure math around them:
//!
//! 1. [`sampler`] turns published CIDR blocks into one candidate address
//!    per block.
//! 2. [`probe`] checks each candidate for liveness and asks the network's
//!    diagnostic endpoint which point of presence answered.
//! 3. [`latency`] runs repeated connect trials against the surviving
//!    addresses and derives min/max/avg latency and loss rate.
//! 4. [`histogram`] buckets the trial outcomes by loss rate for reporting.
//!
//! The stages never touch disk or the terminal; progress is surfaced
//! through an optional callback and persistence belongs to the caller.

use std::sync::Arc;

pub mod histogram;
pub mod latency;
pub mod probe;
pub mod sampler;
pub mod trace;

/// Observability side channel invoked after each completed unit of work
/// with `(completed, total)`. Never correctness-affecting.
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;
