//! # Address Sampling
//!
//! Draws one pseudo-random concrete address from every eligible published
//! block: the last octet of a `/24`, or the last five 16-bit groups of a
//! `/48`. Candidates keep their textual form so they round-trip unchanged
//! through persistence; parsing happens at connect time.
//!
//! The random source is injected so sampling is deterministic under test;
//! the entry point seeds it from OS entropy.

use edgescout_common::network::block::{AddressBlock, AddressFamily};
use rand::Rng;

/// Samples one candidate per eligible block, preserving input order.
///
/// Blocks whose declared prefix length does not match the family's expected
/// one, and blocks whose base is malformed, are silently skipped. The output
/// is therefore at most as long as the input and never longer.
pub fn sample<R: Rng + ?Sized>(blocks: &[AddressBlock], rng: &mut R) -> Vec<String> {
    blocks
        .iter()
        .filter_map(|block| sample_block(block, rng))
        .collect()
}

fn sample_block<R: Rng + ?Sized>(block: &AddressBlock, rng: &mut R) -> Option<String> {
    let base = block.base()?;
    match block.family {
        AddressFamily::V4 => sample_v4(base, rng),
        AddressFamily::V6 => sample_v6(base, rng),
    }
}

fn sample_v4<R: Rng + ?Sized>(base: &str, rng: &mut R) -> Option<String> {
    let octets: Vec<&str> = base.split('.').collect();
    if octets.len() != 4 {
        return None;
    }
    let last: u8 = rng.random_range(0..=255);
    Some(format!("{}.{}.{}.{last}", octets[0], octets[1], octets[2]))
}

fn sample_v6<R: Rng + ?Sized>(base: &str, rng: &mut R) -> Option<String> {
    let parts: Vec<&str> = base.split(':').collect();
    if parts.len() < 3 {
        return None;
    }
    // A compressed base like `2606:4700::` leaves empty strings where the
    // `::` elided zero groups; expand them so the join stays a valid
    // full-form address.
    let mut groups: Vec<String> = parts[..3]
        .iter()
        .map(|group| {
            if group.is_empty() {
                "0".to_string()
            } else {
                (*group).to_string()
            }
        })
        .collect();
    for _ in 0..5 {
        let group: u16 = rng.random_range(0..=0xffff);
        // Lowercase hex, no zero padding, full 8-group form.
        groups.push(format!("{group:x}"));
    }
    Some(groups.join(":"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
