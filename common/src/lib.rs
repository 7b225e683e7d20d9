//! Shared types and helpers for the edgescout workspace.
//!
//! Everything here is either plain data (blocks, locations, result records),
//! run configuration, or the small logging facade the other members use.

pub mod config;
pub mod error;
pub mod network;

// Macro expansions resolve tracing through this re-export, so callers do
// not need their own matching dependency.
pub use tracing;

/// Logging facade over `tracing`.
///
/// The CLI installs a formatter that maps levels to terminal symbols; the
/// `success!` target gets its own symbol there. Library crates just emit
/// events and stay free of any output concern.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::tracing::info!($($arg)*) };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => { $crate::tracing::info!(target: "edgescout::success", $($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::tracing::warn!($($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::tracing::error!($($arg)*) };
}
