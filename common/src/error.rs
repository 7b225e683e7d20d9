use thiserror::Error;

/// Fatal setup or terminal conditions.
///
/// Per-address failures (refused connects, timeouts, garbage responses) are
/// never errors; they are expected non-results and simply drop out of the
/// output. Only conditions that indicate a broken run surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("no candidate addresses to probe")]
    EmptyCandidateList,

    #[error("no addresses to test")]
    EmptyAddressList,

    #[error("location directory is empty")]
    EmptyLocationDirectory,

    #[error("no usable addresses found")]
    NoUsableAddresses,
}
