use std::time::Duration;

/// Options for the discovery probe stage.
#[derive(Clone, Debug)]
pub struct ProbeOptions {
    /// Port the diagnostic endpoint answers on.
    pub port: u16,
    /// Budget for the TCP connect itself.
    pub connect_timeout: Duration,
    /// Budget for reading the diagnostic response.
    pub read_timeout: Duration,
    /// Worker pool width.
    pub concurrency: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 80,
            connect_timeout: Duration::from_secs(1),
            read_timeout: Duration::from_secs(2),
            concurrency: 100,
        }
    }
}

/// Options for the repeated-trial latency stage.
#[derive(Clone, Debug)]
pub struct TrialOptions {
    /// Port to run connect trials against.
    pub port: u16,
    /// Latency threshold; a trial at or above this is counted as lost.
    pub max_latency: Duration,
    /// Connect attempts per address.
    pub trials: u32,
    /// Worker pool width.
    pub concurrency: usize,
}

impl Default for TrialOptions {
    fn default() -> Self {
        Self {
            port: 443,
            max_latency: Duration::from_millis(300),
            trials: 10,
            concurrency: 50,
        }
    }
}
