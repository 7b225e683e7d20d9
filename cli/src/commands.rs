pub mod scan;
pub mod test;
pub mod top;

use clap::{Args, Parser, Subcommand};
use edgescout_common::network::block::AddressFamily;

#[derive(Parser)]
#[command(name = "edgescout")]
#[command(about = "Discover, geolocate and latency-rank anycast edge addresses.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sample the published blocks and probe for live edge addresses
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// Run repeated latency trials on discovered addresses and rank them
    #[command(alias = "t")]
    Test(TestArgs),
    /// Extract the top-ranked addresses from the latest test run
    Top(TopArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Address family to sample: 4 or 6
    #[arg(long, default_value = "4")]
    pub family: AddressFamily,

    /// Probe worker pool width
    #[arg(long, default_value_t = 100)]
    pub concurrency: usize,

    /// Port the diagnostic endpoint answers on
    #[arg(long, default_value_t = 80)]
    pub port: u16,
}

#[derive(Args)]
pub struct TestArgs {
    /// Only test addresses of this PoP code (all addresses when omitted)
    #[arg(long)]
    pub colo: Option<String>,

    /// Trial worker pool width
    #[arg(long, default_value_t = 50)]
    pub concurrency: usize,

    /// Port to run connect trials against
    #[arg(long, default_value_t = 443)]
    pub port: u16,

    /// Latency threshold in milliseconds; slower trials count as lost
    #[arg(long, default_value_t = 300)]
    pub max_latency: u64,

    /// Connect attempts per address
    #[arg(long, default_value_t = 10)]
    pub trials: u32,
}

#[derive(Args)]
pub struct TopArgs {
    /// How many top-ranked addresses to extract
    #[arg(long, default_value_t = 10)]
    pub count: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
