//! # Published Address Blocks
//!
//! The target network publishes its edge ranges as newline-delimited CIDR
//! lists, one family per list: `/24` networks for IPv4 and `/48` networks
//! for IPv6. A block is kept verbatim as text; the sampler is the only
//! consumer and it works on the prefix groups directly.

use std::fmt;
use std::str::FromStr;

/// Address family of a sampling pass. One run handles exactly one family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// The only prefix length in scope for this family.
    pub fn expected_prefix(&self) -> u8 {
        match self {
            AddressFamily::V4 => 24,
            AddressFamily::V6 => 48,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

impl FromStr for AddressFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4" | "v4" | "ipv4" => Ok(AddressFamily::V4),
            "6" | "v6" | "ipv6" => Ok(AddressFamily::V6),
            other => Err(format!("invalid address family: {other}")),
        }
    }
}

/// One published CIDR block, e.g. `104.16.0.0/24` or `2606:4700:10::/48`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressBlock {
    pub cidr: String,
    pub family: AddressFamily,
}

impl AddressBlock {
    pub fn new(cidr: impl Into<String>, family: AddressFamily) -> Self {
        Self {
            cidr: cidr.into(),
            family,
        }
    }

    /// The network-prefix part, without the `/len` suffix.
    ///
    /// Returns `None` when the declared prefix length is not the expected
    /// one for the block's family. Such blocks are out of scope for the
    /// sampling pass, not an error.
    pub fn base(&self) -> Option<&str> {
        let (base, len) = self.cidr.rsplit_once('/')?;
        let len: u8 = len.parse().ok()?;
        if len != self.family.expected_prefix() {
            return None;
        }
        Some(base)
    }
}

/// Parses a newline-delimited CIDR list into blocks of the given family.
///
/// Empty lines and surrounding whitespace are dropped; nothing else is
/// validated here, malformed entries fall out later at sampling time.
pub fn parse_block_list(content: &str, family: AddressFamily) -> Vec<AddressBlock> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| AddressBlock::new(line, family))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
