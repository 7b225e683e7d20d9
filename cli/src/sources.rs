//! # Reference Data
//!
//! Downloads the published CIDR lists and the PoP location feed, caching
//! each under the working directory so repeat runs work offline. A missing
//! or unparseable feed is fatal: without it the run cannot produce anything
//! meaningful, unlike an unreachable candidate which is routine.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use edgescout_common::error::SetupError;
use edgescout_common::info;
use edgescout_common::network::block::{AddressBlock, AddressFamily, parse_block_list};
use edgescout_common::network::location::{Location, LocationDirectory};

const IPV4_LIST_URL: &str = "https://www.baipiao.eu.org/cloudflare/ips-v4";
const IPV6_LIST_URL: &str = "https://www.baipiao.eu.org/cloudflare/ips-v6";
const LOCATIONS_URL: &str = "https://speed.cloudflare.com/locations";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Loads the published block list for one family, from cache when present.
pub async fn load_blocks(family: AddressFamily) -> anyhow::Result<Vec<AddressBlock>> {
    let (path, url) = match family {
        AddressFamily::V4 => ("ips-v4.txt", IPV4_LIST_URL),
        AddressFamily::V6 => ("ips-v6.txt", IPV6_LIST_URL),
    };

    let content = cached_or_fetch(path, url).await?;
    let blocks = parse_block_list(&content, family);
    if blocks.is_empty() {
        bail!("block list {path} contains no CIDR entries");
    }
    Ok(blocks)
}

/// Loads the PoP location directory, from cache when present.
pub async fn load_locations() -> anyhow::Result<LocationDirectory> {
    let content = cached_or_fetch("locations.json", LOCATIONS_URL).await?;
    let locations: Vec<Location> =
        serde_json::from_str(&content).context("parsing locations.json")?;

    let directory = LocationDirectory::from_locations(locations);
    if directory.is_empty() {
        bail!(SetupError::EmptyLocationDirectory);
    }
    Ok(directory)
}

async fn cached_or_fetch(path: &str, url: &str) -> anyhow::Result<String> {
    if Path::new(path).exists() {
        info!("using cached {path}");
        return std::fs::read_to_string(path).with_context(|| format!("reading {path}"));
    }

    info!("downloading {url}");
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let content = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .with_context(|| format!("fetching {url}"))?
        .text()
        .await
        .with_context(|| format!("reading body of {url}"))?;

    std::fs::write(path, &content).with_context(|| format!("caching {path}"))?;
    Ok(content)
}
