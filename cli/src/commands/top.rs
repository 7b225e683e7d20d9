use anyhow::bail;

use edgescout_common::error::SetupError;
use edgescout_common::success;

use crate::commands::TopArgs;
use crate::store;

/// Post-hoc extraction: first N rows of the ranked results into a plain
/// address list.
pub fn top(args: TopArgs) -> anyhow::Result<()> {
    let addresses = store::read_top_addresses(store::RESULT_FILE, args.count)?;
    if addresses.is_empty() {
        bail!(SetupError::NoUsableAddresses);
    }

    store::write_address_list(store::TOP_FILE, &addresses)?;
    success!(
        "top {} addresses written to {}",
        addresses.len(),
        store::TOP_FILE
    );
    Ok(())
}
