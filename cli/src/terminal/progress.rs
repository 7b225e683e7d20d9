use std::sync::Arc;

use edgescout_core::ProgressFn;
use indicatif::{ProgressBar, ProgressStyle};

/// A completed/total bar for one measurement stage.
pub fn stage_bar(total: u64, label: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    bar.set_message(label.to_string());
    bar
}

/// Adapts a bar into the core's progress callback. Callbacks from
/// different workers can arrive out of order, so step the bar by one per
/// completed unit instead of trusting the reported position.
pub fn callback(bar: &ProgressBar) -> ProgressFn {
    let bar = bar.clone();
    Arc::new(move |_done, _total| bar.inc(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_order_completions_never_move_the_bar_backwards() {
        let bar = ProgressBar::hidden();
        bar.set_length(3);
        let report = callback(&bar);

        report(2, 3);
        report(1, 3);
        report(3, 3);

        assert_eq!(bar.position(), 3);
    }
}
