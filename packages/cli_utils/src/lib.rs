#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal plumbing for the `vigilance_map` binary.
//!
//! [`PointsProgress`] drives an `indicatif` bar from the spatial crate's
//! [`ProgressCallback`]; [`init_logger`] routes `log` output through
//! `indicatif-log-bridge` so log lines are printed above the bar instead of
//! through it.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use vigilance_map_spatial::progress::ProgressCallback;

pub use indicatif::MultiProgress;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn,vigilance_map=info";

const BAR_TEMPLATE: &str = "{msg:<20} {wide_bar:.green/dim} {pos:>6}/{len:6} [{elapsed_precise}]";

/// Per-point progress for region resolution.
pub struct PointsProgress {
    bar: ProgressBar,
}

impl PointsProgress {
    /// Adds an empty bar to `multi`; its length arrives through
    /// [`ProgressCallback::set_total`].
    #[must_use]
    pub fn attach(multi: &MultiProgress, label: &str) -> Arc<dyn ProgressCallback> {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");

        let bar = multi.add(ProgressBar::new(0));
        bar.set_style(style);
        bar.set_message(label.to_string());

        Arc::new(Self { bar })
    }
}

impl ProgressCallback for PointsProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.reset();
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Installs the global logger behind the progress bars.
///
/// `RUST_LOG` is honored when set; otherwise the vigilance crates log at
/// `info` and everything else at `warn`. Calling this twice keeps the
/// first logger.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let logger = pretty_env_logger::formatted_builder()
        .parse_filters(&filter)
        .build();
    let max_level = logger.filter();

    if indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .is_ok()
    {
        log::set_max_level(max_level);
    }

    multi
}
