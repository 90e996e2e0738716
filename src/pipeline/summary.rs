use log::{error, info, warn};

use crate::Report;

/// Log the end-of-run aggregate: counts, then every failure and walk error so it can be fixed by hand.
pub fn log_report_summary(report: &Report) {
    info!(
        "images found: {}, copied: {}, already present: {}, failed: {}",
        report.discovered,
        report.copied_count(),
        report.skipped_count(),
        report.failure_count()
    );
    if report.is_clean() {
        return;
    }
    if !report.failures.is_empty() {
        warn!("{} images need manual attention", report.failure_count());
    }
    for f in &report.failures {
        error!("error msg: {} ({})", f.reason, f.source.display());
    }
    if !report.walk_errors.is_empty() {
        warn!(
            "{} parts of the source tree could not be read; images there were not processed",
            report.walk_errors.len()
        );
    }
    for w in &report.walk_errors {
        match &w.path {
            Some(p) => error!("walk error: {} ({})", w.reason, p.display()),
            None => error!("walk error: {}", w.reason),
        }
    }
}
