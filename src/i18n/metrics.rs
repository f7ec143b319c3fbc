//! Translation counters for the end-of-run summary.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-run translation counters.
///
/// One instance lives inside each `Translator`, so independent runs (and
/// tests) never share counts.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Requests sent to the completion API
    api_calls: AtomicUsize,

    /// Requests that ended in an error placeholder
    api_failures: AtomicUsize,

    /// Values replaced by the no-credential placeholder
    placeholders: AtomicUsize,

    /// Empty or whitespace-only values written through untranslated
    skipped_empty: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_failure(&self) {
        self.api_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_placeholder(&self) {
        self.placeholders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped_empty(&self) {
        self.skipped_empty.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters.
    pub fn report(&self) -> MetricsReport {
        let api_calls = self.api_calls.load(Ordering::Relaxed);
        let api_failures = self.api_failures.load(Ordering::Relaxed);
        let api_success_rate = if api_calls > 0 {
            ((api_calls - api_failures) as f64 / api_calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            api_calls,
            api_failures,
            api_success_rate,
            placeholders: self.placeholders.load(Ordering::Relaxed),
            skipped_empty: self.skipped_empty.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of `TranslationMetrics`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub api_calls: usize,
    pub api_failures: usize,
    /// Percentage of API calls that produced a translation
    pub api_success_rate: f64,
    pub placeholders: usize,
    pub skipped_empty: usize,
}

impl MetricsReport {
    pub fn format_summary(&self) -> String {
        // No rate without calls.
        let calls = if self.api_calls == 0 {
            "0".to_string()
        } else {
            format!(
                "{} ({} failed, {:.1}% success)",
                self.api_calls, self.api_failures, self.api_success_rate
            )
        };
        format!(
            "API calls: {}, placeholders: {}, empty values kept: {}",
            calls, self.placeholders, self.skipped_empty
        )
    }
}
