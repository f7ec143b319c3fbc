//! Language handling for the localizer.
//!
//! - `registry`: built-in table of the base language and the default targets
//! - `language`: validated `LanguageTarget` built from a code
//! - `validator`: post-run count (and optional key-set) validation
//! - `metrics`: per-run translation counters

mod language;
mod metrics;
mod registry;
pub mod validator;

pub use language::LanguageTarget;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{LanguageStatus, LanguageValidation, ValidationReport};
