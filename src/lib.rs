//! Machine-translate an Apple `Localizable.strings` base file into one
//! resource file per target language.
//!
//! A run extracts the base strings, snapshots any existing target files into
//! a timestamped backup directory, translates every non-empty value through an
//! OpenAI chat-completion endpoint, rewrites each target file and finally
//! checks that every file carries as many entries as the base.

pub mod backup;
pub mod config;
pub mod error;
pub mod i18n;
pub mod localizer;
pub mod strings;
pub mod translation;

pub use error::{LocalizeError, Result};
pub use localizer::{Localizer, RunOutcome, RunSummary};
