use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a localization run before or while touching the filesystem.
///
/// Per-string translation failures are not represented here: they are turned
/// into inline placeholder values by the translator and never escalate.
#[derive(Debug, Error)]
pub enum LocalizeError {
    #[error("base language file not found at {0}")]
    BaseFileMissing(PathBuf),

    #[error("invalid language code '{0}'")]
    InvalidLanguageCode(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl LocalizeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LocalizeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LocalizeError>;
