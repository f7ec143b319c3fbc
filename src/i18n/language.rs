//! Language targets: a validated code plus the display name used in prompts.

use crate::error::{LocalizeError, Result};
use crate::i18n::{LanguageConfig, LanguageRegistry};
use tracing::warn;

/// A language a resource file is generated for.
///
/// Codes known to the registry carry their English and native names. Unknown
/// codes are still accepted so that `--languages` can name anything; the code
/// itself then doubles as both names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTarget {
    code: String,
    name: String,
    native_name: String,
}

impl LanguageTarget {
    /// Resolve a language code.
    ///
    /// Codes become directory and file names, so empty codes and codes that
    /// could escape the localization directory are rejected.
    pub fn from_code(code: &str) -> Result<LanguageTarget> {
        let code = code.trim();
        if code.is_empty()
            || code.contains('/')
            || code.contains('\\')
            || code.contains("..")
            || code.chars().any(char::is_whitespace)
        {
            return Err(LocalizeError::InvalidLanguageCode(code.to_string()));
        }

        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(LanguageTarget::from_config(config)),
            None => {
                warn!("Unknown language code '{}', using it as display name", code);
                Ok(LanguageTarget {
                    code: code.to_string(),
                    name: code.to_string(),
                    native_name: code.to_string(),
                })
            }
        }
    }

    /// Parse a list of codes, failing on the first invalid one.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<LanguageTarget>> {
        codes.iter().map(|c| Self::from_code(c.as_ref())).collect()
    }

    /// The built-in list of twenty target languages.
    pub fn defaults() -> Vec<LanguageTarget> {
        LanguageRegistry::get()
            .default_targets()
            .into_iter()
            .map(LanguageTarget::from_config)
            .collect()
    }

    /// The base language.
    pub fn canonical() -> LanguageTarget {
        LanguageTarget::from_config(LanguageRegistry::get().canonical())
    }

    fn from_config(config: &LanguageConfig) -> LanguageTarget {
        LanguageTarget {
            code: config.code.to_string(),
            name: config.name.to_string(),
            native_name: config.native_name.to_string(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// English display name (e.g., "French").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the language in itself (e.g., "Français").
    pub fn native_name(&self) -> &str {
        &self.native_name
    }
}

impl std::fmt::Display for LanguageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}
