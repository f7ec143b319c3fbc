use crate::i18n::validator::resource_path;
use crate::i18n::LanguageTarget;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_LOCALIZATION_DIR: &str = "PractiCal/Localization";

#[derive(Debug, Clone)]
pub struct Config {
    // OpenAI (an empty key switches to placeholder translations)
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: String,

    // Filesystem
    pub localization_dir: PathBuf,
    pub backup_root: PathBuf,

    // Targets
    pub languages: Vec<LanguageTarget>,

    // Request pacing
    pub request_timeout: Duration,
    pub rate_limit_delay: Duration,

    // Also compare key names during validation
    pub strict_validation: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let languages = match std::env::var("LOCALIZATION_LANGUAGES") {
            Ok(list) if !list.trim().is_empty() => {
                let codes: Vec<&str> = list.split(',').collect();
                LanguageTarget::from_codes(&codes).context("Invalid LOCALIZATION_LANGUAGES")?
            }
            _ => LanguageTarget::defaults(),
        };

        Ok(Self {
            // OpenAI
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),

            // Filesystem
            localization_dir: std::env::var("LOCALIZATION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOCALIZATION_DIR)),
            backup_root: std::env::var("BACKUP_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            languages,

            // Request pacing
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            rate_limit_delay: Duration::from_millis(
                std::env::var("RATE_LIMIT_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(500),
            ),

            strict_validation: false,
        })
    }

    /// Whether real translations can be requested.
    pub fn has_credential(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }

    /// Path of the base-language resource file.
    pub fn base_file(&self) -> PathBuf {
        resource_path(&self.localization_dir, LanguageTarget::canonical().code())
    }

    /// Path of a target language's resource file.
    pub fn language_file(&self, language: &LanguageTarget) -> PathBuf {
        resource_path(&self.localization_dir, language.code())
    }
}
