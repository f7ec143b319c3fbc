//! Language registry: Single source of truth for known languages.
//!
//! The registry holds the canonical (base) language and the built-in list of
//! default translation targets. It uses a singleton pattern with `OnceLock` so
//! that lookups are cheap and allocation happens once.

use std::sync::OnceLock;

/// Metadata for a known language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "fr")
    pub code: &'static str,

    /// English name used in translation prompts (e.g., "French")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français")
    pub native_name: &'static str,

    /// Whether this is the base language every other file is derived from
    pub is_canonical: bool,

    /// Whether this language is translated when no explicit list is given
    pub default_target: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Default translation targets, in the order they are processed.
    pub fn default_targets(&self) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| lang.default_target)
            .collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if the built-in table does not define exactly one canonical
    /// language.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

const fn target(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
        is_canonical: false,
        default_target: true,
    }
}

/// English as base, followed by the twenty default targets.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            default_target: false,
        },
        target("ja", "Japanese", "日本語"),
        target("ko", "Korean", "한국어"),
        target("es", "Spanish", "Español"),
        target("fr", "French", "Français"),
        target("de", "German", "Deutsch"),
        target("zh", "Chinese (Simplified)", "简体中文"),
        target("ru", "Russian", "Русский"),
        target("ar", "Arabic", "العربية"),
        target("hi", "Hindi", "हिन्दी"),
        target("pt", "Portuguese", "Português"),
        target("it", "Italian", "Italiano"),
        target("nl", "Dutch", "Nederlands"),
        target("sv", "Swedish", "Svenska"),
        target("da", "Danish", "Dansk"),
        target("no", "Norwegian", "Norsk"),
        target("fi", "Finnish", "Suomi"),
        target("pl", "Polish", "Polski"),
        target("tr", "Turkish", "Türkçe"),
        target("uk", "Ukrainian", "Українська"),
        target("vi", "Vietnamese", "Tiếng Việt"),
    ]
}
