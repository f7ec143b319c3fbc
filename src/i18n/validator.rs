//! Post-run validation of generated resource files.
//!
//! The default check compares entry counts only: a file with the right number
//! of entries under the wrong key names still passes. `validate_key_sets` is
//! the stricter, opt-in variant that compares key names as well.

use crate::error::Result;
use crate::i18n::LanguageTarget;
use crate::strings::{extract_strings, StringTable};
use std::path::{Path, PathBuf};

/// Path of the resource file for a language code under `localization_dir`.
pub fn resource_path(localization_dir: &Path, code: &str) -> PathBuf {
    localization_dir
        .join(format!("{}.lproj", code))
        .join("Localizable.strings")
}

/// Outcome of checking one language file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageStatus {
    /// Entry count equals the base count.
    Match { count: usize },
    /// File exists but its entry count differs from the base count.
    Mismatch { count: usize, expected: usize },
    /// No file on disk.
    Missing,
}

impl LanguageStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, LanguageStatus::Match { .. })
    }
}

/// Key names that differ between a language file and the base file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDiff {
    /// Present in the base file, absent from the language file
    pub missing: Vec<String>,
    /// Present in the language file, absent from the base file
    pub extra: Vec<String>,
}

impl KeyDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Validation result for a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageValidation {
    pub code: String,
    pub status: LanguageStatus,
    /// Only populated by the strict validator.
    pub key_diff: Option<KeyDiff>,
}

impl LanguageValidation {
    pub fn is_ok(&self) -> bool {
        self.status.is_ok() && self.key_diff.as_ref().map_or(true, KeyDiff::is_empty)
    }

    /// One human-readable line for the run report.
    pub fn summary_line(&self) -> String {
        let mut line = match &self.status {
            LanguageStatus::Match { count } => format!("✅ {}: {} keys", self.code, count),
            LanguageStatus::Mismatch { count, expected } => {
                format!("❌ {}: {}/{} keys", self.code, count, expected)
            }
            LanguageStatus::Missing => format!("❌ {}: File not found", self.code),
        };

        if let Some(diff) = self.key_diff.as_ref().filter(|d| !d.is_empty()) {
            if !diff.missing.is_empty() {
                line.push_str(&format!(" (missing: {})", diff.missing.join(", ")));
            }
            if !diff.extra.is_empty() {
                line.push_str(&format!(" (extra: {})", diff.extra.join(", ")));
            }
            if self.status.is_ok() {
                line = line.replacen('✅', "❌", 1);
            }
        }

        line
    }
}

/// Validation results for every configured language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub expected: usize,
    pub languages: Vec<LanguageValidation>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.languages.iter().all(LanguageValidation::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &LanguageValidation> {
        self.languages.iter().filter(|l| !l.is_ok())
    }
}

/// Compare each language file's entry count with the base count.
pub fn validate_counts(
    base: &StringTable,
    languages: &[LanguageTarget],
    localization_dir: &Path,
) -> Result<ValidationReport> {
    validate(base, languages, localization_dir, false)
}

/// Count check plus a comparison of key names.
pub fn validate_key_sets(
    base: &StringTable,
    languages: &[LanguageTarget],
    localization_dir: &Path,
) -> Result<ValidationReport> {
    validate(base, languages, localization_dir, true)
}

fn validate(
    base: &StringTable,
    languages: &[LanguageTarget],
    localization_dir: &Path,
    strict: bool,
) -> Result<ValidationReport> {
    let expected = base.len();
    let mut results = Vec::with_capacity(languages.len());

    for language in languages {
        let path = resource_path(localization_dir, language.code());
        if !path.exists() {
            results.push(LanguageValidation {
                code: language.code().to_string(),
                status: LanguageStatus::Missing,
                key_diff: None,
            });
            continue;
        }

        let table = extract_strings(&path)?;
        let count = table.len();
        let status = if count == expected {
            LanguageStatus::Match { count }
        } else {
            LanguageStatus::Mismatch { count, expected }
        };

        results.push(LanguageValidation {
            code: language.code().to_string(),
            status,
            key_diff: strict.then(|| diff_keys(base, &table)),
        });
    }

    Ok(ValidationReport {
        expected,
        languages: results,
    })
}

fn diff_keys(base: &StringTable, other: &StringTable) -> KeyDiff {
    KeyDiff {
        missing: base
            .keys()
            .filter(|k| !other.contains_key(k))
            .map(str::to_string)
            .collect(),
        extra: other
            .keys()
            .filter(|k| !base.contains_key(k))
            .map(str::to_string)
            .collect(),
    }
}
