//! The localization run: extract, back up, translate, validate, report.
//!
//! Everything is sequential. One language file is open at a time and every
//! translated string is followed by the configured rate-limit delay, so the
//! total run time grows linearly with the number of non-empty strings.

use crate::backup::{backup_existing, BackupSet};
use crate::config::Config;
use crate::error::{LocalizeError, Result};
use crate::i18n::validator::{validate_counts, validate_key_sets};
use crate::i18n::{LanguageTarget, MetricsReport, ValidationReport};
use crate::strings::{extract_strings, file_header, format_entry, StringTable};
use crate::translation::Translator;
use std::io::{BufWriter, Write};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// How a run ended when it did not fail.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// No credential was configured and the operator chose not to continue.
    Declined,
}

/// Results of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub base_count: usize,
    pub backup: BackupSet,
    pub validation: ValidationReport,
    pub metrics: MetricsReport,
}

pub struct Localizer {
    config: Config,
    translator: Translator,
}

impl Localizer {
    pub fn new(config: Config) -> Result<Self> {
        let translator = Translator::new(&config)?;
        Ok(Self { config, translator })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Write a fresh resource file for `target` from the base table.
    ///
    /// Empty or whitespace-only values are written through unchanged without
    /// a request. If the process is interrupted, the file keeps whatever was
    /// flushed; the backup is the only way back.
    pub async fn translate_language(&self, target: &LanguageTarget, base: &StringTable) -> Result<()> {
        println!("\n{}", language_banner(target));

        let path = self.config.language_file(target);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LocalizeError::io(parent, e))?;
        }

        let file = std::fs::File::create(&path).map_err(|e| LocalizeError::io(&path, e))?;
        let mut out = BufWriter::new(file);
        let io_err = |e| LocalizeError::io(&path, e);

        write!(out, "{}\n\n", file_header(target.code())).map_err(io_err)?;

        for entry in base.iter() {
            if entry.value.trim().is_empty() {
                self.translator.metrics().record_skipped_empty();
                writeln!(out, "{}", format_entry(&entry.key, &entry.value)).map_err(io_err)?;
                continue;
            }

            print!("  Translating '{}'... ", entry.key);
            let _ = std::io::stdout().flush();
            let translated = self.translator.translate_text(&entry.value, target).await;
            println!("✓");
            writeln!(out, "{}", format_entry(&entry.key, &translated)).map_err(io_err)?;

            if !self.config.rate_limit_delay.is_zero() {
                sleep(self.config.rate_limit_delay).await;
            }
        }

        out.flush().map_err(io_err)?;
        info!("Wrote {} entries to {}", base.len(), path.display());
        println!("  ✅ Completed {}", target.code());
        Ok(())
    }

    /// Re-read every target file and compare it with the base table.
    pub fn validate_translations(&self, base: &StringTable) -> Result<ValidationReport> {
        println!("\n🔍 Validating translations...");

        let report = if self.config.strict_validation {
            validate_key_sets(base, &self.config.languages, &self.config.localization_dir)?
        } else {
            validate_counts(base, &self.config.languages, &self.config.localization_dir)?
        };

        for language in &report.languages {
            println!("  {}", language.summary_line());
        }

        Ok(report)
    }

    /// Execute a full run.
    ///
    /// `confirm_without_credential` is only called when no API key is set; it
    /// returns whether to continue with placeholder translations.
    pub async fn run<F>(&self, confirm_without_credential: F) -> Result<RunOutcome>
    where
        F: FnOnce() -> bool,
    {
        println!("🌐 Localization Automation");
        println!("{}", "=".repeat(40));

        let base_file = self.config.base_file();
        if !base_file.is_file() {
            println!("❌ Error: Base language file not found at {}", base_file.display());
            return Err(LocalizeError::BaseFileMissing(base_file));
        }

        if !self.translator.has_credential() {
            println!("⚠️  Warning: No API key set. This will create placeholder translations.");
            if !confirm_without_credential() {
                info!("Run declined without credential");
                return Ok(RunOutcome::Declined);
            }
        }

        println!("📖 Extracting base strings...");
        let base = extract_strings(&base_file)?;
        println!("  Found {} strings to translate", base.len());
        if base.is_empty() {
            warn!("Base file {} contains no entries", base_file.display());
        }

        let backup = backup_existing(
            &self.config.localization_dir,
            &self.config.backup_root,
            &self.config.languages,
        )?;
        println!("📦 Creating backup in: {}", backup.dir.display());
        for code in &backup.languages {
            println!("  ✓ Backed up {}", code);
        }

        for language in &self.config.languages {
            self.translate_language(language, &base).await?;
        }

        let validation = self.validate_translations(&base)?;
        let metrics = self.translator.metrics().report();
        debug!("Run metrics: {:?}", metrics);

        let summary = RunSummary {
            base_count: base.len(),
            backup,
            validation,
            metrics,
        };
        print_summary(&summary);

        Ok(RunOutcome::Completed(summary))
    }
}

/// Progress header shown before a language is translated.
fn language_banner(target: &LanguageTarget) -> String {
    format!(
        "🌐 Translating to {} ({}, {})...",
        target.code(),
        target.name(),
        target.native_name()
    )
}

fn print_summary(summary: &RunSummary) {
    println!("\n🎉 Localization complete!");
    println!("📦 Backup saved to: {}", summary.backup.dir.display());
    println!("📊 {}", summary.metrics.format_summary());

    let failures = summary.validation.failures().count();
    if failures > 0 {
        println!(
            "⚠️  {} language(s) do not match the base count of {} keys",
            failures, summary.base_count
        );
    }

    println!("\n📋 Next steps:");
    println!("1. Review translations for accuracy");
    println!("2. Test the app with different languages");
    println!("3. Update any hardcoded strings that weren't localized");
    println!("4. Consider using professional translation services for final release");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::validator::resource_path;
    use crate::i18n::LanguageStatus;
    use crate::strings::parse_strings;
    use crate::translation::placeholder_translation;
    use proptest::prelude::*;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_config(temp_dir: &TempDir, codes: &[&str]) -> Config {
        Config {
            openai_api_key: String::new(),
            openai_model: "gpt-4".to_string(),
            openai_api_url: "http://invalid-url-should-not-be-called.test".to_string(),
            localization_dir: temp_dir.path().join("Localization"),
            backup_root: temp_dir.path().join("backups"),
            languages: LanguageTarget::from_codes(codes).expect("valid codes"),
            request_timeout: Duration::from_secs(5),
            rate_limit_delay: Duration::ZERO,
            strict_validation: false,
        }
    }

    fn write_language(dir: &Path, code: &str, content: &str) {
        let path = resource_path(dir, code);
        std::fs::create_dir_all(path.parent().unwrap()).expect("create dir");
        std::fs::write(path, content).expect("write file");
    }

    fn base_table() -> StringTable {
        vec![("ok_button", "OK"), ("cancel_button", "Cancel"), ("empty_key", "")]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_translate_language_without_credential() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config(&temp_dir, &["fr"]);
        let localizer = Localizer::new(config).expect("localizer");
        let fr = LanguageTarget::from_code("fr").unwrap();

        localizer
            .translate_language(&fr, &base_table())
            .await
            .expect("translate");

        let written = std::fs::read_to_string(localizer.config().language_file(&fr)).unwrap();
        assert_eq!(
            written,
            "/* Localized strings for fr */\n\n\
             \"ok_button\" = \"[TRANSLATED: OK]\";\n\
             \"cancel_button\" = \"[TRANSLATED: Cancel]\";\n\
             \"empty_key\" = \"\";\n"
        );

        let report = localizer.translator().metrics().report();
        assert_eq!(report.placeholders, 2);
        assert_eq!(report.skipped_empty, 1);
    }

    #[test]
    fn test_language_banner_names_language_natively() {
        let ja = LanguageTarget::from_code("ja").unwrap();
        assert_eq!(language_banner(&ja), "🌐 Translating to ja (Japanese, 日本語)...");

        let custom = LanguageTarget::from_code("gsw").unwrap();
        assert_eq!(language_banner(&custom), "🌐 Translating to gsw (gsw, gsw)...");
    }

    #[tokio::test]
    async fn test_whitespace_value_written_unchanged() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let localizer = Localizer::new(create_test_config(&temp_dir, &["de"])).expect("localizer");
        let de = LanguageTarget::from_code("de").unwrap();
        let base: StringTable = vec![("spacer", "   ")].into_iter().collect();

        localizer.translate_language(&de, &base).await.expect("translate");

        let written = std::fs::read_to_string(localizer.config().language_file(&de)).unwrap();
        assert!(written.contains("\"spacer\" = \"   \";"));
    }

    #[tokio::test]
    async fn test_translate_language_truncates_previous_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config(&temp_dir, &["es"]);
        write_language(
            &config.localization_dir,
            "es",
            "\"old_a\" = \"A\";\n\"old_b\" = \"B\";\n\"old_c\" = \"C\";\n\"old_d\" = \"D\";\n",
        );
        let localizer = Localizer::new(config).expect("localizer");
        let es = LanguageTarget::from_code("es").unwrap();

        localizer.translate_language(&es, &base_table()).await.expect("translate");

        let table = extract_strings(&localizer.config().language_file(&es)).unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.contains_key("old_a"));
    }

    #[tokio::test]
    async fn test_rate_limit_delay_applies_per_translated_entry() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = create_test_config(&temp_dir, &["it"]);
        config.rate_limit_delay = Duration::from_millis(50);
        let localizer = Localizer::new(config).expect("localizer");
        let it = LanguageTarget::from_code("it").unwrap();

        let start = std::time::Instant::now();
        localizer.translate_language(&it, &base_table()).await.expect("translate");

        // Two non-empty values, the empty one is not delayed
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_run_missing_base_file_aborts_without_side_effects() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config(&temp_dir, &["fr"]);
        let localizer = Localizer::new(config.clone()).expect("localizer");

        let result = localizer.run(|| true).await;

        assert!(matches!(result, Err(LocalizeError::BaseFileMissing(_))));
        assert!(!config.localization_dir.join("fr.lproj").exists());
        assert!(!config.backup_root.exists());
    }

    #[tokio::test]
    async fn test_run_declined_without_credential() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config(&temp_dir, &["fr"]);
        write_language(&config.localization_dir, "en", "\"ok_button\" = \"OK\";\n");
        let localizer = Localizer::new(config.clone()).expect("localizer");

        let outcome = localizer.run(|| false).await.expect("run");

        assert!(matches!(outcome, RunOutcome::Declined));
        assert!(!config.localization_dir.join("fr.lproj").exists());
        assert!(!config.backup_root.exists());
    }

    #[tokio::test]
    async fn test_run_completes_and_validates() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config(&temp_dir, &["fr", "ja"]);
        write_language(
            &config.localization_dir,
            "en",
            "/* Base */\n\"ok_button\" = \"OK\";\n\"cancel_button\" = \"Cancel\";\n\"empty_key\" = \"\";\n",
        );
        let localizer = Localizer::new(config).expect("localizer");

        let outcome = localizer.run(|| true).await.expect("run");

        let RunOutcome::Completed(summary) = outcome else {
            panic!("run should complete");
        };
        assert_eq!(summary.base_count, 3);
        assert!(summary.validation.is_clean());
        assert_eq!(
            summary.validation.languages[0].status,
            LanguageStatus::Match { count: 3 }
        );
        assert_eq!(summary.validation.languages[0].summary_line(), "✅ fr: 3 keys");
        assert_eq!(summary.metrics.placeholders, 4);
        assert!(summary.backup.dir.is_dir());
    }

    #[tokio::test]
    async fn test_confirmation_not_asked_with_credential() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = create_test_config(&temp_dir, &[]);
        config.openai_api_key = "sk-test".to_string();
        write_language(&config.localization_dir, "en", "\"a\" = \"A\";\n");
        let localizer = Localizer::new(config).expect("localizer");

        let outcome = localizer
            .run(|| panic!("confirmation should not be requested"))
            .await
            .expect("run");

        assert!(matches!(outcome, RunOutcome::Completed(_)));
    }

    #[tokio::test]
    async fn test_strict_validation_flags_wrong_key_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = create_test_config(&temp_dir, &["fr"]);
        config.strict_validation = true;
        write_language(
            &config.localization_dir,
            "fr",
            "\"x\" = \"1\";\n\"y\" = \"2\";\n\"z\" = \"3\";\n",
        );
        let localizer = Localizer::new(config).expect("localizer");

        let report = localizer.validate_translations(&base_table()).expect("validate");

        assert!(!report.is_clean());
        assert!(report.languages[0].status.is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_written_file_keeps_every_key_in_order(
            pairs in proptest::collection::vec(("[a-zA-Z0-9_.]{1,20}", "[^\"]{0,40}"), 0..20)
        ) {
            let base: StringTable = pairs.into_iter().collect();
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let localizer = Localizer::new(create_test_config(&temp_dir, &["nl"])).expect("localizer");
            let nl = LanguageTarget::from_code("nl").unwrap();

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");
            runtime
                .block_on(localizer.translate_language(&nl, &base))
                .expect("translate");

            let written = std::fs::read_to_string(localizer.config().language_file(&nl)).unwrap();
            prop_assert!(written.starts_with("/* Localized strings for nl */\n\n"));

            let expected: StringTable = base
                .iter()
                .map(|e| {
                    let value = if e.value.trim().is_empty() {
                        e.value.clone()
                    } else {
                        placeholder_translation(&e.value)
                    };
                    (e.key.clone(), value)
                })
                .collect();
            prop_assert_eq!(parse_strings(&written), expected);
        }
    }
}
