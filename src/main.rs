use anyhow::Result;
use clap::Parser;
use localize_strings::config::Config;
use localize_strings::i18n::LanguageTarget;
use localize_strings::{LocalizeError, Localizer, RunOutcome};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Automate translation of Localizable.strings files
#[derive(Parser, Debug)]
#[command(name = "localize-strings", version, about)]
struct Cli {
    /// OpenAI API key (falls back to OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// OpenAI model to use (falls back to OPENAI_MODEL, then gpt-4)
    #[arg(long)]
    model: Option<String>,

    /// Specific languages to translate instead of the default twenty
    #[arg(long, num_args = 1..)]
    languages: Option<Vec<String>>,

    /// Directory holding the <code>.lproj folders
    #[arg(long)]
    localization_dir: Option<PathBuf>,

    /// Directory the backup folder is created in
    #[arg(long)]
    backup_root: Option<PathBuf>,

    /// Continue without an API key without asking
    #[arg(short, long)]
    yes: bool,

    /// Also compare key names, not just counts, when validating
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn apply(self, mut config: Config) -> Result<Config> {
        // A blank flag falls back to OPENAI_API_KEY
        if let Some(api_key) = self.api_key.filter(|k| !k.trim().is_empty()) {
            config.openai_api_key = api_key;
        }
        if let Some(model) = self.model {
            config.openai_model = model;
        }
        if let Some(codes) = self.languages {
            config.languages = LanguageTarget::from_codes(&codes)?;
        }
        if let Some(dir) = self.localization_dir {
            config.localization_dir = dir;
        }
        if let Some(dir) = self.backup_root {
            config.backup_root = dir;
        }
        config.strict_validation = self.strict;
        Ok(config)
    }
}

/// Whether to go on without a credential; `ask` is skipped under `--yes`.
fn confirm_run(assume_yes: bool, ask: impl FnOnce() -> bool) -> bool {
    assume_yes || ask()
}

/// Ask on stdin whether to continue with placeholder translations.
fn confirm_placeholder_run() -> bool {
    print!("Continue anyway? (y/N): ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localize_strings=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let assume_yes = cli.yes;
    let config = cli.apply(Config::from_env()?)?;

    info!(
        "Localizing {} into {} language(s) with {}",
        config.localization_dir.display(),
        config.languages.len(),
        config.openai_model
    );

    let localizer = Localizer::new(config)?;
    match localizer
        .run(|| confirm_run(assume_yes, confirm_placeholder_run))
        .await
    {
        Ok(RunOutcome::Completed(summary)) => {
            info!(
                "Run finished: {} keys, {} language(s) failed validation",
                summary.base_count,
                summary.validation.failures().count()
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::Declined) => Ok(ExitCode::SUCCESS),
        Err(LocalizeError::BaseFileMissing(_)) => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}
