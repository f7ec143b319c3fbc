//! Point-in-time snapshot of existing language files before they are overwritten.
//!
//! Backups are advisory: nothing restores them automatically. Recovery means
//! copying `<code>.strings` back to `<code>.lproj/Localizable.strings` by hand.

use crate::error::{LocalizeError, Result};
use crate::i18n::validator::resource_path;
use crate::i18n::LanguageTarget;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const BACKUP_PREFIX: &str = "localization_backup_";

/// A created backup directory and the languages copied into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSet {
    pub dir: PathBuf,
    pub languages: Vec<String>,
}

/// File name a language is stored under inside a backup directory.
pub fn backup_file_name(code: &str) -> String {
    format!("{}.strings", code)
}

/// Back up every existing target file into a new directory under `backup_root`.
pub fn backup_existing(
    localization_dir: &Path,
    backup_root: &Path,
    languages: &[LanguageTarget],
) -> Result<BackupSet> {
    backup_existing_at(localization_dir, backup_root, languages, Local::now())
}

/// Same as [`backup_existing`] with an explicit capture time.
pub fn backup_existing_at(
    localization_dir: &Path,
    backup_root: &Path,
    languages: &[LanguageTarget],
    captured_at: DateTime<Local>,
) -> Result<BackupSet> {
    let dir = create_unique_dir(backup_root, captured_at)?;
    info!("Creating backup in {}", dir.display());

    let mut backed_up = Vec::new();
    for language in languages {
        let source = resource_path(localization_dir, language.code());
        if !source.is_file() {
            debug!("No existing file for {}, skipping backup", language.code());
            continue;
        }

        let destination = dir.join(backup_file_name(language.code()));
        std::fs::copy(&source, &destination).map_err(|e| LocalizeError::io(&source, e))?;
        debug!("Backed up {} to {}", language.code(), destination.display());
        backed_up.push(language.code().to_string());
    }

    Ok(BackupSet {
        dir,
        languages: backed_up,
    })
}

/// Create `localization_backup_<timestamp>`, adding `_<n>` if the name is taken.
fn create_unique_dir(backup_root: &Path, captured_at: DateTime<Local>) -> Result<PathBuf> {
    std::fs::create_dir_all(backup_root).map_err(|e| LocalizeError::io(backup_root, e))?;

    let base_name = format!("{}{}", BACKUP_PREFIX, captured_at.format("%Y%m%d_%H%M%S"));
    let mut candidate = backup_root.join(&base_name);
    let mut suffix = 1;

    loop {
        match std::fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                candidate = backup_root.join(format!("{}_{}", base_name, suffix));
                suffix += 1;
            }
            Err(e) => return Err(LocalizeError::io(&candidate, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn write_language(dir: &Path, code: &str, content: &str) {
        let path = resource_path(dir, code);
        std::fs::create_dir_all(path.parent().unwrap()).expect("create dir");
        std::fs::write(path, content).expect("write file");
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn targets(codes: &[&str]) -> Vec<LanguageTarget> {
        LanguageTarget::from_codes(codes).expect("valid codes")
    }

    #[test]
    fn test_backup_dir_is_timestamped() {
        let loc = TempDir::new().expect("Failed to create temp dir");
        let root = TempDir::new().expect("Failed to create temp dir");

        let backup = backup_existing_at(loc.path(), root.path(), &targets(&["fr"]), fixed_time())
            .expect("backup");

        assert_eq!(
            backup.dir,
            root.path().join("localization_backup_20260314_092653")
        );
        assert!(backup.dir.is_dir());
    }

    #[test]
    fn test_backup_copies_existing_and_skips_missing() {
        let loc = TempDir::new().expect("Failed to create temp dir");
        let root = TempDir::new().expect("Failed to create temp dir");
        write_language(loc.path(), "fr", "\"a\" = \"Un\";\n");
        write_language(loc.path(), "de", "\"a\" = \"Eins\";\n");

        let backup = backup_existing_at(
            loc.path(),
            root.path(),
            &targets(&["fr", "ja", "de"]),
            fixed_time(),
        )
        .expect("backup");

        assert_eq!(backup.languages, vec!["fr", "de"]);
        assert_eq!(
            std::fs::read_to_string(backup.dir.join("fr.strings")).unwrap(),
            "\"a\" = \"Un\";\n"
        );
        assert!(backup.dir.join("de.strings").exists());
        assert!(!backup.dir.join("ja.strings").exists());
    }

    #[test]
    fn test_backup_with_nothing_to_copy_still_creates_dir() {
        let loc = TempDir::new().expect("Failed to create temp dir");
        let root = TempDir::new().expect("Failed to create temp dir");

        let backup = backup_existing_at(loc.path(), root.path(), &targets(&["fr"]), fixed_time())
            .expect("backup");

        assert!(backup.languages.is_empty());
        assert!(backup.dir.is_dir());
        assert_eq!(std::fs::read_dir(&backup.dir).unwrap().count(), 0);
    }

    #[test]
    fn test_same_second_backups_do_not_collide() {
        let loc = TempDir::new().expect("Failed to create temp dir");
        let root = TempDir::new().expect("Failed to create temp dir");
        write_language(loc.path(), "fr", "\"a\" = \"v1\";\n");

        let first = backup_existing_at(loc.path(), root.path(), &targets(&["fr"]), fixed_time())
            .expect("first backup");
        write_language(loc.path(), "fr", "\"a\" = \"v2\";\n");
        let second = backup_existing_at(loc.path(), root.path(), &targets(&["fr"]), fixed_time())
            .expect("second backup");

        assert_ne!(first.dir, second.dir);
        assert_eq!(
            second.dir,
            root.path().join("localization_backup_20260314_092653_1")
        );
        assert_eq!(
            std::fs::read_to_string(first.dir.join("fr.strings")).unwrap(),
            "\"a\" = \"v1\";\n"
        );
        assert_eq!(
            std::fs::read_to_string(second.dir.join("fr.strings")).unwrap(),
            "\"a\" = \"v2\";\n"
        );
    }

    #[test]
    fn test_backup_root_is_created() {
        let loc = TempDir::new().expect("Failed to create temp dir");
        let root = TempDir::new().expect("Failed to create temp dir");
        let nested = root.path().join("backups").join("strings");

        let backup = backup_existing_at(loc.path(), &nested, &targets(&["fr"]), fixed_time())
            .expect("backup");

        assert!(backup.dir.starts_with(&nested));
    }
}
