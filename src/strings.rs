//! Reading and writing Apple `.strings` resource files.
//!
//! The scanner is deliberately lenient: it looks for every `"key" = "value";`
//! record anywhere in the content and ignores everything else (comments, blank
//! lines, malformed records). Escaped quotes are not supported, so a value that
//! contains `"` will mis-parse.

use crate::error::{LocalizeError, Result};
use std::collections::HashMap;
use std::path::Path;

/// A single `"key" = "value";` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub key: String,
    pub value: String,
}

/// Ordered key/value mapping read from a `.strings` file.
///
/// Entries keep the order in which their key first appeared. Inserting a key
/// that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<StringEntry>,
    index: HashMap<String, usize>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].value, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(StringEntry { key, value });
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StringEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = StringTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// Read a `.strings` file into a table.
///
/// A missing file is not an error and yields an empty table.
pub fn extract_strings(path: &Path) -> Result<StringTable> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(parse_strings(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StringTable::new()),
        Err(e) => Err(LocalizeError::io(path, e)),
    }
}

/// Scan `content` for every `"key" = "value";` record.
///
/// Whitespace (including newlines) is allowed around `=`. The key must be
/// non-empty; the value may be empty. Later duplicates overwrite earlier ones.
pub fn parse_strings(content: &str) -> StringTable {
    let mut table = StringTable::new();
    let mut pos = 0;

    while let Some(offset) = content[pos..].find('"') {
        let start = pos + offset;
        match match_record(content, start) {
            Some((key, value, end)) => {
                table.insert(key, value);
                pos = end;
            }
            None => pos = start + 1,
        }
    }

    table
}

/// Try to match a record whose opening quote is at `start`.
/// Returns the key, value and the byte offset just past the `;`.
fn match_record(content: &str, start: usize) -> Option<(&str, &str, usize)> {
    let (key, after_key) = quoted(content, start)?;
    if key.is_empty() {
        return None;
    }

    let rest = &content[after_key..];
    let rest_trimmed = rest.trim_start();
    let eq = after_key + (rest.len() - rest_trimmed.len());
    if !rest_trimmed.starts_with('=') {
        return None;
    }

    let rest = &content[eq + 1..];
    let rest_trimmed = rest.trim_start();
    let value_start = eq + 1 + (rest.len() - rest_trimmed.len());
    if !rest_trimmed.starts_with('"') {
        return None;
    }

    let (value, after_value) = quoted(content, value_start)?;
    if !content[after_value..].starts_with(';') {
        return None;
    }

    Some((key, value, after_value + 1))
}

/// Read a `"..."` run starting at the quote at `start`.
/// Returns the inner text and the offset just past the closing quote.
fn quoted(content: &str, start: usize) -> Option<(&str, usize)> {
    let inner_start = start + 1;
    let len = content[inner_start..].find('"')?;
    Some((
        &content[inner_start..inner_start + len],
        inner_start + len + 1,
    ))
}

/// Serialise one record in `.strings` form.
pub fn format_entry(key: &str, value: &str) -> String {
    format!("\"{}\" = \"{}\";", key, value)
}

/// Leading comment written at the top of every generated file.
pub fn file_header(language_code: &str) -> String {
    format!("/* Localized strings for {} */", language_code)
}
