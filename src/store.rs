//! Translation store: the authoritative in-memory index over the
//! per-language JSON files on disk.
//!
//! The index is never patched incrementally. Every mutation and every
//! external file change triggers a full reload (scan the directory,
//! parse every file, rebuild the index), which keeps the store correct
//! under concurrent external edits at the cost of re-reading a few small
//! files. Each reload broadcasts a [`StoreEvent`] to subscribers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::lang;

/// Store shared between the command surface and the watcher task.
pub type SharedStore = Arc<RwLock<TranslationStore>>;

/// Broadcast to subscribers whenever the index has been rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Reloaded,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("language directory {} does not exist", .0.display())]
    MissingLangDir(PathBuf),

    #[error("no language files found in {}", .0.display())]
    NoLanguages(PathBuf),

    #[error("key {0:?} already exists")]
    DuplicateKey(String),

    #[error("key {0:?} does not exist")]
    UnknownKey(String),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a flat JSON object", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-language coverage, the data behind the `status` report.
#[derive(Debug, Clone)]
pub struct LanguageStats {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub total_keys: usize,
    pub translated_keys: usize,
    pub missing_keys: Vec<String>,
}

impl LanguageStats {
    /// Translated share in whole percent; an empty key space counts as
    /// fully translated.
    pub fn percentage(&self) -> u32 {
        if self.total_keys == 0 {
            return 100;
        }
        (self.translated_keys * 100 / self.total_keys) as u32
    }
}

pub struct TranslationStore {
    config: Config,
    index: HashMap<String, HashMap<String, String>>,
    sorted_keys: Vec<String>,
    available_languages: Vec<String>,
    change_tx: broadcast::Sender<StoreEvent>,
}

impl TranslationStore {
    /// Create an empty store. Call [`TranslationStore::reload`] (or
    /// `initialize`) before the first lookup.
    pub fn new(config: Config) -> Self {
        let (change_tx, _) = broadcast::channel(16);
        Self {
            config,
            index: HashMap::new(),
            sorted_keys: Vec::new(),
            available_languages: Vec::new(),
            change_tx,
        }
    }

    /// Build the store and perform the initial load in one step.
    pub fn initialize(config: Config) -> Result<Self, StoreError> {
        let mut store = Self::new(config);
        store.reload()?;
        Ok(store)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Swap in a fresh configuration and rebuild the index from it.
    pub fn update_config(&mut self, config: Config) -> Result<(), StoreError> {
        self.config = config;
        self.reload()
    }

    /// Receiver for reload notifications. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.change_tx.subscribe()
    }

    // ==================== Loading ====================

    /// Full rebuild: re-detect available languages, parse every language
    /// file, replace the index, broadcast [`StoreEvent::Reloaded`].
    ///
    /// A single unreadable or malformed file is logged and skipped; it
    /// never aborts the reload.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.available_languages = self.detect_languages()?;

        let mut index: HashMap<String, HashMap<String, String>> = HashMap::new();
        for code in &self.available_languages {
            let path = self.language_file(code);
            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!("Skipping {}: read failed: {}", path.display(), err);
                    continue;
                }
            };
            let data: Map<String, Value> = match serde_json::from_str(&raw) {
                Ok(data) => data,
                Err(err) => {
                    warn!("Skipping {}: parse failed: {}", path.display(), err);
                    continue;
                }
            };
            for (key, value) in data {
                let Some(text) = value.as_str() else {
                    debug!("Ignoring non-string value for {:?} in {}", key, path.display());
                    continue;
                };
                index
                    .entry(key)
                    .or_default()
                    .insert(code.clone(), text.to_string());
            }
        }

        let mut sorted_keys: Vec<String> = index.keys().cloned().collect();
        sorted_keys.sort();

        self.index = index;
        self.sorted_keys = sorted_keys;

        info!(
            "Loaded {} translation keys across {} languages",
            self.sorted_keys.len(),
            self.available_languages.len()
        );

        // Nobody listening is fine
        let _ = self.change_tx.send(StoreEvent::Reloaded);
        Ok(())
    }

    /// Scan the language directory for `*.json` files. The source
    /// language sorts first, the rest alphabetically.
    fn detect_languages(&self) -> Result<Vec<String>, StoreError> {
        let dir = &self.config.lang_dir;
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::MissingLangDir(dir.clone()));
            }
            Err(err) => {
                return Err(StoreError::Read {
                    path: dir.clone(),
                    source: err,
                });
            }
        };

        let mut codes: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        codes.sort();

        let source = &self.config.source_language;
        if let Some(pos) = codes.iter().position(|code| code == source) {
            let source = codes.remove(pos);
            codes.insert(0, source);
        }
        Ok(codes)
    }

    fn language_file(&self, code: &str) -> PathBuf {
        self.config.lang_dir.join(format!("{code}.json"))
    }

    // ==================== Lookups ====================

    pub fn key_exists(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get_translation(&self, key: &str, lang: &str) -> Option<&str> {
        self.index.get(key)?.get(lang).map(String::as_str)
    }

    pub fn get_all_translations(&self, key: &str) -> Option<&HashMap<String, String>> {
        self.index.get(key)
    }

    /// All keys in ascending lexicographic order.
    pub fn all_keys(&self) -> &[String] {
        &self.sorted_keys
    }

    /// Detected language codes, source language first.
    pub fn available_languages(&self) -> &[String] {
        &self.available_languages
    }

    pub fn source_language(&self) -> &str {
        &self.config.source_language
    }

    /// Case-insensitive substring search over the key itself or its
    /// source-language text. Preserves key sort order.
    pub fn search_keys(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        let source = &self.config.source_language;
        self.sorted_keys
            .iter()
            .filter(|key| {
                key.to_lowercase().contains(&query)
                    || self
                        .get_translation(key, source)
                        .is_some_and(|text| text.to_lowercase().contains(&query))
            })
            .map(String::as_str)
            .collect()
    }

    // ==================== Mutations ====================

    /// Add a new key to every available language file and reload.
    ///
    /// For a language without an entry in `translations`, the
    /// source-language text is used, then the empty string. Each file is
    /// read, the key appended after the existing keys, and the file
    /// rewritten; a write failure propagates and files written earlier in
    /// the same call stay on disk (no cross-file rollback).
    pub fn add_translation(
        &mut self,
        key: &str,
        translations: &HashMap<String, String>,
    ) -> Result<(), StoreError> {
        if self.key_exists(key) {
            return Err(StoreError::DuplicateKey(key.to_string()));
        }
        if self.available_languages.is_empty() {
            return Err(StoreError::NoLanguages(self.config.lang_dir.clone()));
        }

        let source = self.config.source_language.clone();
        for code in self.available_languages.clone() {
            let path = self.language_file(&code);
            let mut data = self.read_language_map(&path)?;

            let text = translations
                .get(&code)
                .or_else(|| translations.get(&source))
                .cloned()
                .unwrap_or_default();

            // preserve_order map: insert of a fresh key appends at the end
            data.insert(key.to_string(), Value::String(text));
            self.write_language_map(&path, &data)?;
        }

        info!("Added key {:?} to {} language files", key, self.available_languages.len());
        self.reload()
    }

    /// Remove a key from every available language file and reload. The
    /// order of the remaining keys is untouched.
    pub fn delete_translation(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.key_exists(key) {
            return Err(StoreError::UnknownKey(key.to_string()));
        }

        for code in self.available_languages.clone() {
            let path = self.language_file(&code);
            if !path.exists() {
                continue;
            }
            let mut data = self.read_language_map(&path)?;
            if data.shift_remove(key).is_some() {
                self.write_language_map(&path, &data)?;
            }
        }

        info!("Removed key {:?} from language files", key);
        self.reload()
    }

    fn read_language_map(&self, path: &Path) -> Result<Map<String, Value>, StoreError> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize with two-space indentation and a trailing newline, the
    /// format the language files are kept in.
    fn write_language_map(&self, path: &Path, data: &Map<String, Value>) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        data.serialize(&mut ser).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        buf.push(b'\n');

        std::fs::write(path, buf).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    // ==================== Reports ====================

    /// 1-based line number of `"key":` in a language file, by textual
    /// scan of the raw content. Navigation aid only; parsing correctness
    /// does not depend on it.
    pub fn find_key_line(&self, key: &str, lang: &str) -> Result<Option<usize>, StoreError> {
        let path = self.language_file(lang);
        let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;

        let pattern = format!(r#"^\s*"{}"\s*:"#, regex::escape(key));
        let matcher = Regex::new(&pattern).expect("escaped key produces a valid regex");

        Ok(raw
            .lines()
            .position(|line| matcher.is_match(line))
            .map(|idx| idx + 1))
    }

    /// Markdown table of every language's text for one key; `-` marks a
    /// missing translation.
    pub fn formatted_preview(&self, key: &str) -> Option<String> {
        let translations = self.get_all_translations(key)?;

        let mut markdown = format!("**{key}**\n\n");
        markdown.push_str("| Language | Translation |\n");
        markdown.push_str("|----------|-------------|\n");

        for code in &self.available_languages {
            let info = lang::resolve(code, Some(&self.config.custom_languages));
            let text = translations.get(code).map(String::as_str).unwrap_or("-");
            markdown.push_str(&format!("| {} {} | {} |\n", info.flag, info.name, text));
        }
        Some(markdown)
    }

    /// Coverage per available language, in available-language order.
    pub fn language_stats(&self) -> Vec<LanguageStats> {
        self.available_languages
            .iter()
            .map(|code| {
                let info = lang::resolve(code, Some(&self.config.custom_languages));
                let missing_keys: Vec<String> = self
                    .sorted_keys
                    .iter()
                    .filter(|key| self.get_translation(key, code).is_none())
                    .cloned()
                    .collect();
                LanguageStats {
                    code: code.clone(),
                    name: info.name,
                    flag: info.flag,
                    total_keys: self.sorted_keys.len(),
                    translated_keys: self.sorted_keys.len() - missing_keys.len(),
                    missing_keys,
                }
            })
            .collect()
    }
}
