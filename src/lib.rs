//! lingosync keeps a set of per-language JSON translation-key files in
//! sync, answers key lookups and searches over them, and fills in
//! missing translations for new keys via a remote translation API.
//!
//! - [`store::TranslationStore`]: in-memory index over the on-disk
//!   language files, with full-reload consistency and multi-file writes
//! - [`translate::Translator`]: batched, failure-tolerant remote
//!   translation of one source string into all target languages
//! - [`lang`]: language metadata registry and key text utilities
//! - [`watcher`]: reload-on-external-change for the language directory

pub mod config;
pub mod lang;
pub mod retry;
pub mod store;
pub mod translate;
pub mod watcher;
