//! Command-line front end for the translation store.
//!
//! Usage:
//!   lingosync langs                  # list detected languages
//!   lingosync keys                   # list all keys
//!   lingosync search <query>         # search keys by name or source text
//!   lingosync show <key>             # preview a key across languages
//!   lingosync line <key> <lang>      # line number of a key in a file
//!   lingosync add <key> <text>       # translate and append a new key
//!   lingosync rm <key>               # remove a key everywhere
//!   lingosync status                 # per-language coverage
//!   lingosync watch                  # reload on external file changes
//!
//! Configuration via environment (or .env):
//! - LINGOSYNC_LANG_DIR (defaults to src/lang)
//! - LINGOSYNC_SOURCE_LANG (defaults to "en")
//! - LINGOSYNC_CUSTOM_LANGUAGES (JSON map of code -> {name, flag, apiCode})
//! - LINGOSYNC_API_URL (defaults to the MyMemory endpoint)

use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::RwLock;
use tracing::info;

use lingosync::config::Config;
use lingosync::lang;
use lingosync::store::{SharedStore, TranslationStore};
use lingosync::translate::{TranslateOptions, Translator};
use lingosync::watcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lingosync=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        bail!("missing command; try: langs, keys, search, show, line, add, rm, status, watch");
    };

    let config = Config::from_env()?;
    let mut store = TranslationStore::initialize(config.clone())?;

    match command {
        "langs" => {
            for code in store.available_languages() {
                let info = lang::resolve(code, Some(&config.custom_languages));
                let marker = if code == store.source_language() {
                    " (source)"
                } else {
                    ""
                };
                println!("{} {} - {}{}", info.flag, code, info.name, marker);
            }
        }

        "keys" => {
            for key in store.all_keys() {
                println!("{key}");
            }
        }

        "search" => {
            let query = args.get(1).map(String::as_str).unwrap_or_default();
            if query.is_empty() {
                bail!("usage: lingosync search <query>");
            }
            for key in store.search_keys(query) {
                let text = store
                    .get_translation(key, store.source_language())
                    .unwrap_or("-");
                println!("{key}: {text}");
            }
        }

        "show" => {
            // Accepts a comma-separated key list
            let keys = lang::parse_key_list(args.get(1).map(String::as_str).unwrap_or_default());
            if keys.is_empty() {
                bail!("usage: lingosync show <key>[,<key>...]");
            }
            for key in &keys {
                match store.formatted_preview(key) {
                    Some(preview) => println!("{preview}"),
                    None => bail!("key {key:?} not found"),
                }
            }
        }

        "line" => {
            let (Some(key), Some(code)) = (args.get(1), args.get(2)) else {
                bail!("usage: lingosync line <key> <lang>");
            };
            match store.find_key_line(key, code)? {
                Some(line) => println!("{}.json:{line}", code),
                None => bail!("key {key:?} not found in {code}.json"),
            }
        }

        "add" => {
            let Some(key) = args.get(1) else {
                bail!("usage: lingosync add <key> [text]");
            };
            if !lang::is_valid_key(key) {
                bail!("{key:?} is not a valid key (expected [A-Za-z_][A-Za-z0-9_]*)");
            }
            if store.key_exists(key) {
                bail!("key {key:?} already exists");
            }
            // Without explicit text, derive it from the key itself
            let text = match args.get(2) {
                Some(text) => text.clone(),
                None => lang::key_to_readable_text(key),
            };
            if text.is_empty() {
                bail!("no source text for {key:?}");
            }

            let translator = Translator::new(config.api_url.clone());
            let opts = TranslateOptions {
                source_language: &config.source_language,
                target_languages: store.available_languages(),
                custom_languages: Some(&config.custom_languages),
            };
            let translations = translator
                .translate_all(&text, &opts, |code, completed, total| {
                    let info = lang::resolve(code, Some(&config.custom_languages));
                    info!("{} {} ({}/{})", info.flag, info.name, completed, total);
                })
                .await;

            store.add_translation(key, &translations)?;
            println!(
                "Added {:?} to {} language files",
                key,
                store.available_languages().len()
            );
        }

        "rm" => {
            let Some(key) = args.get(1) else {
                bail!("usage: lingosync rm <key>");
            };
            store.delete_translation(key)?;
            println!("Removed {key:?}");
        }

        "status" => {
            for stats in store.language_stats() {
                println!(
                    "{} {} - {}% ({}/{} keys)",
                    stats.flag,
                    stats.name,
                    stats.percentage(),
                    stats.translated_keys,
                    stats.total_keys
                );
                for key in &stats.missing_keys {
                    println!("    missing: {key}");
                }
            }
        }

        "watch" => {
            let mut events = store.subscribe();
            let shared: SharedStore = Arc::new(RwLock::new(store));
            let _handle = watcher::watch(&config.lang_dir, Arc::clone(&shared))?;
            info!("Watching {} (Ctrl-C to stop)", config.lang_dir.display());

            loop {
                tokio::select! {
                    event = events.recv() => {
                        if event.is_ok() {
                            let store = shared.read().await;
                            info!(
                                "Reloaded: {} keys, {} languages",
                                store.all_keys().len(),
                                store.available_languages().len()
                            );
                        }
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }

        other => {
            bail!("unknown command {other:?}; try: langs, keys, search, show, line, add, rm, status, watch");
        }
    }

    Ok(())
}
