//! Filesystem watcher for the language directory.
//!
//! Bridges `notify` events onto a tokio channel and drives a debounced
//! full reload of the shared store whenever any `*.json` file in the
//! language directory is created, changed or deleted. Subscribers learn
//! about the rebuild through the store's own change broadcast.

use std::path::Path;
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::store::SharedStore;

/// Quiet period after the last event before reloading; editors often
/// write a file several times in quick succession.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Keeps the watch alive. Dropping the handle stops both the native
/// watcher and the reload task.
pub struct WatcherHandle {
    _watcher: RecommendedWatcher,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn touches_language_file(event: &Event) -> bool {
    event
        .paths
        .iter()
        .any(|path| path.extension().is_some_and(|ext| ext == "json"))
}

/// Watch `dir` and reload `store` on external changes to its language
/// files.
///
/// Must be called from within a tokio runtime. Returns a handle that
/// owns the watch; keep it alive for as long as reloads are wanted.
pub fn watch(dir: &Path, store: SharedStore) -> notify::Result<WatcherHandle> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) if touches_language_file(&event) => {
                // Receiver gone means the handle was dropped
                let _ = tx.send(event);
            }
            Ok(_) => {}
            Err(err) => warn!("Watcher error: {}", err),
        }
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    let task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            debug!("Language file change: {:?}", event.paths);

            // Drain follow-up events until the directory settles
            loop {
                match tokio::time::timeout(DEBOUNCE, rx.recv()).await {
                    Ok(Some(_)) => continue,
                    Ok(None) => return,
                    Err(_) => break,
                }
            }

            if let Err(err) = store.write().await.reload() {
                warn!("Reload after file change failed: {}", err);
            }
        }
    });

    Ok(WatcherHandle {
        _watcher: watcher,
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{StoreEvent, TranslationStore};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::RwLock;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            lang_dir: dir.path().to_path_buf(),
            source_language: "en".to_string(),
            custom_languages: HashMap::new(),
            api_url: "http://unused.test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_external_edit_triggers_reload() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("en.json"), r#"{"greet": "Hello"}"#).expect("seed");

        let store = TranslationStore::initialize(test_config(&dir)).expect("initialize");
        let mut events = store.subscribe();
        let shared: SharedStore = Arc::new(RwLock::new(store));

        let _handle = watch(dir.path(), Arc::clone(&shared)).expect("watch");

        // External edit, as if a human changed the file in another editor
        std::fs::write(
            dir.path().join("en.json"),
            r#"{"greet": "Hello", "farewell": "Bye"}"#,
        )
        .expect("edit");

        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("reload within timeout")
            .expect("event");
        assert_eq!(event, StoreEvent::Reloaded);
        assert!(shared.read().await.key_exists("farewell"));
    }

    #[tokio::test]
    async fn test_non_json_files_are_ignored() {
        let event = Event {
            kind: notify::EventKind::Modify(notify::event::ModifyKind::Any),
            paths: vec!["notes.txt".into()],
            attrs: Default::default(),
        };
        assert!(!touches_language_file(&event));

        let event = Event {
            kind: notify::EventKind::Modify(notify::event::ModifyKind::Any),
            paths: vec!["en.json".into()],
            attrs: Default::default(),
        };
        assert!(touches_language_file(&event));
    }
}
