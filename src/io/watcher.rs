use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// A file system watcher for the storage directory.
///
/// Reports which of the named key files changed; everything else in the
/// directory (the journal, config.toml, temp files from atomic writes) is
/// ignored. The subscription ends when the watcher is dropped.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<String>,
}

impl StoreWatcher {
    /// Start watching `dir` for changes to the named keys.
    /// Returns a `StoreWatcher` whose `poll()` method should be called each tick.
    pub fn start(dir: &Path, keys: &[&str]) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let dir_owned = dir.to_path_buf();
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                // We only care about creates, modifications, and removes
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                for path in event.paths {
                    if !path.starts_with(&dir_owned) {
                        continue;
                    }
                    let name = match path.file_name().and_then(|n| n.to_str()) {
                        Some(n) => n,
                        None => continue,
                    };
                    if keys.iter().any(|k| k == name) {
                        let _ = tx.send(name.to_string());
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for keys changed since the last call.
    /// An atomic write produces several notifications for one change, so
    /// names are deduplicated; order of first appearance is kept.
    pub fn poll(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        while let Ok(name) = self.rx.try_recv() {
            if !keys.contains(&name) {
                keys.push(name);
            }
        }
        keys
    }
}
