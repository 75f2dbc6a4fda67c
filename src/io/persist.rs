use std::collections::HashMap;
use std::io;
use std::path::Path;

use crate::io::journal::{self, JournalEntry};
use crate::io::storage::{DirStorage, MemStorage, Storage};
use crate::io::watcher::StoreWatcher;
use crate::model::Task;

/// Storage key holding the serialized task collection.
pub const TASKS_KEY: &str = "todos";
/// Storage key holding the show-finished display flag.
pub const SHOW_FINISHED_KEY: &str = "showFinished";

/// A change observed in the storage area, made by another instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The task collection was replaced.
    Tasks(Vec<Task>),
    /// The display flag was replaced.
    ShowFinished(bool),
}

/// Translates store state to and from the storage area, and surfaces
/// changes written by other instances sharing that area.
///
/// Failed writes never propagate an error into the in-memory state; the
/// lost value goes to the write journal instead.
pub struct Persistence {
    storage: Box<dyn Storage>,
    watcher: Option<StoreWatcher>,
    /// Last content known per key, whether written by this instance or
    /// adopted from another. A watcher event whose content matches carries
    /// nothing new and is dropped.
    last_written: HashMap<String, String>,
}

impl Persistence {
    pub fn new(storage: Box<dyn Storage>) -> Persistence {
        Persistence {
            storage,
            watcher: None,
            last_written: HashMap::new(),
        }
    }

    /// Persistence over a storage directory, created if needed.
    pub fn open_dir(dir: &Path) -> io::Result<Persistence> {
        Ok(Persistence::new(Box::new(DirStorage::open(dir)?)))
    }

    /// Persistence over an in-memory area. Used by tests.
    pub fn in_memory() -> Persistence {
        Persistence::new(Box::new(MemStorage::new()))
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Load the task collection. Absent or unparseable data yields an empty
    /// collection; parse failures are swallowed, not surfaced.
    pub fn load_tasks(&self) -> Vec<Task> {
        self.storage
            .get(TASKS_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Load the display flag. Exactly the string `true` is true; anything
    /// else is false. An absent key means the default, which is true.
    pub fn load_show_finished(&self) -> bool {
        match self.storage.get(SHOW_FINISHED_KEY).ok().flatten() {
            Some(raw) => raw == "true",
            None => true,
        }
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Persist the task collection. An empty collection removes the key
    /// entirely rather than writing an empty array, so "never used" and
    /// "emptied" look the same in storage.
    pub fn save_tasks(&mut self, tasks: &[Task]) -> io::Result<()> {
        if tasks.is_empty() {
            self.last_written.remove(TASKS_KEY);
            self.remove_key(TASKS_KEY)
        } else {
            let raw = serde_json::to_string(tasks)?;
            self.set_key(TASKS_KEY, raw)
        }
    }

    /// Persist the display flag, unconditionally.
    pub fn save_show_finished(&mut self, flag: bool) -> io::Result<()> {
        let raw = if flag { "true" } else { "false" };
        self.set_key(SHOW_FINISHED_KEY, raw.to_string())
    }

    fn set_key(&mut self, key: &str, value: String) -> io::Result<()> {
        match self.storage.set(key, &value) {
            Ok(()) => {
                self.last_written.insert(key.to_string(), value);
                Ok(())
            }
            Err(e) => {
                self.journal_failure("set", key, &e, Some(&value));
                Err(e)
            }
        }
    }

    fn remove_key(&mut self, key: &str) -> io::Result<()> {
        match self.storage.remove(key) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.journal_failure("remove", key, &e, None);
                Err(e)
            }
        }
    }

    fn journal_failure(&self, op: &str, key: &str, error: &io::Error, payload: Option<&str>) {
        match self.storage.dir() {
            Some(dir) => {
                journal::log_failed_write(dir, JournalEntry::failed_write(op, key, error, payload));
            }
            None => eprintln!("warning: could not persist {}: {}", key, error),
        }
    }

    // -----------------------------------------------------------------------
    // Cross-instance sync
    // -----------------------------------------------------------------------

    /// Start watching the storage area for writes made by other instances.
    /// An in-memory area has no watchable location; this is a no-op there.
    pub fn watch(&mut self) -> Result<(), notify::Error> {
        let Some(dir) = self.storage.dir() else {
            return Ok(());
        };
        let watcher = StoreWatcher::start(dir, &[TASKS_KEY, SHOW_FINISHED_KEY])?;
        self.watcher = Some(watcher);
        Ok(())
    }

    /// Stop watching. Safe to call when not watching.
    pub fn unwatch(&mut self) {
        self.watcher = None;
    }

    /// Drain changes seen since the last call into store events.
    ///
    /// Reads the current value of each changed key at poll time, so rapid
    /// successive writes coalesce into the latest value. Dropped without an
    /// event: keys that no longer exist (a removal carries no new value),
    /// values matching the content this instance last wrote or adopted, and
    /// values that fail to parse.
    pub fn poll_events(&mut self) -> Vec<StoreEvent> {
        let Some(watcher) = &self.watcher else {
            return Vec::new();
        };
        let mut events = Vec::new();
        for key in watcher.poll() {
            let Ok(Some(raw)) = self.storage.get(&key) else {
                continue;
            };
            if self.last_written.get(&key) == Some(&raw) {
                continue;
            }
            match key.as_str() {
                TASKS_KEY => {
                    if let Ok(tasks) = serde_json::from_str(&raw) {
                        events.push(StoreEvent::Tasks(tasks));
                    }
                }
                SHOW_FINISHED_KEY => events.push(StoreEvent::ShowFinished(raw == "true")),
                _ => {}
            }
            self.last_written.insert(key, raw);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Task};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn task(text: &str) -> Task {
        Task::new(text.into(), Priority::Medium, None)
    }

    #[test]
    fn load_tasks_absent_is_empty() {
        let persist = Persistence::in_memory();
        assert!(persist.load_tasks().is_empty());
    }

    #[test]
    fn load_tasks_invalid_json_is_empty() {
        let mut persist = Persistence::in_memory();
        persist.storage.set(TASKS_KEY, "not json {{{").unwrap();
        assert!(persist.load_tasks().is_empty());
    }

    #[test]
    fn load_tasks_wrong_shape_is_empty() {
        let mut persist = Persistence::in_memory();
        persist.storage.set(TASKS_KEY, r#"{"todo":"x"}"#).unwrap();
        assert!(persist.load_tasks().is_empty());
    }

    #[test]
    fn save_load_round_trip_preserves_order() {
        let mut persist = Persistence::in_memory();
        let tasks = vec![task("B"), task("A")];
        persist.save_tasks(&tasks).unwrap();
        assert_eq!(persist.load_tasks(), tasks);
    }

    #[test]
    fn save_empty_removes_the_key() {
        let mut persist = Persistence::in_memory();
        persist.save_tasks(&[task("A")]).unwrap();
        assert!(persist.storage.get(TASKS_KEY).unwrap().is_some());

        persist.save_tasks(&[]).unwrap();
        assert_eq!(persist.storage.get(TASKS_KEY).unwrap(), None);
    }

    #[test]
    fn show_finished_flag_strings() {
        let mut persist = Persistence::in_memory();
        // Absent: default true
        assert!(persist.load_show_finished());

        persist.save_show_finished(false).unwrap();
        assert_eq!(
            persist.storage.get(SHOW_FINISHED_KEY).unwrap().as_deref(),
            Some("false")
        );
        assert!(!persist.load_show_finished());

        persist.save_show_finished(true).unwrap();
        assert!(persist.load_show_finished());

        // Only the exact string "true" counts
        persist.storage.set(SHOW_FINISHED_KEY, "TRUE").unwrap();
        assert!(!persist.load_show_finished());
        persist.storage.set(SHOW_FINISHED_KEY, "yes").unwrap();
        assert!(!persist.load_show_finished());
    }

    #[test]
    fn stored_form_uses_original_field_names() {
        let mut persist = Persistence::in_memory();
        persist.save_tasks(&[task("Buy milk")]).unwrap();

        let raw = persist.storage.get(TASKS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["todo"], "Buy milk");
        assert_eq!(value[0]["isCompleted"], false);
        assert_eq!(value[0]["priority"], "medium");
    }

    // A storage area whose writes always fail.
    struct BrokenStorage {
        dir: TempDir,
    }

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> io::Result<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
        fn remove(&mut self, _key: &str) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
        fn dir(&self) -> Option<&Path> {
            Some(self.dir.path())
        }
    }

    #[test]
    fn failed_write_lands_in_journal() {
        let dir = TempDir::new().unwrap();
        let journal_dir = dir.path().to_path_buf();
        let mut persist = Persistence::new(Box::new(BrokenStorage { dir }));

        let tasks = vec![task("Keep me")];
        assert!(persist.save_tasks(&tasks).is_err());

        let content = std::fs::read_to_string(journal::journal_path(&journal_dir)).unwrap();
        let line = content.lines().last().unwrap();
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields[1], "set");
        assert_eq!(fields[2], TASKS_KEY);
        assert!(fields[3].contains("no space"));
        assert!(fields[4].contains("Keep me"));
    }

    #[test]
    fn poll_without_watching_is_empty() {
        let mut persist = Persistence::in_memory();
        assert!(persist.poll_events().is_empty());
    }

    #[test]
    fn watch_on_memory_area_is_noop() {
        let mut persist = Persistence::in_memory();
        persist.watch().unwrap();
        assert!(persist.poll_events().is_empty());
        persist.unwatch();
    }
}
