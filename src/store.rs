use chrono::NaiveDate;
use uuid::Uuid;

use crate::io::persist::{Persistence, StoreEvent};
use crate::model::{Priority, Task};

/// Minimum task text length, counted in characters after trimming.
pub const MIN_TEXT_LEN: usize = 2;

/// Error type for store mutations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("text must be at least {MIN_TEXT_LEN} characters")]
    TextTooShort,
    #[error("task not found: {0}")]
    NotFound(Uuid),
}

/// The authoritative in-memory task collection plus the display flag.
///
/// Owns its persistence adapter; every mutation re-persists. A failed
/// persist never rolls back the in-memory change (the adapter journals the
/// lost value instead), so mutations stay total for valid input.
pub struct TaskStore {
    tasks: Vec<Task>,
    show_finished: bool,
    persist: Persistence,
}

impl TaskStore {
    /// Load a store from persisted state. Absent or corrupt data starts
    /// the collection empty; the display flag defaults to true.
    pub fn load(persist: Persistence) -> TaskStore {
        let tasks = persist.load_tasks();
        let show_finished = persist.load_show_finished();
        TaskStore {
            tasks,
            show_finished,
            persist,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn show_finished(&self) -> bool {
        self.show_finished
    }

    /// Tasks the view should render: completed ones only when the display
    /// flag is on. Order follows the collection (most recent first).
    pub fn visible(&self) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(|t| self.show_finished || !t.is_completed)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a task and prepend it to the collection.
    pub fn add(
        &mut self,
        text: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        let text = validate_text(text)?;
        self.tasks.insert(0, Task::new(text, priority, due_date));
        let _ = self.persist.save_tasks(&self.tasks);
        Ok(())
    }

    /// Replace a task's text, leaving every other field untouched.
    pub fn update(&mut self, id: Uuid, new_text: &str) -> Result<(), StoreError> {
        let text = validate_text(new_text)?;
        let task = self.task_mut(id)?;
        task.text = text;
        let _ = self.persist.save_tasks(&self.tasks);
        Ok(())
    }

    /// Flip a task's completion flag.
    pub fn toggle_complete(&mut self, id: Uuid) -> Result<(), StoreError> {
        let task = self.task_mut(id)?;
        task.is_completed = !task.is_completed;
        let _ = self.persist.save_tasks(&self.tasks);
        Ok(())
    }

    /// Remove a task. Confirmation is the caller's job.
    pub fn remove(&mut self, id: Uuid) -> Result<(), StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.tasks.remove(index);
        let _ = self.persist.save_tasks(&self.tasks);
        Ok(())
    }

    /// Set the display flag, unconditionally.
    pub fn set_show_finished(&mut self, flag: bool) {
        self.show_finished = flag;
        let _ = self.persist.save_show_finished(flag);
    }

    fn task_mut(&mut self, id: Uuid) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    // -----------------------------------------------------------------------
    // Cross-instance sync
    // -----------------------------------------------------------------------

    /// Start adopting changes written by other instances of the same
    /// storage area. Changes land on the next `sync()` call.
    pub fn watch(&mut self) -> Result<(), notify::Error> {
        self.persist.watch()
    }

    pub fn unwatch(&mut self) {
        self.persist.unwatch()
    }

    /// Drain pending storage changes and adopt them.
    /// Returns true if anything was adopted.
    pub fn sync(&mut self) -> bool {
        let events = self.persist.poll_events();
        let changed = !events.is_empty();
        for event in events {
            self.apply(event);
        }
        changed
    }

    /// Adopt a change observed in storage. Never writes back: the value
    /// came from storage, and echoing it would ping-pong between instances.
    pub fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Tasks(tasks) => self.tasks = tasks,
            StoreEvent::ShowFinished(flag) => self.show_finished = flag,
        }
    }
}

/// Trim and validate task text.
fn validate_text(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_TEXT_LEN {
        return Err(StoreError::TextTooShort);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn empty_store() -> TaskStore {
        TaskStore::load(Persistence::in_memory())
    }

    fn store_with(texts: &[&str]) -> TaskStore {
        let mut store = empty_store();
        for text in texts {
            store.add(text, Priority::Medium, None).unwrap();
        }
        store
    }

    #[test]
    fn add_prepends() {
        let mut store = empty_store();
        store.add("Buy milk", Priority::Low, None).unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].text, "Buy milk");
        assert_eq!(store.tasks()[0].priority, Priority::Low);
        assert!(!store.tasks()[0].is_completed);

        store.add("Walk dog", Priority::High, None).unwrap();
        assert_eq!(store.tasks().len(), 2);
        // Newest on top
        assert_eq!(store.tasks()[0].text, "Walk dog");
        assert_eq!(store.tasks()[1].text, "Buy milk");
    }

    #[test]
    fn add_trims_text() {
        let mut store = empty_store();
        store.add("  Buy milk  ", Priority::Medium, None).unwrap();
        assert_eq!(store.tasks()[0].text, "Buy milk");
    }

    #[test]
    fn add_rejects_short_text() {
        let mut store = empty_store();
        assert!(matches!(
            store.add("x", Priority::Medium, None),
            Err(StoreError::TextTooShort)
        ));
        // Whitespace padding does not rescue a short text
        assert!(matches!(
            store.add("  x  ", Priority::Medium, None),
            Err(StoreError::TextTooShort)
        ));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn add_accepts_exactly_two_chars() {
        let mut store = empty_store();
        store.add("ok", Priority::Medium, None).unwrap();
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn ids_are_unique() {
        let store = store_with(&["A1", "A2", "A3"]);
        let mut ids: Vec<Uuid> = store.tasks().iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn update_replaces_text_only() {
        let mut store = empty_store();
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        store.add("Old text", Priority::High, Some(date)).unwrap();
        let id = store.tasks()[0].id;

        store.update(id, "  New text  ").unwrap();
        let task = &store.tasks()[0];
        assert_eq!(task.text, "New text");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, Some(date));
        assert_eq!(task.id, id);
    }

    #[test]
    fn update_rejects_short_text() {
        let mut store = store_with(&["Keep me"]);
        let id = store.tasks()[0].id;
        assert!(matches!(
            store.update(id, " z "),
            Err(StoreError::TextTooShort)
        ));
        assert_eq!(store.tasks()[0].text, "Keep me");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = store_with(&["Only task"]);
        let stale = Uuid::new_v4();
        assert!(matches!(
            store.update(stale, "New text"),
            Err(StoreError::NotFound(id)) if id == stale
        ));
        assert_eq!(store.tasks()[0].text, "Only task");
    }

    #[test]
    fn toggle_twice_restores() {
        let mut store = store_with(&["Flip me"]);
        let id = store.tasks()[0].id;

        store.toggle_complete(id).unwrap();
        assert!(store.tasks()[0].is_completed);
        store.toggle_complete(id).unwrap();
        assert!(!store.tasks()[0].is_completed);
    }

    #[test]
    fn toggle_unknown_id_is_not_found() {
        let mut store = empty_store();
        assert!(matches!(
            store.toggle_complete(Uuid::new_v4()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn remove_deletes_matching_task() {
        let mut store = store_with(&["First", "Second"]);
        let id = store.tasks()[1].id;
        store.remove(id).unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].text, "Second");
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let mut store = store_with(&["Survivor"]);
        assert!(matches!(
            store.remove(Uuid::new_v4()),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn visible_filters_completed_when_flag_off() {
        let mut store = store_with(&["Done one", "Open one"]);
        let done_id = store
            .tasks()
            .iter()
            .find(|t| t.text == "Done one")
            .unwrap()
            .id;
        store.toggle_complete(done_id).unwrap();

        store.set_show_finished(false);
        let visible: Vec<&str> = store.visible().map(|t| t.text.as_str()).collect();
        assert_eq!(visible, vec!["Open one"]);

        store.set_show_finished(true);
        let visible: Vec<&str> = store.visible().map(|t| t.text.as_str()).collect();
        assert_eq!(visible, vec!["Open one", "Done one"]);
    }

    #[test]
    fn load_round_trips_through_persistence() {
        let mut persist = Persistence::in_memory();
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let tasks = vec![
            Task::new("Second".into(), Priority::High, Some(date)),
            Task::new("First".into(), Priority::Low, None),
        ];
        persist.save_tasks(&tasks).unwrap();
        persist.save_show_finished(false).unwrap();

        let store = TaskStore::load(persist);
        assert_eq!(store.tasks(), &tasks[..]);
        assert!(!store.show_finished());
    }

    #[test]
    fn apply_replaces_collection() {
        let mut store = store_with(&["Mine"]);
        let theirs = vec![Task::new("Theirs".into(), Priority::Medium, None)];
        store.apply(StoreEvent::Tasks(theirs.clone()));
        assert_eq!(store.tasks(), &theirs[..]);

        store.apply(StoreEvent::ShowFinished(false));
        assert!(!store.show_finished());
    }

    #[test]
    fn scenario_add_toggle_remove_ends_empty() {
        let mut store = empty_store();
        store.add("Buy milk", Priority::Low, None).unwrap();
        let id = store.tasks()[0].id;
        store.toggle_complete(id).unwrap();
        store.remove(id).unwrap();
        assert!(store.tasks().is_empty());
    }
}
