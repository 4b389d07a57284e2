//! Feedback journal: the visitor's own notes shown back on the letter page.
//!
//! An ordered list of strings stored as one JSON array under
//! [`STORAGE_KEY`]. Every mutation is a whole-list read-modify-write; last
//! write wins, which is fine for a single visitor in a single tab.
//!
//! ## Persistence
//!
//! In the browser the store is [`LocalStore`], an in-memory mirror of
//! `localStorage`. Writes are recorded and flushed as
//! `localStorage.setItem(...)` scripts in the next response; on page load the
//! worker is handed the stored value through `POST /api/journal/restore`.

use std::collections::HashMap;

/// Key the journal lives under in `localStorage`.
pub const STORAGE_KEY: &str = "birthday_feedback_journal";

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), String>;
}

/// Plain in-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), String> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Browser-side mirror of `localStorage`.
#[derive(Debug, Default)]
pub struct LocalStore {
    values: MemoryStore,
    dirty: Vec<String>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a value read from `localStorage` without marking it dirty.
    pub fn restore(&mut self, key: &str, value: String) {
        self.dirty.retain(|k| k != key);
        // MemoryStore::set cannot fail.
        let _ = self.values.set(key, value);
    }

    /// Take pending writes as a `<script>` block (empty when clean).
    pub fn drain_script(&mut self) -> String {
        if self.dirty.is_empty() {
            return String::new();
        }
        let mut js = String::from("<script>try{");
        for key in self.dirty.drain(..) {
            let value = self.values.get(&key).unwrap_or_default();
            // serde_json string encoding doubles as a safe JS string literal.
            let key_lit = serde_json::to_string(&key).unwrap_or_else(|_| "\"\"".to_string());
            let value_lit = serde_json::to_string(&value).unwrap_or_else(|_| "\"\"".to_string());
            js.push_str(&format!(
                "localStorage.setItem({},{});",
                key_lit,
                value_lit.replace("</", "<\\/")
            ));
        }
        js.push_str("}catch(e){console.warn('[birthday] journal not saved',e);}</script>");
        js
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), String> {
        self.values.set(key, value)?;
        if !self.dirty.iter().any(|k| k == key) {
            self.dirty.push(key.to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Journal<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Journal<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Stored entries in insertion order. Missing or unreadable data is an
    /// empty journal.
    pub fn list(&self) -> Vec<String> {
        let Some(raw) = self.store.get(STORAGE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("stored journal unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Append a note. Returns false when the trimmed text is empty or the
    /// write fails.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let mut entries = self.list();
        entries.push(text.to_string());
        self.save(&entries)
    }

    /// Replace the note at `index`.
    pub fn edit(&mut self, index: usize, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let mut entries = self.list();
        let Some(slot) = entries.get_mut(index) else {
            return false;
        };
        *slot = text.to_string();
        self.save(&entries)
    }

    /// Remove the note at `index`. Out of range is a no-op.
    pub fn delete(&mut self, index: usize) -> bool {
        let mut entries = self.list();
        if index >= entries.len() {
            return false;
        }
        entries.remove(index);
        self.save(&entries)
    }

    fn save(&mut self, entries: &[String]) -> bool {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                log::error!("journal encode failed: {}", e);
                return false;
            }
        };
        match self.store.set(STORAGE_KEY, json) {
            Ok(()) => true,
            Err(e) => {
                log::error!("journal write failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journal_with(entries: &[&str]) -> Journal<MemoryStore> {
        let mut j = Journal::new(MemoryStore::default());
        for e in entries {
            assert!(j.add(e));
        }
        j
    }

    fn stored(j: &Journal<MemoryStore>) -> Option<String> {
        j.store().get(STORAGE_KEY)
    }

    #[test]
    fn empty_store_lists_nothing() {
        let j = Journal::new(MemoryStore::default());
        assert!(j.list().is_empty());
    }

    #[test]
    fn blank_adds_are_rejected() {
        let mut j = Journal::new(MemoryStore::default());
        assert!(!j.add(""));
        assert!(!j.add("   "));
        assert!(!j.add("\n\t"));
        assert!(j.list().is_empty());
        assert_eq!(stored(&j), None);
    }

    #[test]
    fn add_appends_and_persists() {
        let mut j = Journal::new(MemoryStore::default());
        assert!(j.add("hi"));
        assert_eq!(j.list(), vec!["hi"]);
        assert_eq!(stored(&j).as_deref(), Some(r#"["hi"]"#));
        assert!(j.add("there"));
        assert_eq!(j.list(), vec!["hi", "there"]);
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut j = journal_with(&["hi"]);
        assert!(j.edit(0, "bye"));
        assert_eq!(j.list(), vec!["bye"]);
    }

    #[test]
    fn edit_rejects_bad_index_or_blank_text() {
        let mut j = journal_with(&["hi"]);
        assert!(!j.edit(5, "x"));
        assert!(!j.edit(0, "  "));
        assert_eq!(j.list(), vec!["hi"]);
    }

    #[test]
    fn edit_keeps_neighbours() {
        let mut j = journal_with(&["a", "b", "c"]);
        j.edit(1, "B");
        assert_eq!(j.list(), vec!["a", "B", "c"]);
    }

    #[test]
    fn delete_removes_by_position() {
        let mut j = journal_with(&["a", "b"]);
        assert!(j.delete(0));
        assert_eq!(j.list(), vec!["b"]);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let mut j = journal_with(&["a", "b"]);
        assert!(!j.delete(9));
        assert_eq!(j.list(), vec!["a", "b"]);
    }

    #[test]
    fn corrupt_storage_reads_as_empty() {
        let mut store = MemoryStore::default();
        store.set(STORAGE_KEY, "{not json".to_string()).unwrap();
        let mut j = Journal::new(store);
        assert!(j.list().is_empty());
        assert!(j.add("fresh start"));
        assert_eq!(j.list(), vec!["fresh start"]);
    }

    #[test]
    fn reload_preserves_order() {
        let j = journal_with(&["first", "second 💖", "third \"quoted\""]);
        let raw = stored(&j).unwrap();

        let mut store = MemoryStore::default();
        store.set(STORAGE_KEY, raw).unwrap();
        let reloaded = Journal::new(store);
        assert_eq!(reloaded.list(), j.list());
    }

    #[test]
    fn local_store_flushes_dirty_keys_once() {
        let mut j = Journal::new(LocalStore::new());
        j.add("note </script>");
        let js = j.store_mut().drain_script();
        assert!(js.contains("localStorage.setItem(\"birthday_feedback_journal\""));
        assert!(js.contains("<\\/script>"));
        assert!(j.store_mut().drain_script().is_empty());
    }

    #[test]
    fn local_store_restore_is_not_dirty() {
        let mut store = LocalStore::new();
        store.restore(STORAGE_KEY, r#"["kept"]"#.to_string());
        assert!(store.drain_script().is_empty());
        let j = Journal::new(store);
        assert_eq!(j.list(), vec!["kept"]);
    }
}
