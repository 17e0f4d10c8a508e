//! Todo List persisted to local storage

use serde::{Deserialize, Serialize};

use crate::store::{load_json, save_json, KeyValueStore, Result};

/// Storage key of the todo list
pub const TODOS_KEY: &str = "orion-todos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// The list plus its backing store; every mutation is written through
#[derive(Debug)]
pub struct TodoList<S: KeyValueStore> {
    store: S,
    items: Vec<Todo>,
}

impl<S: KeyValueStore> TodoList<S> {
    /// Load the saved list, empty when nothing (or nothing readable) is stored
    pub fn load(store: S) -> Self {
        let items = load_json(&store, TODOS_KEY).unwrap_or_default();
        Self { store, items }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    fn persist(&self) -> Result<()> {
        save_json(&self.store, TODOS_KEY, &self.items)
    }

    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let last = self.items.iter().map(|t| t.id).max().unwrap_or(0);
        now.max(last + 1)
    }

    /// Add a todo; blank text is ignored and yields `None`
    pub fn add(&mut self, text: &str) -> Result<Option<i64>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let id = self.next_id();
        self.items.push(Todo {
            id,
            text: text.to_string(),
            completed: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        });
        self.persist()?;
        Ok(Some(id))
    }

    pub fn toggle(&mut self, id: i64) -> Result<bool> {
        let Some(todo) = self.items.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        todo.completed = !todo.completed;
        self.persist()?;
        Ok(true)
    }

    pub fn remove(&mut self, id: i64) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.items.len();
        self.items.retain(|t| !t.completed);
        let removed = before - self.items.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|t| !t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_list_survives_remount() {
        let store = MemoryStore::new();
        let mut list = TodoList::load(store.clone());
        let first = list.add("Buy milk").unwrap().unwrap();
        list.add("  Write report  ").unwrap();
        list.toggle(first).unwrap();

        let remounted = TodoList::load(store);
        assert_eq!(remounted.items(), list.items());
        assert_eq!(remounted.items()[1].text, "Write report");
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let mut list = TodoList::load(MemoryStore::new());
        assert_eq!(list.add("   ").unwrap(), None);
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut list = TodoList::load(MemoryStore::new());
        let a = list.add("a").unwrap().unwrap();
        let b = list.add("b").unwrap().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remaining_and_clear_completed() {
        let mut list = TodoList::load(MemoryStore::new());
        let a = list.add("a").unwrap().unwrap();
        list.add("b").unwrap();
        list.toggle(a).unwrap();
        assert_eq!(list.remaining(), 1);

        assert_eq!(list.clear_completed().unwrap(), 1);
        assert_eq!(list.items().len(), 1);
        assert!(!list.remove(a).unwrap());
    }
}
