//! In-memory todo storage implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::model::{Todo, TodoId};
use super::repository::TodoRepository;
use crate::{Error, Result};

/// Id-ordered todo table with its id sequence.
///
/// Shared by the in-memory and file stores.
#[derive(Debug, Clone)]
pub(super) struct TodoTable {
    todos: BTreeMap<TodoId, Todo>,
    next_id: TodoId,
}

impl Default for TodoTable {
    fn default() -> Self {
        Self {
            todos: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl TodoTable {
    /// Build a table from already-saved todos. Entries without an id get one.
    pub(super) fn from_todos(todos: Vec<Todo>) -> Result<Self> {
        let mut table = Self::default();
        for todo in todos {
            table.save(todo)?;
        }
        Ok(table)
    }

    pub(super) fn all(&self) -> Vec<Todo> {
        self.todos.values().cloned().collect()
    }

    pub(super) fn get(&self, id: TodoId) -> Option<Todo> {
        self.todos.get(&id).cloned()
    }

    pub(super) fn search(&self, query: &str) -> Vec<Todo> {
        self.todos
            .values()
            .filter(|t| t.matches(query))
            .cloned()
            .collect()
    }

    /// Insert or replace `todo`. Fails if its id leaves no room for the
    /// next one in the sequence.
    pub(super) fn save(&mut self, mut todo: Todo) -> Result<Todo> {
        let id = match todo.id {
            Some(id) => id,
            None => self.next_id,
        };
        let after = id
            .checked_add(1)
            .ok_or_else(|| Error::Storage(format!("Todo id {} exhausts the id sequence", id)))?;
        // Ids are never handed out twice, even after an explicit-id upsert
        self.next_id = self.next_id.max(after);
        todo.id = Some(id);
        self.todos.insert(id, todo.clone());
        Ok(todo)
    }

    /// Remove the given todos, returning how many were stored
    pub(super) fn remove_all(&mut self, todos: &[Todo]) -> usize {
        todos
            .iter()
            .filter_map(|t| t.id)
            .filter(|id| self.todos.remove(id).is_some())
            .count()
    }
}

/// Volatile todo store, mostly for tests and throwaway deployments
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    table: RwLock<TodoTable>,
}

impl InMemoryTodoStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoStore {
    async fn find_all(&self) -> Result<Vec<Todo>> {
        Ok(self.table.read().await.all())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.table.read().await.get(id))
    }

    async fn find_by_title_or_description(&self, query: &str) -> Result<Vec<Todo>> {
        Ok(self.table.read().await.search(query))
    }

    async fn save(&self, todo: Todo) -> Result<Todo> {
        let saved = self.table.write().await.save(todo)?;
        tracing::debug!(id = ?saved.id, "saved todo");
        Ok(saved)
    }

    async fn delete_all(&self, todos: Vec<Todo>) -> Result<()> {
        let removed = self.table.write().await.remove_all(&todos);
        tracing::debug!(removed, "deleted todos");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::TodoStatus;

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = InMemoryTodoStore::new();

        let first = store.save(Todo::new("Task 1", "one")).await.unwrap();
        let second = store.save(Todo::new("Task 2", "two")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_save_existing_replaces() {
        let store = InMemoryTodoStore::new();
        let mut todo = store.save(Todo::new("Original", "desc")).await.unwrap();

        todo.title = "Updated".to_string();
        todo.status = TodoStatus::Doing;
        store.save(todo.clone()).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Updated");
        assert_eq!(all[0].status, TodoStatus::Doing);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let store = InMemoryTodoStore::new();
        store.save(Todo::new("b", "x")).await.unwrap();
        store.save(Todo::new("a", "x")).await.unwrap();
        store.save(Todo::new("c", "x")).await.unwrap();

        let ids: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id.unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_search_matches_title_or_description() {
        let store = InMemoryTodoStore::new();
        store.save(Todo::new("Groceries", "milk and eggs")).await.unwrap();
        store.save(Todo::new("Milk the cow", "farm chores")).await.unwrap();
        store.save(Todo::new("Taxes", "file them")).await.unwrap();

        let found = store.find_by_title_or_description("milk").await.unwrap();
        assert_eq!(found.len(), 2);

        let none = store.find_by_title_or_description("bicycle").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_ignores_unknown() {
        let store = InMemoryTodoStore::new();
        let kept = store.save(Todo::new("keep", "me")).await.unwrap();
        let gone = store.save(Todo::new("drop", "me")).await.unwrap();

        let mut stranger = Todo::new("never", "saved");
        stranger.id = Some(99);
        store.delete_all(vec![gone.clone(), stranger]).await.unwrap();

        assert!(store.find_by_id(gone.id.unwrap()).await.unwrap().is_none());
        assert_eq!(store.find_by_id(kept.id.unwrap()).await.unwrap(), Some(kept));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryTodoStore::new();
        let first = store.save(Todo::new("a", "b")).await.unwrap();
        store.delete_all(vec![first]).await.unwrap();

        let next = store.save(Todo::new("c", "d")).await.unwrap();
        assert_eq!(next.id, Some(2));
    }

    #[tokio::test]
    async fn test_save_rejects_id_at_end_of_sequence() {
        let store = InMemoryTodoStore::new();
        let mut todo = Todo::new("last", "one");
        todo.id = Some(TodoId::MAX);

        match store.save(todo).await {
            Err(Error::Storage(msg)) => assert!(msg.contains("id sequence")),
            other => panic!("Expected Storage error, got: {:?}", other),
        }
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
