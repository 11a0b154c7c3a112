//! File-based todo storage implementation
//!
//! Stores todos as JSON in a file on disk.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::RwLock;

use super::memory_store::TodoTable;
use super::model::{Todo, TodoId};
use super::repository::TodoRepository;
use crate::{Error, Result};

/// File-based todo store using JSON
pub struct FileTodoStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of todos
    cache: RwLock<TodoTable>,
}

impl FileTodoStore {
    /// Create a new FileTodoStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Error::Storage(format!("Failed to read todos file: {}", e)))?;
            let todos: Vec<Todo> = serde_json::from_str(&content)
                .map_err(|e| Error::Storage(format!("Failed to parse todos file: {}", e)))?;
            TodoTable::from_todos(todos)?
        } else {
            TodoTable::default()
        };

        tracing::debug!("Opened todo store at {:?}", path);

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Persist the given table to disk
    async fn persist(&self, table: &TodoTable) -> Result<()> {
        let content = serde_json::to_string_pretty(&table.all())?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for FileTodoStore {
    async fn find_all(&self) -> Result<Vec<Todo>> {
        Ok(self.cache.read().await.all())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.cache.read().await.get(id))
    }

    async fn find_by_title_or_description(&self, query: &str) -> Result<Vec<Todo>> {
        Ok(self.cache.read().await.search(query))
    }

    async fn save(&self, todo: Todo) -> Result<Todo> {
        // Hold the write lock across the write so snapshots land in order.
        // The cache only takes the change once it is on disk.
        let mut cache = self.cache.write().await;
        let mut staged = cache.clone();
        let saved = staged.save(todo)?;
        self.persist(&staged).await?;
        *cache = staged;
        tracing::debug!(id = ?saved.id, "saved todo");
        Ok(saved)
    }

    async fn delete_all(&self, todos: Vec<Todo>) -> Result<()> {
        let mut cache = self.cache.write().await;
        let mut staged = cache.clone();
        let removed = staged.remove_all(&todos);
        if removed > 0 {
            self.persist(&staged).await?;
            *cache = staged;
        }
        tracing::debug!(removed, "deleted todos");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::TodoStatus;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileTodoStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");
        let store = FileTodoStore::new(&path).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let (store, temp) = create_test_store().await;

        let created = store.save(Todo::new("Test todo", "desc")).await.unwrap();
        assert_eq!(created.id, Some(1));

        let content = std::fs::read_to_string(temp.path().join("todos.json")).unwrap();
        let on_disk: Vec<Todo> = serde_json::from_str(&content).unwrap();
        assert_eq!(on_disk, vec![created]);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let (store, _temp) = create_test_store().await;
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data").join("todos.json");
        let store = FileTodoStore::new(&path).await.unwrap();

        store.save(Todo::new("a", "b")).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_delete_all_removes_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");

        let store = FileTodoStore::new(&path).await.unwrap();
        let first = store.save(Todo::new("one", "1")).await.unwrap();
        let second = store.save(Todo::new("two", "2")).await.unwrap();
        store.delete_all(vec![first]).await.unwrap();

        let reopened = FileTodoStore::new(&path).await.unwrap();
        assert_eq!(reopened.find_all().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");

        let todo_id;

        // Create store and add todo
        {
            let store = FileTodoStore::new(&path).await.unwrap();
            let todo = Todo::new("Persistent todo", "Should survive reload")
                .with_status(TodoStatus::Doing);
            todo_id = store.save(todo).await.unwrap().id.unwrap();
        }

        // Create new store instance and verify data persisted
        {
            let store = FileTodoStore::new(&path).await.unwrap();
            let todo = store.find_by_id(todo_id).await.unwrap().unwrap();
            assert_eq!(todo.title, "Persistent todo");
            assert_eq!(todo.description, "Should survive reload");
            assert_eq!(todo.status, TodoStatus::Doing);

            // Sequence resumes after the highest stored id
            let next = store.save(Todo::new("Next", "one")).await.unwrap();
            assert_eq!(next.id, Some(todo_id + 1));
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");
        std::fs::write(&path, "not json").unwrap();

        match FileTodoStore::new(&path).await {
            Err(Error::Storage(msg)) => assert!(msg.contains("parse")),
            Err(e) => panic!("Expected Storage error, got: {:?}", e),
            Ok(_) => panic!("Expected Storage error, got a store"),
        }
    }

    /// Make every later write to the store's file fail
    fn block_writes(path: &std::path::Path) {
        std::fs::remove_file(path).ok();
        std::fs::create_dir(path).unwrap();
    }

    #[tokio::test]
    async fn test_failed_save_leaves_cache_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");
        let store = FileTodoStore::new(&path).await.unwrap();
        let original = store.save(Todo::new("keep", "as is")).await.unwrap();

        block_writes(&path);

        let changed = original.clone().with_status(TodoStatus::Doing);
        assert!(store.save(changed).await.is_err());
        assert!(store.save(Todo::new("new", "one")).await.is_err());

        assert_eq!(store.find_all().await.unwrap(), vec![original]);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_cache_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");
        let store = FileTodoStore::new(&path).await.unwrap();
        let todo = store.save(Todo::new("stay", "here")).await.unwrap();

        block_writes(&path);

        assert!(store.delete_all(vec![todo.clone()]).await.is_err());
        assert_eq!(store.find_by_id(todo.id.unwrap()).await.unwrap(), Some(todo));
    }

    #[tokio::test]
    async fn test_id_at_end_of_sequence_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");
        let content = format!(
            r#"[{{"id":{},"title":"a","description":"b","status":"TODO"}}]"#,
            TodoId::MAX
        );
        std::fs::write(&path, content).unwrap();

        match FileTodoStore::new(&path).await {
            Err(Error::Storage(msg)) => assert!(msg.contains("id sequence")),
            Err(e) => panic!("Expected Storage error, got: {:?}", e),
            Ok(_) => panic!("Expected Storage error, got a store"),
        }
    }
}
