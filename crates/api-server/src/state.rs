//! Application state

use std::sync::Arc;

use todo_core::todo::{FileTodoStore, InMemoryTodoStore, TodoRepository, TodoService};

use crate::config::{ServerConfig, StorageBackend};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    todo_service: TodoService,
    storage: StorageBackend,
}

impl AppState {
    /// Create a new AppState with the repository selected by `config`
    pub async fn new(config: &ServerConfig) -> todo_core::Result<Self> {
        let repo: Arc<dyn TodoRepository> = match config.storage {
            StorageBackend::File => Arc::new(FileTodoStore::new(config.todos_path()).await?),
            StorageBackend::Memory => Arc::new(InMemoryTodoStore::new()),
        };

        Ok(Self::with_repository(repo, config.storage))
    }

    pub fn with_repository(repo: Arc<dyn TodoRepository>, storage: StorageBackend) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                todo_service: TodoService::new(repo),
                storage,
            }),
        }
    }

    /// Get reference to the todo service
    pub fn todo_service(&self) -> &TodoService {
        &self.inner.todo_service
    }

    pub fn storage(&self) -> StorageBackend {
        self.inner.storage
    }
}
