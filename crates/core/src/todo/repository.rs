//! Todo repository trait
//!
//! Defines the interface for todo storage operations.

use async_trait::async_trait;

use super::model::{Todo, TodoId};
use crate::Result;

/// Repository interface consumed by the todo service
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Get all todos, ordered by id
    async fn find_all(&self) -> Result<Vec<Todo>>;

    /// Get a todo by ID
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>>;

    /// Find todos whose title or description contains `query`
    async fn find_by_title_or_description(&self, query: &str) -> Result<Vec<Todo>>;

    /// Insert or update a todo.
    ///
    /// A todo without an id is inserted under the next free id; otherwise the
    /// stored entry with that id is replaced.
    async fn save(&self, todo: Todo) -> Result<Todo>;

    /// Delete the given todos. Todos that are not stored are ignored.
    async fn delete_all(&self, todos: Vec<Todo>) -> Result<()>;
}
