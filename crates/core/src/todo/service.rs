//! Todo service
//!
//! Validates input, drives the status workflow and delegates storage to a
//! [`TodoRepository`].

use std::collections::HashMap;
use std::sync::Arc;

use super::model::{Todo, TodoId};
use super::repository::TodoRepository;
use crate::{Error, Result};

/// Kanban workflow on top of an injected repository
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    /// All stored todos. An empty store is reported as `NotFound`.
    pub async fn list_all(&self) -> Result<Vec<Todo>> {
        let todos = self.repo.find_all().await?;
        if todos.is_empty() {
            return Err(Error::NotFound("No todos stored yet".to_string()));
        }
        Ok(todos)
    }

    pub async fn get_by_id(&self, id: TodoId) -> Result<Todo> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No todo with id {} found", id)))
    }

    /// Todos whose title or description match `query`. May be empty.
    pub async fn search(&self, query: &str) -> Result<Vec<Todo>> {
        self.repo.find_by_title_or_description(query).await
    }

    /// Create and persist a new todo in the `Todo` column
    pub async fn create(&self, title: &str, description: &str) -> Result<Todo> {
        validate_content(title, description)?;
        self.repo.save(Todo::new(title, description)).await
    }

    pub async fn advance_status(&self, ids: &[TodoId]) -> Result<Vec<Todo>> {
        self.update_status(ids, true).await
    }

    pub async fn reverse_status(&self, ids: &[TodoId]) -> Result<Vec<Todo>> {
        self.update_status(ids, false).await
    }

    /// Move every todo in `ids` one column right (`advance`) or left.
    ///
    /// All ids are resolved before anything is saved, so one missing id
    /// leaves the whole batch untouched. Results follow input order; a
    /// repeated id is moved once per occurrence.
    pub async fn update_status(&self, ids: &[TodoId], advance: bool) -> Result<Vec<Todo>> {
        let transition: fn(Todo) -> Todo = if advance {
            advance_todo
        } else {
            reverse_todo
        };

        let resolved = self.resolve_all(ids).await?;
        let mut latest: HashMap<TodoId, Todo> = HashMap::new();
        let mut updated = Vec::with_capacity(resolved.len());

        for (id, todo) in ids.iter().copied().zip(resolved) {
            let current = latest.remove(&id).unwrap_or(todo);
            let saved = self.repo.save(transition(current)).await?;
            latest.insert(id, saved.clone());
            updated.push(saved);
        }

        tracing::debug!(count = updated.len(), advance, "updated todo status");
        Ok(updated)
    }

    /// Replace title and description, keeping the status
    pub async fn update_content(&self, id: TodoId, title: &str, description: &str) -> Result<Todo> {
        validate_content(title, description)?;
        let mut todo = self.get_by_id(id).await?;
        todo.title = title.to_string();
        todo.description = description.to_string();
        self.repo.save(todo).await
    }

    /// Delete every todo in `ids`, or none if any id is unknown
    pub async fn delete_many(&self, ids: &[TodoId]) -> Result<()> {
        let todos = self.resolve_all(ids).await?;
        let count = todos.len();
        self.repo.delete_all(todos).await?;
        tracing::debug!(count, "deleted todos");
        Ok(())
    }

    async fn resolve_all(&self, ids: &[TodoId]) -> Result<Vec<Todo>> {
        let mut todos = Vec::with_capacity(ids.len());
        for &id in ids {
            todos.push(self.get_by_id(id).await?);
        }
        Ok(todos)
    }
}

fn advance_todo(mut todo: Todo) -> Todo {
    todo.status = todo.status.advanced();
    todo
}

fn reverse_todo(mut todo: Todo) -> Todo {
    todo.status = todo.status.reversed();
    todo
}

fn validate_content(title: &str, description: &str) -> Result<()> {
    if title.is_empty() || description.is_empty() {
        tracing::debug!("rejected todo without title or description");
        return Err(Error::InvalidInput("No title or description defined".to_string()));
    }
    Ok(())
}
