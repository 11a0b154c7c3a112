//! Todo module
//!
//! This module contains the todo model, the repository abstraction with its
//! storage adapters, and the service that drives the kanban workflow.

mod file_store;
mod memory_store;
mod model;
mod repository;
mod service;

pub use file_store::FileTodoStore;
pub use memory_store::InMemoryTodoStore;
pub use model::*;
pub use repository::TodoRepository;
pub use service::TodoService;
