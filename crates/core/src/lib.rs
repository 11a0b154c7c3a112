//! Core library for the todo kanban backend
//!
//! This crate contains the core business logic, including:
//! - The todo model and its status transitions
//! - Repository adapters (in-memory and JSON file)
//! - The todo service

pub mod error;
pub mod todo;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
