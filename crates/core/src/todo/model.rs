//! Todo model definitions

use serde::{Deserialize, Serialize};

/// Identifier assigned by the persistence layer
pub type TodoId = i64;

/// Todo status - one column of the three-column board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TodoStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TodoStatus {
    /// Status after moving one column to the right. `Done` stays `Done`.
    pub fn advanced(self) -> Self {
        match self {
            Self::Todo => Self::Doing,
            Self::Doing | Self::Done => Self::Done,
        }
    }

    /// Status after moving one column to the left. `Todo` stays `Todo`.
    pub fn reversed(self) -> Self {
        match self {
            Self::Done => Self::Doing,
            Self::Todo | Self::Doing => Self::Todo,
        }
    }
}

/// A todo item on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// `None` until the repository saves the todo for the first time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TodoStatus,
}

impl Todo {
    /// Create a new, unsaved todo in the `Todo` column
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            status: TodoStatus::default(),
        }
    }

    /// Set the status
    pub fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether `query` occurs in the title or description, ignoring case
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
