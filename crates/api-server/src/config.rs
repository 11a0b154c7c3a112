//! Server configuration read from the environment

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context};

/// Which repository backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let data_dir = lookup("TODO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".todo-data"));

        let bind_addr = match lookup("TODO_BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid TODO_BIND_ADDR: {}", raw))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8081)),
        };

        let storage = match lookup("TODO_STORAGE") {
            None => StorageBackend::File,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "file" => StorageBackend::File,
                "memory" => StorageBackend::Memory,
                other => return Err(anyhow!("unknown TODO_STORAGE backend: {}", other)),
            },
        };

        Ok(Self {
            data_dir,
            bind_addr,
            storage,
        })
    }

    pub fn todos_path(&self) -> PathBuf {
        self.data_dir.join("todos.json")
    }
}
