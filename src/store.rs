//! Persistence for the todo collection.
//!
//! The whole collection is one JSON array. Every call to [`TodoStore::get_all`]
//! re-reads it and every call to [`TodoStore::save_all`] replaces it in full;
//! nothing is cached between calls.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::Todo;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{}' does not contain a valid todo array: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize todos: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("todo id space exhausted: highest stored id is u64::MAX")]
    IdsExhausted,
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Full ordered collection. A missing backing file is an empty collection.
    async fn get_all(&self) -> StoreResult<Vec<Todo>>;
    /// Replaces the stored collection with `todos`.
    async fn save_all(&self, todos: &[Todo]) -> StoreResult<()>;
}

/// Renders the on-disk format: pretty-printed, 2-space indent, no trailing newline.
pub fn encode(todos: &[Todo]) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(todos)?)
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl TodoStore for JsonFileStore {
    async fn get_all(&self) -> StoreResult<Vec<Todo>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "todo file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save_all(&self, todos: &[Todo]) -> StoreResult<()> {
        let content = encode(todos)?;
        atomic_write(&self.path, content.as_bytes())
            .await
            .map_err(|err| self.io_error(err))?;

        debug!(path = %self.path.display(), count = todos.len(), "todo file written");
        Ok(())
    }
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await
}

/// Sibling scratch file: `todos.json` becomes `todos.json.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("todos"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Volatile store for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: RwLock::new(todos),
        }
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn get_all(&self) -> StoreResult<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn save_all(&self, todos: &[Todo]) -> StoreResult<()> {
        *self.todos.write().await = todos.to_vec();
        Ok(())
    }
}
