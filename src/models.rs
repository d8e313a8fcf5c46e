use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    /// Fields outside the core schema, kept as-is across rewrites.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Todo {
    pub fn create(id: u64, payload: CreateTodo) -> Self {
        Self {
            id,
            title: payload.title,
            completed: false,
            extra: without_id(payload.extra),
        }
    }

    /// Shallow merge: only fields present in `update` are overwritten.
    pub fn apply(&mut self, update: UpdateTodo) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        self.extra.extend(without_id(update.extra));
    }
}

fn without_id(mut extra: Map<String, Value>) -> Map<String, Value> {
    extra.remove("id");
    extra
}

/// Next free id: one past the current maximum, `1` for an empty collection.
/// `None` once the maximum id is `u64::MAX`.
pub fn next_id(todos: &[Todo]) -> Option<u64> {
    todos.iter().map(|todo| todo.id).max().unwrap_or(0).checked_add(1)
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    /// Accepted for compatibility, ignored: new todos always start incomplete.
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListTodosQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ListTodosQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.page() == 0 || self.limit() == 0 {
            return Err("Invalid pagination".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPage {
    pub total: usize,
    pub pages: u64,
    pub current_page: u64,
    pub data: Vec<Todo>,
}

impl TodoPage {
    /// Slices `[(page - 1) * limit, page * limit)` out of the full collection.
    /// Pages past the end produce an empty `data` but keep `total` and `pages`.
    pub fn paginate(todos: Vec<Todo>, page: u64, limit: u64) -> Self {
        let total = todos.len();
        let pages = (total as u64).div_ceil(limit);

        let start = usize::try_from(page.saturating_sub(1).saturating_mul(limit))
            .unwrap_or(usize::MAX)
            .min(total);
        let end = usize::try_from(page.saturating_mul(limit))
            .unwrap_or(usize::MAX)
            .min(total);

        let data = todos
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect();

        Self {
            total,
            pages,
            current_page: page,
            data,
        }
    }
}
