use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{CreateTodo, ListTodosQuery, Todo, TodoPage, UpdateTodo, next_id},
    store::{StoreError, TodoStore},
};

/// Todo use cases on top of a [`TodoStore`].
///
/// Reads always go to the store. Mutations run their load, mutate, save
/// sequence under `write_lock`, so one process never interleaves two writers.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
    write_lock: Arc<Mutex<()>>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn get_all_todos(&self, query: ListTodosQuery) -> AppResult<TodoPage> {
        query.validate().map_err(AppError::bad_request)?;

        let todos = self.store.get_all().await?;
        Ok(TodoPage::paginate(todos, query.page(), query.limit()))
    }

    pub async fn get_todo_by_id(&self, id: u64) -> AppResult<Option<Todo>> {
        let todos = self.store.get_all().await?;
        Ok(todos.into_iter().find(|todo| todo.id == id))
    }

    pub async fn create_todo(&self, payload: CreateTodo) -> AppResult<Todo> {
        let _guard = self.write_lock.lock().await;

        let mut todos = self.store.get_all().await?;
        let id = next_id(&todos).ok_or(StoreError::IdsExhausted)?;
        let todo = Todo::create(id, payload);
        todos.push(todo.clone());
        self.store.save_all(&todos).await?;

        info!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub async fn update_todo(&self, id: u64, update: UpdateTodo) -> AppResult<Option<Todo>> {
        let _guard = self.write_lock.lock().await;

        let mut todos = self.store.get_all().await?;
        let Some(todo) = todos.iter_mut().find(|todo| todo.id == id) else {
            return Ok(None);
        };
        todo.apply(update);
        let updated = todo.clone();
        self.store.save_all(&todos).await?;

        info!(id, "todo updated");
        Ok(Some(updated))
    }

    pub async fn delete_todo(&self, id: u64) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;

        let mut todos = self.store.get_all().await?;
        let before = todos.len();
        todos.retain(|todo| todo.id != id);
        if todos.len() == before {
            return Ok(false);
        }
        self.store.save_all(&todos).await?;

        info!(id, "todo deleted");
        Ok(true)
    }
}
