use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TODOS_FILE: &str = "todos.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub todos_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT must be a valid u16")?,
            Err(_) => DEFAULT_PORT,
        };

        let todos_file = env::var("TODOS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TODOS_FILE));

        Ok(Self {
            host,
            port,
            todos_file,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
