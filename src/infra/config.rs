//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StorageBackend::Postgres),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: StorageBackend,
    /// Present whenever `backend` is `Postgres`.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let backend = match lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };
        if backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set for the postgres backend"));
        }

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a valid u32")?
                .max(1),
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        Ok(Self {
            backend,
            database_url,
            max_connections,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_without_database_url() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.backend, StorageBackend::Memory);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn database_url_selects_postgres() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/restaurants")]).unwrap();
        assert_eq!(cfg.backend, StorageBackend::Postgres);
    }

    #[test]
    fn explicit_backend_wins() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/restaurants"),
            ("STORAGE_BACKEND", "memory"),
        ])
        .unwrap();
        assert_eq!(cfg.backend, StorageBackend::Memory);
    }

    #[test]
    fn postgres_without_url_is_rejected() {
        assert!(config(&[("STORAGE_BACKEND", "postgres")]).is_err());
        assert!(config(&[("STORAGE_BACKEND", "sqlite")]).is_err());
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(config(&[("DB_MAX_CONNECTIONS", "many")]).is_err());
        assert!(config(&[("BIND_ADDR", "localhost")]).is_err());
    }
}
