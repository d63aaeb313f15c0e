use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, Sqlite, SqlitePool, migrate::MigrateDatabase};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::traits::PreferenceStore;

/// SQLite-backed preference store, one row per key
#[derive(Clone)]
pub struct SqlitePreferences {
    pool: SqlitePool,
}

impl SqlitePreferences {
    pub async fn connect(db_url: &str) -> Result<Self, StoreError> {
        // Create database file if it doesn't exist
        if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            info!("Creating database file {}", db_url);
            Sqlite::create_database(db_url).await?;
        }

        // A single long-lived connection keeps `sqlite::memory:` databases alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(db_url)
            .await?;

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;

        info!("Preference store initialized successfully");
        Ok(Self { pool })
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferences {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.try_get::<Vec<u8>, _>("value")).transpose()?)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }
}

/// In-process preference store; contents vanish with the value
#[derive(Default)]
pub struct MemoryPreferences {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sqlite_set_overwrites_previous_value() {
        let prefs = SqlitePreferences::connect("sqlite::memory:").await.unwrap();

        assert_eq!(prefs.get("caughtPokemons").await.unwrap(), None);

        prefs.set("caughtPokemons", b"[]").await.unwrap();
        prefs.set("caughtPokemons", b"[1]").await.unwrap();

        assert_eq!(
            prefs.get("caughtPokemons").await.unwrap(),
            Some(b"[1]".to_vec())
        );
        assert_eq!(prefs.get("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_store_keeps_keys_apart() {
        let prefs = MemoryPreferences::new();
        prefs.set("a", b"one").await.unwrap();
        prefs.set("b", b"two").await.unwrap();

        assert_eq!(prefs.get("a").await.unwrap(), Some(b"one".to_vec()));
        assert_eq!(prefs.get("b").await.unwrap(), Some(b"two".to_vec()));
    }
}
