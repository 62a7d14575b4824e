//! System settings.

use crate::models::{SystemSetting, SystemSettingPayload};
use chrono::Utc;
use lingua_core::{filter_by_term, LinguaError, LinguaResult};
use sqlx::SqlitePool;

#[derive(Debug, Clone)]
pub struct SettingsService {
    pool: SqlitePool,
}

impl SettingsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, search: Option<&str>) -> LinguaResult<Vec<SystemSetting>> {
        let settings =
            sqlx::query_as::<_, SystemSetting>("SELECT * FROM system_settings ORDER BY key")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| LinguaError::storage_with("failed to list settings", e))?;
        Ok(filter_by_term(settings, search))
    }

    pub async fn get(&self, key: &str) -> LinguaResult<SystemSetting> {
        sqlx::query_as::<_, SystemSetting>("SELECT * FROM system_settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load setting", e))?
            .ok_or_else(|| LinguaError::not_found("setting"))
    }

    /// Insert or replace a setting.
    pub async fn put(&self, payload: &SystemSettingPayload) -> LinguaResult<SystemSetting> {
        payload.validate()?;

        sqlx::query(
            "INSERT OR REPLACE INTO system_settings (key, value, updated_at) VALUES (?, ?, ?)",
        )
        .bind(payload.key.trim())
        .bind(&payload.value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to save setting", e))?;

        self.get(payload.key.trim()).await
    }

    pub async fn delete(&self, key: &str) -> LinguaResult<()> {
        sqlx::query("DELETE FROM system_settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete setting", e))?;
        Ok(())
    }
}
