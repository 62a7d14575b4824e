//! System settings: a flat key/value table edited from the admin screen.

use super::{finish, require};
use chrono::{DateTime, Utc};
use lingua_core::{LinguaResult, Searchable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for SystemSetting {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.key, &self.value]
    }
}

#[derive(Debug, Deserialize)]
pub struct SystemSettingPayload {
    pub key: String,
    pub value: String,
}

impl SystemSettingPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "key", &self.key);
        require(&mut errors, "value", &self.value);
        finish(errors)
    }
}
