//! Personal collections: vocabulary and sentences a learner saves while
//! studying. Always scoped to the owning session's user id.

use super::{finish, require};
use chrono::{DateTime, Utc};
use lingua_core::{LinguaResult, Searchable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VocabularyItem {
    pub id: String,
    pub user_id: String,
    pub language_id: Option<String>,
    pub word: String,
    pub translation: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Searchable for VocabularyItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.word, &self.translation]
    }
}

#[derive(Debug, Deserialize)]
pub struct VocabularyPayload {
    pub language_id: Option<String>,
    pub word: String,
    pub translation: String,
    pub note: Option<String>,
}

impl VocabularyPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "word", &self.word);
        require(&mut errors, "translation", &self.translation);
        finish(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SentenceItem {
    pub id: String,
    pub user_id: String,
    pub language_id: Option<String>,
    pub sentence: String,
    pub translation: String,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Searchable for SentenceItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.sentence, &self.translation]
    }
}

#[derive(Debug, Deserialize)]
pub struct SentencePayload {
    pub language_id: Option<String>,
    pub sentence: String,
    pub translation: String,
    pub source: Option<String>,
}

impl SentencePayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "sentence", &self.sentence);
        require(&mut errors, "translation", &self.translation);
        finish(errors)
    }
}
