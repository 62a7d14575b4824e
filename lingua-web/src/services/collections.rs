//! Personal vocabulary and sentence collections.
//!
//! Every operation takes the owning user's id from the authenticated
//! session; there is no shared or default owner anywhere in this service.

use crate::models::{SentenceItem, SentencePayload, VocabularyItem, VocabularyPayload};
use chrono::Utc;
use lingua_core::{filter_by_term, LinguaError, LinguaResult};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CollectionsService {
    pool: SqlitePool,
}

impl CollectionsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // -- vocabulary --------------------------------------------------------

    pub async fn list_vocabulary(
        &self,
        user_id: &str,
        search: Option<&str>,
    ) -> LinguaResult<Vec<VocabularyItem>> {
        let items = sqlx::query_as::<_, VocabularyItem>(
            "SELECT * FROM user_vocabulary WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to list vocabulary", e))?;
        Ok(filter_by_term(items, search))
    }

    pub async fn get_vocabulary_item(
        &self,
        user_id: &str,
        id: &str,
    ) -> LinguaResult<VocabularyItem> {
        sqlx::query_as::<_, VocabularyItem>(
            "SELECT * FROM user_vocabulary WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to load vocabulary item", e))?
        .ok_or_else(|| LinguaError::not_found("vocabulary item"))
    }

    pub async fn add_vocabulary(
        &self,
        user_id: &str,
        payload: &VocabularyPayload,
    ) -> LinguaResult<VocabularyItem> {
        payload.validate()?;

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO user_vocabulary (id, user_id, language_id, word, translation, note, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&payload.language_id)
        .bind(payload.word.trim())
        .bind(payload.translation.trim())
        .bind(&payload.note)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to add vocabulary", e))?;

        self.get_vocabulary_item(user_id, &id).await
    }

    pub async fn update_vocabulary(
        &self,
        user_id: &str,
        id: &str,
        payload: &VocabularyPayload,
    ) -> LinguaResult<VocabularyItem> {
        payload.validate()?;
        self.get_vocabulary_item(user_id, id).await?;

        sqlx::query(
            "UPDATE user_vocabulary SET language_id = ?, word = ?, translation = ?, note = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&payload.language_id)
        .bind(payload.word.trim())
        .bind(payload.translation.trim())
        .bind(&payload.note)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update vocabulary", e))?;

        self.get_vocabulary_item(user_id, id).await
    }

    pub async fn delete_vocabulary(&self, user_id: &str, id: &str) -> LinguaResult<()> {
        sqlx::query("DELETE FROM user_vocabulary WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete vocabulary", e))?;
        Ok(())
    }

    // -- sentences ---------------------------------------------------------

    pub async fn list_sentences(
        &self,
        user_id: &str,
        search: Option<&str>,
    ) -> LinguaResult<Vec<SentenceItem>> {
        let items = sqlx::query_as::<_, SentenceItem>(
            "SELECT * FROM user_sentences WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to list sentences", e))?;
        Ok(filter_by_term(items, search))
    }

    pub async fn get_sentence(&self, user_id: &str, id: &str) -> LinguaResult<SentenceItem> {
        sqlx::query_as::<_, SentenceItem>(
            "SELECT * FROM user_sentences WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to load sentence", e))?
        .ok_or_else(|| LinguaError::not_found("sentence"))
    }

    pub async fn add_sentence(
        &self,
        user_id: &str,
        payload: &SentencePayload,
    ) -> LinguaResult<SentenceItem> {
        payload.validate()?;

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO user_sentences (id, user_id, language_id, sentence, translation, source, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&payload.language_id)
        .bind(payload.sentence.trim())
        .bind(payload.translation.trim())
        .bind(&payload.source)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to add sentence", e))?;

        self.get_sentence(user_id, &id).await
    }

    pub async fn update_sentence(
        &self,
        user_id: &str,
        id: &str,
        payload: &SentencePayload,
    ) -> LinguaResult<SentenceItem> {
        payload.validate()?;
        self.get_sentence(user_id, id).await?;

        sqlx::query(
            "UPDATE user_sentences SET language_id = ?, sentence = ?, translation = ?, source = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&payload.language_id)
        .bind(payload.sentence.trim())
        .bind(payload.translation.trim())
        .bind(&payload.source)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update sentence", e))?;

        self.get_sentence(user_id, id).await
    }

    pub async fn delete_sentence(&self, user_id: &str, id: &str) -> LinguaResult<()> {
        sqlx::query("DELETE FROM user_sentences WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete sentence", e))?;
        Ok(())
    }
}
