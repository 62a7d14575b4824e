//! Forum: categories, topics, posts.

use crate::models::{
    ForumCategory, ForumCategoryPayload, ForumPost, ForumPostPayload, ForumTopic,
    ForumTopicPayload,
};
use chrono::Utc;
use lingua_core::{filter_by_term, LinguaError, LinguaResult};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ForumService {
    pool: SqlitePool,
}

impl ForumService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // -- categories --------------------------------------------------------

    pub async fn list_categories(&self) -> LinguaResult<Vec<ForumCategory>> {
        sqlx::query_as::<_, ForumCategory>(
            "SELECT * FROM forum_categories ORDER BY position, created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to list categories", e))
    }

    pub async fn get_category(&self, id: &str) -> LinguaResult<ForumCategory> {
        sqlx::query_as::<_, ForumCategory>("SELECT * FROM forum_categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load category", e))?
            .ok_or_else(|| LinguaError::not_found("forum category"))
    }

    pub async fn create_category(
        &self,
        payload: &ForumCategoryPayload,
    ) -> LinguaResult<ForumCategory> {
        payload.validate()?;

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO forum_categories (id, name, description, position, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(payload.name.trim())
        .bind(&payload.description)
        .bind(payload.position)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create category", e))?;

        self.get_category(&id).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        payload: &ForumCategoryPayload,
    ) -> LinguaResult<ForumCategory> {
        payload.validate()?;
        self.get_category(id).await?;

        sqlx::query(
            "UPDATE forum_categories SET name = ?, description = ?, position = ? WHERE id = ?",
        )
        .bind(payload.name.trim())
        .bind(&payload.description)
        .bind(payload.position)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update category", e))?;

        self.get_category(id).await
    }

    /// Delete a category. Refused while topics still reference it.
    pub async fn delete_category(&self, id: &str) -> LinguaResult<()> {
        let topics: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM forum_topics WHERE category_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| LinguaError::storage_with("failed to count topics", e))?;
        if topics > 0 {
            return Err(LinguaError::conflict(format!(
                "Cannot delete category: {} topic(s) still reference it",
                topics
            )));
        }

        sqlx::query("DELETE FROM forum_categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete category", e))?;
        Ok(())
    }

    // -- topics ------------------------------------------------------------

    pub async fn list_topics(
        &self,
        category_id: Option<&str>,
        search: Option<&str>,
    ) -> LinguaResult<Vec<ForumTopic>> {
        let topics = match category_id {
            Some(category_id) => {
                sqlx::query_as::<_, ForumTopic>(
                    "SELECT * FROM forum_topics WHERE category_id = ? ORDER BY updated_at DESC",
                )
                .bind(category_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ForumTopic>(
                    "SELECT * FROM forum_topics ORDER BY updated_at DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| LinguaError::storage_with("failed to list topics", e))?;
        Ok(filter_by_term(topics, search))
    }

    pub async fn get_topic(&self, id: &str) -> LinguaResult<ForumTopic> {
        sqlx::query_as::<_, ForumTopic>("SELECT * FROM forum_topics WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load topic", e))?
            .ok_or_else(|| LinguaError::not_found("forum topic"))
    }

    /// Open a topic with its first post, atomically.
    pub async fn create_topic(
        &self,
        author_id: &str,
        payload: &ForumTopicPayload,
    ) -> LinguaResult<ForumTopic> {
        payload.validate()?;
        self.get_category(&payload.category_id).await?;

        let topic_id = Uuid::new_v4().to_string();
        let post_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LinguaError::storage_with("failed to begin transaction", e))?;
        sqlx::query(
            "INSERT INTO forum_topics (id, category_id, author_id, title, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&topic_id)
        .bind(&payload.category_id)
        .bind(author_id)
        .bind(payload.title.trim())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create topic", e))?;
        sqlx::query(
            "INSERT INTO forum_posts (id, topic_id, author_id, body, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&post_id)
        .bind(&topic_id)
        .bind(author_id)
        .bind(payload.body.trim())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create opening post", e))?;
        tx.commit()
            .await
            .map_err(|e| LinguaError::storage_with("failed to commit", e))?;

        self.get_topic(&topic_id).await
    }

    /// Delete a topic and the posts it owns, atomically. Idempotent.
    pub async fn delete_topic(&self, id: &str) -> LinguaResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LinguaError::storage_with("failed to begin transaction", e))?;
        sqlx::query("DELETE FROM forum_posts WHERE topic_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete posts", e))?;
        sqlx::query("DELETE FROM forum_topics WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete topic", e))?;
        tx.commit()
            .await
            .map_err(|e| LinguaError::storage_with("failed to commit", e))?;
        Ok(())
    }

    // -- posts -------------------------------------------------------------

    pub async fn list_posts(&self, topic_id: &str) -> LinguaResult<Vec<ForumPost>> {
        sqlx::query_as::<_, ForumPost>(
            "SELECT * FROM forum_posts WHERE topic_id = ? ORDER BY created_at",
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to list posts", e))
    }

    pub async fn get_post(&self, id: &str) -> LinguaResult<ForumPost> {
        sqlx::query_as::<_, ForumPost>("SELECT * FROM forum_posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load post", e))?
            .ok_or_else(|| LinguaError::not_found("forum post"))
    }

    /// Reply to a topic; bumps the topic's updated_at.
    pub async fn add_post(
        &self,
        topic_id: &str,
        author_id: &str,
        payload: &ForumPostPayload,
    ) -> LinguaResult<ForumPost> {
        payload.validate()?;
        self.get_topic(topic_id).await?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LinguaError::storage_with("failed to begin transaction", e))?;
        sqlx::query(
            "INSERT INTO forum_posts (id, topic_id, author_id, body, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(topic_id)
        .bind(author_id)
        .bind(payload.body.trim())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| LinguaError::storage_with("failed to add post", e))?;
        sqlx::query("UPDATE forum_topics SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(topic_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| LinguaError::storage_with("failed to touch topic", e))?;
        tx.commit()
            .await
            .map_err(|e| LinguaError::storage_with("failed to commit", e))?;

        self.get_post(&id).await
    }

    pub async fn delete_post(&self, id: &str) -> LinguaResult<()> {
        sqlx::query("DELETE FROM forum_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete post", e))?;
        Ok(())
    }
}
