//! Forum models: categories, topics, posts.

use super::{finish, require};
use chrono::{DateTime, Utc};
use lingua_core::{LinguaResult, Searchable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ForumCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Searchable for ForumCategory {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

#[derive(Debug, Deserialize)]
pub struct ForumCategoryPayload {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub position: i64,
}

impl ForumCategoryPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        finish(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ForumTopic {
    pub id: String,
    pub category_id: String,
    pub author_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for ForumTopic {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title]
    }
}

#[derive(Debug, Deserialize)]
pub struct ForumTopicPayload {
    pub category_id: String,
    pub title: String,
    /// The opening post's body.
    pub body: String,
}

impl ForumTopicPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "category_id", &self.category_id);
        require(&mut errors, "title", &self.title);
        require(&mut errors, "body", &self.body);
        finish(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ForumPost {
    pub id: String,
    pub topic_id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ForumPostPayload {
    pub body: String,
}

impl ForumPostPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "body", &self.body);
        finish(errors)
    }
}
