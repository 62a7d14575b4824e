//! Forum handlers: categories, topics, posts.
//!
//! Reading and posting are open to any authenticated session; category
//! management and moderation are admin actions, except that authors may
//! delete their own topics and posts.

use crate::auth::{AdminUser, CurrentUser};
use crate::models::{
    ForumCategory, ForumCategoryPayload, ForumPost, ForumPostPayload, ForumTopic,
    ForumTopicPayload,
};
use crate::{AppState, WebError, WebResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use lingua_core::LinguaError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ForumParams {
    pub search: Option<String>,
    pub category_id: Option<String>,
}

// -- categories ------------------------------------------------------------

pub async fn list_categories(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
) -> WebResult<Json<Vec<ForumCategory>>> {
    let categories = state.forum.list_categories().await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Json(payload): Json<ForumCategoryPayload>,
) -> WebResult<(StatusCode, Json<ForumCategory>)> {
    let category = state.forum.create_category(&payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<ForumCategoryPayload>,
) -> WebResult<Json<ForumCategory>> {
    let category = state.forum.update_category(&id, &payload).await?;
    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.forum.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- topics ----------------------------------------------------------------

pub async fn list_topics(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
    Query(params): Query<ForumParams>,
) -> WebResult<Json<Vec<ForumTopic>>> {
    let topics = state
        .forum
        .list_topics(params.category_id.as_deref(), params.search.as_deref())
        .await?;
    Ok(Json(topics))
}

pub async fn get_topic(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<Json<ForumTopic>> {
    let topic = state.forum.get_topic(&id).await?;
    Ok(Json(topic))
}

pub async fn create_topic(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(payload): Json<ForumTopicPayload>,
) -> WebResult<(StatusCode, Json<ForumTopic>)> {
    let topic = state.forum.create_topic(&session.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(topic)))
}

/// Delete a topic and its posts. Authors may delete their own topics;
/// admins may delete any.
pub async fn delete_topic(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    match state.forum.get_topic(&id).await {
        Ok(topic) => {
            if topic.author_id != session.user_id && !session.role.is_admin() {
                return Err(WebError::App(LinguaError::conflict(
                    "Only the author or an admin can delete this topic",
                )));
            }
            state.forum.delete_topic(&id).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        // Deleting an id that is already gone is a no-op.
        Err(LinguaError::NotFound { .. }) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(e.into()),
    }
}

// -- posts -----------------------------------------------------------------

pub async fn list_posts(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
    Path(topic_id): Path<String>,
) -> WebResult<Json<Vec<ForumPost>>> {
    // Listing posts of an unknown topic is a 404, not an empty list.
    state.forum.get_topic(&topic_id).await?;
    let posts = state.forum.list_posts(&topic_id).await?;
    Ok(Json(posts))
}

pub async fn add_post(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(topic_id): Path<String>,
    Json(payload): Json<ForumPostPayload>,
) -> WebResult<(StatusCode, Json<ForumPost>)> {
    let post = state
        .forum
        .add_post(&topic_id, &session.user_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Delete a post. Authors may delete their own posts; admins may delete any.
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    match state.forum.get_post(&id).await {
        Ok(post) => {
            if post.author_id != session.user_id && !session.role.is_admin() {
                return Err(WebError::App(LinguaError::conflict(
                    "Only the author or an admin can delete this post",
                )));
            }
            state.forum.delete_post(&id).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        Err(LinguaError::NotFound { .. }) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(e.into()),
    }
}
