//! Personal collection handlers: vocabulary and sentences, always scoped to
//! the authenticated session's user id.

use crate::auth::CurrentUser;
use crate::models::{SentenceItem, SentencePayload, VocabularyItem, VocabularyPayload};
use crate::{AppState, WebResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CollectionParams {
    pub search: Option<String>,
}

// -- vocabulary ------------------------------------------------------------

pub async fn list_vocabulary(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Query(params): Query<CollectionParams>,
) -> WebResult<Json<Vec<VocabularyItem>>> {
    let items = state
        .collections
        .list_vocabulary(&session.user_id, params.search.as_deref())
        .await?;
    Ok(Json(items))
}

pub async fn add_vocabulary(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(payload): Json<VocabularyPayload>,
) -> WebResult<(StatusCode, Json<VocabularyItem>)> {
    let item = state
        .collections
        .add_vocabulary(&session.user_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_vocabulary(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<VocabularyPayload>,
) -> WebResult<Json<VocabularyItem>> {
    let item = state
        .collections
        .update_vocabulary(&session.user_id, &id, &payload)
        .await?;
    Ok(Json(item))
}

pub async fn delete_vocabulary(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state
        .collections
        .delete_vocabulary(&session.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- sentences -------------------------------------------------------------

pub async fn list_sentences(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Query(params): Query<CollectionParams>,
) -> WebResult<Json<Vec<SentenceItem>>> {
    let items = state
        .collections
        .list_sentences(&session.user_id, params.search.as_deref())
        .await?;
    Ok(Json(items))
}

pub async fn add_sentence(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(payload): Json<SentencePayload>,
) -> WebResult<(StatusCode, Json<SentenceItem>)> {
    let item = state
        .collections
        .add_sentence(&session.user_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_sentence(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SentencePayload>,
) -> WebResult<Json<SentenceItem>> {
    let item = state
        .collections
        .update_sentence(&session.user_id, &id, &payload)
        .await?;
    Ok(Json(item))
}

pub async fn delete_sentence(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state
        .collections
        .delete_sentence(&session.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
