//! Practice module handlers: listening clips, dialogues, and stories.
//!
//! Each practice screen lists the active materials of its kind; the screen
//! itself drives playback and progression client-side.

use crate::auth::CurrentUser;
use crate::models::{Material, MaterialKind};
use crate::{AppState, WebResult};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PracticeParams {
    pub search: Option<String>,
    pub language_id: Option<String>,
}

pub async fn listening_materials(
    state: State<AppState>,
    user: CurrentUser,
    params: Query<PracticeParams>,
) -> WebResult<Json<Vec<Material>>> {
    practice_materials(state, user, params, MaterialKind::Listening).await
}

pub async fn dialogue_materials(
    state: State<AppState>,
    user: CurrentUser,
    params: Query<PracticeParams>,
) -> WebResult<Json<Vec<Material>>> {
    practice_materials(state, user, params, MaterialKind::Dialogue).await
}

pub async fn story_materials(
    state: State<AppState>,
    user: CurrentUser,
    params: Query<PracticeParams>,
) -> WebResult<Json<Vec<Material>>> {
    practice_materials(state, user, params, MaterialKind::Story).await
}

async fn practice_materials(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
    Query(params): Query<PracticeParams>,
    kind: MaterialKind,
) -> WebResult<Json<Vec<Material>>> {
    let materials = state
        .content
        .list_materials(
            Some(kind),
            params.language_id.as_deref(),
            false,
            params.search.as_deref(),
        )
        .await?;
    Ok(Json(materials))
}

/// A single practice material, for the player screen.
pub async fn get_material(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<Json<Material>> {
    let material = state.content.get_material(&id).await?;
    Ok(Json(material))
}
