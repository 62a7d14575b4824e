//! Admin directory handlers: user management and system settings.

use crate::auth::users::{AdminCreateUserRequest, AdminUpdateUserRequest, UserInfo};
use crate::auth::AdminUser;
use crate::models::{SystemSetting, SystemSettingPayload};
use crate::{AppState, WebError, WebResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use lingua_core::LinguaError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DirectoryParams {
    pub search: Option<String>,
}

// -- users -----------------------------------------------------------------

pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Query(params): Query<DirectoryParams>,
) -> WebResult<Json<Vec<UserInfo>>> {
    let users = state
        .user_service
        .store()
        .list_users(params.search.as_deref())
        .await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Json(payload): Json<AdminCreateUserRequest>,
) -> WebResult<(StatusCode, Json<UserInfo>)> {
    let user = state.user_service.store().create_user(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<AdminUpdateUserRequest>,
) -> WebResult<Json<UserInfo>> {
    let user = state.user_service.store().update_user(&id, &payload).await?;
    Ok(Json(user))
}

/// Delete a user. An admin cannot delete their own account.
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(session): AdminUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    if id == session.user_id {
        return Err(WebError::App(LinguaError::conflict(
            "Cannot delete the account you are signed in with",
        )));
    }

    state.user_service.store().delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- system settings -------------------------------------------------------

pub async fn list_settings(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Query(params): Query<DirectoryParams>,
) -> WebResult<Json<Vec<SystemSetting>>> {
    let settings = state.settings.list(params.search.as_deref()).await?;
    Ok(Json(settings))
}

pub async fn put_setting(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Json(payload): Json<SystemSettingPayload>,
) -> WebResult<Json<SystemSetting>> {
    let setting = state.settings.put(&payload).await?;
    Ok(Json(setting))
}

pub async fn delete_setting(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(key): Path<String>,
) -> WebResult<StatusCode> {
    state.settings.delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
