//! Content management handlers (admin): languages, courses, dictionary,
//! materials. Tabs of the content-management screen.

use crate::auth::AdminUser;
use crate::models::{
    Course, CoursePayload, DictionaryEntry, DictionaryEntryPayload, Language, LanguagePayload,
    Material, MaterialKind, MaterialPayload,
};
use crate::{AppState, WebResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ContentListParams {
    pub search: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
    pub language_id: Option<String>,
    pub kind: Option<String>,
}

// -- languages -------------------------------------------------------------

pub async fn list_languages(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Query(params): Query<ContentListParams>,
) -> WebResult<Json<Vec<Language>>> {
    let languages = state
        .content
        .list_languages(params.include_inactive, params.search.as_deref())
        .await?;
    Ok(Json(languages))
}

pub async fn create_language(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Json(payload): Json<LanguagePayload>,
) -> WebResult<(StatusCode, Json<Language>)> {
    let language = state.content.create_language(&payload).await?;
    Ok((StatusCode::CREATED, Json(language)))
}

pub async fn update_language(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<LanguagePayload>,
) -> WebResult<Json<Language>> {
    let language = state.content.update_language(&id, &payload).await?;
    Ok(Json(language))
}

pub async fn delete_language(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.content.delete_language(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- courses ---------------------------------------------------------------

pub async fn list_courses(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Query(params): Query<ContentListParams>,
) -> WebResult<Json<Vec<Course>>> {
    let courses = state
        .content
        .list_courses(
            params.language_id.as_deref(),
            params.include_inactive,
            params.search.as_deref(),
        )
        .await?;
    Ok(Json(courses))
}

pub async fn create_course(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Json(payload): Json<CoursePayload>,
) -> WebResult<(StatusCode, Json<Course>)> {
    let course = state.content.create_course(&payload).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update_course(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<CoursePayload>,
) -> WebResult<Json<Course>> {
    let course = state.content.update_course(&id, &payload).await?;
    Ok(Json(course))
}

pub async fn delete_course(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.content.delete_course(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- dictionary ------------------------------------------------------------

pub async fn list_dictionary(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Query(params): Query<ContentListParams>,
) -> WebResult<Json<Vec<DictionaryEntry>>> {
    let entries = state
        .content
        .list_dictionary(params.language_id.as_deref(), params.search.as_deref())
        .await?;
    Ok(Json(entries))
}

pub async fn create_dictionary_entry(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Json(payload): Json<DictionaryEntryPayload>,
) -> WebResult<(StatusCode, Json<DictionaryEntry>)> {
    let entry = state.content.create_dictionary_entry(&payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_dictionary_entry(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<DictionaryEntryPayload>,
) -> WebResult<Json<DictionaryEntry>> {
    let entry = state.content.update_dictionary_entry(&id, &payload).await?;
    Ok(Json(entry))
}

pub async fn delete_dictionary_entry(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.content.delete_dictionary_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- materials -------------------------------------------------------------

pub async fn list_materials(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Query(params): Query<ContentListParams>,
) -> WebResult<Json<Vec<Material>>> {
    let kind = params
        .kind
        .as_deref()
        .and_then(|k| k.parse::<MaterialKind>().ok());
    let materials = state
        .content
        .list_materials(
            kind,
            params.language_id.as_deref(),
            params.include_inactive,
            params.search.as_deref(),
        )
        .await?;
    Ok(Json(materials))
}

pub async fn create_material(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Json(payload): Json<MaterialPayload>,
) -> WebResult<(StatusCode, Json<Material>)> {
    let material = state.content.create_material(&payload).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

pub async fn update_material(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<MaterialPayload>,
) -> WebResult<Json<Material>> {
    let material = state.content.update_material(&id, &payload).await?;
    Ok(Json(material))
}

pub async fn delete_material(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.content.delete_material(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
