//! Course catalog handlers: browsing and enrollment, for any authenticated
//! session.

use crate::auth::CurrentUser;
use crate::models::{Course, Enrollment, EnrollmentStatus};
use crate::{AppState, WebError, WebResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use lingua_core::LinguaError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub search: Option<String>,
    pub language_id: Option<String>,
}

/// Browse active courses.
pub async fn browse_courses(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
    Query(params): Query<CatalogParams>,
) -> WebResult<Json<Vec<Course>>> {
    let courses = state
        .content
        .list_courses(params.language_id.as_deref(), false, params.search.as_deref())
        .await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<Json<Course>> {
    let course = state.content.get_course(&id).await?;
    Ok(Json(course))
}

/// Enroll the authenticated user in a course.
pub async fn enroll(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<(StatusCode, Json<Enrollment>)> {
    let enrollment = state.content.enroll(&id, &session.user_id).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// The authenticated user's enrollments.
pub async fn my_enrollments(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> WebResult<Json<Vec<Enrollment>>> {
    let enrollments = state
        .content
        .list_enrollments_for_user(&session.user_id)
        .await?;
    Ok(Json(enrollments))
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentStatusPayload {
    pub status: String,
}

/// Update one of the user's own enrollments (complete or cancel it).
pub async fn set_enrollment_status(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<EnrollmentStatusPayload>,
) -> WebResult<Json<Enrollment>> {
    let status = payload
        .status
        .parse::<EnrollmentStatus>()
        .map_err(|_| {
            WebError::App(LinguaError::field(
                "status",
                "must be one of active, completed, cancelled",
            ))
        })?;

    let enrollment = state.content.get_enrollment(&id).await?;
    if enrollment.user_id != session.user_id && !session.role.is_admin() {
        return Err(WebError::App(LinguaError::not_found("enrollment")));
    }

    let enrollment = state.content.set_enrollment_status(&id, status).await?;
    Ok(Json(enrollment))
}
