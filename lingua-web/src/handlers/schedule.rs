//! Schedule and lesson handlers.
//!
//! Teachers manage their own availability slots; any authenticated session
//! can view a teacher's schedule when booking. Lessons are requested by
//! students and confirmed or completed by the teaching side.

use crate::auth::{CurrentUser, TeacherUser};
use crate::models::{
    LessonRequestPayload, LessonStatusPayload, PrivateLesson, ScheduleSlot, ScheduleSlotPayload,
};
use crate::{AppState, WebError, WebResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use lingua_core::LinguaError;

// -- availability slots ----------------------------------------------------

/// The authenticated teacher's own schedule.
pub async fn my_schedule(
    State(state): State<AppState>,
    TeacherUser(session): TeacherUser,
) -> WebResult<Json<Vec<ScheduleSlot>>> {
    let slots = state.schedule.list_slots(&session.user_id).await?;
    Ok(Json(slots))
}

/// A teacher's schedule, for students booking a lesson.
pub async fn teacher_schedule(
    State(state): State<AppState>,
    CurrentUser(_session): CurrentUser,
    Path(teacher_id): Path<String>,
) -> WebResult<Json<Vec<ScheduleSlot>>> {
    let slots = state.schedule.list_slots(&teacher_id).await?;
    Ok(Json(slots))
}

pub async fn add_slot(
    State(state): State<AppState>,
    TeacherUser(session): TeacherUser,
    Json(payload): Json<ScheduleSlotPayload>,
) -> WebResult<(StatusCode, Json<ScheduleSlot>)> {
    let slot = state.schedule.add_slot(&session.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn update_slot(
    State(state): State<AppState>,
    TeacherUser(session): TeacherUser,
    Path(id): Path<String>,
    Json(payload): Json<ScheduleSlotPayload>,
) -> WebResult<Json<ScheduleSlot>> {
    let slot = state
        .schedule
        .update_slot(&session.user_id, &id, &payload)
        .await?;
    Ok(Json(slot))
}

pub async fn delete_slot(
    State(state): State<AppState>,
    TeacherUser(session): TeacherUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.schedule.delete_slot(&session.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- private lessons -------------------------------------------------------

/// Request a lesson with a teacher.
pub async fn request_lesson(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(payload): Json<LessonRequestPayload>,
) -> WebResult<(StatusCode, Json<PrivateLesson>)> {
    // The teacher being booked has to exist and hold a teaching role.
    let teacher = state
        .user_service
        .get_user_by_id(&payload.teacher_id)
        .await
        .ok_or_else(|| WebError::App(LinguaError::field("teacher_id", "unknown teacher")))?;
    if !teacher.role.can_teach() {
        return Err(WebError::App(LinguaError::field(
            "teacher_id",
            "user is not a teacher",
        )));
    }

    let lesson = state
        .schedule
        .request_lesson(&session.user_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// Lessons the authenticated user participates in; admins see all lessons.
pub async fn my_lessons(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> WebResult<Json<Vec<PrivateLesson>>> {
    let lessons = if session.role.is_admin() {
        state.schedule.list_all_lessons().await?
    } else {
        state.schedule.list_lessons_for(&session.user_id).await?
    };
    Ok(Json(lessons))
}

/// Update a lesson's status. Participants and admins only.
pub async fn set_lesson_status(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<LessonStatusPayload>,
) -> WebResult<Json<PrivateLesson>> {
    let status = payload.validate()?;

    let lesson = state.schedule.get_lesson(&id).await?;
    let is_participant =
        lesson.teacher_id == session.user_id || lesson.student_id == session.user_id;
    if !is_participant && !session.role.is_admin() {
        return Err(WebError::App(LinguaError::not_found("lesson")));
    }

    let lesson = state.schedule.set_lesson_status(&id, status).await?;
    Ok(Json(lesson))
}
