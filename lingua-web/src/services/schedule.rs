//! Teacher schedules and private lessons.

use crate::models::{
    LessonRequestPayload, LessonStatus, PrivateLesson, ScheduleSlot, ScheduleSlotPayload,
};
use chrono::Utc;
use lingua_core::{LinguaError, LinguaResult};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ScheduleService {
    pool: SqlitePool,
}

impl ScheduleService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // -- availability slots ------------------------------------------------

    pub async fn list_slots(&self, teacher_id: &str) -> LinguaResult<Vec<ScheduleSlot>> {
        sqlx::query_as::<_, ScheduleSlot>(
            "SELECT * FROM teacher_schedule WHERE teacher_id = ? ORDER BY weekday, start_time",
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to list schedule", e))
    }

    pub async fn get_slot(&self, teacher_id: &str, id: &str) -> LinguaResult<ScheduleSlot> {
        sqlx::query_as::<_, ScheduleSlot>(
            "SELECT * FROM teacher_schedule WHERE id = ? AND teacher_id = ?",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to load schedule slot", e))?
        .ok_or_else(|| LinguaError::not_found("schedule slot"))
    }

    pub async fn add_slot(
        &self,
        teacher_id: &str,
        payload: &ScheduleSlotPayload,
    ) -> LinguaResult<ScheduleSlot> {
        payload.validate()?;

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO teacher_schedule (id, teacher_id, weekday, start_time, end_time, is_available)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(teacher_id)
        .bind(payload.weekday)
        .bind(payload.start_time.trim())
        .bind(payload.end_time.trim())
        .bind(payload.is_available)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to add schedule slot", e))?;

        self.get_slot(teacher_id, &id).await
    }

    pub async fn update_slot(
        &self,
        teacher_id: &str,
        id: &str,
        payload: &ScheduleSlotPayload,
    ) -> LinguaResult<ScheduleSlot> {
        payload.validate()?;
        self.get_slot(teacher_id, id).await?;

        sqlx::query(
            "UPDATE teacher_schedule SET weekday = ?, start_time = ?, end_time = ?, is_available = ?
             WHERE id = ? AND teacher_id = ?",
        )
        .bind(payload.weekday)
        .bind(payload.start_time.trim())
        .bind(payload.end_time.trim())
        .bind(payload.is_available)
        .bind(id)
        .bind(teacher_id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update schedule slot", e))?;

        self.get_slot(teacher_id, id).await
    }

    pub async fn delete_slot(&self, teacher_id: &str, id: &str) -> LinguaResult<()> {
        sqlx::query("DELETE FROM teacher_schedule WHERE id = ? AND teacher_id = ?")
            .bind(id)
            .bind(teacher_id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete schedule slot", e))?;
        Ok(())
    }

    // -- private lessons ---------------------------------------------------

    /// A student requests a lesson with a teacher.
    pub async fn request_lesson(
        &self,
        student_id: &str,
        payload: &LessonRequestPayload,
    ) -> LinguaResult<PrivateLesson> {
        payload.validate()?;

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO private_lessons (id, teacher_id, student_id, scheduled_at, duration_minutes, status, topic, created_at)
             VALUES (?, ?, ?, ?, ?, 'requested', ?, ?)",
        )
        .bind(&id)
        .bind(&payload.teacher_id)
        .bind(student_id)
        .bind(payload.scheduled_at)
        .bind(payload.duration_minutes)
        .bind(&payload.topic)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to request lesson", e))?;

        self.get_lesson(&id).await
    }

    pub async fn get_lesson(&self, id: &str) -> LinguaResult<PrivateLesson> {
        sqlx::query_as::<_, PrivateLesson>("SELECT * FROM private_lessons WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load lesson", e))?
            .ok_or_else(|| LinguaError::not_found("lesson"))
    }

    /// Lessons the user participates in, as teacher or student.
    pub async fn list_lessons_for(&self, user_id: &str) -> LinguaResult<Vec<PrivateLesson>> {
        sqlx::query_as::<_, PrivateLesson>(
            "SELECT * FROM private_lessons WHERE teacher_id = ? OR student_id = ? ORDER BY scheduled_at DESC",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to list lessons", e))
    }

    pub async fn list_all_lessons(&self) -> LinguaResult<Vec<PrivateLesson>> {
        sqlx::query_as::<_, PrivateLesson>(
            "SELECT * FROM private_lessons ORDER BY scheduled_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to list lessons", e))
    }

    pub async fn set_lesson_status(
        &self,
        id: &str,
        status: LessonStatus,
    ) -> LinguaResult<PrivateLesson> {
        self.get_lesson(id).await?;
        sqlx::query("UPDATE private_lessons SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to update lesson", e))?;
        self.get_lesson(id).await
    }
}
