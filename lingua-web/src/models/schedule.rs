//! Teacher schedules and private lessons.

use super::{finish, require};
use chrono::{DateTime, Utc};
use lingua_core::{FieldError, LinguaResult};
use serde::{Deserialize, Serialize};

/// A weekly availability slot in a teacher's schedule. Weekday 0 is Monday.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScheduleSlot {
    pub id: String,
    pub teacher_id: String,
    pub weekday: i64,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleSlotPayload {
    pub weekday: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "super::content::default_true")]
    pub is_available: bool,
}

impl ScheduleSlotPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        if !(0..=6).contains(&self.weekday) {
            errors.push(FieldError::new("weekday", "must be between 0 and 6"));
        }
        require(&mut errors, "start_time", &self.start_time);
        require(&mut errors, "end_time", &self.end_time);
        finish(errors)
    }
}

/// Private lesson lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LessonStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

impl std::str::FromStr for LessonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requested" => Ok(LessonStatus::Requested),
            "confirmed" => Ok(LessonStatus::Confirmed),
            "completed" => Ok(LessonStatus::Completed),
            "cancelled" => Ok(LessonStatus::Cancelled),
            _ => Err(format!("Unknown lesson status: {}", s)),
        }
    }
}

/// A one-on-one lesson between a teacher and a student.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrivateLesson {
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: LessonStatus,
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LessonRequestPayload {
    pub teacher_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub topic: Option<String>,
}

impl LessonRequestPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "teacher_id", &self.teacher_id);
        if self.duration_minutes <= 0 {
            errors.push(FieldError::new("duration_minutes", "must be positive"));
        }
        finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct LessonStatusPayload {
    pub status: String,
}

impl LessonStatusPayload {
    pub fn validate(&self) -> LinguaResult<LessonStatus> {
        let status = self.status.parse::<LessonStatus>().map_err(|_| {
            lingua_core::LinguaError::field(
                "status",
                "must be one of requested, confirmed, completed, cancelled",
            )
        })?;
        Ok(status)
    }
}
