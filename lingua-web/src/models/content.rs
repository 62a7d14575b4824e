//! Content management models: languages, courses, enrollments, dictionary
//! entries, and practice materials.

use super::{finish, require};
use chrono::{DateTime, Utc};
use lingua_core::{FieldError, LinguaResult, Searchable};
use serde::{Deserialize, Serialize};

/// A language offered on the platform.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: String,
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for Language {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.code, &self.name, &self.native_name]
    }
}

#[derive(Debug, Deserialize)]
pub struct LanguagePayload {
    pub code: String,
    pub name: String,
    pub native_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl LanguagePayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "code", &self.code);
        require(&mut errors, "name", &self.name);
        require(&mut errors, "native_name", &self.native_name);
        finish(errors)
    }
}

/// Course difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseLevel::Beginner => write!(f, "beginner"),
            CourseLevel::Intermediate => write!(f, "intermediate"),
            CourseLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            _ => Err(format!("Unknown course level: {}", s)),
        }
    }
}

/// A course in one language, optionally led by a teacher.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: String,
    pub language_id: String,
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    pub teacher_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for Course {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }
}

#[derive(Debug, Deserialize)]
pub struct CoursePayload {
    pub language_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub level: String,
    pub teacher_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CoursePayload {
    pub fn validate(&self) -> LinguaResult<CourseLevel> {
        let mut errors = Vec::new();
        require(&mut errors, "language_id", &self.language_id);
        require(&mut errors, "title", &self.title);
        require(&mut errors, "level", &self.level);

        let level = self.level.parse::<CourseLevel>();
        if !self.level.trim().is_empty() && level.is_err() {
            errors.push(FieldError::new(
                "level",
                "must be one of beginner, intermediate, advanced",
            ));
        }

        finish(errors)?;
        Ok(level.expect("validated above"))
    }
}

/// Enrollment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Cancelled,
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(EnrollmentStatus::Active),
            "completed" => Ok(EnrollmentStatus::Completed),
            "cancelled" => Ok(EnrollmentStatus::Cancelled),
            _ => Err(format!("Unknown enrollment status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    pub id: String,
    pub course_id: String,
    pub user_id: String,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
}

/// A dictionary entry for one language.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DictionaryEntry {
    pub id: String,
    pub language_id: String,
    pub word: String,
    pub translation: String,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for DictionaryEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.word, &self.translation]
    }
}

#[derive(Debug, Deserialize)]
pub struct DictionaryEntryPayload {
    pub language_id: String,
    pub word: String,
    pub translation: String,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
}

impl DictionaryEntryPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "language_id", &self.language_id);
        require(&mut errors, "word", &self.word);
        require(&mut errors, "translation", &self.translation);
        finish(errors)
    }
}

/// Kind of practice material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MaterialKind {
    Listening,
    Dialogue,
    Story,
    Grammar,
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::Listening => write!(f, "listening"),
            MaterialKind::Dialogue => write!(f, "dialogue"),
            MaterialKind::Story => write!(f, "story"),
            MaterialKind::Grammar => write!(f, "grammar"),
        }
    }
}

impl std::str::FromStr for MaterialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "listening" => Ok(MaterialKind::Listening),
            "dialogue" => Ok(MaterialKind::Dialogue),
            "story" => Ok(MaterialKind::Story),
            "grammar" => Ok(MaterialKind::Grammar),
            _ => Err(format!("Unknown material kind: {}", s)),
        }
    }
}

/// A practice material: a listening clip transcript, a dialogue, a story,
/// or a grammar note.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Material {
    pub id: String,
    pub language_id: String,
    pub course_id: Option<String>,
    pub title: String,
    pub kind: MaterialKind,
    pub body: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for Material {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title]
    }
}

#[derive(Debug, Deserialize)]
pub struct MaterialPayload {
    pub language_id: String,
    pub course_id: Option<String>,
    pub title: String,
    pub kind: String,
    pub body: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl MaterialPayload {
    pub fn validate(&self) -> LinguaResult<MaterialKind> {
        let mut errors = Vec::new();
        require(&mut errors, "language_id", &self.language_id);
        require(&mut errors, "title", &self.title);
        require(&mut errors, "kind", &self.kind);

        let kind = self.kind.parse::<MaterialKind>();
        if !self.kind.trim().is_empty() && kind.is_err() {
            errors.push(FieldError::new(
                "kind",
                "must be one of listening, dialogue, story, grammar",
            ));
        }

        finish(errors)?;
        Ok(kind.expect("validated above"))
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_payload_requires_fields() {
        let payload = LanguagePayload {
            code: "".to_string(),
            name: "Spanish".to_string(),
            native_name: " ".to_string(),
            is_active: true,
        };
        let err = payload.validate().unwrap_err();
        let lingua_core::LinguaError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["code", "native_name"]);
    }

    #[test]
    fn course_payload_checks_enum_membership() {
        let payload = CoursePayload {
            language_id: "lang-1".to_string(),
            title: "Spanish A1".to_string(),
            description: String::new(),
            level: "expert".to_string(),
            teacher_id: None,
            is_active: true,
        };
        assert!(payload.validate().is_err());

        let payload = CoursePayload {
            level: "beginner".to_string(),
            ..payload
        };
        assert_eq!(payload.validate().unwrap(), CourseLevel::Beginner);
    }

    #[test]
    fn material_kind_round_trips() {
        for kind in [
            MaterialKind::Listening,
            MaterialKind::Dialogue,
            MaterialKind::Story,
            MaterialKind::Grammar,
        ] {
            assert_eq!(kind.to_string().parse::<MaterialKind>().unwrap(), kind);
        }
    }
}
