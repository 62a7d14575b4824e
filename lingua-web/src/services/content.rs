//! Content management: languages, courses, enrollments, dictionary,
//! materials.

use crate::models::{
    Course, CoursePayload, DictionaryEntry, DictionaryEntryPayload, Enrollment, EnrollmentStatus,
    Language, LanguagePayload, Material, MaterialKind, MaterialPayload,
};
use chrono::Utc;
use lingua_core::{filter_by_term, LinguaError, LinguaResult};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ContentService {
    pool: SqlitePool,
}

impl ContentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // -- languages ---------------------------------------------------------

    pub async fn list_languages(
        &self,
        include_inactive: bool,
        search: Option<&str>,
    ) -> LinguaResult<Vec<Language>> {
        let query = if include_inactive {
            "SELECT * FROM languages ORDER BY created_at DESC"
        } else {
            "SELECT * FROM languages WHERE is_active = 1 ORDER BY created_at DESC"
        };
        let languages = sqlx::query_as::<_, Language>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to list languages", e))?;
        Ok(filter_by_term(languages, search))
    }

    pub async fn get_language(&self, id: &str) -> LinguaResult<Language> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load language", e))?
            .ok_or_else(|| LinguaError::not_found("language"))
    }

    pub async fn create_language(&self, payload: &LanguagePayload) -> LinguaResult<Language> {
        payload.validate()?;

        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages WHERE code = ?")
            .bind(payload.code.trim())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to check language code", e))?;
        if taken > 0 {
            return Err(LinguaError::conflict(format!(
                "A language with code '{}' already exists",
                payload.code.trim()
            )));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO languages (id, code, name, native_name, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(payload.code.trim())
        .bind(payload.name.trim())
        .bind(payload.native_name.trim())
        .bind(payload.is_active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create language", e))?;

        info!("Created language {}", payload.code.trim());
        self.get_language(&id).await
    }

    pub async fn update_language(
        &self,
        id: &str,
        payload: &LanguagePayload,
    ) -> LinguaResult<Language> {
        payload.validate()?;
        self.get_language(id).await?;

        sqlx::query(
            "UPDATE languages SET code = ?, name = ?, native_name = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(payload.code.trim())
        .bind(payload.name.trim())
        .bind(payload.native_name.trim())
        .bind(payload.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update language", e))?;

        self.get_language(id).await
    }

    /// Delete a language. Refused while courses or dictionary entries still
    /// reference it; deleting an id that is already gone is a no-op.
    pub async fn delete_language(&self, id: &str) -> LinguaResult<()> {
        let courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE language_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to count dependent courses", e))?;
        if courses > 0 {
            return Err(LinguaError::conflict(format!(
                "Cannot delete language: {} course(s) still reference it",
                courses
            )));
        }

        let entries: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM dictionary WHERE language_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| LinguaError::storage_with("failed to count dictionary entries", e))?;
        if entries > 0 {
            return Err(LinguaError::conflict(format!(
                "Cannot delete language: {} dictionary entries still reference it",
                entries
            )));
        }

        let result = sqlx::query("DELETE FROM languages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete language", e))?;
        debug!("Deleted {} language row(s) for id {}", result.rows_affected(), id);
        Ok(())
    }

    // -- courses -----------------------------------------------------------

    pub async fn list_courses(
        &self,
        language_id: Option<&str>,
        include_inactive: bool,
        search: Option<&str>,
    ) -> LinguaResult<Vec<Course>> {
        let courses = match language_id {
            Some(language_id) => {
                sqlx::query_as::<_, Course>(
                    "SELECT * FROM courses WHERE language_id = ? ORDER BY created_at DESC",
                )
                .bind(language_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| LinguaError::storage_with("failed to list courses", e))?;

        let courses: Vec<Course> = if include_inactive {
            courses
        } else {
            courses.into_iter().filter(|c| c.is_active).collect()
        };
        Ok(filter_by_term(courses, search))
    }

    pub async fn get_course(&self, id: &str) -> LinguaResult<Course> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load course", e))?
            .ok_or_else(|| LinguaError::not_found("course"))
    }

    pub async fn create_course(&self, payload: &CoursePayload) -> LinguaResult<Course> {
        let level = payload.validate()?;

        // The referenced language must exist before a course can point at it.
        if self.get_language(&payload.language_id).await.is_err() {
            return Err(LinguaError::field("language_id", "unknown language"));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO courses (id, language_id, title, description, level, teacher_id, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&payload.language_id)
        .bind(payload.title.trim())
        .bind(payload.description.trim())
        .bind(level)
        .bind(&payload.teacher_id)
        .bind(payload.is_active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create course", e))?;

        info!("Created course '{}'", payload.title.trim());
        self.get_course(&id).await
    }

    pub async fn update_course(&self, id: &str, payload: &CoursePayload) -> LinguaResult<Course> {
        let level = payload.validate()?;
        self.get_course(id).await?;

        if self.get_language(&payload.language_id).await.is_err() {
            return Err(LinguaError::field("language_id", "unknown language"));
        }

        sqlx::query(
            "UPDATE courses SET language_id = ?, title = ?, description = ?, level = ?, teacher_id = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&payload.language_id)
        .bind(payload.title.trim())
        .bind(payload.description.trim())
        .bind(level)
        .bind(&payload.teacher_id)
        .bind(payload.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update course", e))?;

        self.get_course(id).await
    }

    /// Delete a course. Refused while active enrollments exist; settled
    /// (completed or cancelled) enrollments are removed with the course.
    pub async fn delete_course(&self, id: &str) -> LinguaResult<()> {
        let active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM course_enrollments WHERE course_id = ? AND status = 'active'",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to count enrollments", e))?;
        if active > 0 {
            return Err(LinguaError::conflict(format!(
                "Cannot delete course: {} active enrollment(s) exist",
                active
            )));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LinguaError::storage_with("failed to begin transaction", e))?;
        sqlx::query("DELETE FROM course_enrollments WHERE course_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete enrollments", e))?;
        sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete course", e))?;
        tx.commit()
            .await
            .map_err(|e| LinguaError::storage_with("failed to commit", e))?;
        Ok(())
    }

    // -- enrollments -------------------------------------------------------

    pub async fn enroll(&self, course_id: &str, user_id: &str) -> LinguaResult<Enrollment> {
        let course = self.get_course(course_id).await?;
        if !course.is_active {
            return Err(LinguaError::conflict("Course is not open for enrollment"));
        }

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM course_enrollments WHERE course_id = ? AND user_id = ? AND status = 'active'",
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to check enrollment", e))?;
        if existing > 0 {
            return Err(LinguaError::conflict("Already enrolled in this course"));
        }

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO course_enrollments (id, course_id, user_id, status, enrolled_at)
             VALUES (?, ?, ?, 'active', ?)",
        )
        .bind(&id)
        .bind(course_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to enroll", e))?;

        self.get_enrollment(&id).await
    }

    pub async fn get_enrollment(&self, id: &str) -> LinguaResult<Enrollment> {
        sqlx::query_as::<_, Enrollment>("SELECT * FROM course_enrollments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load enrollment", e))?
            .ok_or_else(|| LinguaError::not_found("enrollment"))
    }

    pub async fn list_enrollments_for_user(&self, user_id: &str) -> LinguaResult<Vec<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM course_enrollments WHERE user_id = ? ORDER BY enrolled_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to list enrollments", e))
    }

    pub async fn set_enrollment_status(
        &self,
        id: &str,
        status: EnrollmentStatus,
    ) -> LinguaResult<Enrollment> {
        self.get_enrollment(id).await?;
        sqlx::query("UPDATE course_enrollments SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to update enrollment", e))?;
        self.get_enrollment(id).await
    }

    // -- dictionary --------------------------------------------------------

    pub async fn list_dictionary(
        &self,
        language_id: Option<&str>,
        search: Option<&str>,
    ) -> LinguaResult<Vec<DictionaryEntry>> {
        let entries = match language_id {
            Some(language_id) => {
                sqlx::query_as::<_, DictionaryEntry>(
                    "SELECT * FROM dictionary WHERE language_id = ? ORDER BY created_at DESC",
                )
                .bind(language_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, DictionaryEntry>(
                    "SELECT * FROM dictionary ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| LinguaError::storage_with("failed to list dictionary entries", e))?;
        Ok(filter_by_term(entries, search))
    }

    pub async fn get_dictionary_entry(&self, id: &str) -> LinguaResult<DictionaryEntry> {
        sqlx::query_as::<_, DictionaryEntry>("SELECT * FROM dictionary WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load dictionary entry", e))?
            .ok_or_else(|| LinguaError::not_found("dictionary entry"))
    }

    pub async fn create_dictionary_entry(
        &self,
        payload: &DictionaryEntryPayload,
    ) -> LinguaResult<DictionaryEntry> {
        payload.validate()?;

        if self.get_language(&payload.language_id).await.is_err() {
            return Err(LinguaError::field("language_id", "unknown language"));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO dictionary (id, language_id, word, translation, part_of_speech, example, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&payload.language_id)
        .bind(payload.word.trim())
        .bind(payload.translation.trim())
        .bind(&payload.part_of_speech)
        .bind(&payload.example)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create dictionary entry", e))?;

        self.get_dictionary_entry(&id).await
    }

    pub async fn update_dictionary_entry(
        &self,
        id: &str,
        payload: &DictionaryEntryPayload,
    ) -> LinguaResult<DictionaryEntry> {
        payload.validate()?;
        self.get_dictionary_entry(id).await?;

        sqlx::query(
            "UPDATE dictionary SET language_id = ?, word = ?, translation = ?, part_of_speech = ?, example = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&payload.language_id)
        .bind(payload.word.trim())
        .bind(payload.translation.trim())
        .bind(&payload.part_of_speech)
        .bind(&payload.example)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update dictionary entry", e))?;

        self.get_dictionary_entry(id).await
    }

    pub async fn delete_dictionary_entry(&self, id: &str) -> LinguaResult<()> {
        sqlx::query("DELETE FROM dictionary WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete dictionary entry", e))?;
        Ok(())
    }

    // -- materials ---------------------------------------------------------

    pub async fn list_materials(
        &self,
        kind: Option<MaterialKind>,
        language_id: Option<&str>,
        include_inactive: bool,
        search: Option<&str>,
    ) -> LinguaResult<Vec<Material>> {
        let materials = match kind {
            Some(kind) => {
                sqlx::query_as::<_, Material>(
                    "SELECT * FROM materials WHERE kind = ? ORDER BY created_at DESC",
                )
                .bind(kind)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Material>("SELECT * FROM materials ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| LinguaError::storage_with("failed to list materials", e))?;

        let materials: Vec<Material> = materials
            .into_iter()
            .filter(|m| include_inactive || m.is_active)
            .filter(|m| language_id.map_or(true, |l| m.language_id == l))
            .collect();
        Ok(filter_by_term(materials, search))
    }

    pub async fn get_material(&self, id: &str) -> LinguaResult<Material> {
        sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load material", e))?
            .ok_or_else(|| LinguaError::not_found("material"))
    }

    pub async fn create_material(&self, payload: &MaterialPayload) -> LinguaResult<Material> {
        let kind = payload.validate()?;

        if self.get_language(&payload.language_id).await.is_err() {
            return Err(LinguaError::field("language_id", "unknown language"));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO materials (id, language_id, course_id, title, kind, body, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&payload.language_id)
        .bind(&payload.course_id)
        .bind(payload.title.trim())
        .bind(kind)
        .bind(&payload.body)
        .bind(payload.is_active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create material", e))?;

        self.get_material(&id).await
    }

    pub async fn update_material(
        &self,
        id: &str,
        payload: &MaterialPayload,
    ) -> LinguaResult<Material> {
        let kind = payload.validate()?;
        self.get_material(id).await?;

        sqlx::query(
            "UPDATE materials SET language_id = ?, course_id = ?, title = ?, kind = ?, body = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&payload.language_id)
        .bind(&payload.course_id)
        .bind(payload.title.trim())
        .bind(kind)
        .bind(&payload.body)
        .bind(payload.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update material", e))?;

        self.get_material(id).await
    }

    pub async fn delete_material(&self, id: &str) -> LinguaResult<()> {
        sqlx::query("DELETE FROM materials WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete material", e))?;
        Ok(())
    }
}
