//! Database bootstrap
//!
//! Owns the SQLite pool and the platform schema. Every collection the
//! screens manage lives here as one table; services hold a pool clone and
//! issue their own queries.

use crate::{WebError, WebResult};
use sqlx::{sqlite::SqliteConnectOptions, sqlite::SqlitePoolOptions, SqlitePool};

/// Shared database handle.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and ensure the schema exists.
    pub async fn new(database_url: &str) -> WebResult<Self> {
        tracing::info!("Connecting to database: {}", database_url);

        let pool = if database_url.contains(":memory:") {
            // An in-memory SQLite database exists per connection; a second
            // pooled connection would see an empty schema.
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await
                .map_err(|e| WebError::Database(format!("Failed to connect to database: {}", e)))?
        } else {
            let db_path = database_url
                .strip_prefix("sqlite:")
                .unwrap_or(database_url);

            if let Some(parent) = std::path::Path::new(db_path).parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        WebError::Database(format!("Failed to create directory: {}", e))
                    })?;
                }
            }

            let options = SqliteConnectOptions::new()
                .filename(db_path)
                .create_if_missing(true);

            SqlitePool::connect_with(options)
                .await
                .map_err(|e| WebError::Database(format!("Failed to connect to database: {}", e)))?
        };

        Self::create_tables(&pool).await?;
        tracing::info!("Database schema ready");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the platform schema.
    async fn create_tables(pool: &SqlitePool) -> WebResult<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'student',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_users_username ON users(username)",
            "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
            r#"
            CREATE TABLE IF NOT EXISTS languages (
                id TEXT PRIMARY KEY,
                code TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                native_name TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS courses (
                id TEXT PRIMARY KEY,
                language_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                level TEXT NOT NULL,
                teacher_id TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_courses_language ON courses(language_id)",
            r#"
            CREATE TABLE IF NOT EXISTS course_enrollments (
                id TEXT PRIMARY KEY,
                course_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                enrolled_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_enrollments_course ON course_enrollments(course_id)",
            "CREATE INDEX IF NOT EXISTS idx_enrollments_user ON course_enrollments(user_id)",
            r#"
            CREATE TABLE IF NOT EXISTS dictionary (
                id TEXT PRIMARY KEY,
                language_id TEXT NOT NULL,
                word TEXT NOT NULL,
                translation TEXT NOT NULL,
                part_of_speech TEXT,
                example TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_dictionary_language ON dictionary(language_id)",
            r#"
            CREATE TABLE IF NOT EXISTS materials (
                id TEXT PRIMARY KEY,
                language_id TEXT NOT NULL,
                course_id TEXT,
                title TEXT NOT NULL,
                kind TEXT NOT NULL,
                body TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_materials_kind ON materials(kind)",
            r#"
            CREATE TABLE IF NOT EXISTS system_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS user_vocabulary (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                language_id TEXT,
                word TEXT NOT NULL,
                translation TEXT NOT NULL,
                note TEXT,
                created_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_vocabulary_user ON user_vocabulary(user_id)",
            r#"
            CREATE TABLE IF NOT EXISTS user_sentences (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                language_id TEXT,
                sentence TEXT NOT NULL,
                translation TEXT NOT NULL,
                source TEXT,
                created_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_sentences_user ON user_sentences(user_id)",
            r#"
            CREATE TABLE IF NOT EXISTS teacher_schedule (
                id TEXT PRIMARY KEY,
                teacher_id TEXT NOT NULL,
                weekday INTEGER NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                is_available INTEGER NOT NULL DEFAULT 1
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_schedule_teacher ON teacher_schedule(teacher_id)",
            r#"
            CREATE TABLE IF NOT EXISTS private_lessons (
                id TEXT PRIMARY KEY,
                teacher_id TEXT NOT NULL,
                student_id TEXT NOT NULL,
                scheduled_at TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'requested',
                topic TEXT,
                created_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_lessons_teacher ON private_lessons(teacher_id)",
            "CREATE INDEX IF NOT EXISTS idx_lessons_student ON private_lessons(student_id)",
            r#"
            CREATE TABLE IF NOT EXISTS forum_categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                position INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS forum_topics (
                id TEXT PRIMARY KEY,
                category_id TEXT NOT NULL,
                author_id TEXT NOT NULL,
                title TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_topics_category ON forum_topics(category_id)",
            r#"
            CREATE TABLE IF NOT EXISTS forum_posts (
                id TEXT PRIMARY KEY,
                topic_id TEXT NOT NULL,
                author_id TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_posts_topic ON forum_posts(topic_id)",
            r#"
            CREATE TABLE IF NOT EXISTS memberships (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                price_cents INTEGER NOT NULL,
                duration_days INTEGER NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS user_memberships (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                plan_id TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                started_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_user_memberships_user ON user_memberships(user_id)",
            r#"
            CREATE TABLE IF NOT EXISTS payments (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                plan_id TEXT,
                amount_cents INTEGER NOT NULL,
                currency TEXT NOT NULL DEFAULT 'USD',
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_payments_user ON payments(user_id)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(|e| WebError::Database(format!("Failed to create schema: {}", e)))?;
        }

        Ok(())
    }
}
