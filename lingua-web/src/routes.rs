//! Route definitions for the Lingua web server
//!
//! Route nesting mirrors the client route table; each nested router is
//! guarded by the extractors matching that surface's role set.

use crate::auth::handlers as auth_handlers;
use crate::{handlers, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};

/// Create API routes
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let mut router = Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Authentication
        .nest("/auth", auth_routes())
        // Navigation resolution (route table + gate + dispatch)
        .route("/navigation/resolve", get(handlers::navigation::resolve_view))
        // Admin content management
        .nest("/content", content_routes())
        // Admin user management
        .nest("/users", user_routes())
        // Admin system settings
        .nest("/settings", settings_routes())
        // Course catalog and enrollments
        .nest("/courses", course_routes())
        // Personal collections
        .nest("/collections", collection_routes())
        // Practice modules
        .nest("/practice", practice_routes())
        // Forum
        .nest("/forum", forum_routes())
        // Membership plans and subscriptions
        .nest("/memberships", membership_routes())
        // Payment ledger
        .nest("/payments", payment_routes())
        // Teacher schedules
        .nest("/schedule", schedule_routes())
        // Private lessons
        .nest("/lessons", lesson_routes());

    // Auxiliary development route tree; absent in production.
    if state.config.dev_mode {
        router = router.nest("/dev", dev_routes());
    }

    router
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth_handlers::register_user))
        .route("/login", post(auth_handlers::login_user))
        .route("/refresh", post(auth_handlers::refresh_token))
        .route("/me", get(auth_handlers::get_current_user))
        .route("/logout", post(auth_handlers::logout_user))
}

fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/languages",
            get(handlers::content::list_languages).post(handlers::content::create_language),
        )
        .route(
            "/languages/{id}",
            put(handlers::content::update_language).delete(handlers::content::delete_language),
        )
        .route(
            "/courses",
            get(handlers::content::list_courses).post(handlers::content::create_course),
        )
        .route(
            "/courses/{id}",
            put(handlers::content::update_course).delete(handlers::content::delete_course),
        )
        .route(
            "/dictionary",
            get(handlers::content::list_dictionary)
                .post(handlers::content::create_dictionary_entry),
        )
        .route(
            "/dictionary/{id}",
            put(handlers::content::update_dictionary_entry)
                .delete(handlers::content::delete_dictionary_entry),
        )
        .route(
            "/materials",
            get(handlers::content::list_materials).post(handlers::content::create_material),
        )
        .route(
            "/materials/{id}",
            put(handlers::content::update_material).delete(handlers::content::delete_material),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::directory::list_users).post(handlers::directory::create_user),
        )
        .route(
            "/{id}",
            put(handlers::directory::update_user).delete(handlers::directory::delete_user),
        )
}

fn settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::directory::list_settings).put(handlers::directory::put_setting),
        )
        .route("/{key}", axum::routing::delete(handlers::directory::delete_setting))
}

fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::courses::browse_courses))
        .route("/enrollments", get(handlers::courses::my_enrollments))
        .route(
            "/enrollments/{id}",
            put(handlers::courses::set_enrollment_status),
        )
        .route("/{id}", get(handlers::courses::get_course))
        .route("/{id}/enroll", post(handlers::courses::enroll))
}

fn collection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/vocabulary",
            get(handlers::collections::list_vocabulary).post(handlers::collections::add_vocabulary),
        )
        .route(
            "/vocabulary/{id}",
            put(handlers::collections::update_vocabulary)
                .delete(handlers::collections::delete_vocabulary),
        )
        .route(
            "/sentences",
            get(handlers::collections::list_sentences).post(handlers::collections::add_sentence),
        )
        .route(
            "/sentences/{id}",
            put(handlers::collections::update_sentence)
                .delete(handlers::collections::delete_sentence),
        )
}

fn practice_routes() -> Router<AppState> {
    Router::new()
        .route("/listening", get(handlers::practice::listening_materials))
        .route("/dialogues", get(handlers::practice::dialogue_materials))
        .route("/stories", get(handlers::practice::story_materials))
        .route("/materials/{id}", get(handlers::practice::get_material))
}

fn forum_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::forum::list_categories).post(handlers::forum::create_category),
        )
        .route(
            "/categories/{id}",
            put(handlers::forum::update_category).delete(handlers::forum::delete_category),
        )
        .route(
            "/topics",
            get(handlers::forum::list_topics).post(handlers::forum::create_topic),
        )
        .route(
            "/topics/{id}",
            get(handlers::forum::get_topic).delete(handlers::forum::delete_topic),
        )
        .route(
            "/topics/{id}/posts",
            get(handlers::forum::list_posts).post(handlers::forum::add_post),
        )
        .route(
            "/posts/{id}",
            axum::routing::delete(handlers::forum::delete_post),
        )
}

fn membership_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::billing::browse_plans).post(handlers::billing::create_plan),
        )
        .route("/mine", get(handlers::billing::my_membership))
        .route(
            "/{id}",
            put(handlers::billing::update_plan).delete(handlers::billing::delete_plan),
        )
        .route("/{id}/subscribe", post(handlers::billing::subscribe))
        .route("/{id}/cancel", post(handlers::billing::cancel_membership))
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::billing::list_payments))
        .route("/mine", get(handlers::billing::my_payments))
}

fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::schedule::my_schedule).post(handlers::schedule::add_slot),
        )
        .route(
            "/teacher/{teacher_id}",
            get(handlers::schedule::teacher_schedule),
        )
        .route(
            "/{id}",
            put(handlers::schedule::update_slot).delete(handlers::schedule::delete_slot),
        )
}

fn lesson_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::schedule::my_lessons).post(handlers::schedule::request_lesson),
        )
        .route("/{id}/status", put(handlers::schedule::set_lesson_status))
}

fn dev_routes() -> Router<AppState> {
    Router::new()
        .route("/routes", get(handlers::dev::dump_routes))
        .route("/seed", post(handlers::dev::seed_demo_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WebConfig;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check_route() {
        let state = AppState::new(WebConfig::default()).await.unwrap();
        let app = api_routes(&state).with_state(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dev_routes_absent_in_production() {
        let state = AppState::new(WebConfig::default()).await.unwrap();
        let app = api_routes(&state).with_state(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/dev/routes")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dev_routes_present_in_dev_mode() {
        let config = WebConfig {
            dev_mode: true,
            ..WebConfig::default()
        };
        let state = AppState::new(config).await.unwrap();
        let app = api_routes(&state).with_state(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/dev/routes")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
