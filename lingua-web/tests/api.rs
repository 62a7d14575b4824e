//! End-to-end API tests against an in-memory database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use lingua_web::{create_app, AppState, WebConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> Router {
    let state = AppState::new(WebConfig::default())
        .await
        .expect("app state");
    create_app(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as(uri: &str, user_id: &str, role: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", user_id)
        .header("x-user-role", role)
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, user_id: &str, role: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user_id)
        .header("x-user-role", role)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete_as(uri: &str, user_id: &str, role: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("x-user-id", user_id)
        .header("x-user-role", role)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn language_body(code: &str, name: &str, native_name: &str) -> Value {
    json!({ "code": code, "name": name, "native_name": native_name })
}

// -- CRUD round trip -------------------------------------------------------

#[tokio::test]
async fn created_language_shows_up_exactly_once_after_refresh() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/content/languages",
            "admin-1",
            "admin",
            language_body("es", "Spanish", "Español"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get_as("/api/content/languages", "admin-1", "admin"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let languages = body_json(response).await;
    let matches = languages
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["code"] == "es")
        .count();
    assert_eq!(matches, 1);
}

#[tokio::test]
async fn deleting_a_missing_language_twice_is_a_no_op() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/content/languages",
            "admin-1",
            "admin",
            language_body("es", "Spanish", "Español"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(delete_as(
                "/api/content/languages/no-such-id",
                "admin-1",
                "admin",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .oneshot(get_as("/api/content/languages", "admin-1", "admin"))
        .await
        .unwrap();
    let languages = body_json(response).await;
    assert_eq!(languages.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_term_filters_the_language_list() {
    let app = test_app().await;

    for (code, name, native) in [("es", "Spanish", "Español"), ("fr", "French", "Français")] {
        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/content/languages",
                "admin-1",
                "admin",
                language_body(code, name, native),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get_as(
            "/api/content/languages?search=span",
            "admin-1",
            "admin",
        ))
        .await
        .unwrap();
    let languages = body_json(response).await;
    let languages = languages.as_array().unwrap();
    assert_eq!(languages.len(), 1);
    assert_eq!(languages[0]["name"], "Spanish");
}

#[tokio::test]
async fn language_referenced_by_a_course_cannot_be_deleted() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/content/languages",
            "admin-1",
            "admin",
            language_body("es", "Spanish", "Español"),
        ))
        .await
        .unwrap();
    let language = body_json(response).await;
    let language_id = language["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/content/courses",
            "admin-1",
            "admin",
            json!({
                "language_id": language_id,
                "title": "Spanish A1",
                "level": "beginner",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(delete_as(
            &format!("/api/content/languages/{}", language_id),
            "admin-1",
            "admin",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = body_json(response).await;
    assert_eq!(error["error"], "conflict");
    assert!(error["message"].as_str().unwrap().contains("Cannot delete"));

    // The language is still listed.
    let response = app
        .oneshot(get_as("/api/content/languages", "admin-1", "admin"))
        .await
        .unwrap();
    let languages = body_json(response).await;
    assert_eq!(languages.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn validation_failures_are_field_scoped_and_reach_no_store() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/content/languages",
            "admin-1",
            "admin",
            json!({ "code": "", "name": "Spanish", "native_name": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error = body_json(response).await;
    assert_eq!(error["error"], "validation_failed");
    let fields: Vec<&str> = error["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["code", "native_name"]);

    let response = app
        .oneshot(get_as("/api/content/languages", "admin-1", "admin"))
        .await
        .unwrap();
    let languages = body_json(response).await;
    assert!(languages.as_array().unwrap().is_empty());
}

// -- authorization ---------------------------------------------------------

#[tokio::test]
async fn admin_navigation_to_content_languages_is_allowed() {
    let app = test_app().await;

    let response = app
        .oneshot(get_as(
            "/api/navigation/resolve?path=/content/languages",
            "admin-1",
            "admin",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let nav = body_json(response).await;
    assert_eq!(nav["outcome"], "allow");
    assert_eq!(nav["screen"]["screen"], "content_management");
    assert_eq!(nav["screen"]["sub_tab"], "languages");
}

#[tokio::test]
async fn student_navigation_to_users_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .oneshot(get_as(
            "/api/navigation/resolve?path=/users",
            "student-1",
            "student",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let nav = body_json(response).await;
    assert_eq!(nav["outcome"], "redirect_unauthorized");
    assert_eq!(nav["redirect_to"], "/unauthorized");
    assert!(nav["screen"].is_null());
}

#[tokio::test]
async fn anonymous_navigation_redirects_to_login() {
    let app = test_app().await;

    let response = app
        .oneshot(get("/api/navigation/resolve?path=/courses"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let nav = body_json(response).await;
    assert_eq!(nav["outcome"], "redirect_login");
    assert_eq!(nav["redirect_to"], "/login");
}

#[tokio::test]
async fn unknown_path_dispatches_the_role_dashboard() {
    let app = test_app().await;

    let response = app
        .oneshot(get_as(
            "/api/navigation/resolve?path=/no/such/path",
            "teacher-1",
            "teacher",
        ))
        .await
        .unwrap();
    let nav = body_json(response).await;
    assert_eq!(nav["outcome"], "allow");
    assert_eq!(nav["screen"]["screen"], "teacher_dashboard");
}

#[tokio::test]
async fn student_is_denied_on_admin_api() {
    let app = test_app().await;

    let response = app
        .oneshot(get_as("/api/users", "student-1", "student"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let error = body_json(response).await;
    assert_eq!(error["error"], "unauthorized");
    assert_eq!(error["redirect"], "/unauthorized");
}

#[tokio::test]
async fn anonymous_request_to_protected_api_redirects() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/login");
}

// -- auth flow -------------------------------------------------------------

#[tokio::test]
async fn register_login_and_me_round_trip() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "username": "maria",
                        "email": "maria@example.com",
                        "password": "secret123",
                        "display_name": "María"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let registered = body_json(response).await;
    // Self-registration never grants a privileged role.
    assert_eq!(registered["user"]["role"], "student");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "username": "maria", "password": "secret123" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let login = body_json(response).await;
    let token = login["access_token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["display_name"], "María");
    assert_eq!(me["role"], "student");
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "username": "admin", "password": "wrong" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// -- course catalog --------------------------------------------------------

#[tokio::test]
async fn student_enrolls_once_and_only_once() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/content/languages",
            "admin-1",
            "admin",
            language_body("es", "Spanish", "Español"),
        ))
        .await
        .unwrap();
    let language = body_json(response).await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/content/courses",
            "admin-1",
            "admin",
            json!({
                "language_id": language["id"],
                "title": "Spanish A1",
                "level": "beginner",
            }),
        ))
        .await
        .unwrap();
    let course = body_json(response).await;
    let course_id = course["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/api/courses/{}/enroll", course_id),
            "student-1",
            "student",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/api/courses/{}/enroll", course_id),
            "student-1",
            "student",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(get_as("/api/courses/enrollments", "student-1", "student"))
        .await
        .unwrap();
    let enrollments = body_json(response).await;
    assert_eq!(enrollments.as_array().unwrap().len(), 1);
}

// -- personal collections --------------------------------------------------

#[tokio::test]
async fn vocabulary_is_scoped_to_the_owning_session() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/collections/vocabulary",
            "student-a",
            "student",
            json!({ "word": "la manzana", "translation": "apple" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_as("/api/collections/vocabulary", "student-a", "student"))
        .await
        .unwrap();
    let own = body_json(response).await;
    assert_eq!(own.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(get_as("/api/collections/vocabulary", "student-b", "student"))
        .await
        .unwrap();
    let other = body_json(response).await;
    assert!(other.as_array().unwrap().is_empty());
}

// -- forum -----------------------------------------------------------------

#[tokio::test]
async fn category_with_topics_cannot_be_deleted() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/forum/categories",
            "admin-1",
            "admin",
            json!({ "name": "General" }),
        ))
        .await
        .unwrap();
    let category = body_json(response).await;
    let category_id = category["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/forum/topics",
            "student-1",
            "student",
            json!({
                "category_id": category_id,
                "title": "How do I roll my Rs?",
                "body": "Any tips appreciated."
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let topic = body_json(response).await;

    let response = app
        .clone()
        .oneshot(delete_as(
            &format!("/api/forum/categories/{}", category_id),
            "admin-1",
            "admin",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The opening post was created with the topic.
    let response = app
        .oneshot(get_as(
            &format!("/api/forum/topics/{}/posts", topic["id"].as_str().unwrap()),
            "student-1",
            "student",
        ))
        .await
        .unwrap();
    let posts = body_json(response).await;
    assert_eq!(posts.as_array().unwrap().len(), 1);
}

// -- memberships -----------------------------------------------------------

#[tokio::test]
async fn one_active_membership_per_user() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/memberships",
            "admin-1",
            "admin",
            json!({ "name": "Monthly", "price_cents": 999, "duration_days": 30 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let plan = body_json(response).await;
    let plan_id = plan["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/api/memberships/{}/subscribe", plan_id),
            "student-1",
            "student",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/api/memberships/{}/subscribe", plan_id),
            "student-1",
            "student",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The subscription produced exactly one payment record.
    let response = app
        .oneshot(get_as("/api/payments/mine", "student-1", "student"))
        .await
        .unwrap();
    let payments = body_json(response).await;
    assert_eq!(payments.as_array().unwrap().len(), 1);
    assert_eq!(payments.as_array().unwrap()[0]["status"], "completed");
}
