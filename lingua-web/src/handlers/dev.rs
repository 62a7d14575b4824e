//! Development-only handlers.
//!
//! Mounted only when dev mode is enabled; absent from production routing.

use crate::models::{
    CoursePayload, ForumCategoryPayload, LanguagePayload, MaterialPayload, MembershipPlanPayload,
};
use crate::auth::users::AdminCreateUserRequest;
use crate::{AppState, WebResult};
use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use tracing::info;

/// Dump the client route table: path, view, sub-tab, allowed roles.
pub async fn dump_routes(State(state): State<AppState>) -> Json<Value> {
    let routes: Vec<Value> = state
        .routes
        .iter()
        .map(|route| {
            json!({
                "path": route.path,
                "view": route.view,
                "sub_tab": route.sub_tab,
                "allowed_roles": route.allowed.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
            })
        })
        .collect();
    Json(json!({ "routes": routes }))
}

/// Seed a small demo data set. Safe to call more than once: existing demo
/// rows are left alone.
pub async fn seed_demo_data(State(state): State<AppState>) -> WebResult<Json<Value>> {
    let mut created = Vec::new();

    if state.content.list_languages(true, None).await?.is_empty() {
        let spanish = state
            .content
            .create_language(&LanguagePayload {
                code: "es".to_string(),
                name: "Spanish".to_string(),
                native_name: "Español".to_string(),
                is_active: true,
            })
            .await?;
        let french = state
            .content
            .create_language(&LanguagePayload {
                code: "fr".to_string(),
                name: "French".to_string(),
                native_name: "Français".to_string(),
                is_active: true,
            })
            .await?;
        created.push("languages");

        state
            .content
            .create_course(&CoursePayload {
                language_id: spanish.id.clone(),
                title: "Spanish for Beginners".to_string(),
                description: "Greetings, introductions, and everyday phrases".to_string(),
                level: "beginner".to_string(),
                teacher_id: None,
                is_active: true,
            })
            .await?;
        state
            .content
            .create_course(&CoursePayload {
                language_id: french.id.clone(),
                title: "Intermediate French Conversation".to_string(),
                description: "Listening and speaking drills around daily life".to_string(),
                level: "intermediate".to_string(),
                teacher_id: None,
                is_active: true,
            })
            .await?;
        created.push("courses");

        state
            .content
            .create_material(&MaterialPayload {
                language_id: spanish.id.clone(),
                course_id: None,
                title: "At the market".to_string(),
                kind: "dialogue".to_string(),
                body: Some("— ¿Cuánto cuestan las manzanas?\n— Dos euros el kilo.".to_string()),
                is_active: true,
            })
            .await?;
        state
            .content
            .create_material(&MaterialPayload {
                language_id: spanish.id,
                course_id: None,
                title: "The lost umbrella".to_string(),
                kind: "story".to_string(),
                body: Some("Era una tarde lluviosa en Madrid...".to_string()),
                is_active: true,
            })
            .await?;
        created.push("materials");
    }

    if state.forum.list_categories().await?.is_empty() {
        state
            .forum
            .create_category(&ForumCategoryPayload {
                name: "General".to_string(),
                description: Some("Anything about learning languages".to_string()),
                position: 0,
            })
            .await?;
        created.push("forum categories");
    }

    if state.billing.list_plans(true, None).await?.is_empty() {
        state
            .billing
            .create_plan(&MembershipPlanPayload {
                name: "Monthly".to_string(),
                description: Some("Full access, renews monthly".to_string()),
                price_cents: 999,
                duration_days: 30,
                is_active: true,
            })
            .await?;
        created.push("membership plans");
    }

    let store = state.user_service.store();
    if state
        .user_service
        .get_user_by_username("demo-teacher")
        .await
        .is_none()
    {
        store
            .create_user(&AdminCreateUserRequest {
                username: "demo-teacher".to_string(),
                email: "teacher@lingua.local".to_string(),
                password: "teach123".to_string(),
                display_name: Some("Demo Teacher".to_string()),
                role: "teacher".to_string(),
            })
            .await?;
        store
            .create_user(&AdminCreateUserRequest {
                username: "demo-student".to_string(),
                email: "student@lingua.local".to_string(),
                password: "learn123".to_string(),
                display_name: Some("Demo Student".to_string()),
                role: "student".to_string(),
            })
            .await?;
        created.push("demo users");
    }

    info!("Seeded demo data: {:?}", created);
    Ok(Json(json!({ "seeded": created })))
}
