//! Membership and payment handlers.
//!
//! Any authenticated session browses plans and manages its own membership;
//! plan management and the payment ledger are admin screens.

use crate::auth::{AdminUser, CurrentUser};
use crate::models::{MembershipPlan, MembershipPlanPayload, Payment, UserMembership};
use crate::{AppState, WebResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BillingParams {
    pub search: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

// -- plans -----------------------------------------------------------------

/// Browse available plans.
pub async fn browse_plans(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Query(params): Query<BillingParams>,
) -> WebResult<Json<Vec<MembershipPlan>>> {
    // Only the admin management screen sees retired plans.
    let include_inactive = params.include_inactive && session.role.is_admin();
    let plans = state
        .billing
        .list_plans(include_inactive, params.search.as_deref())
        .await?;
    Ok(Json(plans))
}

pub async fn create_plan(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Json(payload): Json<MembershipPlanPayload>,
) -> WebResult<(StatusCode, Json<MembershipPlan>)> {
    let plan = state.billing.create_plan(&payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn update_plan(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<MembershipPlanPayload>,
) -> WebResult<Json<MembershipPlan>> {
    let plan = state.billing.update_plan(&id, &payload).await?;
    Ok(Json(plan))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.billing.delete_plan(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- subscriptions ---------------------------------------------------------

/// Subscribe the authenticated user to a plan.
pub async fn subscribe(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(plan_id): Path<String>,
) -> WebResult<(StatusCode, Json<UserMembership>)> {
    let membership = state.billing.subscribe(&session.user_id, &plan_id).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// The authenticated user's active membership, if any.
pub async fn my_membership(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> WebResult<Json<Option<UserMembership>>> {
    let membership = state.billing.membership_for_user(&session.user_id).await?;
    Ok(Json(membership))
}

pub async fn cancel_membership(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<String>,
) -> WebResult<Json<UserMembership>> {
    let membership = state
        .billing
        .cancel_membership(&session.user_id, &id)
        .await?;
    Ok(Json(membership))
}

// -- payments --------------------------------------------------------------

/// The full payment ledger (admin screen).
pub async fn list_payments(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
) -> WebResult<Json<Vec<Payment>>> {
    let payments = state.billing.list_payments(None).await?;
    Ok(Json(payments))
}

/// The authenticated user's own payments.
pub async fn my_payments(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> WebResult<Json<Vec<Payment>>> {
    let payments = state
        .billing
        .list_payments(Some(&session.user_id))
        .await?;
    Ok(Json(payments))
}
