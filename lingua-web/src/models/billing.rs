//! Membership plans, subscriptions, and payment records.

use super::content::default_true;
use super::{finish, require};
use chrono::{DateTime, Utc};
use lingua_core::{FieldError, LinguaResult, Searchable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MembershipPlan {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_days: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for MembershipPlan {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

#[derive(Debug, Deserialize)]
pub struct MembershipPlanPayload {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_days: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl MembershipPlanPayload {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        if self.price_cents < 0 {
            errors.push(FieldError::new("price_cents", "must not be negative"));
        }
        if self.duration_days <= 0 {
            errors.push(FieldError::new("duration_days", "must be positive"));
        }
        finish(errors)
    }
}

/// Subscription lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Expired,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserMembership {
    pub id: String,
    pub user_id: String,
    pub plan_id: String,
    pub status: MembershipStatus,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Payment lifecycle. Payments are recorded, never charged: there is no
/// gateway behind this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    pub plan_id: Option<String>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

