//! Membership plans, subscriptions, and payment records.

use crate::models::{MembershipPlan, MembershipPlanPayload, Payment, UserMembership};
use chrono::{Duration, Utc};
use lingua_core::{filter_by_term, LinguaError, LinguaResult};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct BillingService {
    pool: SqlitePool,
}

impl BillingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // -- plans -------------------------------------------------------------

    pub async fn list_plans(
        &self,
        include_inactive: bool,
        search: Option<&str>,
    ) -> LinguaResult<Vec<MembershipPlan>> {
        let query = if include_inactive {
            "SELECT * FROM memberships ORDER BY price_cents"
        } else {
            "SELECT * FROM memberships WHERE is_active = 1 ORDER BY price_cents"
        };
        let plans = sqlx::query_as::<_, MembershipPlan>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to list plans", e))?;
        Ok(filter_by_term(plans, search))
    }

    pub async fn get_plan(&self, id: &str) -> LinguaResult<MembershipPlan> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM memberships WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load plan", e))?
            .ok_or_else(|| LinguaError::not_found("membership plan"))
    }

    pub async fn create_plan(&self, payload: &MembershipPlanPayload) -> LinguaResult<MembershipPlan> {
        payload.validate()?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO memberships (id, name, description, price_cents, duration_days, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(payload.name.trim())
        .bind(&payload.description)
        .bind(payload.price_cents)
        .bind(payload.duration_days)
        .bind(payload.is_active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create plan", e))?;

        self.get_plan(&id).await
    }

    pub async fn update_plan(
        &self,
        id: &str,
        payload: &MembershipPlanPayload,
    ) -> LinguaResult<MembershipPlan> {
        payload.validate()?;
        self.get_plan(id).await?;

        sqlx::query(
            "UPDATE memberships SET name = ?, description = ?, price_cents = ?, duration_days = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(payload.name.trim())
        .bind(&payload.description)
        .bind(payload.price_cents)
        .bind(payload.duration_days)
        .bind(payload.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update plan", e))?;

        self.get_plan(id).await
    }

    /// Delete a plan. Refused while user memberships still reference it.
    pub async fn delete_plan(&self, id: &str) -> LinguaResult<()> {
        let members: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_memberships WHERE plan_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| LinguaError::storage_with("failed to count memberships", e))?;
        if members > 0 {
            return Err(LinguaError::conflict(format!(
                "Cannot delete plan: {} membership(s) still reference it",
                members
            )));
        }

        sqlx::query("DELETE FROM memberships WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete plan", e))?;
        Ok(())
    }

    // -- subscriptions -----------------------------------------------------

    /// Subscribe a user to a plan: one active membership per user, plus a
    /// completed payment record, written atomically. No gateway is charged.
    pub async fn subscribe(&self, user_id: &str, plan_id: &str) -> LinguaResult<UserMembership> {
        let plan = self.get_plan(plan_id).await?;
        if !plan.is_active {
            return Err(LinguaError::conflict("Plan is not available"));
        }

        let active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_memberships WHERE user_id = ? AND status = 'active'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to check membership", e))?;
        if active > 0 {
            return Err(LinguaError::conflict("An active membership already exists"));
        }

        let membership_id = Uuid::new_v4().to_string();
        let payment_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let expires_at = now + Duration::days(plan.duration_days);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LinguaError::storage_with("failed to begin transaction", e))?;
        sqlx::query(
            "INSERT INTO user_memberships (id, user_id, plan_id, status, started_at, expires_at)
             VALUES (?, ?, ?, 'active', ?, ?)",
        )
        .bind(&membership_id)
        .bind(user_id)
        .bind(plan_id)
        .bind(now)
        .bind(expires_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| LinguaError::storage_with("failed to create membership", e))?;
        sqlx::query(
            "INSERT INTO payments (id, user_id, plan_id, amount_cents, currency, status, created_at)
             VALUES (?, ?, ?, ?, 'USD', 'completed', ?)",
        )
        .bind(&payment_id)
        .bind(user_id)
        .bind(plan_id)
        .bind(plan.price_cents)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| LinguaError::storage_with("failed to record payment", e))?;
        tx.commit()
            .await
            .map_err(|e| LinguaError::storage_with("failed to commit", e))?;

        info!("User {} subscribed to plan '{}'", user_id, plan.name);
        self.get_membership(&membership_id).await
    }

    pub async fn get_membership(&self, id: &str) -> LinguaResult<UserMembership> {
        sqlx::query_as::<_, UserMembership>("SELECT * FROM user_memberships WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to load membership", e))?
            .ok_or_else(|| LinguaError::not_found("membership"))
    }

    pub async fn membership_for_user(&self, user_id: &str) -> LinguaResult<Option<UserMembership>> {
        sqlx::query_as::<_, UserMembership>(
            "SELECT * FROM user_memberships WHERE user_id = ? AND status = 'active'
             ORDER BY started_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to load membership", e))
    }

    pub async fn cancel_membership(&self, user_id: &str, id: &str) -> LinguaResult<UserMembership> {
        let membership = self.get_membership(id).await?;
        if membership.user_id != user_id {
            return Err(LinguaError::not_found("membership"));
        }

        sqlx::query("UPDATE user_memberships SET status = 'cancelled' WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to cancel membership", e))?;
        self.get_membership(id).await
    }

    /// Mark active memberships whose expiry has passed as expired.
    /// Run periodically by the server.
    pub async fn expire_lapsed(&self) -> LinguaResult<u64> {
        let result = sqlx::query(
            "UPDATE user_memberships SET status = 'expired' WHERE status = 'active' AND expires_at < ?",
        )
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to expire memberships", e))?;
        Ok(result.rows_affected())
    }

    // -- payments ----------------------------------------------------------

    pub async fn list_payments(&self, user_id: Option<&str>) -> LinguaResult<Vec<Payment>> {
        match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, Payment>(
                    "SELECT * FROM payments WHERE user_id = ? ORDER BY created_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| LinguaError::storage_with("failed to list payments", e))
    }
}
