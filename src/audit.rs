use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

/// Admin and auth events kept in `audit_logs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Login,
    UserCreate,
    UserUpdate,
    UserDelete,
    DishCreate,
    DishUpdate,
    DishDelete,
    DayCreate,
    DayBlock,
    DayUnblock,
    DayDishesSet,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Login => "user_login",
            AuditAction::UserCreate => "user_create",
            AuditAction::UserUpdate => "user_update",
            AuditAction::UserDelete => "user_delete",
            AuditAction::DishCreate => "dish_create",
            AuditAction::DishUpdate => "dish_update",
            AuditAction::DishDelete => "dish_delete",
            AuditAction::DayCreate => "day_create",
            AuditAction::DayBlock => "day_block",
            AuditAction::DayUnblock => "day_unblock",
            AuditAction::DayDishesSet => "day_dishes_set",
        }
    }

    /// Table the action touches.
    pub fn resource(self) -> &'static str {
        match self {
            AuditAction::Login
            | AuditAction::UserCreate
            | AuditAction::UserUpdate
            | AuditAction::UserDelete => "users",
            AuditAction::DishCreate | AuditAction::DishUpdate | AuditAction::DishDelete => {
                "dishes"
            }
            AuditAction::DayCreate | AuditAction::DayBlock | AuditAction::DayUnblock => "days",
            AuditAction::DayDishesSet => "day_dishes",
        }
    }
}

pub async fn insert_audit(
    pool: &DbPool,
    actor_id: Option<i32>,
    action: AuditAction,
    metadata: &Value,
) -> AppResult<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(actor_id)
    .bind(action.as_str())
    .bind(action.resource())
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Audit writes never fail the request that triggered them.
pub async fn record(pool: &DbPool, actor_id: Option<i32>, action: AuditAction, metadata: Value) {
    if let Err(err) = insert_audit(pool, actor_id, action, &metadata).await {
        tracing::warn!(error = %err, action = action.as_str(), "audit write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_actions_target_day_tables() {
        assert_eq!(AuditAction::DayBlock.resource(), "days");
        assert_eq!(AuditAction::DayDishesSet.resource(), "day_dishes");
        assert_eq!(AuditAction::Login.as_str(), "user_login");
    }
}
