use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    audit::{self, AuditAction},
    dto::{
        DeletedResource,
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    entity::{
        client_menus::{Column as MenuCol, Entity as ClientMenus},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    response::{ApiResponse, Meta},
    services::auth_service::{hash_password, normalize_email},
    state::AppState,
};

pub fn validate_email(email: &str) -> AppResult<String> {
    let email = normalize_email(email);
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(AppError::Validation(format!("'{email}' is not a valid email")));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.trim().is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }
    Ok(())
}

async fn find_user<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<UserModel> {
    match Users::find_by_id(id).one(conn).await? {
        Some(user) => Ok(user),
        None => Err(AppError::not_found("User")),
    }
}

async fn ensure_email_free<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    except_id: Option<i32>,
) -> AppResult<()> {
    let mut finder = Users::find().filter(UserCol::Email.eq(email));
    if let Some(id) = except_id {
        finder = finder.filter(UserCol::Id.ne(id));
    }
    if finder.one(conn).await?.is_some() {
        return Err(AppError::Conflict("Email is already taken".into()));
    }
    Ok(())
}

/// Admins first, then by email.
pub async fn list_users(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let items: Vec<User> = Users::find()
        .order_by_asc(UserCol::Role)
        .order_by_asc(UserCol::Email)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn get_user(state: &AppState, user: &AuthUser, id: i32) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let found = find_user(&state.orm, id).await?;
    Ok(ApiResponse::success("User", User::from(found), None))
}

pub async fn create_user(
    state: &AppState,
    user: &AuthUser,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let email = validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    ensure_email_free(&state.orm, &email, None).await?;

    let created = UserActive {
        id: NotSet,
        email: Set(email),
        password_hash: Set(hash_password(&payload.password)?),
        role: Set(payload.role),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = created.id, role = %created.role, "user created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::UserCreate,
        serde_json::json!({ "user_id": created.id, "role": created.role.as_str() }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        User::from(created),
        Some(Meta::empty()),
    ))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let existing = find_user(&state.orm, id).await?;

    let current_role = existing.role;
    let mut active: UserActive = existing.into();
    if let Some(email) = payload.email {
        let email = validate_email(&email)?;
        ensure_email_free(&state.orm, &email, Some(id)).await?;
        active.email = Set(email);
    }
    if let Some(password) = payload.password.filter(|p| !p.is_empty()) {
        validate_password(&password)?;
        active.password_hash = Set(hash_password(&password)?);
    }
    if let Some(role) = payload.role {
        if id == user.user_id && role != current_role {
            return Err(AppError::Validation("you cannot change your own role".into()));
        }
        active.role = Set(role);
    }

    let updated = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::UserUpdate,
        serde_json::json!({ "user_id": updated.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User updated",
        User::from(updated),
        Some(Meta::empty()),
    ))
}

/// Deletes a user together with their menu selections.
pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<DeletedResource>> {
    ensure_admin(user)?;
    if id == user.user_id {
        return Err(AppError::Validation("you cannot delete your own account".into()));
    }

    let txn = state.orm.begin().await?;
    find_user(&txn, id).await?;

    let removed_menus = ClientMenus::delete_many()
        .filter(MenuCol::UserId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    Users::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = id, removed_menus, "user deleted");
    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::UserDelete,
        serde_json::json!({ "user_id": id, "removed_menus": removed_menus }),
    )
    .await;

    Ok(ApiResponse::success(
        "User deleted",
        DeletedResource { id },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert_eq!(validate_email(" Ana@Canteen.io ").unwrap(), "ana@canteen.io");
        for bad in ["", "ana", "@canteen.io", "ana@", "a@b@c"] {
            assert!(
                matches!(validate_email(bad), Err(AppError::Validation(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn blank_password_is_rejected() {
        assert!(validate_password("hunter2").is_ok());
        assert!(matches!(validate_password("  "), Err(AppError::Validation(_))));
    }
}
