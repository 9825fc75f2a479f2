use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use crate::{
    audit::{self, AuditAction},
    dto::{
        DeletedResource,
        dishes::{CreateDishRequest, DishList, UpdateDishRequest},
    },
    entity::{
        client_menus::{Column as MenuCol, Entity as ClientMenus},
        day_dishes::{Column as DayDishCol, Entity as DayDishes},
        dishes::{ActiveModel as DishActive, Column as DishCol, Entity as Dishes},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Dish},
    response::{ApiResponse, Meta},
    state::AppState,
};

const MAX_NAME_LEN: usize = 200;

/// Trimmed dish name and validated category.
pub fn validate_dish(name: &str, category: i32) -> AppResult<(String, Category)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("dish name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "dish name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    let category = Category::try_from(category)?;
    Ok((name.to_string(), category))
}

pub async fn list_dishes(state: &AppState) -> AppResult<ApiResponse<DishList>> {
    let items: Vec<Dish> = Dishes::find()
        .order_by_asc(DishCol::Category)
        .order_by_asc(DishCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Dish::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Dishes", DishList { items }, Some(meta)))
}

pub async fn create_dish(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDishRequest,
) -> AppResult<ApiResponse<Dish>> {
    ensure_admin(user)?;
    let (name, category) = validate_dish(&payload.name, payload.category)?;

    let dish = DishActive {
        id: NotSet,
        name: Set(name),
        category: Set(category.code()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(dish_id = dish.id, category = category.label(), "dish created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::DishCreate,
        serde_json::json!({ "dish_id": dish.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Dish created",
        Dish::from(dish),
        Some(Meta::empty()),
    ))
}

pub async fn update_dish(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateDishRequest,
) -> AppResult<ApiResponse<Dish>> {
    ensure_admin(user)?;
    let (name, category) = validate_dish(&payload.name, payload.category)?;

    let existing = Dishes::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(d) => d,
        None => return Err(AppError::not_found("Dish")),
    };

    let mut active: DishActive = existing.into();
    active.name = Set(name);
    active.category = Set(category.code());
    let dish = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::DishUpdate,
        serde_json::json!({ "dish_id": dish.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Dish updated",
        Dish::from(dish),
        Some(Meta::empty()),
    ))
}

/// Removes the dish from every day it is offered on, then deletes it.
///
/// Refused with `Conflict` while any client menu still selects the dish.
pub async fn delete_dish(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<DeletedResource>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;

    if Dishes::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("Dish"));
    }

    let selected_in = ClientMenus::find()
        .filter(
            Condition::any()
                .add(MenuCol::FirstDishId.eq(id))
                .add(MenuCol::SecondDishId.eq(id))
                .add(MenuCol::DessertDishId.eq(id)),
        )
        .count(&txn)
        .await?;
    if selected_in > 0 {
        return Err(AppError::Conflict(format!(
            "dish {id} is selected in {selected_in} client menu(s)"
        )));
    }

    let unassigned = DayDishes::delete_many()
        .filter(DayDishCol::DishId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    Dishes::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(dish_id = id, unassigned, "dish deleted");
    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::DishDelete,
        serde_json::json!({ "dish_id": id, "unassigned_days": unassigned }),
    )
    .await;

    Ok(ApiResponse::success(
        "Dish deleted",
        DeletedResource { id },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_categories_and_trims_name() {
        let (name, category) = validate_dish("  Gazpacho ", 1).unwrap();
        assert_eq!(name, "Gazpacho");
        assert_eq!(category, Category::Starter);
        assert_eq!(validate_dish("Flan", 3).unwrap().1, Category::Dessert);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(validate_dish("Paella", 4), Err(AppError::Validation(_))));
        assert!(matches!(validate_dish("Paella", 0), Err(AppError::Validation(_))));
        assert!(matches!(validate_dish("   ", 2), Err(AppError::Validation(_))));
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(validate_dish(&long, 2), Err(AppError::Validation(_))));
    }
}
