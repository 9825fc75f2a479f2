use chrono::{NaiveDate, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{LockType, OnConflict};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use sqlx::FromRow;

use crate::{
    dto::{
        DeletedResource,
        menus::{CalendarEventList, MenuSelection, SaveMenuRequest},
    },
    entity::{
        client_menus::{ActiveModel as MenuActive, Column as MenuCol, Entity as ClientMenus},
        dishes::Model as DishModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_client},
    models::{CalendarEvent, Category, ClientMenu, MenuEventProps},
    response::{ApiResponse, Meta, Upserted},
    services::day_service::{assigned_dishes, lock_day_by_date},
    state::AppState,
};

/// Checks that every field of the request is present.
pub fn require_selection(payload: &SaveMenuRequest) -> AppResult<MenuSelection> {
    let mut missing = Vec::new();
    if payload.day.is_none() {
        missing.push("day");
    }
    if payload.first_dish_id.is_none() {
        missing.push("first_dish_id");
    }
    if payload.second_dish_id.is_none() {
        missing.push("second_dish_id");
    }
    if payload.dessert_id.is_none() {
        missing.push("dessert_id");
    }

    match (
        payload.day,
        payload.first_dish_id,
        payload.second_dish_id,
        payload.dessert_id,
    ) {
        (Some(day), Some(first_dish_id), Some(second_dish_id), Some(dessert_id)) => {
            Ok(MenuSelection {
                day,
                first_dish_id,
                second_dish_id,
                dessert_id,
            })
        }
        _ => Err(AppError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        ))),
    }
}

/// Each course must be a dish offered on the day and of the matching category.
pub fn check_courses(selection: &MenuSelection, offered: &[DishModel]) -> AppResult<()> {
    let courses = [
        (Category::Starter, selection.first_dish_id),
        (Category::Main, selection.second_dish_id),
        (Category::Dessert, selection.dessert_id),
    ];

    for (course, dish_id) in courses {
        let dish = offered.iter().find(|dish| dish.id == dish_id).ok_or_else(|| {
            AppError::Validation(format!(
                "dish {dish_id} is not offered on {}",
                selection.day
            ))
        })?;
        if dish.category != course.code() {
            return Err(AppError::Validation(format!(
                "dish {dish_id} is not a {} dish",
                course.label()
            )));
        }
    }
    Ok(())
}

/// Inserts or overwrites the caller's selection for the day.
pub async fn save_menu(
    state: &AppState,
    user: &AuthUser,
    payload: SaveMenuRequest,
) -> AppResult<Upserted<ClientMenu>> {
    ensure_client(user)?;
    let selection = require_selection(&payload)?;

    // The share lock holds off block/assignment changes until the upsert commits.
    let txn = state.orm.begin().await?;
    let day = match lock_day_by_date(&txn, selection.day, LockType::Share).await? {
        Some(day) => day,
        None => return Err(AppError::not_found("Day")),
    };
    if day.blocked {
        return Err(AppError::Validation(format!(
            "day {} is blocked",
            selection.day
        )));
    }

    let offered = assigned_dishes(&txn, &day).await?;
    check_courses(&selection, &offered)?;

    let existed = ClientMenus::find()
        .filter(MenuCol::UserId.eq(user.user_id))
        .filter(MenuCol::Day.eq(selection.day))
        .one(&txn)
        .await?
        .is_some();

    let menu = ClientMenus::insert(MenuActive {
        id: NotSet,
        user_id: Set(user.user_id),
        day: Set(selection.day),
        first_dish_id: Set(selection.first_dish_id),
        second_dish_id: Set(selection.second_dish_id),
        dessert_dish_id: Set(selection.dessert_id),
        created_at: NotSet,
        updated_at: Set(Utc::now().into()),
    })
    .on_conflict(
        OnConflict::columns([MenuCol::UserId, MenuCol::Day])
            .update_columns([
                MenuCol::FirstDishId,
                MenuCol::SecondDishId,
                MenuCol::DessertDishId,
                MenuCol::UpdatedAt,
            ])
            .to_owned(),
    )
    .exec_with_returning(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        day = %selection.day,
        menu_id = menu.id,
        updated = existed,
        "client menu saved"
    );

    let message = if existed { "Menu updated" } else { "Menu saved" };
    Ok(Upserted {
        created: !existed,
        response: ApiResponse::success(message, ClientMenu::from(menu), Some(Meta::empty())),
    })
}

#[derive(FromRow)]
struct MenuEventRow {
    day: NaiveDate,
    first_dish_id: i32,
    first_dish_name: String,
    second_dish_id: i32,
    second_dish_name: String,
    dessert_dish_id: i32,
    dessert_dish_name: String,
}

impl From<MenuEventRow> for CalendarEvent {
    fn from(row: MenuEventRow) -> Self {
        CalendarEvent {
            title: format!("Menu: {} / {}", row.first_dish_name, row.second_dish_name),
            start: row.day,
            all_day: true,
            extended_props: MenuEventProps {
                first_dish_id: row.first_dish_id,
                first_dish_name: row.first_dish_name,
                second_dish_id: row.second_dish_id,
                second_dish_name: row.second_dish_name,
                dessert_dish_id: row.dessert_dish_id,
                dessert_dish_name: row.dessert_dish_name,
            },
        }
    }
}

/// The caller's selections as calendar events, one per day.
pub async fn list_menus(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CalendarEventList>> {
    ensure_client(user)?;
    let rows = sqlx::query_as::<_, MenuEventRow>(
        r#"
        SELECT cm.day,
               cm.first_dish_id, d1.name AS first_dish_name,
               cm.second_dish_id, d2.name AS second_dish_name,
               cm.dessert_dish_id, d3.name AS dessert_dish_name
        FROM client_menus cm
        JOIN dishes d1 ON d1.id = cm.first_dish_id
        JOIN dishes d2 ON d2.id = cm.second_dish_id
        JOIN dishes d3 ON d3.id = cm.dessert_dish_id
        WHERE cm.user_id = $1
        ORDER BY cm.day
        "#,
    )
    .bind(user.user_id)
    .fetch_all(&state.pool)
    .await?;

    let items: Vec<CalendarEvent> = rows.into_iter().map(CalendarEvent::from).collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Menus", CalendarEventList { items }, Some(meta)))
}

pub async fn delete_menu(
    state: &AppState,
    user: &AuthUser,
    day: NaiveDate,
) -> AppResult<ApiResponse<DeletedResource>> {
    ensure_client(user)?;

    let txn = state.orm.begin().await?;
    let menu = ClientMenus::find()
        .filter(MenuCol::UserId.eq(user.user_id))
        .filter(MenuCol::Day.eq(day))
        .one(&txn)
        .await?;
    let menu = match menu {
        Some(m) => m,
        None => return Err(AppError::not_found("Menu")),
    };

    if let Some(existing_day) = lock_day_by_date(&txn, day, LockType::Share).await? {
        if existing_day.blocked {
            return Err(AppError::Validation(format!("day {day} is blocked")));
        }
    }

    ClientMenus::delete_by_id(menu.id).exec(&txn).await?;
    txn.commit().await?;
    tracing::info!(user_id = user.user_id, %day, menu_id = menu.id, "client menu deleted");

    Ok(ApiResponse::success(
        "Menu deleted",
        DeletedResource { id: menu.id },
        Some(Meta::empty()),
    ))
}
