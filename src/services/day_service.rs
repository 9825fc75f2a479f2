use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{LockType, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    audit::{self, AuditAction},
    dto::{
        days::{
            CreateDayRequest, DayCheck, DayDishStatusList, DayDishesAssigned, DayList,
            SetDayBlockedRequest, SetDayDishesRequest,
        },
        dishes::DishList,
    },
    entity::{
        day_dishes::{ActiveModel as DayDishActive, Column as DayDishCol, Entity as DayDishes},
        days::{ActiveModel as DayActive, Column as DayCol, Entity as Days, Model as DayModel},
        dishes::{Column as DishCol, Entity as Dishes, Model as DishModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Day, DayDishStatus, Dish},
    response::{ApiResponse, Meta, Upserted},
    state::AppState,
};

pub async fn find_day<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<DayModel> {
    match Days::find_by_id(id).one(conn).await? {
        Some(day) => Ok(day),
        None => Err(AppError::not_found("Day")),
    }
}

/// Locks the day row until the surrounding transaction ends.
///
/// Writers that replace a day's assignment or flip its block flag take
/// `Update`; menu writers take `Share` so they see the committed outcome.
pub async fn lock_day<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    lock: LockType,
) -> AppResult<DayModel> {
    match Days::find_by_id(id).lock(lock).one(conn).await? {
        Some(day) => Ok(day),
        None => Err(AppError::not_found("Day")),
    }
}

pub async fn lock_day_by_date<C: ConnectionTrait>(
    conn: &C,
    date: NaiveDate,
    lock: LockType,
) -> AppResult<Option<DayModel>> {
    Ok(Days::find()
        .filter(DayCol::Date.eq(date))
        .lock(lock)
        .one(conn)
        .await?)
}

pub async fn find_day_by_date<C: ConnectionTrait>(
    conn: &C,
    date: NaiveDate,
) -> AppResult<Option<DayModel>> {
    Ok(Days::find().filter(DayCol::Date.eq(date)).one(conn).await?)
}

/// Dishes offered on `day`, by category then name.
pub async fn assigned_dishes<C: ConnectionTrait>(
    conn: &C,
    day: &DayModel,
) -> AppResult<Vec<DishModel>> {
    Ok(day
        .find_related(Dishes)
        .order_by_asc(DishCol::Category)
        .order_by_asc(DishCol::Name)
        .all(conn)
        .await?)
}

/// Sorted, duplicate-free copy of the requested dish ids.
pub fn normalize_dish_ids(ids: &[i32]) -> Vec<i32> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

pub async fn list_days(state: &AppState, _user: &AuthUser) -> AppResult<ApiResponse<DayList>> {
    let items: Vec<Day> = Days::find()
        .order_by_asc(DayCol::Date)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Day::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Days", DayList { items }, Some(meta)))
}

/// Whether `date` has a day with at least one dish on offer.
pub async fn check_day_dishes(state: &AppState, date: NaiveDate) -> AppResult<ApiResponse<DayCheck>> {
    let has_dishes = match find_day_by_date(&state.orm, date).await? {
        Some(day) => {
            DayDishes::find()
                .filter(DayDishCol::DayId.eq(day.id))
                .count(&state.orm)
                .await?
                > 0
        }
        None => false,
    };

    Ok(ApiResponse::success(
        "Day checked",
        DayCheck { date, has_dishes },
        Some(Meta::empty()),
    ))
}

/// Returns the day for `date`, creating it unblocked when it does not exist yet.
pub async fn create_or_get_day(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDayRequest,
) -> AppResult<Upserted<Day>> {
    ensure_admin(user)?;
    let date = payload.date;

    let inserted = Days::insert(DayActive {
        id: NotSet,
        date: Set(date),
        blocked: Set(false),
        created_at: NotSet,
    })
    .on_conflict(OnConflict::column(DayCol::Date).do_nothing().to_owned())
    .exec_without_returning(&state.orm)
    .await?;

    let day = match find_day_by_date(&state.orm, date).await? {
        Some(day) => day,
        None => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "day {date} missing after insert"
            )));
        }
    };

    let created = inserted > 0;
    if created {
        tracing::info!(day_id = day.id, %date, "day created");
        audit::record(
            &state.pool,
            Some(user.user_id),
            AuditAction::DayCreate,
            serde_json::json!({ "day_id": day.id, "date": date }),
        )
        .await;
    }

    let message = if created { "Day created" } else { "Day already exists" };
    Ok(Upserted {
        created,
        response: ApiResponse::success(message, Day::from(day), Some(Meta::empty())),
    })
}

pub async fn set_day_blocked(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: SetDayBlockedRequest,
) -> AppResult<ApiResponse<Day>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let existing = lock_day(&txn, id, LockType::Update).await?;

    let mut active: DayActive = existing.into();
    active.blocked = Set(payload.blocked);
    let day = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(day_id = day.id, blocked = day.blocked, "day block flag changed");
    audit::record(
        &state.pool,
        Some(user.user_id),
        if day.blocked {
            AuditAction::DayBlock
        } else {
            AuditAction::DayUnblock
        },
        serde_json::json!({ "day_id": day.id, "blocked": day.blocked }),
    )
    .await;

    let message = if day.blocked { "Day blocked" } else { "Day unblocked" };
    Ok(ApiResponse::success(message, Day::from(day), Some(Meta::empty())))
}

/// Every dish with a flag telling whether it is offered on the day.
pub async fn day_dish_status(
    state: &AppState,
    user: &AuthUser,
    day_id: i32,
) -> AppResult<ApiResponse<DayDishStatusList>> {
    ensure_admin(user)?;
    let day = find_day(&state.orm, day_id).await?;

    let assigned: HashSet<i32> = DayDishes::find()
        .filter(DayDishCol::DayId.eq(day.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|row| row.dish_id)
        .collect();

    let items: Vec<DayDishStatus> = Dishes::find()
        .order_by_asc(DishCol::Category)
        .order_by_asc(DishCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|dish| DayDishStatus {
            is_assigned: assigned.contains(&dish.id),
            id: dish.id,
            name: dish.name,
            category: dish.category,
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Day dish status",
        DayDishStatusList { items },
        Some(meta),
    ))
}

pub async fn dishes_for_day(
    state: &AppState,
    day_id: i32,
) -> AppResult<ApiResponse<DishList>> {
    let day = find_day(&state.orm, day_id).await?;
    let items: Vec<Dish> = assigned_dishes(&state.orm, &day)
        .await?
        .into_iter()
        .map(Dish::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Day dishes",
        DishList { items },
        Some(meta),
    ))
}

/// Replaces the set of dishes offered on a day.
///
/// Duplicate ids are collapsed. Unknown dish ids fail the whole call, and the
/// delete and inserts share one transaction so a failure leaves the previous
/// assignment untouched.
pub async fn set_day_dishes(
    state: &AppState,
    user: &AuthUser,
    day_id: i32,
    payload: SetDayDishesRequest,
) -> AppResult<ApiResponse<DayDishesAssigned>> {
    ensure_admin(user)?;
    let dish_ids = normalize_dish_ids(&payload.dish_ids);

    let txn = state.orm.begin().await?;
    // Concurrent replacements for the same day queue here; each one's delete
    // then sees the previous writer's committed rows.
    let day = lock_day(&txn, day_id, LockType::Update).await?;

    if !dish_ids.is_empty() {
        let known: HashSet<i32> = Dishes::find()
            .filter(DishCol::Id.is_in(dish_ids.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|dish| dish.id)
            .collect();
        let unknown: Vec<i32> = dish_ids
            .iter()
            .copied()
            .filter(|id| !known.contains(id))
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::Validation(format!("unknown dish ids: {unknown:?}")));
        }
    }

    DayDishes::delete_many()
        .filter(DayDishCol::DayId.eq(day.id))
        .exec(&txn)
        .await?;

    if !dish_ids.is_empty() {
        let rows = dish_ids.iter().map(|dish_id| DayDishActive {
            day_id: Set(day.id),
            dish_id: Set(*dish_id),
        });
        DayDishes::insert_many(rows).exec(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!(day_id = day.id, assigned = dish_ids.len(), "day dishes replaced");
    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::DayDishesSet,
        serde_json::json!({ "day_id": day.id, "dish_ids": dish_ids }),
    )
    .await;

    Ok(ApiResponse::success(
        "Day dishes assigned",
        DayDishesAssigned {
            day_id: day.id,
            assigned: dish_ids.len(),
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dish_ids_are_deduplicated_and_sorted() {
        assert_eq!(normalize_dish_ids(&[5, 1, 5, 3, 1]), vec![1, 3, 5]);
        assert!(normalize_dish_ids(&[]).is_empty());
    }
}
