use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{DishSelection, SelectionSummary},
    response::{ApiResponse, Meta},
    services::day_service::find_day_by_date,
    state::AppState,
};

/// How many client menus chose each dish offered on `date`.
///
/// A menu counts once per dish, whichever course slot references it. Offered
/// dishes nobody picked are reported with a count of zero.
pub async fn selection_summary(
    state: &AppState,
    user: &AuthUser,
    date: NaiveDate,
) -> AppResult<ApiResponse<SelectionSummary>> {
    ensure_admin(user)?;

    let day = match find_day_by_date(&state.orm, date).await? {
        Some(day) => day,
        None => return Err(AppError::not_found("Day")),
    };

    let dishes = sqlx::query_as::<_, DishSelection>(
        r#"
        SELECT d.id, d.name, d.category, COUNT(cm.id) AS selection_count
        FROM day_dishes dd
        JOIN dishes d ON d.id = dd.dish_id
        LEFT JOIN client_menus cm
          ON cm.day = $2
         AND (cm.first_dish_id = d.id
              OR cm.second_dish_id = d.id
              OR cm.dessert_dish_id = d.id)
        WHERE dd.day_id = $1
        GROUP BY d.id, d.name, d.category
        ORDER BY d.category, d.name
        "#,
    )
    .bind(day.id)
    .bind(date)
    .fetch_all(&state.pool)
    .await?;

    let total_menus: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM client_menus WHERE day = $1")
        .bind(date)
        .fetch_one(&state.pool)
        .await?;

    tracing::debug!(
        day_id = day.id,
        dishes = dishes.len(),
        menus = total_menus.0,
        "selection summary"
    );

    let summary = SelectionSummary {
        date,
        day_id: day.id,
        total_menus: total_menus.0,
        dishes,
    };
    Ok(ApiResponse::success(
        "Selection summary",
        summary,
        Some(Meta::empty()),
    ))
}
