use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::{
        days::{DateQuery, DayCheck, DayList},
        dishes::DishList,
    },
    error::AppResult,
    extract::{AppPath, AppQuery},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::day_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/days", get(list_days))
        .route("/days/check-dishes", get(check_day_dishes))
        .route("/day/{id}/dishes", get(day_dishes))
}

#[utoipa::path(
    get,
    path = "/days",
    responses(
        (status = 200, description = "All days ordered by date", body = ApiResponse<DayList>),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Days"
)]
pub async fn list_days(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DayList>>> {
    let resp = day_service::list_days(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/days/check-dishes",
    params(DateQuery),
    responses(
        (status = 200, description = "Whether the date offers a menu", body = ApiResponse<DayCheck>),
        (status = 400, description = "Missing or malformed date"),
    ),
    tag = "Days"
)]
pub async fn check_day_dishes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DateQuery>,
) -> AppResult<Json<ApiResponse<DayCheck>>> {
    let resp = day_service::check_day_dishes(&state, query.date).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/day/{id}/dishes",
    params(("id" = i32, Path, description = "Day ID")),
    responses(
        (status = 200, description = "Dishes offered on the day", body = ApiResponse<DishList>),
        (status = 404, description = "Day not found"),
    ),
    tag = "Days"
)]
pub async fn day_dishes(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<DishList>>> {
    let resp = day_service::dishes_for_day(&state, id).await?;
    Ok(Json(resp))
}
