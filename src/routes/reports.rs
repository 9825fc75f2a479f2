use axum::{Json, Router, extract::State, routing::get};
use chrono::NaiveDate;

use crate::{
    error::AppResult,
    extract::AppPath,
    middleware::auth::AuthUser,
    models::SelectionSummary,
    response::ApiResponse,
    services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/day-dishes-detailed/{date}", get(selection_summary))
}

#[utoipa::path(
    get,
    path = "/day-dishes-detailed/{date}",
    params(("date" = String, Path, description = "Day date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Selections per offered dish", body = ApiResponse<SelectionSummary>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No day on that date"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn selection_summary(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(date): AppPath<NaiveDate>,
) -> AppResult<Json<ApiResponse<SelectionSummary>>> {
    let resp = report_service::selection_summary(&state, &user, date).await?;
    Ok(Json(resp))
}
