use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::dishes::DishList, error::AppResult, response::ApiResponse, services::dish_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/dishes", get(list_dishes))
}

#[utoipa::path(
    get,
    path = "/dishes",
    responses(
        (status = 200, description = "All dishes by category then name", body = ApiResponse<DishList>)
    ),
    tag = "Dishes"
)]
pub async fn list_dishes(State(state): State<AppState>) -> AppResult<Json<ApiResponse<DishList>>> {
    let resp = dish_service::list_dishes(&state).await?;
    Ok(Json(resp))
}
