use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use chrono::NaiveDate;

use crate::{
    dto::{
        DeletedResource,
        menus::{CalendarEventList, SaveMenuRequest},
    },
    error::AppResult,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::ClientMenu,
    response::ApiResponse,
    services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/client/menus", get(list_menus).post(save_menu))
        .route("/client/menus/{date}", delete(delete_menu))
}

#[utoipa::path(
    post,
    path = "/client/menus",
    request_body = SaveMenuRequest,
    responses(
        (status = 201, description = "Menu selection created", body = ApiResponse<ClientMenu>),
        (status = 200, description = "Menu selection overwritten", body = ApiResponse<ClientMenu>),
        (status = 400, description = "Missing fields, blocked day or dish not offered"),
        (status = 403, description = "Not a client"),
        (status = 404, description = "No menu offered on that date"),
    ),
    security(("bearer_auth" = [])),
    tag = "Client menus"
)]
pub async fn save_menu(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<SaveMenuRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ClientMenu>>)> {
    let saved = menu_service::save_menu(&state, &user, payload).await?;
    let status = if saved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(saved.response)))
}

#[utoipa::path(
    get,
    path = "/client/menus",
    responses(
        (status = 200, description = "Selections as calendar events", body = ApiResponse<CalendarEventList>),
        (status = 403, description = "Not a client"),
    ),
    security(("bearer_auth" = [])),
    tag = "Client menus"
)]
pub async fn list_menus(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CalendarEventList>>> {
    let resp = menu_service::list_menus(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/client/menus/{date}",
    params(("date" = String, Path, description = "Menu date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Selection removed", body = ApiResponse<DeletedResource>),
        (status = 404, description = "No selection for that date"),
    ),
    security(("bearer_auth" = [])),
    tag = "Client menus"
)]
pub async fn delete_menu(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(date): AppPath<NaiveDate>,
) -> AppResult<Json<ApiResponse<DeletedResource>>> {
    let resp = menu_service::delete_menu(&state, &user, date).await?;
    Ok(Json(resp))
}
