use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::{
        DeletedResource,
        days::{
            CreateDayRequest, DayDishStatusList, DayDishesAssigned, SetDayBlockedRequest,
            SetDayDishesRequest,
        },
        dishes::{CreateDishRequest, UpdateDishRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    error::AppResult,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::{Day, Dish, User},
    response::ApiResponse,
    services::{day_service, dish_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dishes", post(create_dish))
        .route("/dishes/{id}", put(update_dish).delete(delete_dish))
        .route("/days", post(create_day))
        .route("/days/{id}/block", put(set_day_blocked))
        .route("/day-dishes/{day_id}", get(day_dish_status).post(set_day_dishes))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[utoipa::path(
    post,
    path = "/admin/dishes",
    request_body = CreateDishRequest,
    responses(
        (status = 201, description = "Create dish", body = ApiResponse<Dish>),
        (status = 400, description = "Invalid name or category"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_dish(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateDishRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Dish>>)> {
    let resp = dish_service::create_dish(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/admin/dishes/{id}",
    params(("id" = i32, Path, description = "Dish ID")),
    request_body = UpdateDishRequest,
    responses(
        (status = 200, description = "Update dish", body = ApiResponse<Dish>),
        (status = 400, description = "Invalid name or category"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_dish(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateDishRequest>,
) -> AppResult<Json<ApiResponse<Dish>>> {
    let resp = dish_service::update_dish(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/dishes/{id}",
    params(("id" = i32, Path, description = "Dish ID")),
    responses(
        (status = 200, description = "Dish and its day assignments removed", body = ApiResponse<DeletedResource>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Dish is selected in client menus"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_dish(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<DeletedResource>>> {
    let resp = dish_service::delete_dish(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/days",
    request_body = CreateDayRequest,
    responses(
        (status = 201, description = "Day created", body = ApiResponse<Day>),
        (status = 200, description = "Day already existed", body = ApiResponse<Day>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_day(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateDayRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Day>>)> {
    let result = day_service::create_or_get_day(&state, &user, payload).await?;
    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(result.response)))
}

#[utoipa::path(
    put,
    path = "/admin/days/{id}/block",
    params(("id" = i32, Path, description = "Day ID")),
    request_body = SetDayBlockedRequest,
    responses(
        (status = 200, description = "Block flag updated", body = ApiResponse<Day>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_day_blocked(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<SetDayBlockedRequest>,
) -> AppResult<Json<ApiResponse<Day>>> {
    let resp = day_service::set_day_blocked(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/day-dishes/{day_id}",
    params(("day_id" = i32, Path, description = "Day ID")),
    responses(
        (status = 200, description = "Every dish with its assignment flag", body = ApiResponse<DayDishStatusList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn day_dish_status(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(day_id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<DayDishStatusList>>> {
    let resp = day_service::day_dish_status(&state, &user, day_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/day-dishes/{day_id}",
    params(("day_id" = i32, Path, description = "Day ID")),
    request_body = SetDayDishesRequest,
    responses(
        (status = 200, description = "Assignment replaced", body = ApiResponse<DayDishesAssigned>),
        (status = 400, description = "dish_ids is not an integer list or names unknown dishes"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_day_dishes(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(day_id): AppPath<i32>,
    AppJson(payload): AppJson<SetDayDishesRequest>,
) -> AppResult<Json<ApiResponse<DayDishesAssigned>>> {
    let resp = day_service::set_day_dishes(&state, &user, day_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "All users, admins first", body = ApiResponse<UserList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Get user", body = ApiResponse<User>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Create user", body = ApiResponse<User>),
        (status = 400, description = "Invalid email, password or role"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email is already taken"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = user_service::create_user(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Update user", body = ApiResponse<User>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email is already taken"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_user(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User and their menu selections removed", body = ApiResponse<DeletedResource>),
        (status = 400, description = "Cannot delete own account"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<DeletedResource>>> {
    let resp = user_service::delete_user(&state, &user, id).await?;
    Ok(Json(resp))
}
