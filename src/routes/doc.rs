use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        DeletedResource,
        auth::{Claims, LoginRequest, LoginResponse},
        days::{
            CreateDayRequest, DayCheck, DayDishStatusList, DayDishesAssigned, DayList,
            SetDayBlockedRequest, SetDayDishesRequest,
        },
        dishes::{CreateDishRequest, DishList, UpdateDishRequest},
        menus::{CalendarEventList, SaveMenuRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    error::ErrorData,
    models::{
        CalendarEvent, ClientMenu, Day, DayDishStatus, Dish, DishSelection, MenuEventProps,
        SelectionSummary, User,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, client_menus, days, dishes, health, reports},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::ping,
        auth::login,
        dishes::list_dishes,
        days::list_days,
        days::check_day_dishes,
        days::day_dishes,
        client_menus::save_menu,
        client_menus::list_menus,
        client_menus::delete_menu,
        reports::selection_summary,
        admin::create_dish,
        admin::update_dish,
        admin::delete_dish,
        admin::create_day,
        admin::set_day_blocked,
        admin::day_dish_status,
        admin::set_day_dishes,
        admin::list_users,
        admin::get_user,
        admin::create_user,
        admin::update_user,
        admin::delete_user
    ),
    components(
        schemas(
            User,
            Dish,
            Day,
            DayDishStatus,
            ClientMenu,
            CalendarEvent,
            MenuEventProps,
            DishSelection,
            SelectionSummary,
            Claims,
            LoginRequest,
            LoginResponse,
            CreateDishRequest,
            UpdateDishRequest,
            DishList,
            CreateDayRequest,
            SetDayBlockedRequest,
            SetDayDishesRequest,
            DayDishesAssigned,
            DayCheck,
            DayList,
            DayDishStatusList,
            SaveMenuRequest,
            CalendarEventList,
            CreateUserRequest,
            UpdateUserRequest,
            UserList,
            DeletedResource,
            ErrorData,
            Meta,
            ApiResponse<Dish>,
            ApiResponse<DishList>,
            ApiResponse<Day>,
            ApiResponse<DayList>,
            ApiResponse<ClientMenu>,
            ApiResponse<SelectionSummary>,
            ApiResponse<User>,
            ApiResponse<UserList>,
            ApiResponse<ErrorData>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Dishes", description = "Public dish catalogue"),
        (name = "Days", description = "Menu days and their dishes"),
        (name = "Client menus", description = "Per-client menu selections"),
        (name = "Reports", description = "Selection counts"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
