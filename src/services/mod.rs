pub mod auth_service;
pub mod day_service;
pub mod dish_service;
pub mod menu_service;
pub mod report_service;
pub mod user_service;
