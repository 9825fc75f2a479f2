use serde::Serialize;
use utoipa::ToSchema;

pub mod auth;
pub mod days;
pub mod dishes;
pub mod menus;
pub mod users;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResource {
    pub id: i32,
}
