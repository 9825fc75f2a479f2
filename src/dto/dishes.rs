use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Dish;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDishRequest {
    pub name: String,
    /// 1 = starter, 2 = main, 3 = dessert.
    pub category: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDishRequest {
    pub name: String,
    pub category: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DishList {
    #[schema(value_type = Vec<Dish>)]
    pub items: Vec<Dish>,
}
