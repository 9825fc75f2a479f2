use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::CalendarEvent;

/// Fields are optional so that a missing one is reported by name.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SaveMenuRequest {
    #[schema(value_type = String, format = Date, example = "2024-01-10")]
    pub day: Option<NaiveDate>,
    #[serde(alias = "firstDishId")]
    pub first_dish_id: Option<i32>,
    #[serde(alias = "secondDishId")]
    pub second_dish_id: Option<i32>,
    #[serde(alias = "dessertId", alias = "dessert_dish_id")]
    pub dessert_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSelection {
    pub day: NaiveDate,
    pub first_dish_id: i32,
    pub second_dish_id: i32,
    pub dessert_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CalendarEventList {
    #[schema(value_type = Vec<CalendarEvent>)]
    pub items: Vec<CalendarEvent>,
}
