use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Day, DayDishStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDayRequest {
    #[schema(value_type = String, format = Date, example = "2024-01-10")]
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetDayBlockedRequest {
    pub blocked: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetDayDishesRequest {
    #[serde(alias = "dishIds")]
    pub dish_ids: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DayDishesAssigned {
    pub day_id: i32,
    pub assigned: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayCheck {
    pub date: NaiveDate,
    pub has_dishes: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DayList {
    #[schema(value_type = Vec<Day>)]
    pub items: Vec<Day>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DayDishStatusList {
    #[schema(value_type = Vec<DayDishStatus>)]
    pub items: Vec<DayDishStatus>,
}
