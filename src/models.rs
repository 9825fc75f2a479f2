use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity, error::AppError};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "client")]
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            other => Err(AppError::Validation(format!(
                "role must be 'admin' or 'client', got '{other}'"
            ))),
        }
    }
}

/// Course a dish is served as. Stored as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Starter = 1,
    Main = 2,
    Dessert = 3,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Starter, Category::Main, Category::Dessert];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Starter => "starter",
            Category::Main => "main",
            Category::Dessert => "dessert",
        }
    }
}

impl TryFrom<i32> for Category {
    type Error = AppError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Category::Starter),
            2 => Ok(Category::Main),
            3 => Ok(Category::Dessert),
            other => Err(AppError::Validation(format!(
                "category must be 1 (starter), 2 (main) or 3 (dessert), got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[schema(value_type = String, example = "client")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<entity::users::Model> for User {
    fn from(model: entity::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub id: i32,
    pub name: String,
    /// 1 = starter, 2 = main, 3 = dessert.
    pub category: i32,
}

impl From<entity::dishes::Model> for Dish {
    fn from(model: entity::dishes::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Day {
    pub id: i32,
    pub date: NaiveDate,
    pub blocked: bool,
}

impl From<entity::days::Model> for Day {
    fn from(model: entity::days::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            blocked: model.blocked,
        }
    }
}

/// A dish together with whether it is offered on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DayDishStatus {
    pub id: i32,
    pub name: String,
    pub category: i32,
    pub is_assigned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientMenu {
    pub id: i32,
    pub user_id: i32,
    pub day: NaiveDate,
    pub first_dish_id: i32,
    pub second_dish_id: i32,
    pub dessert_dish_id: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::client_menus::Model> for ClientMenu {
    fn from(model: entity::client_menus::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            day: model.day,
            first_dish_id: model.first_dish_id,
            second_dish_id: model.second_dish_id,
            dessert_dish_id: model.dessert_dish_id,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// One selected day rendered for the client calendar.
///
/// Field names follow the calendar widget's event input (`allDay`,
/// `extendedProps`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDate,
    pub all_day: bool,
    pub extended_props: MenuEventProps,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuEventProps {
    pub first_dish_id: i32,
    pub first_dish_name: String,
    pub second_dish_id: i32,
    pub second_dish_name: String,
    pub dessert_dish_id: i32,
    pub dessert_dish_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct DishSelection {
    pub id: i32,
    pub name: String,
    pub category: i32,
    pub selection_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionSummary {
    pub date: NaiveDate,
    pub day_id: i32,
    pub total_menus: i64,
    pub dishes: Vec<DishSelection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_event_uses_widget_field_names() {
        let event = CalendarEvent {
            title: "Menu: Soup / Stew".into(),
            start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            all_day: true,
            extended_props: MenuEventProps {
                first_dish_id: 1,
                first_dish_name: "Soup".into(),
                second_dish_id: 5,
                second_dish_name: "Stew".into(),
                dessert_dish_id: 9,
                dessert_dish_name: "Flan".into(),
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["allDay"], true);
        assert_eq!(json["start"], "2024-01-10");
        assert_eq!(json["extendedProps"]["firstDishId"], 1);
        assert_eq!(json["extendedProps"]["dessertDishId"], 9);
        assert!(json.get("extended_props").is_none());
    }

    #[test]
    fn category_codes_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::try_from(category.code()).unwrap(), category);
        }
    }

    #[test]
    fn category_rejects_unknown_codes() {
        for code in [0, 4, -1] {
            assert!(matches!(
                Category::try_from(code),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn role_parses_only_known_values() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("client".parse::<Role>().unwrap(), Role::Client);
        assert!("user".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"client\"").unwrap();
        assert_eq!(role, Role::Client);
    }
}
