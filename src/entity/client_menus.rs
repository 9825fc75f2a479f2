use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "client_menus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub day: Date,
    pub first_dish_id: i32,
    pub second_dish_id: i32,
    pub dessert_dish_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::dishes::Entity",
        from = "Column::FirstDishId",
        to = "super::dishes::Column::Id"
    )]
    FirstDish,
    #[sea_orm(
        belongs_to = "super::dishes::Entity",
        from = "Column::SecondDishId",
        to = "super::dishes::Column::Id"
    )]
    SecondDish,
    #[sea_orm(
        belongs_to = "super::dishes::Entity",
        from = "Column::DessertDishId",
        to = "super::dishes::Column::Id"
    )]
    DessertDish,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
