use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dishes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// 1 = starter, 2 = main, 3 = dessert.
    pub category: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::day_dishes::Entity")]
    DayDishes,
}

impl Related<super::day_dishes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DayDishes.def()
    }
}

impl Related<super::days::Entity> for Entity {
    fn to() -> RelationDef {
        super::day_dishes::Relation::Days.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::day_dishes::Relation::Dishes.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
