use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "days")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub date: Date,
    pub blocked: bool,
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

impl Related<super::dishes::Entity> for Entity {
    fn to() -> RelationDef {
        super::day_dishes::Relation::Dishes.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::day_dishes::Relation::Days.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
