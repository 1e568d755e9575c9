//! Join table between advices and months.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "advice_months")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub advice_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub month_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::advice::Entity",
        from = "Column::AdviceId",
        to = "super::advice::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Advice,
    #[sea_orm(
        belongs_to = "super::month::Entity",
        from = "Column::MonthId",
        to = "super::month::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Month,
}

impl Related<super::advice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advice.def()
    }
}

impl Related<super::month::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Month.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
