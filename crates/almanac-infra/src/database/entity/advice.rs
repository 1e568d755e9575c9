//! Advice entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "advices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub detail: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::advice_month::Entity")]
    AdviceMonth,
}

impl Related<super::advice_month::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdviceMonth.def()
    }
}

impl Related<super::month::Entity> for Entity {
    fn to() -> RelationDef {
        super::advice_month::Relation::Month.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::advice_month::Relation::Advice.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
