//! Month entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "months")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub num: i32,
    pub name: String,
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

impl Related<super::advice::Entity> for Entity {
    fn to() -> RelationDef {
        super::advice_month::Relation::Advice.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::advice_month::Relation::Month.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Month.
impl From<Model> for almanac_core::domain::Month {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            num: model.num as u32,
            name: model.name,
        }
    }
}
