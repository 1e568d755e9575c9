//! Geocoding cache entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "geos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::weather::Entity")]
    Weather,
}

impl Related<super::weather::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weather.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for almanac_core::domain::Geo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            latitude: model.latitude,
            longitude: model.longitude,
            country_code: model.country_code,
        }
    }
}

impl From<almanac_core::domain::Geo> for ActiveModel {
    fn from(geo: almanac_core::domain::Geo) -> Self {
        Self {
            id: Set(geo.id),
            name: Set(geo.name),
            latitude: Set(geo.latitude),
            longitude: Set(geo.longitude),
            country_code: Set(geo.country_code),
        }
    }
}
