//! Weather reading entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "weather_readings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub geo_id: i32,
    pub date: DateTimeWithTimeZone,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::geo::Entity",
        from = "Column::GeoId",
        to = "super::geo::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Geo,
}

impl Related<super::geo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Geo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for almanac_core::domain::Weather {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            geo_id: model.geo_id,
            date: model.date.into(),
            description: model.description,
        }
    }
}

impl From<almanac_core::domain::Weather> for ActiveModel {
    fn from(reading: almanac_core::domain::Weather) -> Self {
        Self {
            id: Set(reading.id),
            geo_id: Set(reading.geo_id),
            date: Set(reading.date.into()),
            description: Set(reading.description),
        }
    }
}
