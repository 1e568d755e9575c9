//! Schema migrations for the Almanac database.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_schema;
mod m20250101_000002_seed_months;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_schema::Migration),
            Box::new(m20250101_000002_seed_months::Migration),
        ]
    }
}
