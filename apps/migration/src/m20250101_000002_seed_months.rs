use almanac_core::domain::MONTH_NAMES;
use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_schema::Months;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Months::Table)
            .columns([Months::Num, Months::Name]);

        for (num, name) in (1..).zip(MONTH_NAMES) {
            insert
                .values([num.into(), name.into()])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Months::Table).to_owned())
            .await
    }
}
