use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum Months {
    Table,
    Id,
    Num,
    Name,
}

#[derive(DeriveIden)]
enum Advices {
    Table,
    Id,
    Detail,
}

#[derive(DeriveIden)]
enum AdviceMonths {
    Table,
    AdviceId,
    MonthId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Login,
    PasswordHash,
    City,
    Roles,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Geos {
    Table,
    Id,
    Name,
    Latitude,
    Longitude,
    CountryCode,
}

#[derive(DeriveIden)]
enum WeatherReadings {
    Table,
    Id,
    GeoId,
    Date,
    Description,
}

fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Months::Table)
                    .if_not_exists()
                    .col(id_column(Months::Id))
                    .col(ColumnDef::new(Months::Num).integer().not_null().unique_key())
                    .col(ColumnDef::new(Months::Name).string_len(32).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Advices::Table)
                    .if_not_exists()
                    .col(id_column(Advices::Id))
                    .col(ColumnDef::new(Advices::Detail).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdviceMonths::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdviceMonths::AdviceId).integer().not_null())
                    .col(ColumnDef::new(AdviceMonths::MonthId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(AdviceMonths::AdviceId)
                            .col(AdviceMonths::MonthId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advice_months_advice")
                            .from(AdviceMonths::Table, AdviceMonths::AdviceId)
                            .to(Advices::Table, Advices::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advice_months_month")
                            .from(AdviceMonths::Table, AdviceMonths::MonthId)
                            .to(Months::Table, Months::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_column(Users::Id))
                    .col(ColumnDef::new(Users::Login).string_len(180).not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::City).string().not_null())
                    .col(ColumnDef::new(Users::Roles).json_binary().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Geos::Table)
                    .if_not_exists()
                    .col(id_column(Geos::Id))
                    .col(ColumnDef::new(Geos::Name).string().not_null())
                    .col(ColumnDef::new(Geos::Latitude).double().not_null())
                    .col(ColumnDef::new(Geos::Longitude).double().not_null())
                    .col(ColumnDef::new(Geos::CountryCode).string_len(8).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_geos_name")
                    .table(Geos::Table)
                    .col(Geos::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WeatherReadings::Table)
                    .if_not_exists()
                    .col(id_column(WeatherReadings::Id))
                    .col(ColumnDef::new(WeatherReadings::GeoId).integer().not_null())
                    .col(
                        ColumnDef::new(WeatherReadings::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WeatherReadings::Description).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weather_readings_geo")
                            .from(WeatherReadings::Table, WeatherReadings::GeoId)
                            .to(Geos::Table, Geos::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_weather_readings_geo_date")
                    .table(WeatherReadings::Table)
                    .col(WeatherReadings::GeoId)
                    .col(WeatherReadings::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeatherReadings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Geos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdviceMonths::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Advices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Months::Table).to_owned())
            .await
    }
}
