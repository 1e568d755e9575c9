//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait, FromQueryResult,
    ModelTrait, NotSet, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};

use almanac_core::domain::{
    Advice, Geo, Month, MonthlyAdvice, NewGeo, NewUser, NewWeather, User, Weather,
};
use almanac_core::error::RepoError;
use almanac_core::ports::{
    AdviceRepository, GeoRepository, MonthRepository, UserRepository, WeatherRepository,
};

use super::entity::advice::{self, Entity as AdviceEntity};
use super::entity::advice_month::{self, Entity as AdviceMonthEntity};
use super::entity::geo::{self, Entity as GeoEntity};
use super::entity::month::{self, Entity as MonthEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::entity::weather::{self, Entity as WeatherEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL month repository.
pub type PostgresMonthRepository = PostgresBaseRepository<MonthEntity>;

/// PostgreSQL geocoding cache.
pub type PostgresGeoRepository = PostgresBaseRepository<GeoEntity>;

/// PostgreSQL weather readings cache.
pub type PostgresWeatherRepository = PostgresBaseRepository<WeatherEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(login = %login, "Finding user by login");

        let result = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: NotSet,
            login: Set(new_user.login),
            password_hash: Set(new_user.password_hash),
            city: Set(new_user.city),
            roles: Set(serde_json::json!(new_user.roles)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl MonthRepository for PostgresMonthRepository {
    async fn find_by_num(&self, num: u32) -> Result<Option<Month>, RepoError> {
        let result = MonthEntity::find()
            .filter(month::Column::Num.eq(num as i32))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Month>, RepoError> {
        let result = MonthEntity::find()
            .order_by_asc(month::Column::Num)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl GeoRepository for PostgresGeoRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Geo>, RepoError> {
        let result = GeoEntity::find()
            .filter(geo::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_geo: NewGeo) -> Result<Geo, RepoError> {
        let model = geo::ActiveModel {
            id: NotSet,
            name: Set(new_geo.name),
            latitude: Set(new_geo.latitude),
            longitude: Set(new_geo.longitude),
            country_code: Set(new_geo.country_code),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl WeatherRepository for PostgresWeatherRepository {
    async fn latest_for_geo(&self, geo_id: i32) -> Result<Option<Weather>, RepoError> {
        let result = WeatherEntity::find()
            .filter(weather::Column::GeoId.eq(geo_id))
            .order_by_desc(weather::Column::Date)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, reading: NewWeather) -> Result<Weather, RepoError> {
        let model = weather::ActiveModel {
            id: NotSet,
            geo_id: Set(reading.geo_id),
            date: Set(reading.date.into()),
            description: Set(reading.description),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, RepoError> {
        let result = WeatherEntity::delete_many()
            .filter(weather::Column::Date.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

/// Row of the advice-by-month listing.
#[derive(Debug, FromQueryResult)]
struct MonthlyAdviceRow {
    id: i32,
    detail: String,
    month: String,
}

/// PostgreSQL advice repository. Advice rows and their month links are
/// written in a single transaction.
pub struct PostgresAdviceRepository {
    db: DbConn,
}

impl PostgresAdviceRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Month rows for the given month numbers, in calendar order.
    async fn months_by_num<C: ConnectionTrait>(
        conn: &C,
        nums: &[u32],
    ) -> Result<Vec<month::Model>, RepoError> {
        if nums.is_empty() {
            return Ok(Vec::new());
        }

        MonthEntity::find()
            .filter(month::Column::Num.is_in(nums.iter().map(|n| *n as i32)))
            .order_by_asc(month::Column::Num)
            .all(conn)
            .await
            .map_err(map_db_err)
    }

    async fn link_months<C: ConnectionTrait>(
        conn: &C,
        advice_id: i32,
        months: &[month::Model],
    ) -> Result<(), RepoError> {
        if months.is_empty() {
            return Ok(());
        }

        let links = months.iter().map(|m| advice_month::ActiveModel {
            advice_id: Set(advice_id),
            month_id: Set(m.id),
        });
        AdviceMonthEntity::insert_many(links)
            .exec_without_returning(conn)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    fn to_domain(model: advice::Model, months: Vec<month::Model>) -> Advice {
        Advice {
            id: model.id,
            detail: model.detail,
            months: months.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AdviceRepository for PostgresAdviceRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Advice>, RepoError> {
        let Some(model) = AdviceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let months = model
            .find_related(MonthEntity)
            .order_by_asc(month::Column::Num)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Some(Self::to_domain(model, months)))
    }

    async fn list_by_month(&self, num: u32) -> Result<Vec<MonthlyAdvice>, RepoError> {
        let rows = AdviceEntity::find()
            .select_only()
            .column(advice::Column::Id)
            .column(advice::Column::Detail)
            .column_as(month::Column::Name, "month")
            .join(
                sea_orm::JoinType::InnerJoin,
                advice::Relation::AdviceMonth.def(),
            )
            .join(
                sea_orm::JoinType::InnerJoin,
                advice_month::Relation::Month.def(),
            )
            .filter(month::Column::Num.eq(num as i32))
            .order_by_asc(advice::Column::Id)
            .into_model::<MonthlyAdviceRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| MonthlyAdvice {
                id: row.id,
                detail: row.detail,
                month: row.month,
            })
            .collect())
    }

    async fn create(&self, detail: &str, months: &[u32]) -> Result<Vec<Advice>, RepoError> {
        if months.is_empty() {
            return Ok(Vec::new());
        }

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let months = Self::months_by_num(&txn, months).await?;
        let mut created = Vec::with_capacity(months.len());
        for month in months {
            let model = advice::ActiveModel {
                id: NotSet,
                detail: Set(detail.to_string()),
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
            let linked = vec![month];
            Self::link_months(&txn, model.id, &linked).await?;
            created.push(Self::to_domain(model, linked));
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        months: &[u32],
        detail: Option<&str>,
    ) -> Result<Option<Advice>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let Some(mut model) = AdviceEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
        else {
            txn.rollback().await.map_err(map_db_err)?;
            return Ok(None);
        };

        AdviceMonthEntity::delete_many()
            .filter(advice_month::Column::AdviceId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let months = Self::months_by_num(&txn, months).await?;
        Self::link_months(&txn, id, &months).await?;

        if let Some(detail) = detail {
            let mut active: advice::ActiveModel = model.into();
            active.detail = Set(detail.to_string());
            model = active.update(&txn).await.map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(Some(Self::to_domain(model, months)))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        // advice_months rows go with it (ON DELETE CASCADE).
        let result = AdviceEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
