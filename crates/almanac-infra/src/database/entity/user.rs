//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub login: String,
    pub password_hash: String,
    pub city: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub roles: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn decode_roles(user_id: i32, roles: Json) -> Vec<String> {
    serde_json::from_value(roles).unwrap_or_else(|e| {
        tracing::warn!(user_id, error = %e, "Unreadable roles column, using default role");
        vec![almanac_core::domain::DEFAULT_ROLE.to_string()]
    })
}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for almanac_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            roles: decode_roles(model.id, model.roles),
            login: model.login,
            password_hash: model.password_hash,
            city: model.city,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<almanac_core::domain::User> for ActiveModel {
    fn from(user: almanac_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            login: Set(user.login),
            password_hash: Set(user.password_hash),
            city: Set(user.city),
            roles: Set(serde_json::json!(user.roles)),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn model(roles: Json) -> Model {
        let now: DateTimeWithTimeZone = Utc::now().into();
        Model {
            id: 3,
            login: "jdupont".to_owned(),
            password_hash: "hash".to_owned(),
            city: "Lyon".to_owned(),
            roles,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_roles_are_decoded() {
        let user: almanac_core::domain::User =
            model(serde_json::json!(["ROLE_USER", "ROLE_ADMIN"])).into();
        assert_eq!(user.roles, vec!["ROLE_USER", "ROLE_ADMIN"]);
    }

    #[test]
    fn test_corrupt_roles_fall_back_to_default() {
        let user: almanac_core::domain::User = model(serde_json::json!({"admin": true})).into();
        assert_eq!(user.roles, vec!["ROLE_USER"]);
        assert_eq!(user.login, "jdupont");
    }
}
