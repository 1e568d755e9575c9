//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub login: String,
    pub city: String,
    pub roles: Vec<String>,
    pub created_at: String,
}

/// A calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthResponse {
    pub num: u32,
    pub name: String,
}

/// An advice with all the months it is tagged with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub id: i32,
    pub detail: String,
    pub months: Vec<MonthResponse>,
}

/// An advice as listed for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAdviceResponse {
    pub id: i32,
    pub detail: String,
    /// Name of the listed month.
    pub name: String,
}

/// Current weather for a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub city: String,
    pub weather: String,
    /// `dd/mm/YYYY HH:MM:SS`, UTC.
    pub date: String,
    /// `"API"` for a fresh upstream reading, `"cache"` otherwise.
    pub from: String,
}

/// Identifier of an entity affected by a mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i32,
}
