//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use almanac_core::error::DomainError;
use almanac_core::ports::{BaseRepository, PasswordService, TokenService};
use almanac_shared::dto::{AuthResponse, LoginRequest};

use super::user::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_login(&req.login)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        tracing::info!(login = %req.login, "Rejected login attempt");
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(user.id, &user.login, user.roles.clone())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    }))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "User",
            id: identity.user_id,
        })?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}
