//! User account handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use almanac_core::domain::{NewUser, User};
use almanac_core::error::{DomainError, RepoError};
use almanac_core::ports::{BaseRepository, PasswordService};
use almanac_shared::ApiResponse;
use almanac_shared::dto::{EntityRef, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        login: user.login,
        city: user.city,
        roles: user.roles,
        created_at: user.created_at.to_rfc3339(),
    }
}

fn user_not_found(id: i32) -> DomainError {
    DomainError::NotFound {
        entity_type: "User",
        id,
    }
}

/// POST /api/user/{login}/{password}/{city}
pub async fn create(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    path: web::Path<(String, String, String)>,
) -> AppResult<HttpResponse> {
    let (login, password, city) = path.into_inner();

    if login.trim().is_empty() || password.is_empty() || city.trim().is_empty() {
        return Err(AppError::BadRequest(
            "login, password and city are required".to_string(),
        ));
    }

    let password_hash = password_service
        .hash(&password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .create(NewUser::new(login, password_hash, city))
        .await?;
    tracing::info!(user_id = user.id, login = %user.login, "User created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        user_response(user),
        "User created",
    )))
}

/// PUT /api/user/{id}/{city}
pub async fn relocate(
    state: web::Data<AppState>,
    path: web::Path<(i32, String)>,
) -> AppResult<HttpResponse> {
    let (id, city) = path.into_inner();

    if city.trim().is_empty() {
        return Err(AppError::BadRequest("city is required".to_string()));
    }

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    user.relocate(city);
    let user = state.users.save(user).await?;
    tracing::info!(user_id = id, city = %user.city, "User city updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        user_response(user),
        "User updated",
    )))
}

/// DELETE /api/user/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.users.delete(id).await {
        Ok(()) => {}
        Err(RepoError::NotFound) => return Err(user_not_found(id).into()),
        Err(e) => return Err(e.into()),
    }
    tracing::info!(user_id = id, "User deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        EntityRef { id },
        "User deleted",
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    use crate::handlers::test_support::{StubWeatherApi, test_app, test_state};

    #[actix_web::test]
    async fn test_create_user_and_reject_duplicate_login() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::post()
            .uri("/api/user/jdupont/secret/Lyon")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["login"], "jdupont");
        assert_eq!(body["data"]["city"], "Lyon");
        assert_eq!(body["data"]["roles"][0], "ROLE_USER");
        assert!(body["data"].get("password_hash").is_none());

        let req = test::TestRequest::post()
            .uri("/api/user/jdupont/other/Paris")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_relocate_and_delete_user() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::post()
            .uri("/api/user/mmartin/secret/Brest")
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/user/{id}/Saint-Malo"))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["data"]["city"], "Saint-Malo");

        let req = test::TestRequest::put().uri("/api/user/999/Paris").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/user/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/user/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
