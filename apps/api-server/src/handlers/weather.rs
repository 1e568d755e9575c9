//! Weather handlers.

use actix_web::{HttpResponse, web};

use almanac_core::domain::WeatherReport;
use almanac_core::error::DomainError;
use almanac_core::ports::BaseRepository;
use almanac_shared::dto::WeatherResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn weather_response(report: WeatherReport) -> WeatherResponse {
    WeatherResponse {
        city: report.city,
        weather: report.weather,
        date: report.date,
        from: report.from.as_str().to_string(),
    }
}

async fn report_for(state: &AppState, city: &str) -> AppResult<HttpResponse> {
    let report = state
        .weather
        .for_city(city)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("City not found: {}", city)))?;

    Ok(HttpResponse::Ok().json(weather_response(report)))
}

/// GET /api/meteo
pub async fn for_current_user(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    tracing::debug!(
        user_id = identity.user_id,
        login = %identity.login,
        roles = ?identity.roles,
        "Weather for authenticated user"
    );

    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "User",
            id: identity.user_id,
        })?;

    report_for(&state, &user.city).await
}

/// GET /api/meteo/{city}
pub async fn for_city(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    report_for(&state, &path.into_inner()).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use actix_web::{http::StatusCode, test};
    use almanac_shared::dto::{AuthResponse, LoginRequest, WeatherResponse};
    use serde_json::Value;

    use crate::handlers::test_support::{StubWeatherApi, test_app, test_state};

    #[actix_web::test]
    async fn test_city_weather_is_cached() {
        let api = Arc::new(StubWeatherApi::default());
        let app = test::init_service(test_app(test_state(api.clone()))).await;

        let req = test::TestRequest::get().uri("/api/meteo/London").to_request();
        let first: WeatherResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(first.city, "Londres");
        assert_eq!(first.weather, "ciel dégagé");
        assert_eq!(first.from, "API");

        let req = test::TestRequest::get().uri("/api/meteo/Londres").to_request();
        let second: WeatherResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(second.from, "cache");
        assert_eq!(second.date, first.date);
        assert_eq!(api.weather_calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_unknown_city() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::get().uri("/api/meteo/Atlantis").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "City not found: Atlantis");
    }

    #[actix_web::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let api = Arc::new(StubWeatherApi {
            failing: true,
            ..StubWeatherApi::default()
        });
        let app = test::init_service(test_app(test_state(api))).await;

        let req = test::TestRequest::get().uri("/api/meteo/Paris").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn test_weather_for_authenticated_user() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::get().uri("/api/meteo").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/user/jdupont/secret/Lyon")
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(LoginRequest {
                login: "jdupont".to_string(),
                password: "secret".to_string(),
            })
            .to_request();
        let auth: AuthResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/meteo")
            .insert_header(("Authorization", format!("Bearer {}", auth.access_token)))
            .to_request();
        let report: WeatherResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report.city, "Lyon");
        assert_eq!(report.from, "API");
    }
}
