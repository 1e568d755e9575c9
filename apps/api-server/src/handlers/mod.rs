//! HTTP handlers and route configuration.

mod advice;
mod auth;
mod health;
mod month;
mod user;
mod weather;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/mois", web::get().to(month::list))
            .service(
                web::scope("/conseil")
                    .route("", web::get().to(advice::current_month))
                    .route("/{month}", web::get().to(advice::by_month))
                    .route("/{id}", web::delete().to(advice::delete))
                    .route("/{months}/{detail}", web::post().to(advice::create))
                    .route("/{id}/{months}", web::put().to(advice::update_months))
                    .route("/{id}/{months}/{detail}", web::put().to(advice::update)),
            )
            .service(
                web::scope("/user")
                    .route("/{login}/{password}/{city}", web::post().to(user::create))
                    .route("/{id}/{city}", web::put().to(user::relocate))
                    .route("/{id}", web::delete().to(user::delete)),
            )
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/meteo")
                    .route("", web::get().to(weather::for_current_user))
                    .route("/{city}", web::get().to(weather::for_city)),
            ),
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use actix_web::{App, body::MessageBody, dev::ServiceFactory, dev::ServiceRequest, dev::ServiceResponse, web};
    use async_trait::async_trait;

    use almanac_core::domain::{CurrentConditions, GeocodedPlace};
    use almanac_core::ports::{PasswordService, TokenService, WeatherApi, WeatherApiError};
    use almanac_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

    use crate::state::AppState;

    /// Knows every city except "Atlantis"; localizes "London" to "Londres".
    #[derive(Default)]
    pub struct StubWeatherApi {
        pub weather_calls: AtomicUsize,
        pub failing: bool,
    }

    #[async_trait]
    impl WeatherApi for StubWeatherApi {
        async fn geocode(&self, city: &str) -> Result<Option<GeocodedPlace>, WeatherApiError> {
            if city == "Atlantis" {
                return Ok(None);
            }
            let mut local_names = HashMap::new();
            if city == "London" {
                local_names.insert("fr".to_string(), "Londres".to_string());
            }
            Ok(Some(GeocodedPlace {
                name: city.to_string(),
                local_names,
                latitude: 48.85,
                longitude: 2.35,
                country: "FR".to_string(),
            }))
        }

        async fn current_weather(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<CurrentConditions, WeatherApiError> {
            self.weather_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                return Err(WeatherApiError::Status(503));
            }
            Ok(CurrentConditions {
                description: "ciel dégagé".to_string(),
            })
        }
    }

    pub fn test_state(api: Arc<StubWeatherApi>) -> AppState {
        AppState::in_memory(api, Duration::from_secs(3600))
    }

    pub fn test_app(
        state: AppState,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            ..JwtConfig::default()
        }));
        let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(token_service))
            .app_data(web::Data::new(password_service))
            .configure(super::configure_routes)
    }
}
