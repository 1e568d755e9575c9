//! Month listing.

use actix_web::{HttpResponse, web};

use almanac_shared::dto::MonthResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/mois
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let months: Vec<MonthResponse> = state
        .months
        .list_all()
        .await?
        .into_iter()
        .map(|m| MonthResponse {
            num: m.num,
            name: m.name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(months))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::test;
    use almanac_shared::dto::MonthResponse;

    use crate::handlers::test_support::{StubWeatherApi, test_app, test_state};

    #[actix_web::test]
    async fn test_lists_twelve_months() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::get().uri("/api/mois").to_request();
        let months: Vec<MonthResponse> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(months.len(), 12);
        assert_eq!(months[0].name, "Janvier");
        assert_eq!(months[11].num, 12);
    }
}
