//! Monthly advice handlers.

use actix_web::{HttpResponse, web};
use chrono::Datelike;

use almanac_core::domain::{Advice, MonthlyAdvice, parse_month_list, validate_month};
use almanac_core::error::{DomainError, RepoError};
use almanac_shared::ApiResponse;
use almanac_shared::dto::{AdviceResponse, EntityRef, MonthResponse, MonthlyAdviceResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn advice_response(advice: Advice) -> AdviceResponse {
    AdviceResponse {
        id: advice.id,
        detail: advice.detail,
        months: advice
            .months
            .into_iter()
            .map(|m| MonthResponse {
                num: m.num,
                name: m.name,
            })
            .collect(),
    }
}

fn monthly_response(advice: MonthlyAdvice) -> MonthlyAdviceResponse {
    MonthlyAdviceResponse {
        id: advice.id,
        detail: advice.detail,
        name: advice.month,
    }
}

async fn list_for_month(state: &AppState, num: u32) -> AppResult<HttpResponse> {
    let advices: Vec<MonthlyAdviceResponse> = state
        .advices
        .list_by_month(num)
        .await?
        .into_iter()
        .map(monthly_response)
        .collect();

    Ok(HttpResponse::Ok().json(advices))
}

/// GET /api/conseil
pub async fn current_month(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    list_for_month(&state, chrono::Local::now().month()).await
}

/// GET /api/conseil/{month}
pub async fn by_month(state: web::Data<AppState>, path: web::Path<u32>) -> AppResult<HttpResponse> {
    let num = validate_month(path.into_inner()).map_err(|e| match e {
        DomainError::Validation(msg) => AppError::NotFound(msg),
        other => other.into(),
    })?;

    list_for_month(&state, num).await
}

/// POST /api/conseil/{months}/{detail}
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (months, detail) = path.into_inner();
    let months = parse_month_list(&months);
    Advice::validate_detail(&detail)?;

    let created = state.advices.create(&detail, &months).await?;
    let ids: Vec<i32> = created.iter().map(|a| a.id).collect();
    tracing::info!(advice_ids = ?ids, months = ?months, "Advice created");

    let message = format!("Advices added: {}", created.len());
    let mut response = if created.is_empty() {
        HttpResponse::Ok()
    } else {
        HttpResponse::Created()
    };
    Ok(response.json(ApiResponse::ok_with_message(
        created
            .into_iter()
            .map(advice_response)
            .collect::<Vec<_>>(),
        message,
    )))
}

/// PUT /api/conseil/{id}/{months}
pub async fn update_months(
    state: web::Data<AppState>,
    path: web::Path<(i32, String)>,
) -> AppResult<HttpResponse> {
    let (id, months) = path.into_inner();
    apply_update(&state, id, &months, None).await
}

/// PUT /api/conseil/{id}/{months}/{detail}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<(i32, String, String)>,
) -> AppResult<HttpResponse> {
    let (id, months, detail) = path.into_inner();
    apply_update(&state, id, &months, Some(&detail)).await
}

async fn apply_update(
    state: &AppState,
    id: i32,
    months: &str,
    detail: Option<&str>,
) -> AppResult<HttpResponse> {
    let months = parse_month_list(months);
    if let Some(detail) = detail {
        Advice::validate_detail(detail)?;
    }

    let advice = state
        .advices
        .update(id, &months, detail)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Advice",
            id,
        })?;
    tracing::info!(advice_id = id, months = ?months, "Advice updated");

    let message = format!("Advice months set: {}", advice.months.len());
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        advice_response(advice),
        message,
    )))
}

/// DELETE /api/conseil/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.advices.delete(id).await {
        Ok(()) => {}
        Err(RepoError::NotFound) => {
            return Err(DomainError::NotFound {
                entity_type: "Advice",
                id,
            }
            .into());
        }
        Err(e) => return Err(e.into()),
    }
    tracing::info!(advice_id = id, "Advice deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        EntityRef { id },
        "Advice deleted",
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    use crate::handlers::test_support::{StubWeatherApi, test_app, test_state};

    #[actix_web::test]
    async fn test_create_filters_invalid_months() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::post()
            .uri("/api/conseil/3,x,13,4,3/Semer%20les%20pois")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(res).await;
        let created = body["data"].as_array().unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0]["detail"], "Semer les pois");
        assert_eq!(created[0]["months"][0]["num"], 3);
        assert_eq!(created[1]["months"][0]["num"], 4);
        assert_ne!(created[0]["id"], created[1]["id"]);
        assert_eq!(body["message"], "Advices added: 2");

        let req = test::TestRequest::get().uri("/api/conseil/4").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed[0]["id"], created[1]["id"]);
        assert_eq!(listed[0]["detail"], "Semer les pois");
        assert_eq!(listed[0]["name"], "Avril");
        assert!(listed[0].get("month").is_none());
    }

    #[actix_web::test]
    async fn test_create_without_valid_month() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::post()
            .uri("/api/conseil/0,13/Tailler")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["message"], "Advices added: 0");
    }

    #[actix_web::test]
    async fn test_updating_one_advice_keeps_its_siblings() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::post().uri("/api/conseil/3,4/Semer").to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let march_id = created["data"][0]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/conseil/{march_id}/6"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/conseil/{march_id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/conseil/4").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], created["data"][1]["id"]);
    }

    #[actix_web::test]
    async fn test_update_with_no_valid_month_clears_months() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::post().uri("/api/conseil/5/Pailler").to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["data"][0]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/conseil/{id}/0,x"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert!(body["data"]["months"].as_array().unwrap().is_empty());
        assert_eq!(body["data"]["detail"], "Pailler");
        assert_eq!(body["message"], "Advice months set: 0");

        let req = test::TestRequest::get().uri("/api/conseil/5").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_month_out_of_range() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::get().uri("/api/conseil/13").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "month number must be between 1 and 12");
    }

    #[actix_web::test]
    async fn test_current_month_lists_array() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::get().uri("/api/conseil").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_update_and_delete() {
        let app = test::init_service(test_app(test_state(Arc::new(StubWeatherApi::default())))).await;

        let req = test::TestRequest::post().uri("/api/conseil/1/Planter").to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["data"][0]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/conseil/{id}/6,7"))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["data"]["detail"], "Planter");
        assert_eq!(updated["data"]["months"][0]["num"], 6);

        let req = test::TestRequest::put()
            .uri(&format!("/api/conseil/{id}/8/Arroser"))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["data"]["detail"], "Arroser");

        let req = test::TestRequest::put().uri("/api/conseil/999/8").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/conseil/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/conseil/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
