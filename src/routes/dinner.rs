use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::DinnerEngine;
use crate::models::{
    ErrorResponse, FindDinnerRequest, HealthResponse, RefineRequest, SearchAgainRequest,
    SetPrefsRequest, StoredPrefsResponse,
};
use crate::services::YelpError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DinnerEngine>,
}

/// Configure all dinner-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/dinner/prefs", web::post().to(set_prefs))
        .route("/dinner/find", web::post().to(find_dinner))
        .route("/dinner/refine", web::post().to(refine_dinner))
        .route("/dinner/again", web::post().to(search_again))
        .route("/dinner/memory/{profile}", web::get().to(memory));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Map provider-layer failures onto HTTP statuses. Validation problems are
/// the caller's fault; a missing credential is a deployment fault; anything
/// from the network is a bad gateway.
fn provider_error_response(error: YelpError) -> HttpResponse {
    match error {
        YelpError::MissingLocation => HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_query".to_string(),
            message: error.to_string(),
            status_code: 400,
        }),
        YelpError::MissingApiKey => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "configuration".to_string(),
            message: error.to_string(),
            status_code: 500,
        }),
        YelpError::Request(_) | YelpError::Api(_) => {
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "provider".to_string(),
                message: error.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Save/merge dinner preferences for a profile
///
/// POST /api/v1/dinner/prefs
async fn set_prefs(
    state: web::Data<AppState>,
    req: web::Json<SetPrefsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_response(errors);
    }

    let stored = state.engine.set_prefs(&req.profile, &req.preferences).await;

    HttpResponse::Ok().json(StoredPrefsResponse { ok: true, stored })
}

/// Find restaurants around a location matching constraints and preferences
///
/// POST /api/v1/dinner/find
///
/// Minimal request body:
/// ```json
/// {"query": {"location": {"address": "Waterloo, ON"}}}
/// ```
async fn find_dinner(
    state: web::Data<AppState>,
    req: web::Json<FindDinnerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_response(errors);
    }

    tracing::info!("find_dinner for profile {}", req.profile);

    match state.engine.find(&req.profile, &req.query).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            tracing::error!("find_dinner failed for {}: {}", req.profile, e);
            provider_error_response(e)
        }
    }
}

/// Refine the last results from a natural-language instruction, e.g.
/// "closer", "cheaper", "not pizza", "open later", "date night"
///
/// POST /api/v1/dinner/refine
async fn refine_dinner(
    state: web::Data<AppState>,
    req: web::Json<RefineRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_response(errors);
    }

    tracing::info!("refine_dinner for profile {}", req.profile);

    let result = state.engine.refine(&req.profile, &req.instruction).await;
    HttpResponse::Ok().json(result)
}

/// Hit the provider again with the current refined query in memory
///
/// POST /api/v1/dinner/again
async fn search_again(
    state: web::Data<AppState>,
    req: web::Json<SearchAgainRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_response(errors);
    }

    match state.engine.search_again(&req.profile).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            tracing::error!("search_again failed for {}: {}", req.profile, e);
            provider_error_response(e)
        }
    }
}

/// Read-only snapshot of a profile's session memory
///
/// GET /api/v1/dinner/memory/{profile}
async fn memory(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let profile = path.into_inner();
    let snapshot = state.engine.memory_snapshot(&profile).await;
    HttpResponse::Ok().json(snapshot)
}
