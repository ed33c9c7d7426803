use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;

use crate::{errors::AppError, types::Result};

pub mod address;
pub mod category;
pub mod client;
pub mod contact;
pub mod relation;
pub mod supplier;
pub mod supplier_full;

/// Fallback for a known resource hit with an unsupported method
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse> {
    debug!("Method not allowed: {} {}", req.method(), req.path());
    Err(AppError::MethodNotAllowed)
}

/// Fallback for paths no resource matches
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse> {
    Err(AppError::RouteNotFound(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}

/// Turns extractor failures (bad JSON, non-numeric path IDs, malformed
/// query strings) into 400 envelopes instead of actix's plain-text bodies
pub fn configure_extractors(cfg: &mut web::ServiceConfig, json_limit: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(json_limit)
            .error_handler(|err, _req| AppError::BadRequest(format!("invalid JSON body: {}", err)).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(format!("invalid path: {}", err)).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(format!("invalid query: {}", err)).into()),
    );
}
