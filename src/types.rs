use std::time::Instant;

use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{db::DatabaseHealth, errors::AppError};

pub type Result<T> = std::result::Result<T, AppError>;

/// Envelope shared by every response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, None)
    }

    /// Builds the HTTP response, keeping the status line and body in sync
    pub fn respond(status: StatusCode, message: impl Into<String>, data: T) -> HttpResponse {
        HttpResponse::build(status).json(Self::new(status, message, Some(data)))
    }
}

impl ApiResponse<()> {
    /// Response with a message and `data: null`
    pub fn empty(status: StatusCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::build(status).json(Self::new(status, message, None))
    }
}

#[derive(Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub db_health: Option<DatabaseHealth>,
    pub uptime_seconds: u64,
}

// Define an AppState struct to hold shared application state
pub struct AppState {
    pub start_time: Instant,
    pub version: String,
}
