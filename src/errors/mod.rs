use std::{env::VarError, io::Error as IoError};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

pub mod kind;
pub mod repository;
pub mod service;

pub use kind::ErrorKind;
pub use repository::RepositoryError;
pub use service::{Operation, ServiceError};

use crate::{db::DatabaseError, types::ApiResponse};

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Represents an error related to environment variables.
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] VarError),

    /// Represents an error related to parsing configuration data.
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    // Domain errors raised by services
    #[error(transparent)]
    Service(#[from] ServiceError),
    // Request rejected before reaching a service (bad JSON, missing envelope, bad path)
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    RouteNotFound(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    // Infrastructure/system errors
    #[error("Server error: {0}")]
    Server(#[from] IoError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Logger error: {0}")]
    Logger(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Service(e) => e.kind(),
            AppError::BadRequest(_) => ErrorKind::InvalidData,
            AppError::RouteNotFound(_) => ErrorKind::NotFound,
            AppError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            AppError::Timeout(_) => ErrorKind::Timeout,
            AppError::Server(_)
            | AppError::Config(_)
            | AppError::Logger(_)
            | AppError::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: kind={} error={}", self.kind(), self);
        }

        HttpResponse::build(status).json(ApiResponse::<()>::error(status, self.to_string()))
    }
}
