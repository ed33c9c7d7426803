use std::fmt;

use actix_web::http::StatusCode;

/// Closed set of error categories shared by every layer.
///
/// Repositories classify raw database failures into one of these, services
/// keep the classification when it matters to the caller, and the HTTP layer
/// maps the kind (and only the kind) to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ZeroId,
    NilModel,
    InvalidData,
    NotFound,
    Duplicate,
    RelationExists,
    InvalidForeignKey,
    VersionConflict,
    RelationCheckFailed,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
    GetFailed,
    ScanFailed,
    IterateFailed,
    Transaction,
    Timeout,
    MethodNotAllowed,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Duplicate | ErrorKind::RelationExists | ErrorKind::VersionConflict => {
                StatusCode::CONFLICT
            }
            ErrorKind::ZeroId
            | ErrorKind::NilModel
            | ErrorKind::InvalidData
            | ErrorKind::InvalidForeignKey => StatusCode::BAD_REQUEST,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::RelationCheckFailed
            | ErrorKind::CreateFailed
            | ErrorKind::UpdateFailed
            | ErrorKind::DeleteFailed
            | ErrorKind::GetFailed
            | ErrorKind::ScanFailed
            | ErrorKind::IterateFailed
            | ErrorKind::Transaction
            | ErrorKind::Timeout
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ZeroId => "zero_id",
            ErrorKind::NilModel => "nil_model",
            ErrorKind::InvalidData => "invalid_data",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::RelationExists => "relation_exists",
            ErrorKind::InvalidForeignKey => "invalid_foreign_key",
            ErrorKind::VersionConflict => "version_conflict",
            ErrorKind::RelationCheckFailed => "relation_check_failed",
            ErrorKind::CreateFailed => "create_failed",
            ErrorKind::UpdateFailed => "update_failed",
            ErrorKind::DeleteFailed => "delete_failed",
            ErrorKind::GetFailed => "get_failed",
            ErrorKind::ScanFailed => "scan_failed",
            ErrorKind::IterateFailed => "iterate_failed",
            ErrorKind::Transaction => "transaction",
            ErrorKind::Timeout => "timeout",
            ErrorKind::MethodNotAllowed => "method_not_allowed",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
