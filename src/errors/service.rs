use thiserror::Error;

use super::{ErrorKind, RepositoryError};

/// Operation a service was performing when a repository call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Get,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Zero ID: {0} must be greater than zero")]
    ZeroId(&'static str),

    #[error("Missing model: {0}")]
    NilModel(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Relation exists: relation already exists")]
    RelationExists,

    #[error("Invalid foreign key: {0}")]
    InvalidForeignKey(String),

    #[error("Version conflict: {0}")]
    VersionConflict(String),

    #[error("Relation check failed: {0}")]
    RelationCheckFailed(String),

    #[error("Create failed: {0}")]
    CreateFailed(String),

    #[error("Update failed: {0}")]
    UpdateFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Get failed: {0}")]
    GetFailed(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    /// The original failure plus the error raised while rolling it back
    #[error("{cause}; rollback failed: {rollback}")]
    RollbackFailed {
        cause: Box<ServiceError>,
        rollback: String,
    },
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroId(_) => ErrorKind::ZeroId,
            Self::NilModel(_) => ErrorKind::NilModel,
            Self::InvalidData(_) => ErrorKind::InvalidData,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::RelationExists => ErrorKind::RelationExists,
            Self::InvalidForeignKey(_) => ErrorKind::InvalidForeignKey,
            Self::VersionConflict(_) => ErrorKind::VersionConflict,
            Self::RelationCheckFailed(_) => ErrorKind::RelationCheckFailed,
            Self::CreateFailed(_) => ErrorKind::CreateFailed,
            Self::UpdateFailed(_) => ErrorKind::UpdateFailed,
            Self::DeleteFailed(_) => ErrorKind::DeleteFailed,
            Self::GetFailed(_) => ErrorKind::GetFailed,
            Self::Transaction(_) => ErrorKind::Transaction,
            Self::RollbackFailed { cause, .. } => cause.kind(),
        }
    }

    /// Wraps a repository error raised during `op`.
    ///
    /// Classified errors keep their kind so callers can tell a bad reference
    /// from a conflict from a transient failure; unclassified ones get the
    /// operation prefix.
    pub fn from_repository(op: Operation, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::Duplicate(msg) => Self::Duplicate(msg),
            RepositoryError::RelationExists => Self::RelationExists,
            RepositoryError::InvalidForeignKey(msg) => Self::InvalidForeignKey(msg),
            RepositoryError::VersionConflict(msg) => Self::VersionConflict(msg),
            RepositoryError::InvalidData(msg) => Self::InvalidData(msg),
            RepositoryError::RelationCheckFailed(e) => Self::RelationCheckFailed(e.to_string()),
            RepositoryError::Transaction(msg) => Self::Transaction(msg),
            other => {
                let msg = other.to_string();
                match op {
                    Operation::Create => Self::CreateFailed(msg),
                    Operation::Update => Self::UpdateFailed(msg),
                    Operation::Delete => Self::DeleteFailed(msg),
                    Operation::Get => Self::GetFailed(msg),
                }
            }
        }
    }

    /// Combines a failure with the error its rollback produced.
    pub fn with_rollback_failure(self, rollback: RepositoryError) -> Self {
        Self::RollbackFailed {
            cause: Box::new(self),
            rollback: rollback.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Flatten field errors into a single string
        let mut fields = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let reasons = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .clone()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", field, reasons)
            })
            .collect::<Vec<_>>();
        fields.sort();
        ServiceError::InvalidData(fields.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classified_errors_pass_through() {
        let err = ServiceError::from_repository(Operation::Create, RepositoryError::RelationExists);
        assert_eq!(err.kind(), ErrorKind::RelationExists);

        let err = ServiceError::from_repository(
            Operation::Delete,
            RepositoryError::InvalidForeignKey("category".into()),
        );
        assert_eq!(err.kind(), ErrorKind::InvalidForeignKey);
    }

    #[test]
    fn test_generic_errors_get_operation_prefix() {
        let err = ServiceError::from_repository(
            Operation::Get,
            RepositoryError::ScanFailed(sqlx::Error::RowNotFound),
        );
        assert_eq!(err.kind(), ErrorKind::GetFailed);
        assert!(err.to_string().starts_with("Get failed: Scan failed"));

        let err = ServiceError::from_repository(
            Operation::Delete,
            RepositoryError::DeleteFailed(sqlx::Error::PoolClosed),
        );
        assert!(err.to_string().starts_with("Delete failed"));
    }

    #[test]
    fn test_rollback_failure_keeps_both_messages() {
        let err = ServiceError::CreateFailed("insert contact".into())
            .with_rollback_failure(RepositoryError::Transaction("connection reset".into()));

        assert_eq!(err.kind(), ErrorKind::CreateFailed);
        let text = err.to_string();
        assert!(text.contains("insert contact"));
        assert!(text.contains("connection reset"));
    }
}
