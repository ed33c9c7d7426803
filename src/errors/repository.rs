use sqlx::Error as SqlxError;
use thiserror::Error;

use super::ErrorKind;

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No row matched the lookup
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Unique constraint violation on an entity table
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Unique constraint violation on a join table
    #[error("Relation already exists")]
    RelationExists,

    /// Foreign key constraint violation
    #[error("Invalid foreign key: {0}")]
    InvalidForeignKey(String),

    /// Optimistic concurrency check failed
    #[error("Version conflict: {0}")]
    VersionConflict(String),

    /// Check or not-null constraint violation
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Relation check failed: {0}")]
    RelationCheckFailed(#[source] SqlxError),

    #[error("Create failed: {0}")]
    CreateFailed(#[source] SqlxError),

    #[error("Update failed: {0}")]
    UpdateFailed(#[source] SqlxError),

    #[error("Delete failed: {0}")]
    DeleteFailed(#[source] SqlxError),

    #[error("Get failed: {0}")]
    GetFailed(#[source] SqlxError),

    #[error("Scan failed: {0}")]
    ScanFailed(#[source] SqlxError),

    #[error("Iterate failed: {0}")]
    IterateFailed(#[source] SqlxError),

    /// Begin, commit or rollback failed, or the transaction was already closed
    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::RelationExists => ErrorKind::RelationExists,
            Self::InvalidForeignKey(_) => ErrorKind::InvalidForeignKey,
            Self::VersionConflict(_) => ErrorKind::VersionConflict,
            Self::InvalidData(_) => ErrorKind::InvalidData,
            Self::RelationCheckFailed(_) => ErrorKind::RelationCheckFailed,
            Self::CreateFailed(_) => ErrorKind::CreateFailed,
            Self::UpdateFailed(_) => ErrorKind::UpdateFailed,
            Self::DeleteFailed(_) => ErrorKind::DeleteFailed,
            Self::GetFailed(_) => ErrorKind::GetFailed,
            Self::ScanFailed(_) => ErrorKind::ScanFailed,
            Self::IterateFailed(_) => ErrorKind::IterateFailed,
            Self::Transaction(_) => ErrorKind::Transaction,
        }
    }

    /// Converts a raw sqlx error raised by an entity-table statement.
    ///
    /// Constraint violations become their classified variant; anything else
    /// is wrapped by `fallback`, which picks the operation-specific variant.
    pub fn from_entity(
        err: SqlxError,
        entity: &str,
        fallback: fn(SqlxError) -> RepositoryError,
    ) -> Self {
        match classify_database_error(&err) {
            Some(ErrorKind::Duplicate) => {
                Self::Duplicate(format!("{} already exists ({})", entity, constraint_of(&err)))
            }
            Some(ErrorKind::InvalidForeignKey) => Self::InvalidForeignKey(format!(
                "{} references a missing record ({})",
                entity,
                constraint_of(&err)
            )),
            Some(ErrorKind::InvalidData) => {
                Self::InvalidData(format!("{} violates a table constraint", entity))
            }
            Some(ErrorKind::NotFound) => Self::NotFound(format!("{} not found", entity)),
            _ => fallback(err),
        }
    }

    /// Same as [`RepositoryError::from_entity`] for join tables, where a
    /// unique violation means the pair is already linked.
    pub fn from_relation(
        err: SqlxError,
        relation: &str,
        fallback: fn(SqlxError) -> RepositoryError,
    ) -> Self {
        match classify_database_error(&err) {
            Some(ErrorKind::Duplicate) => Self::RelationExists,
            _ => Self::from_entity(err, relation, fallback),
        }
    }
}

/// Maps a sqlx error to the taxonomy using PostgreSQL SQLSTATE codes.
///
/// Returns `None` when the failure carries no meaning beyond "the statement
/// failed"; the caller then wraps it with the operation-specific kind.
pub fn classify_database_error(err: &SqlxError) -> Option<ErrorKind> {
    match err {
        SqlxError::RowNotFound => Some(ErrorKind::NotFound),
        SqlxError::Database(db_err) => match db_err.code().as_deref() {
            // unique_violation
            Some("23505") => Some(ErrorKind::Duplicate),
            // foreign_key_violation
            Some("23503") => Some(ErrorKind::InvalidForeignKey),
            // check_violation, not_null_violation
            Some("23514") | Some("23502") => Some(ErrorKind::InvalidData),
            _ => None,
        },
        _ => None,
    }
}

fn constraint_of(err: &SqlxError) -> String {
    match err {
        SqlxError::Database(db_err) => db_err.constraint().unwrap_or("unknown").to_string(),
        _ => "unknown".to_string(),
    }
}

/// Database error carrying a chosen SQLSTATE, for exercising classification
/// without a server
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct SqlStateError {
    code: &'static str,
    constraint: Option<&'static str>,
}

#[cfg(test)]
impl SqlStateError {
    pub(crate) fn sqlx(code: &'static str, constraint: Option<&'static str>) -> SqlxError {
        SqlxError::Database(Box::new(Self { code, constraint }))
    }
}

#[cfg(test)]
impl std::fmt::Display for SqlStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sqlstate {}", self.code)
    }
}

#[cfg(test)]
impl std::error::Error for SqlStateError {}

#[cfg(test)]
impl sqlx::error::DatabaseError for SqlStateError {
    fn message(&self) -> &str {
        "constraint violated"
    }

    fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
        Some(self.code.into())
    }

    fn constraint(&self) -> Option<&str> {
        self.constraint
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        match self.code {
            "23505" => sqlx::error::ErrorKind::UniqueViolation,
            "23503" => sqlx::error::ErrorKind::ForeignKeyViolation,
            "23502" => sqlx::error::ErrorKind::NotNullViolation,
            "23514" => sqlx::error::ErrorKind::CheckViolation,
            _ => sqlx::error::ErrorKind::Other,
        }
    }
}
