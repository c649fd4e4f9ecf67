use rusqlite::{Error as SqlError, ErrorCode};
use thiserror::Error;

/// Failures the UI needs to tell apart from fatal storage errors. Everything
/// else travels through `anyhow` untyped.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Raised when an insert or update would reuse a non-empty course code.
    #[error("course code '{0}' is already in use")]
    DuplicateCode(String),
}

/// Coerce a unique-constraint failure on the course code into the typed
/// error. A `None` code can never conflict, so those errors pass through
/// unchanged, as do all non-constraint failures.
pub(crate) fn code_conflict(err: SqlError, code: Option<&str>) -> anyhow::Error {
    match (err.sqlite_error_code(), code) {
        (Some(ErrorCode::ConstraintViolation), Some(code)) => {
            StoreError::DuplicateCode(code.to_string()).into()
        }
        _ => err.into(),
    }
}

/// True when the error is specifically a UNIQUE violation. The enrollment
/// table carries both a unique pair constraint and foreign keys, so the
/// primary result code alone is not precise enough to mean "duplicate row".
pub(crate) fn is_unique_violation(err: &SqlError) -> bool {
    matches!(
        err,
        SqlError::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
