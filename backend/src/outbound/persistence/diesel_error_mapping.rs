//! Shared translation of Diesel and pool failures.
//!
//! Repositories classify errors here, then turn the classification into their
//! own port error. Database messages are logged at `debug` and never copied
//! into the port error, so nothing from the server reaches a client.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constraint guarding `course_students.student_id`.
pub(crate) const ENROLLMENT_STUDENT_FK: &str = "course_students_student_id_fkey";

/// Coarse failure category shared by every repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection was lost or could not be used.
    Connection(&'static str),
    /// The statement failed for any other reason.
    Query(&'static str),
    /// A foreign key was violated; carries the constraint name when known.
    ForeignKey(Option<String>),
}

/// Pool failures always mean the database is unreachable.
pub(crate) fn pool_failure_message(error: PoolError) -> String {
    debug!(%error, "connection pool checkout failed");
    error.into_message()
}

/// Classify a Diesel error, logging its details.
pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ForeignKeyViolation => {
                DieselFailure::ForeignKey(info.constraint_name().map(str::to_owned))
            }
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand => {
                DieselFailure::Connection("database connection error")
            }
            _ => DieselFailure::Query("database error"),
        },
        DieselError::BrokenTransactionManager => {
            DieselFailure::Connection("database connection error")
        }
        _ => DieselFailure::Query("database error"),
    }
}
