//! Port for student persistence.

use async_trait::async_trait;

use crate::domain::{NewStudent, Student, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "student repository query failed: {message}",
    }
}

/// Student storage and lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Every student, ordered by ascending identifier.
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Insert a student and return it with its assigned identifier.
    async fn create(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError>;

    /// The subset of `ids` that has no stored student, in ascending order.
    async fn find_missing(
        &self,
        ids: &[StudentId],
    ) -> Result<Vec<StudentId>, StudentRepositoryError>;
}
