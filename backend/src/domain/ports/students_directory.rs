//! Driving port for student operations.

use async_trait::async_trait;

use crate::domain::{Error, NewStudent, Student};

/// Use cases over the student roster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsDirectory: Send + Sync {
    /// Every student in identifier order.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;

    /// Register a new student.
    async fn create_student(&self, student: NewStudent) -> Result<Student, Error>;
}
