//! Port for course persistence.
//!
//! Adapters store a course together with its enrollment set. Every write that
//! touches more than one row (course plus enrollment links) must commit
//! atomically.

use async_trait::async_trait;

use crate::domain::{Course, CourseFilter, CourseId, CoursePatch, NewCourse};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
        /// An enrollment referenced a student row that does not exist.
        UnknownStudent { message: String } =>
            "enrollment references an unknown student: {message}",
    }
}

/// Course storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Courses matching `filter`, ordered by ascending identifier.
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Fetch one course, or `None` when it does not exist.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Insert a course and its enrollment links.
    async fn create(&self, course: &NewCourse) -> Result<Course, CourseRepositoryError>;

    /// Apply `patch` to an existing course.
    ///
    /// A supplied enrollment replaces the stored one wholesale. Returns `None`
    /// when the course does not exist.
    async fn update(
        &self,
        id: CourseId,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Remove a course and its enrollment links, leaving students intact.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;
}
