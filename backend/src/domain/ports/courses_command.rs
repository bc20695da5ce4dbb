//! Driving port for course writes.
//!
//! Implementations enforce the enrollment cap and check that every enrolled
//! student exists before anything is persisted.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CoursePatch, Error, NewCourse};

/// Write-side use cases over courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesCommand: Send + Sync {
    /// Create a course with its initial enrollment.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when the enrollment exceeds the cap or names
    /// unknown students.
    async fn create_course(&self, course: NewCourse) -> Result<Course, Error>;

    /// Apply a partial update to an existing course.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the course does not exist and
    /// `invalid_request` for the same enrollment violations as create.
    async fn update_course(&self, id: CourseId, patch: CoursePatch) -> Result<Course, Error>;

    /// Delete a course.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the course does not exist.
    async fn delete_course(&self, id: CourseId) -> Result<(), Error>;
}
