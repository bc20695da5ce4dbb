//! Driving port for course reads.
//!
//! Inbound adapters list and fetch courses through this port without
//! depending on the persistence layer.

use async_trait::async_trait;

use crate::domain::{Course, CourseFilter, CourseId, Error};

/// Read-side use cases over courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesQuery: Send + Sync {
    /// Courses matching `filter`; an unmatched filter yields an empty list.
    async fn list_courses(&self, filter: CourseFilter) -> Result<Vec<Course>, Error>;

    /// One course by identifier.
    ///
    /// # Errors
    ///
    /// Returns a `not_found` error when the course does not exist.
    async fn get_course(&self, id: CourseId) -> Result<Course, Error>;
}
