//! Course domain service.
//!
//! Implements the course driving ports on top of the course and student
//! repositories. All enrollment validation happens here, before any write is
//! handed to the repository, so a rejected request never persists anything.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, CoursesCommand, CoursesQuery, StudentRepository,
    StudentRepositoryError,
};
use crate::domain::{
    Course, CourseFilter, CourseId, CoursePatch, Enrollment, EnrollmentError, EnrollmentPolicy,
    Error, NewCourse, StudentId,
};

/// Details code attached when the enrollment cap is exceeded.
pub const ENROLLMENT_CAP_EXCEEDED: &str = "enrollment_cap_exceeded";
/// Details code attached when an enrollment names a missing student.
pub const UNKNOWN_STUDENT: &str = "unknown_student";

/// Course service implementing [`CoursesQuery`] and [`CoursesCommand`].
#[derive(Clone)]
pub struct CourseService<C, S> {
    courses: Arc<C>,
    students: Arc<S>,
    policy: EnrollmentPolicy,
}

impl<C, S> CourseService<C, S> {
    /// Create a service over the given repositories and enrollment policy.
    pub fn new(courses: Arc<C>, students: Arc<S>, policy: EnrollmentPolicy) -> Self {
        Self {
            courses,
            students,
            policy,
        }
    }
}

fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::UnknownStudent { message } => {
            Error::invalid_request(format!("enrollment references an unknown student: {message}"))
                .with_details(json!({
                    "field": "students",
                    "code": UNKNOWN_STUDENT,
                }))
        }
    }
}

fn map_student_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
    }
}

fn course_not_found(id: CourseId) -> Error {
    Error::not_found(format!("course {id} not found"))
}

fn enrollment_error(error: EnrollmentError) -> Error {
    let message = error.to_string();
    match error {
        EnrollmentError::CapacityExceeded { max, requested } => {
            Error::invalid_request(message).with_details(json!({
                "field": "students",
                "code": ENROLLMENT_CAP_EXCEEDED,
                "max": max,
                "requested": requested,
            }))
        }
    }
}

fn unknown_students_error(missing: &[StudentId]) -> Error {
    let ids: Vec<i64> = missing.iter().map(|id| id.get()).collect();
    let listed = ids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Error::invalid_request(format!("unknown student ids: {listed}")).with_details(json!({
        "field": "students",
        "code": UNKNOWN_STUDENT,
        "ids": ids,
    }))
}

impl<C, S> CourseService<C, S>
where
    C: CourseRepository,
    S: StudentRepository,
{
    /// Apply the cap, then confirm every student exists.
    async fn validate_enrollment(&self, enrollment: &Enrollment) -> Result<(), Error> {
        self.policy.check(enrollment).map_err(enrollment_error)?;
        if enrollment.is_empty() {
            return Ok(());
        }

        let missing = self
            .students
            .find_missing(&enrollment.to_vec())
            .await
            .map_err(map_student_error)?;
        if missing.is_empty() {
            Ok(())
        } else {
            Err(unknown_students_error(&missing))
        }
    }
}

#[async_trait]
impl<C, S> CoursesQuery for CourseService<C, S>
where
    C: CourseRepository,
    S: StudentRepository,
{
    async fn list_courses(&self, filter: CourseFilter) -> Result<Vec<Course>, Error> {
        self.courses.list(&filter).await.map_err(map_course_error)
    }

    async fn get_course(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| course_not_found(id))
    }
}

#[async_trait]
impl<C, S> CoursesCommand for CourseService<C, S>
where
    C: CourseRepository,
    S: StudentRepository,
{
    async fn create_course(&self, course: NewCourse) -> Result<Course, Error> {
        self.validate_enrollment(&course.students).await?;

        let created = self
            .courses
            .create(&course)
            .await
            .map_err(map_course_error)?;
        info!(
            course_id = created.id().get(),
            student_count = created.students().len(),
            "course created"
        );
        Ok(created)
    }

    async fn update_course(&self, id: CourseId, patch: CoursePatch) -> Result<Course, Error> {
        if let Some(students) = &patch.students {
            self.validate_enrollment(students).await?;
        }
        if patch.is_empty() {
            debug!(course_id = id.get(), "empty course patch");
        }

        let updated = self
            .courses
            .update(id, &patch)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| course_not_found(id))?;
        info!(
            course_id = updated.id().get(),
            student_count = updated.students().len(),
            "course updated"
        );
        Ok(updated)
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), Error> {
        let deleted = self.courses.delete(id).await.map_err(map_course_error)?;
        if !deleted {
            return Err(course_not_found(id));
        }
        info!(course_id = id.get(), "course deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
