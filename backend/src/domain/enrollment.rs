//! Course enrollment set and the capacity rule guarding it.
//!
//! An [`Enrollment`] is a set: repeated student identifiers collapse, and
//! the capacity check counts distinct students only.

use std::collections::BTreeSet;

use super::StudentId;

/// Cap applied when no explicit configuration is supplied.
pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 10;

/// Distinct students attached to one course, ordered by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrollment(BTreeSet<StudentId>);

impl Enrollment {
    /// Empty enrollment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct students.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no students are enrolled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate enrolled students in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.0.iter().copied()
    }

    /// Enrolled identifiers as an ordered vector.
    pub fn to_vec(&self) -> Vec<StudentId> {
        self.iter().collect()
    }
}

impl FromIterator<StudentId> for Enrollment {
    fn from_iter<T: IntoIterator<Item = StudentId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Rejections raised by [`EnrollmentPolicy::check`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentError {
    /// More distinct students were requested than the cap allows.
    #[error("a course may enroll at most {max} students, {requested} requested")]
    CapacityExceeded { max: usize, requested: usize },
}

/// Process-wide enrollment rule.
///
/// Built once from configuration and handed to the course service; it is
/// never mutated while serving requests.
///
/// # Examples
/// ```
/// use backend::domain::{Enrollment, EnrollmentPolicy, StudentId};
///
/// let policy = EnrollmentPolicy::new(2);
/// let ids = [1, 2, 3].map(|raw| StudentId::new(raw).expect("positive id"));
/// let enrollment: Enrollment = ids.into_iter().collect();
/// assert!(policy.check(&enrollment).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentPolicy {
    max_students_per_course: usize,
}

impl EnrollmentPolicy {
    /// Policy allowing at most `max_students_per_course` students per course.
    pub const fn new(max_students_per_course: usize) -> Self {
        Self {
            max_students_per_course,
        }
    }

    /// Configured cap.
    pub fn max_students_per_course(&self) -> usize {
        self.max_students_per_course
    }

    /// Accept `enrollment` if it fits under the cap.
    pub fn check(&self, enrollment: &Enrollment) -> Result<(), EnrollmentError> {
        let requested = enrollment.len();
        if requested > self.max_students_per_course {
            return Err(EnrollmentError::CapacityExceeded {
                max: self.max_students_per_course,
                requested,
            });
        }
        Ok(())
    }
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STUDENTS_PER_COURSE)
    }
}
