//! Course data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::student::NAME_MAX;
use super::Enrollment;

/// Validation errors returned by the course constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    /// Identifiers are assigned by the store and always positive.
    #[error("course id must be a positive integer")]
    NonPositiveId,
    /// The name was blank once trimmed.
    #[error("course name must not be empty")]
    EmptyName,
    /// The name exceeded the column width.
    #[error("course name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Store-assigned course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CourseId(i64);

impl CourseId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i64) -> Result<Self, CourseValidationError> {
        if id <= 0 {
            return Err(CourseValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// The raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for CourseId {
    type Error = CourseValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseId> for i64 {
    fn from(value: CourseId) -> Self {
        value.0
    }
}

/// Course title.
///
/// # Examples
/// ```
/// use backend::domain::CourseName;
///
/// let name = CourseName::new("  Course 1 ").expect("valid name");
/// assert_eq!(name.as_str(), "Course 1");
/// assert!(CourseName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseName(String);

impl CourseName {
    /// Validate and construct a name; surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>) -> Result<Self, CourseValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(CourseValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CourseName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CourseName {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseName> for String {
    fn from(value: CourseName) -> Self {
        value.0
    }
}

/// A persisted course and the students enrolled in it.
///
/// ## Invariants
/// - `students` holds distinct identifiers in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    name: CourseName,
    students: Enrollment,
}

impl Course {
    /// Assemble a course from validated parts.
    pub fn new(id: CourseId, name: CourseName, students: Enrollment) -> Self {
        Self { id, name, students }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Course title.
    pub fn name(&self) -> &CourseName {
        &self.name
    }

    /// Enrolled students.
    pub fn students(&self) -> &Enrollment {
        &self.students
    }

    /// Apply a partial update, keeping fields the patch leaves out.
    pub fn apply(self, patch: &CoursePatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or(self.name),
            students: patch.students.clone().unwrap_or(self.students),
        }
    }
}

/// Data required to insert a course; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: CourseName,
    pub students: Enrollment,
}

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    pub name: Option<CourseName>,
    pub students: Option<Enrollment>,
}

impl CoursePatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.students.is_none()
    }
}

/// Listing filter; both criteria combine with AND.
///
/// `name` is compared exactly, without trimming, so a filter value that could
/// never be stored simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub id: Option<CourseId>,
    pub name: Option<String>,
}

impl CourseFilter {
    /// Filter that matches every course.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether `course` satisfies every supplied criterion.
    pub fn matches(&self, course: &Course) -> bool {
        let id_matches = self.id.is_none_or(|id| id == course.id());
        let name_matches = self
            .name
            .as_deref()
            .is_none_or(|name| name == course.name().as_str());
        id_matches && name_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn course() -> Course {
        let students = [1, 2]
            .map(|raw| StudentId::new(raw).expect("positive id"))
            .into_iter()
            .collect();
        Course::new(
            CourseId::new(3).expect("positive id"),
            CourseName::new("Algebra").expect("valid name"),
            students,
        )
    }

    #[rstest]
    fn course_name_rejects_overlong_input() {
        let raw = "y".repeat(NAME_MAX + 1);
        assert_eq!(
            CourseName::new(raw),
            Err(CourseValidationError::NameTooLong { max: NAME_MAX })
        );
    }

    #[rstest]
    fn course_id_rejects_zero() {
        assert_eq!(CourseId::new(0), Err(CourseValidationError::NonPositiveId));
    }

    #[rstest]
    fn apply_keeps_omitted_fields(course: Course) {
        let patch = CoursePatch {
            name: Some(CourseName::new("Geometry").expect("valid name")),
            students: None,
        };
        let updated = course.clone().apply(&patch);

        assert_eq!(updated.id(), course.id());
        assert_eq!(updated.name().as_str(), "Geometry");
        assert_eq!(updated.students(), course.students());
    }

    #[rstest]
    fn apply_replaces_enrollment_when_supplied(course: Course) {
        let patch = CoursePatch {
            name: None,
            students: Some(Enrollment::new()),
        };
        let updated = course.apply(&patch);

        assert_eq!(updated.name().as_str(), "Algebra");
        assert!(updated.students().is_empty());
    }

    #[rstest]
    fn empty_patch_reports_empty() {
        assert!(CoursePatch::default().is_empty());
    }

    #[rstest]
    #[case(CourseFilter::all(), true)]
    #[case(CourseFilter { id: Some(CourseId::new(3).expect("id")), name: None }, true)]
    #[case(CourseFilter { id: Some(CourseId::new(4).expect("id")), name: None }, false)]
    #[case(CourseFilter { id: None, name: Some("Algebra".to_owned()) }, true)]
    #[case(CourseFilter { id: None, name: Some("algebra".to_owned()) }, false)]
    #[case(
        CourseFilter { id: Some(CourseId::new(3).expect("id")), name: Some("Other".to_owned()) },
        false
    )]
    fn filter_matches_exactly(course: Course, #[case] filter: CourseFilter, #[case] expected: bool) {
        assert_eq!(filter.matches(&course), expected);
    }
}
