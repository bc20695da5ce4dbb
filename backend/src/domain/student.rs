//! Student data model.
//!
//! Students are created independently of courses and are only ever
//! referenced by a course's enrollment set, never owned by it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for student and course names.
pub const NAME_MAX: usize = 255;

/// Validation errors returned by the student constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// Identifiers are assigned by the store and always positive.
    #[error("student id must be a positive integer")]
    NonPositiveId,
    /// The name was blank once trimmed.
    #[error("student name must not be empty")]
    EmptyName,
    /// The name exceeded [`NAME_MAX`] characters.
    #[error("student name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Store-assigned student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StudentId(i64);

impl StudentId {
    /// Validate and wrap a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::StudentId;
    ///
    /// assert_eq!(StudentId::new(7).expect("positive id").get(), 7);
    /// assert!(StudentId::new(0).is_err());
    /// ```
    pub fn new(id: i64) -> Result<Self, StudentValidationError> {
        if id <= 0 {
            return Err(StudentValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// The raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for StudentId {
    type Error = StudentValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StudentId> for i64 {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

/// Student display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentName(String);

impl StudentName {
    /// Validate and construct a name; surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>) -> Result<Self, StudentValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(StudentValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for StudentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StudentName {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StudentName> for String {
    fn from(value: StudentName) -> Self {
        value.0
    }
}

/// A persisted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: StudentId,
    name: StudentName,
    birth_date: Option<NaiveDate>,
}

impl Student {
    /// Assemble a student from validated parts.
    pub fn new(id: StudentId, name: StudentName, birth_date: Option<NaiveDate>) -> Self {
        Self {
            id,
            name,
            birth_date,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> StudentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &StudentName {
        &self.name
    }

    /// Optional date of birth.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }
}

/// Data required to insert a student; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: StudentName,
    pub birth_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn student_id_rejects_non_positive(#[case] raw: i64) {
        assert_eq!(
            StudentId::new(raw),
            Err(StudentValidationError::NonPositiveId)
        );
    }

    #[rstest]
    fn student_name_trims_whitespace() {
        let name = StudentName::new("  Ada  ").expect("valid name");
        assert_eq!(name.as_str(), "Ada");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn student_name_rejects_blank(#[case] raw: &str) {
        assert_eq!(StudentName::new(raw), Err(StudentValidationError::EmptyName));
    }

    #[rstest]
    fn student_name_rejects_overlong_input() {
        let raw = "x".repeat(NAME_MAX + 1);
        assert_eq!(
            StudentName::new(raw),
            Err(StudentValidationError::NameTooLong { max: NAME_MAX })
        );
    }

    #[rstest]
    fn student_id_deserialisation_validates() {
        assert!(serde_json::from_str::<StudentId>("5").is_ok());
        assert!(serde_json::from_str::<StudentId>("-5").is_err());
    }
}
