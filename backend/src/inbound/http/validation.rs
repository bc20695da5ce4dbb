//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` error whose details name the
//! offending `field` and a machine-readable `code`.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{
    CourseId, CourseName, CourseValidationError, Enrollment, Error, StudentId, StudentName,
    StudentValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationCode {
    MissingField,
    EmptyName,
    NameTooLong,
    InvalidId,
    InvalidDate,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyName => "empty_name",
            Self::NameTooLong => "name_too_long",
            Self::InvalidId => "invalid_id",
            Self::InvalidDate => "invalid_date",
        }
    }
}

/// Name of a request field as clients see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

fn invalid_id_error(field: FieldName, value: i64) -> Error {
    Error::invalid_request(format!("{} must be a positive integer", field.as_str())).with_details(
        json!({
            "field": field.as_str(),
            "value": value,
            "code": ValidationCode::InvalidId.as_str(),
        }),
    )
}

fn invalid_id_index_error(field: FieldName, index: usize, value: i64) -> Error {
    Error::invalid_request(format!(
        "{} must contain positive integers",
        field.as_str()
    ))
    .with_details(json!({
        "field": field.as_str(),
        "index": index,
        "value": value,
        "code": ValidationCode::InvalidId.as_str(),
    }))
}

pub(crate) fn parse_course_name(value: String, field: FieldName) -> Result<CourseName, Error> {
    CourseName::new(value).map_err(|err| match err {
        CourseValidationError::NameTooLong { .. } => {
            field_error(field, ValidationCode::NameTooLong, err.to_string())
        }
        CourseValidationError::EmptyName | CourseValidationError::NonPositiveId => {
            field_error(field, ValidationCode::EmptyName, err.to_string())
        }
    })
}

pub(crate) fn parse_student_name(value: String, field: FieldName) -> Result<StudentName, Error> {
    StudentName::new(value).map_err(|err| match err {
        StudentValidationError::NameTooLong { .. } => {
            field_error(field, ValidationCode::NameTooLong, err.to_string())
        }
        StudentValidationError::EmptyName | StudentValidationError::NonPositiveId => {
            field_error(field, ValidationCode::EmptyName, err.to_string())
        }
    })
}

pub(crate) fn parse_course_id(value: i64, field: FieldName) -> Result<CourseId, Error> {
    CourseId::new(value).map_err(|_| invalid_id_error(field, value))
}

/// Validate student identifiers; repeated identifiers collapse.
pub(crate) fn parse_enrollment(values: Vec<i64>, field: FieldName) -> Result<Enrollment, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            StudentId::new(value).map_err(|_| invalid_id_index_error(field, index, value))
        })
        .collect()
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        Error::invalid_request(format!("{} must be a YYYY-MM-DD date", field.as_str()))
            .with_details(json!({
                "field": field.as_str(),
                "value": value,
                "code": ValidationCode::InvalidDate.as_str(),
            }))
    })
}
