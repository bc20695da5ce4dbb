//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types before returning.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{course_students, courses, students};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub name: &'a str,
    pub birth_date: Option<NaiveDate>,
}

/// Enrollment link; also used to read links back.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = course_students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseStudentRow {
    pub course_id: i64,
    pub student_id: i64,
}
