//! PostgreSQL-backed `StudentRepository` implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{NewStudent, Student, StudentId, StudentName};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_failure_message};
use super::models::{NewStudentRow, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the [`StudentRepository`] port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    StudentRepositoryError::connection(pool_failure_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> StudentRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => StudentRepositoryError::connection(message),
        DieselFailure::Query(message) => StudentRepositoryError::query(message),
        DieselFailure::ForeignKey(_) => StudentRepositoryError::query("foreign key violation"),
    }
}

fn row_to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    let id = StudentId::new(row.id).map_err(|err| {
        StudentRepositoryError::query(format!("invalid stored student id: {err}"))
    })?;
    let name = StudentName::new(row.name).map_err(|err| {
        StudentRepositoryError::query(format!("invalid stored student name: {err}"))
    })?;
    Ok(Student::new(id, name, row.birth_date))
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .select(StudentRow::as_select())
            .order(students::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_student).collect()
    }

    async fn create(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewStudentRow {
            name: student.name.as_str(),
            birth_date: student.birth_date,
        };

        let row: StudentRow = diesel::insert_into(students::table)
            .values(&new_row)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_student(row)
    }

    async fn find_missing(
        &self,
        ids: &[StudentId],
    ) -> Result<Vec<StudentId>, StudentRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let found: BTreeSet<i64> = students::table
            .filter(students::id.eq_any(&raw))
            .select(students::id)
            .load::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .collect();

        let requested: BTreeSet<StudentId> = ids.iter().copied().collect();
        Ok(requested
            .into_iter()
            .filter(|id| !found.contains(&id.get()))
            .collect())
    }
}
