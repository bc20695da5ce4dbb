//! PostgreSQL-backed `CourseRepository` implementation.
//!
//! A course is one `courses` row plus its `course_students` links. Writes
//! touching both run in a single transaction; reads also use one so the
//! course rows and their links come from the same snapshot.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{
    Course, CourseFilter, CourseId, CourseName, CoursePatch, Enrollment, NewCourse, StudentId,
};

use super::diesel_error_mapping::{
    DieselFailure, ENROLLMENT_STUDENT_FK, classify_diesel_error, pool_failure_message,
};
use super::models::{CourseRow, CourseStudentRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::{course_students, courses};

/// Diesel-backed implementation of the [`CourseRepository`] port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    CourseRepositoryError::connection(pool_failure_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CourseRepositoryError::connection(message),
        DieselFailure::Query(message) => CourseRepositoryError::query(message),
        DieselFailure::ForeignKey(Some(constraint)) if constraint == ENROLLMENT_STUDENT_FK => {
            CourseRepositoryError::unknown_student("student row missing")
        }
        DieselFailure::ForeignKey(_) => CourseRepositoryError::query("foreign key violation"),
    }
}

/// Stored rows should always satisfy the domain rules; report drift as a
/// query failure rather than panicking.
fn row_to_course(row: CourseRow, student_ids: Vec<i64>) -> Result<Course, CourseRepositoryError> {
    let id = CourseId::new(row.id)
        .map_err(|err| CourseRepositoryError::query(format!("invalid stored course id: {err}")))?;
    let name = CourseName::new(row.name).map_err(|err| {
        CourseRepositoryError::query(format!("invalid stored course name: {err}"))
    })?;
    let students = student_ids
        .into_iter()
        .map(StudentId::new)
        .collect::<Result<Enrollment, _>>()
        .map_err(|err| {
            CourseRepositoryError::query(format!("invalid stored student id: {err}"))
        })?;
    Ok(Course::new(id, name, students))
}

fn links_for(course_id: i64, enrollment: &Enrollment) -> Vec<CourseStudentRow> {
    enrollment
        .iter()
        .map(|student| CourseStudentRow {
            course_id,
            student_id: student.get(),
        })
        .collect()
}

/// Enrolled student ids keyed by course, each list ascending.
async fn load_links(
    conn: &mut AsyncPgConnection,
    course_ids: &[i64],
) -> QueryResult<BTreeMap<i64, Vec<i64>>> {
    let rows: Vec<CourseStudentRow> = course_students::table
        .filter(course_students::course_id.eq_any(course_ids))
        .order((course_students::course_id.asc(), course_students::student_id.asc()))
        .select(CourseStudentRow::as_select())
        .load(conn)
        .await?;

    let mut links: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for row in rows {
        links.entry(row.course_id).or_default().push(row.student_id);
    }
    Ok(links)
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = filter.id.map(CourseId::get);
        let name = filter.name.clone();

        let (rows, mut links) = conn
            .transaction(|conn| {
                async move {
                    let mut query = courses::table
                        .select(CourseRow::as_select())
                        .order(courses::id.asc())
                        .into_boxed();
                    if let Some(id) = id {
                        query = query.filter(courses::id.eq(id));
                    }
                    if let Some(name) = name {
                        query = query.filter(courses::name.eq(name));
                    }
                    let rows: Vec<CourseRow> = query.load(conn).await?;

                    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
                    let links = load_links(conn, &ids).await?;
                    Ok::<_, diesel::result::Error>((rows, links))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| {
                let student_ids = links.remove(&row.id).unwrap_or_default();
                row_to_course(row, student_ids)
            })
            .collect()
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let filter = CourseFilter {
            id: Some(id),
            name: None,
        };
        Ok(self.list(&filter).await?.into_iter().next())
    }

    async fn create(&self, course: &NewCourse) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let name = course.name.as_str();
        let enrollment = &course.students;

        let row = conn
            .transaction(|conn| {
                async move {
                    let row: CourseRow = diesel::insert_into(courses::table)
                        .values(&NewCourseRow { name })
                        .returning(CourseRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let links = links_for(row.id, enrollment);
                    if !links.is_empty() {
                        diesel::insert_into(course_students::table)
                            .values(&links)
                            .execute(conn)
                            .await?;
                    }
                    Ok::<_, diesel::result::Error>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let student_ids = enrollment.iter().map(StudentId::get).collect();
        row_to_course(row, student_ids)
    }

    async fn update(
        &self,
        id: CourseId,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let course_id = id.get();
        let name: Option<&str> = patch.name.as_ref().map(CourseName::as_str);
        let enrollment = patch.students.as_ref();

        let updated = conn
            .transaction(|conn| {
                async move {
                    let row: Option<CourseRow> = match name {
                        Some(name) => {
                            diesel::update(courses::table.find(course_id))
                                .set(courses::name.eq(name))
                                .returning(CourseRow::as_returning())
                                .get_result(conn)
                                .await
                                .optional()?
                        }
                        None => {
                            courses::table
                                .find(course_id)
                                .select(CourseRow::as_select())
                                .first(conn)
                                .await
                                .optional()?
                        }
                    };
                    let Some(row) = row else {
                        return Ok(None);
                    };

                    if let Some(enrollment) = enrollment {
                        diesel::delete(
                            course_students::table.filter(course_students::course_id.eq(course_id)),
                        )
                        .execute(conn)
                        .await?;

                        let links = links_for(course_id, enrollment);
                        if !links.is_empty() {
                            diesel::insert_into(course_students::table)
                                .values(&links)
                                .execute(conn)
                                .await?;
                        }
                    }

                    let mut links = load_links(conn, &[course_id]).await?;
                    let student_ids = links.remove(&course_id).unwrap_or_default();
                    Ok::<_, diesel::result::Error>(Some((row, student_ids)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        updated
            .map(|(row, student_ids)| row_to_course(row, student_ids))
            .transpose()
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Enrollment links go with the course via ON DELETE CASCADE.
        let deleted = diesel::delete(courses::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn row_conversion_collects_enrollment() {
        let row = CourseRow {
            id: 4,
            name: "Course 1".to_owned(),
        };
        let course = row_to_course(row, vec![2, 1, 2]).expect("valid row");

        assert_eq!(course.id().get(), 4);
        let ids: Vec<i64> = course.students().iter().map(StudentId::get).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    fn row_conversion_rejects_corrupt_rows() {
        let row = CourseRow {
            id: 0,
            name: "Course".to_owned(),
        };
        let error = row_to_course(row, Vec::new()).expect_err("zero id");
        assert!(matches!(error, CourseRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(
        Some(ENROLLMENT_STUDENT_FK),
        "enrollment references an unknown student: student row missing"
    )]
    #[case(
        Some("course_students_course_id_fkey"),
        "course repository query failed: foreign key violation"
    )]
    #[case(None, "course repository query failed: foreign key violation")]
    fn foreign_key_violations_are_distinguished(
        #[case] constraint: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            Box::new(ConstraintOnly(constraint)),
        );
        assert_eq!(map_diesel_error(error).to_string(), expected);
    }

    #[derive(Debug)]
    struct ConstraintOnly(Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for ConstraintOnly {
        fn message(&self) -> &str {
            "violates foreign key constraint"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.0
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }
}
