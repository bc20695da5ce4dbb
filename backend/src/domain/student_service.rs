//! Student domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{StudentRepository, StudentRepositoryError, StudentsDirectory};
use crate::domain::{Error, NewStudent, Student};

/// Student service implementing [`StudentsDirectory`].
#[derive(Clone)]
pub struct StudentService<S> {
    students: Arc<S>,
}

impl<S> StudentService<S> {
    /// Create a service over the given repository.
    pub fn new(students: Arc<S>) -> Self {
        Self { students }
    }
}

fn map_repository_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
    }
}

#[async_trait]
impl<S> StudentsDirectory for StudentService<S>
where
    S: StudentRepository,
{
    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        self.students.list().await.map_err(map_repository_error)
    }

    async fn create_student(&self, student: NewStudent) -> Result<Student, Error> {
        let created = self
            .students
            .create(&student)
            .await
            .map_err(map_repository_error)?;
        info!(student_id = created.id().get(), "student created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockStudentRepository;
    use crate::domain::{ErrorCode, StudentId, StudentName};
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn create_returns_stored_student() {
        let mut repo = MockStudentRepository::new();
        repo.expect_create().times(1).returning(|student| {
            Ok(Student::new(
                StudentId::new(1).expect("positive id"),
                student.name.clone(),
                student.birth_date,
            ))
        });

        let service = StudentService::new(Arc::new(repo));
        let birth_date = NaiveDate::from_ymd_opt(2001, 4, 9);
        let created = service
            .create_student(NewStudent {
                name: StudentName::new("Ada").expect("valid name"),
                birth_date,
            })
            .await
            .expect("create succeeds");

        assert_eq!(created.name().as_str(), "Ada");
        assert_eq!(created.birth_date(), birth_date);
    }

    #[rstest]
    #[case(StudentRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StudentRepositoryError::query("broken"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_maps_repository_errors(
        #[case] failure: StudentRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockStudentRepository::new();
        repo.expect_list().return_once(move || Err(failure));

        let service = StudentService::new(Arc::new(repo));
        let error = service.list_students().await.expect_err("list fails");

        assert_eq!(error.code(), expected);
    }
}
