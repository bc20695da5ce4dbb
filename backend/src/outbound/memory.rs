//! In-process store implementing the course and student repository ports.
//!
//! Used when no database is configured and by HTTP tests. It mirrors the
//! relational constraints of the PostgreSQL schema: identifiers are assigned
//! sequentially from 1, enrollments must reference existing students, and
//! deleting a course leaves students untouched.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, StudentRepository, StudentRepositoryError,
};
use crate::domain::{
    Course, CourseFilter, CourseId, CourseName, CoursePatch, Enrollment, NewCourse, NewStudent,
    Student, StudentId,
};

#[derive(Debug, Default)]
struct State {
    courses: BTreeMap<CourseId, (CourseName, Enrollment)>,
    students: BTreeMap<StudentId, Student>,
    last_course_id: i64,
    last_student_id: i64,
}

impl State {
    fn course(&self, id: CourseId) -> Option<Course> {
        self.courses
            .get(&id)
            .map(|(name, students)| Course::new(id, name.clone(), students.clone()))
    }

    fn first_unknown_student(&self, enrollment: &Enrollment) -> Option<StudentId> {
        enrollment
            .iter()
            .find(|id| !self.students.contains_key(id))
    }
}

/// Shared in-memory course and student store.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use backend::outbound::memory::InMemoryStore;
///
/// let store = Arc::new(InMemoryStore::new());
/// assert_eq!(store.course_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored courses.
    pub fn course_count(&self) -> usize {
        self.read_state().courses.len()
    }

    /// Number of stored students.
    pub fn student_count(&self) -> usize {
        self.read_state().students.len()
    }

    /// Counts stay accurate after a panicking writer.
    fn read_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_for_courses(&self) -> Result<MutexGuard<'_, State>, CourseRepositoryError> {
        self.state
            .lock()
            .map_err(|_| CourseRepositoryError::query("in-memory store lock poisoned"))
    }

    fn lock_for_students(&self) -> Result<MutexGuard<'_, State>, StudentRepositoryError> {
        self.state
            .lock()
            .map_err(|_| StudentRepositoryError::query("in-memory store lock poisoned"))
    }
}

fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

fn unknown_student(id: StudentId) -> CourseRepositoryError {
    CourseRepositoryError::unknown_student(format!("student {id}"))
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<Course>, CourseRepositoryError> {
        let state = self.lock_for_courses()?;
        Ok(state
            .courses
            .keys()
            .filter_map(|id| state.course(*id))
            .filter(|course| filter.matches(course))
            .collect())
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.lock_for_courses()?.course(id))
    }

    async fn create(&self, course: &NewCourse) -> Result<Course, CourseRepositoryError> {
        let mut state = self.lock_for_courses()?;
        if let Some(missing) = state.first_unknown_student(&course.students) {
            return Err(unknown_student(missing));
        }

        let raw = next_id(&mut state.last_course_id);
        let id = CourseId::new(raw).map_err(|err| CourseRepositoryError::query(err.to_string()))?;
        state
            .courses
            .insert(id, (course.name.clone(), course.students.clone()));
        Ok(Course::new(id, course.name.clone(), course.students.clone()))
    }

    async fn update(
        &self,
        id: CourseId,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut state = self.lock_for_courses()?;
        if let Some(missing) = patch
            .students
            .as_ref()
            .and_then(|students| state.first_unknown_student(students))
        {
            return Err(unknown_student(missing));
        }

        let Some(current) = state.course(id) else {
            return Ok(None);
        };
        let updated = current.apply(patch);
        state.courses.insert(
            id,
            (updated.name().clone(), updated.students().clone()),
        );
        Ok(Some(updated))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        Ok(self.lock_for_courses()?.courses.remove(&id).is_some())
    }
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self.lock_for_students()?.students.values().cloned().collect())
    }

    async fn create(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError> {
        let mut state = self.lock_for_students()?;
        let raw = next_id(&mut state.last_student_id);
        let id =
            StudentId::new(raw).map_err(|err| StudentRepositoryError::query(err.to_string()))?;
        let stored = Student::new(id, student.name.clone(), student.birth_date);
        state.students.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_missing(
        &self,
        ids: &[StudentId],
    ) -> Result<Vec<StudentId>, StudentRepositoryError> {
        let state = self.lock_for_students()?;
        let missing: Enrollment = ids
            .iter()
            .copied()
            .filter(|id| !state.students.contains_key(id))
            .collect();
        Ok(missing.to_vec())
    }
}
