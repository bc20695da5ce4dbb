//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they can be exercised against in-memory adapters or
//! mocks without any I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseRepository, CoursesCommand, CoursesQuery, StudentRepository, StudentsDirectory,
};
use crate::domain::{CourseService, EnrollmentPolicy, StudentService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub courses: Arc<dyn CoursesQuery>,
    pub course_commands: Arc<dyn CoursesCommand>,
    pub students: Arc<dyn StudentsDirectory>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        courses: Arc<dyn CoursesQuery>,
        course_commands: Arc<dyn CoursesCommand>,
        students: Arc<dyn StudentsDirectory>,
    ) -> Self {
        Self {
            courses,
            course_commands,
            students,
        }
    }

    /// Wire the domain services over a pair of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::EnrollmentPolicy;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let _state = HttpState::from_repositories(store.clone(), store, EnrollmentPolicy::default());
    /// ```
    pub fn from_repositories<C, S>(courses: Arc<C>, students: Arc<S>, policy: EnrollmentPolicy) -> Self
    where
        C: CourseRepository + 'static,
        S: StudentRepository + 'static,
    {
        let course_service = Arc::new(CourseService::new(courses, students.clone(), policy));
        Self {
            courses: course_service.clone(),
            course_commands: course_service,
            students: Arc::new(StudentService::new(students)),
        }
    }
}
