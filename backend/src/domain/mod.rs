//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed course and student model, the
//! enrollment rule, and the services that apply it. Nothing here knows about
//! HTTP or Diesel; adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Course, Student and their identifier and name newtypes.
//! - EnrollmentPolicy: the per-course student cap.
//! - CourseService / StudentService: driving port implementations.

pub mod course;
pub mod course_service;
pub mod enrollment;
pub mod error;
pub mod ports;
pub mod student;
pub mod student_service;
pub mod trace_id;

pub use self::course::{
    Course, CourseFilter, CourseId, CourseName, CoursePatch, CourseValidationError, NewCourse,
};
pub use self::course_service::{CourseService, ENROLLMENT_CAP_EXCEEDED, UNKNOWN_STUDENT};
pub use self::enrollment::{
    DEFAULT_MAX_STUDENTS_PER_COURSE, Enrollment, EnrollmentError, EnrollmentPolicy,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::student::{
    NAME_MAX, NewStudent, Student, StudentId, StudentName, StudentValidationError,
};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such course"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
