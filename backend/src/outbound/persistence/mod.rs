//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain types.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/courses")).await?;
//! let courses = DieselCourseRepository::new(pool);
//! # let _ = courses;
//! # Ok(())
//! # }
//! ```

mod diesel_course_repository;
mod diesel_error_mapping;
mod diesel_student_repository;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
