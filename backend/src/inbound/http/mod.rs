//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod body;
pub mod courses;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register the course and student routes together with extractor settings
/// that report malformed input using the JSON error envelope.
///
/// Callers supply [`state::HttpState`] via `app_data`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use backend::domain::EnrollmentPolicy;
/// use backend::inbound::http::{configure, state::HttpState};
/// use backend::outbound::memory::InMemoryStore;
///
/// let store = Arc::new(InMemoryStore::new());
/// let state = HttpState::from_repositories(store.clone(), store, EnrollmentPolicy::default());
/// let _app = App::new().app_data(web::Data::new(state)).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(courses::list_courses)
        .service(courses::get_course)
        .service(courses::create_course)
        .service(courses::update_course_by_query)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(students::list_students)
        .service(students::create_student);
}
