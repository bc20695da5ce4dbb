//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::StudentRepository;
use crate::domain::{EnrollmentPolicy, NewStudent, StudentName};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Build an in-memory store holding `count` students with ids `1..=count`.
pub async fn store_with_students(count: usize) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    for index in 1..=count {
        let student = NewStudent {
            name: StudentName::new(format!("Student {index}")).expect("valid name"),
            birth_date: None,
        };
        StudentRepository::create(store.as_ref(), &student)
            .await
            .expect("seed student");
    }
    store
}

/// Application exposing every course and student route over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

/// Application backed by `store` with the given enrollment cap.
pub fn store_app(
    store: Arc<InMemoryStore>,
    max_students_per_course: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let policy = EnrollmentPolicy::new(max_students_per_course);
    test_app(HttpState::from_repositories(store.clone(), store, policy))
}
