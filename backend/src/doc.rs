//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every course, student and health endpoint together
//! with the request and response bodies they exchange. Domain errors are
//! documented through [`ErrorSchema`] so the domain stays free of utoipa.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::courses::{CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::students::{StudentRequest, StudentResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courses backend API",
        description = "Course catalogue with capped student enrollment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course_by_query,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::create_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CourseResponse,
        CreateCourseRequest,
        UpdateCourseRequest,
        StudentRequest,
        StudentResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "courses", description = "Course catalogue and enrollment"),
        (name = "students", description = "Student registry"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
