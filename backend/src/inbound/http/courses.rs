//! Course HTTP handlers.
//!
//! ```text
//! GET    /courses/?id=&name=
//! GET    /courses/{id}/
//! POST   /courses/
//! PATCH  /courses/?id=
//! PATCH  /courses/{id}/
//! DELETE /courses/{id}/
//! ```
//!
//! Write endpoints take JSON or URL-encoded form bodies; a form lists
//! students by repeating the `students` key.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Course, CourseFilter, CourseId, CoursePatch, Error, NewCourse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::body::JsonOrForm;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_course_id, parse_course_name, parse_enrollment,
};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");
const STUDENTS: FieldName = FieldName::new("students");

/// Course representation returned by every course endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Course title.
    #[schema(example = "Course 1")]
    pub name: String,
    /// Identifiers of enrolled students in ascending order.
    #[schema(example = json!([1, 2, 3]))]
    pub students: Vec<i64>,
}

impl From<Course> for CourseResponse {
    fn from(value: Course) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().to_string(),
            students: value.students().iter().map(|id| id.get()).collect(),
        }
    }
}

/// Body accepted when creating a course.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateCourseRequest {
    /// Course title; trimmed, non-empty, at most 255 characters.
    pub name: Option<String>,
    /// Student identifiers to enroll; duplicates collapse.
    pub students: Option<Vec<i64>>,
}

/// Body accepted when updating a course; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateCourseRequest {
    /// Replacement title.
    pub name: Option<String>,
    /// Replacement enrollment; an empty list removes every student.
    pub students: Option<Vec<i64>>,
}

/// Empty query values such as `?id=` count as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Listing filters; blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListQuery {
    /// Only the course with this identifier.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<i64>,
    /// Only courses with exactly this name, compared after trimming.
    pub name: Option<String>,
}

/// Target selector for `PATCH /courses/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseTargetQuery {
    /// Identifier of the course to update.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<i64>,
}

fn parse_filter(query: CourseListQuery) -> Result<CourseFilter, Error> {
    let name = query
        .name
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty());
    Ok(CourseFilter {
        id: query.id.map(|id| parse_course_id(id, ID)).transpose()?,
        name,
    })
}

fn parse_new_course(payload: CreateCourseRequest) -> Result<NewCourse, Error> {
    let name = payload.name.ok_or_else(|| missing_field_error(NAME))?;
    Ok(NewCourse {
        name: parse_course_name(name, NAME)?,
        students: parse_enrollment(payload.students.unwrap_or_default(), STUDENTS)?,
    })
}

fn parse_patch(payload: UpdateCourseRequest) -> Result<CoursePatch, Error> {
    Ok(CoursePatch {
        name: payload
            .name
            .map(|name| parse_course_name(name, NAME))
            .transpose()?,
        students: payload
            .students
            .map(|students| parse_enrollment(students, STUDENTS))
            .transpose()?,
    })
}

fn parse_target(query: CourseTargetQuery) -> Result<CourseId, Error> {
    let id = query.id.ok_or_else(|| missing_field_error(ID))?;
    parse_course_id(id, ID)
}

async fn apply_update(
    state: &HttpState,
    id: CourseId,
    payload: UpdateCourseRequest,
) -> ApiResult<web::Json<CourseResponse>> {
    let patch = parse_patch(payload)?;
    let course = state.course_commands.update_course(id, patch).await?;
    Ok(web::Json(CourseResponse::from(course)))
}

/// List courses, optionally filtered by `id` and `name`.
#[utoipa::path(
    get,
    path = "/courses/",
    params(CourseListQuery),
    responses(
        (status = 200, description = "Matching courses in identifier order", body = [CourseResponse]),
        (status = 400, description = "Malformed filter", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses/")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    query: web::Query<CourseListQuery>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let filter = parse_filter(query.into_inner())?;
    let courses = state.courses.list_courses(filter).await?;
    Ok(web::Json(
        courses.into_iter().map(CourseResponse::from).collect(),
    ))
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/courses/{id}/",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "The course", body = CourseResponse),
        (status = 404, description = "No such course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}/")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id = parse_course_id(path.into_inner(), ID)?;
    let course = state.courses.get_course(id).await?;
    Ok(web::Json(CourseResponse::from(course)))
}

/// Create a course and enroll its students.
#[utoipa::path(
    post,
    path = "/courses/",
    request_body(content(
        (CreateCourseRequest = "application/json"),
        (CreateCourseRequest = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid name, unknown students, or enrollment cap exceeded", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses/")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: JsonOrForm<CreateCourseRequest>,
) -> ApiResult<HttpResponse> {
    let new_course = parse_new_course(payload.into_inner())?;
    let course = state.course_commands.create_course(new_course).await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(course)))
}

/// Update the course selected by the `id` query parameter.
#[utoipa::path(
    patch,
    path = "/courses/",
    params(CourseTargetQuery),
    request_body(content(
        (UpdateCourseRequest = "application/json"),
        (UpdateCourseRequest = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Missing id or invalid fields", body = ErrorSchema),
        (status = 404, description = "No such course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourseByQuery"
)]
#[patch("/courses/")]
pub async fn update_course_by_query(
    state: web::Data<HttpState>,
    query: web::Query<CourseTargetQuery>,
    payload: JsonOrForm<UpdateCourseRequest>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id = parse_target(query.into_inner())?;
    apply_update(&state, id, payload.into_inner()).await
}

/// Update the course named in the path.
#[utoipa::path(
    patch,
    path = "/courses/{id}/",
    params(("id" = i64, Path, description = "Course identifier")),
    request_body(content(
        (UpdateCourseRequest = "application/json"),
        (UpdateCourseRequest = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 404, description = "No such course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[patch("/courses/{id}/")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: JsonOrForm<UpdateCourseRequest>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id = parse_course_id(path.into_inner(), ID)?;
    apply_update(&state, id, payload.into_inner()).await
}

/// Delete a course; enrolled students are kept.
#[utoipa::path(
    delete,
    path = "/courses/{id}/",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "No such course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}/")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = parse_course_id(path.into_inner(), ID)?;
    state.course_commands.delete_course(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
