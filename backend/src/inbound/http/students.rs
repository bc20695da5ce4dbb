//! Student HTTP handlers.
//!
//! ```text
//! GET  /students/
//! POST /students/ {"name":"Ada","birthDate":"1815-12-10"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewStudent, Student};
use crate::inbound::http::ApiResult;
use crate::inbound::http::body::JsonOrForm;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_date, parse_student_name,
};

const NAME: FieldName = FieldName::new("name");
const BIRTH_DATE: FieldName = FieldName::new("birthDate");

/// Student representation returned by the student endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Date of birth as `YYYY-MM-DD`.
    #[schema(example = "1815-12-10")]
    pub birth_date: Option<String>,
}

impl From<Student> for StudentResponse {
    fn from(value: Student) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().to_string(),
            birth_date: value
                .birth_date()
                .map(|date| date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Body accepted when registering a student.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    /// Display name; trimmed, non-empty, at most 255 characters.
    pub name: Option<String>,
    /// Optional date of birth as `YYYY-MM-DD`.
    pub birth_date: Option<String>,
}

impl TryFrom<StudentRequest> for NewStudent {
    type Error = Error;

    fn try_from(value: StudentRequest) -> Result<Self, Self::Error> {
        let name = value.name.ok_or_else(|| missing_field_error(NAME))?;
        Ok(Self {
            name: parse_student_name(name, NAME)?,
            birth_date: value
                .birth_date
                .as_deref()
                .map(|raw| parse_date(raw, BIRTH_DATE))
                .transpose()?,
        })
    }
}

/// List every registered student.
#[utoipa::path(
    get,
    path = "/students/",
    responses(
        (status = 200, description = "Students in identifier order", body = [StudentResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students/")]
pub async fn list_students(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let students = state.students.list_students().await?;
    Ok(web::Json(
        students.into_iter().map(StudentResponse::from).collect(),
    ))
}

/// Register a student.
#[utoipa::path(
    post,
    path = "/students/",
    request_body(content(
        (StudentRequest = "application/json"),
        (StudentRequest = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Invalid name or birth date", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students/")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: JsonOrForm<StudentRequest>,
) -> ApiResult<HttpResponse> {
    let new_student = NewStudent::try_from(payload.into_inner())?;
    let student = state.students.create_student(new_student).await?;
    Ok(HttpResponse::Created().json(StudentResponse::from(student)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{store_app, store_with_students};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn create_then_list_round_trip() {
        let store = store_with_students(0).await;
        let app = actix_test::init_service(store_app(store.clone(), 10)).await;

        let request = actix_test::TestRequest::post()
            .uri("/students/")
            .set_json(json!({ "name": "  Ada Lovelace ", "birthDate": "1815-12-10" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(response).await;
        assert_eq!(created["name"], "Ada Lovelace");
        assert_eq!(created["birthDate"], "1815-12-10");

        let request = actix_test::TestRequest::get().uri("/students/").to_request();
        let listed: Vec<StudentResponse> =
            actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(store.student_count(), 1);
    }

    #[actix_web::test]
    async fn form_bodies_register_students() {
        let store = store_with_students(0).await;
        let app = actix_test::init_service(store_app(store.clone(), 10)).await;
        let request = actix_test::TestRequest::post()
            .uri("/students/")
            .set_form([("name", "Ada Lovelace"), ("birthDate", "1815-12-10")])
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: StudentResponse = actix_test::read_body_json(response).await;
        assert_eq!(body.birth_date.as_deref(), Some("1815-12-10"));
        assert_eq!(store.student_count(), 1);
    }

    #[actix_web::test]
    async fn birth_date_is_optional() {
        let app = actix_test::init_service(store_app(store_with_students(0).await, 10)).await;
        let request = actix_test::TestRequest::post()
            .uri("/students/")
            .set_json(json!({ "name": "Grace" }))
            .to_request();
        let body: StudentResponse = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body.birth_date, None);
    }

    #[rstest]
    #[case(json!({}), "name", "missing_field")]
    #[case(json!({ "name": "" }), "name", "empty_name")]
    #[case(json!({ "name": "Ada", "birthDate": "10/12/1815" }), "birthDate", "invalid_date")]
    #[actix_web::test]
    async fn invalid_students_are_rejected(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(store_app(store_with_students(0).await, 10)).await;
        let request = actix_test::TestRequest::post()
            .uri("/students/")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }
}
