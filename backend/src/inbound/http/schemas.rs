//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers here mirror their wire
//! shape so the adapter layer owns every framework concern.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "a course may enroll at most 10 students, 11 requested")]
    message: String,
    /// Correlation identifier echoed in the `Trace-Id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured context such as the offending field.
    #[schema(example = json!({
        "field": "students",
        "code": "enrollment_cap_exceeded",
        "max": 10,
        "requested": 11
    }))]
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema = serde_json::to_value(ErrorSchema::schema()).expect("schema serialises");
        let properties = schema
            .get("properties")
            .and_then(|value| value.as_object())
            .expect("object schema");
        assert!(properties.contains_key("traceId"));
        assert!(properties.contains_key("details"));
    }

    #[test]
    fn error_code_schema_lists_wire_names() {
        let schema = serde_json::to_string(&ErrorCodeSchema::schema()).expect("schema serialises");
        assert!(schema.contains("service_unavailable"));
        assert!(!schema.contains("ServiceUnavailable"));
    }
}
