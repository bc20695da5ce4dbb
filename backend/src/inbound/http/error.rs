//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays HTTP-agnostic; this module chooses status codes,
//! attaches the `Trace-Id` header, and redacts internal failures. It also
//! supplies extractor error handlers so malformed bodies, query strings and
//! path segments produce the same JSON envelope as every other failure.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";
const BODY_MESSAGE: &str = "request body must be a JSON object or a URL-encoded form";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }

    error!(
        message = error.message(),
        trace_id = error.trace_id(),
        "internal error redacted from response"
    );
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

fn extractor_error(message: &str, code: &str) -> actix_web::Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": code }))
        .into()
}

/// Reject an undecodable URL-encoded body with the envelope used for JSON.
pub(crate) fn form_error(err: impl std::fmt::Display) -> actix_web::Error {
    debug!(error = %err, "rejected form body");
    extractor_error(BODY_MESSAGE, "invalid_body")
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    extractor_error(BODY_MESSAGE, "invalid_body")
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    extractor_error(
        "query parameters are malformed; identifiers must be integers",
        "invalid_query",
    )
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameter");
    extractor_error("path identifier must be an integer", "invalid_path")
}

/// JSON body extractor settings emitting the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Query extractor settings emitting the error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

/// Path extractor settings emitting the error envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
