//! Request body extractor accepting JSON or URL-encoded forms.
//!
//! Form bodies may repeat a key to supply a list, as HTML forms and most
//! HTTP clients do for multi-valued fields: `name=Algebra&students=1&students=2`.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use crate::inbound::http::error::form_error;

/// Body decoded from `application/json` or `application/x-www-form-urlencoded`.
///
/// JSON bodies go through [`web::Json`] so the registered `JsonConfig` still
/// applies; every other content type is rejected by that same path.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

impl<T> JsonOrForm<T> {
    /// Unwrap the decoded body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form(req: &HttpRequest) -> bool {
    req.content_type().eq_ignore_ascii_case(FORM_CONTENT_TYPE)
}

impl<T> FromRequest for JsonOrForm<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_form(req) {
            let bytes = web::Bytes::from_request(req, payload);
            Box::pin(async move {
                let bytes = bytes.await?;
                serde_html_form::from_bytes(&bytes)
                    .map(Self)
                    .map_err(form_error)
            })
        } else {
            let json = web::Json::<T>::from_request(req, payload);
            Box::pin(async move { Ok(Self(json.await?.into_inner())) })
        }
    }
}
