//! Optional Prometheus metrics middleware.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

const NAMESPACE: &str = "courses";
const ENDPOINT: &str = "/metrics";

/// Request metrics exported at `/metrics` under the `courses` namespace.
///
/// # Errors
/// Returns [`std::io::Error`] when the collectors cannot be registered.
pub(crate) fn request_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(ENDPOINT)
        .build()
        .map_err(|err| std::io::Error::other(format!("prometheus setup failed: {err}")))
}

/// Prometheus middleware when configured, otherwise a pass-through.
///
/// Both arms box their body so the app has a single service type.
#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::Enabled(metrics) => {
                let pending = Compat::new(metrics.as_ref().clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            Self::Disabled => {
                let passthrough = service.map(ServiceResponse::map_into_boxed_body);
                Box::pin(async move { Ok(boxed::service(passthrough)) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn disabled_layer_passes_requests_through() {
        let app = test::init_service(
            App::new()
                .wrap(MetricsLayer::from_option(None))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let response = test::call_service(&app, test::TestRequest::get().to_request()).await;
        assert!(response.status().is_success());
    }

    #[rstest]
    #[actix_web::test]
    async fn enabled_layer_serves_metrics_endpoint() {
        let metrics = request_metrics().expect("metrics build");
        let app = test::init_service(
            App::new()
                .wrap(MetricsLayer::from_option(Some(metrics)))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let request = test::TestRequest::get().uri(ENDPOINT).to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());
    }
}
