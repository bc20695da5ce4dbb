//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::EnrollmentPolicy;
use backend::inbound::http::configure;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{DbPool, DieselCourseRepository, DieselStudentRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Wire the domain services over PostgreSQL when a pool is configured and
/// over a process-local store otherwise.
fn build_http_state(db_pool: Option<&DbPool>, policy: EnrollmentPolicy) -> HttpState {
    match db_pool {
        Some(pool) => {
            info!(
                max_students_per_course = policy.max_students_per_course(),
                "serving courses from PostgreSQL"
            );
            HttpState::from_repositories(
                Arc::new(DieselCourseRepository::new(pool.clone())),
                Arc::new(DieselStudentRepository::new(pool.clone())),
                policy,
            )
        }
        None => {
            info!(
                max_students_per_course = policy.max_students_per_course(),
                "no database configured; serving courses from memory"
            );
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_repositories(store.clone(), store, policy)
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        policy,
        db_pool,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let http_state = web::Data::new(build_http_state(db_pool.as_ref(), policy));
    let server_health_state = health_state.clone();

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness, then stop accepting connections and let in-flight requests
/// finish.
pub async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining connections");
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[actix_web::test]
    async fn app_serves_courses_with_trace_header() {
        let health = web::Data::new(HealthState::new());
        let state = web::Data::new(build_http_state(None, EnrollmentPolicy::new(2)));
        let app = actix_test::init_service(build_app(health, state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/courses/")
            .set_json(json!({ "name": "Course 1" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key("trace-id"));
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_health_state() {
        let health = web::Data::new(HealthState::new());
        let state = web::Data::new(build_http_state(None, EnrollmentPolicy::default()));
        let app = actix_test::init_service(build_app(health.clone(), state)).await;

        let before = actix_test::TestRequest::get().uri("/health/ready").to_request();
        assert_eq!(
            actix_test::call_service(&app, before).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        health.mark_ready();
        let after = actix_test::TestRequest::get().uri("/health/ready").to_request();
        assert_eq!(
            actix_test::call_service(&app, after).await.status(),
            StatusCode::OK
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn drain_fails_liveness_and_stops_server() {
        let health = web::Data::new(HealthState::new());
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let server = HttpServer::new(App::new)
            .listen(listener)
            .expect("listen on test socket")
            .disable_signals()
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain(health.clone(), handle).await;

        assert!(!health.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server exits cleanly");
    }
}
