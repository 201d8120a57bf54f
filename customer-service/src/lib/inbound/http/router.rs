use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::assign_role::assign_role;
use super::handlers::create_customer::create_customer;
use super::handlers::deactivate_user::deactivate_user;
use super::handlers::delete_customer::delete_customer;
use super::handlers::get_customer::get_customer;
use super::handlers::health::health;
use super::handlers::list_areas::list_areas;
use super::handlers::list_customers::list_customers;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::profile::profile;
use super::handlers::register::register;
use super::handlers::update_customer::update_customer;
use super::middleware::authenticate as auth_middleware;
use crate::domain::customer::ports::CustomerServicePort;
use crate::domain::identity::ports::IdentityServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub customer_service: Arc<dyn CustomerServicePort>,
}

/// CORS policy: a single allowed origin when configured, permissive otherwise.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    match allowed_origin {
        Some(origin) => Ok(CorsLayer::new()
            .allow_origin(HeaderValue::from_str(origin)?)
            .allow_methods(Any)
            .allow_headers(Any)),
        None => Ok(CorsLayer::permissive()),
    }
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    customer_service: Arc<dyn CustomerServicePort>,
    cors: CorsLayer,
) -> Router {
    let state = AppState {
        identity_service,
        customer_service,
    };

    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/profile", get(profile))
        .route("/api/auth/users", get(list_users))
        .route("/api/auth/users/:id/role", patch(assign_role))
        .route("/api/auth/users/:id/deactivate", post(deactivate_user))
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/customers/areas", get(list_areas))
        .route(
            "/api/customers/:id",
            get(get_customer)
                .put(update_customer)
                .patch(update_customer)
                .delete(delete_customer),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
