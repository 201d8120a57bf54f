use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::identity::errors::IdentityError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that verifies the bearer token and puts the resulting
/// [`Principal`](crate::domain::access::Principal) into request extensions.
///
/// Missing header, wrong scheme, malformed, forged and expired tokens all
/// produce the same 401 body.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).ok_or_else(|| {
        tracing::warn!(reason = "missing or malformed Authorization header", "Token rejected");
        unauthenticated()
    })?;

    let principal = state
        .identity_service
        .authenticate_request(&token)
        .await
        .map_err(|_| unauthenticated())?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn unauthenticated() -> Response {
    ApiError::from(IdentityError::Unauthenticated).into_response()
}

fn extract_bearer_token(req: &Request) -> Option<String> {
    let header = req.headers().get(http::header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
