use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::AppState;
use crate::error::ServiceError;

/// Extract and validate the JWT from the Authorization header.
/// On success the `Claims` are available to handlers as an `Extension`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ServiceError::Unauthorized("missing bearer token"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ServiceError::Unauthorized("missing bearer token"))?;

    let claims = state.keys.verify(token).map_err(|e| {
        warn!("Rejected token on {}: {}", req.uri().path(), e);
        ServiceError::Unauthorized("invalid or expired token")
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
