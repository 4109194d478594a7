use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{errors::HttpError, state::HttpState};

pub const NONCE_HEADER: &str = "x-optimizer-nonce";

/// Only callers holding the admin bearer token reach the handlers.
pub async fn require_admin(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Err(HttpError::new(
            StatusCode::UNAUTHORIZED,
            "authentication required",
            Some("rest_forbidden"),
        ));
    };
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);
    if token != Some(state.admin_token.as_str()) {
        return Err(HttpError::new(
            StatusCode::FORBIDDEN,
            "sorry, you are not allowed to do that",
            Some("rest_forbidden"),
        ));
    }
    Ok(next.run(req).await)
}

pub async fn require_nonce(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let nonce = req
        .headers()
        .get(NONCE_HEADER)
        .and_then(|value| value.to_str().ok());
    if nonce != Some(state.nonce.as_str()) {
        return Err(HttpError::new(
            StatusCode::FORBIDDEN,
            "missing or invalid nonce",
            Some("rest_cookie_invalid_nonce"),
        ));
    }
    Ok(next.run(req).await)
}
