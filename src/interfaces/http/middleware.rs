//! Bearer-token authentication middleware for Axum

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::common::ApiError;
use super::AppState;
use crate::domain::UserRole;

/// The raw token of the current request, for handlers that act on the
/// session itself (logout).
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Value of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a live session.
pub async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    authenticate(state, request, next, None).await
}

/// Rejects requests unless the session belongs to an admin.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    authenticate(state, request, next, Some(UserRole::Admin)).await
}

async fn authenticate(
    state: AppState,
    mut request: Request,
    next: Next,
    required: Option<UserRole>,
) -> Response {
    let token = bearer_token(request.headers()).map(str::to_string);

    match state.auth.authorize(token.as_deref(), required).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            if let Some(token) = token {
                request.extensions_mut().insert(SessionToken(token));
            }
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
