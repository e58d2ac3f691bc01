use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{error::ApiError, state::AppState};

/// Claims carried by the auth collaborator's bearer tokens (HS256).
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Hex id of the authenticated user.
    pub id: String,
    pub exp: usize,
}

/// Authenticated identity resolved by the access-control gate and
/// injected into request extensions for the handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}

/// Access-control gate: validates the bearer token and resolves it to
/// a stored user before any session handler runs. Short-circuits with
/// 401 on a missing or invalid credential.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthenticated("No token provided".to_string()))?;

    let key = DecodingKey::from_secret(state.config.jwt_secret.as_bytes());
    let claims = decode::<Claims>(token, &key, &Validation::default())
        .map_err(|err| {
            tracing::warn!(error = %err, "token verification failed");
            ApiError::Unauthenticated("Not authorized".to_string())
        })?
        .claims;

    let user = state
        .users
        .find_by_id(&claims.id)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Not authorized".to_string()))?;

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
    });

    Ok(next.run(req).await)
}
