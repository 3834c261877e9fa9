//! Requesting-user identity for activity events.
//!
//! Authentication is handled by an upstream collaborator; this service
//! only reads the username it reports and defaults to `anonymous`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

const USERNAME_HEADER: &str = "x-username";
const ANONYMOUS: &str = "anonymous";

/// Extractor yielding the acting username.
#[derive(Debug, Clone)]
pub struct Actor(pub String);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(USERNAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(ANONYMOUS)
            .to_string();
        Ok(Actor(username))
    }
}
