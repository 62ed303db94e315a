//! Caller credentials
//!
//! This service does not authenticate anyone itself. It captures the
//! caller's bearer token and hands it to the upstream REST backend, which
//! makes the authorization decision.

use std::convert::Infallible;

use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};

/// Credentials forwarded on every upstream request made for one caller
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpstreamAuth {
    bearer_token: Option<String>,
}

impl UpstreamAuth {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
        }
    }

    /// No credentials; upstream calls go out unauthenticated
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Read the bearer token from request headers, if one is present.
    /// The scheme name is matched case-insensitively.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.trim_start().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => Self::bearer(token),
            None => Self::anonymous(),
        }
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for UpstreamAuth
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(UpstreamAuth::from_headers(&parts.headers))
    }
}
