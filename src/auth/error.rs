// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Rejections produced while gating a request on its bearer token.
///
/// The client-facing messages are part of the platform's wire contract and
/// deliberately coarse: expired and tampered tokens share one message so a
/// caller learns nothing about why verification failed.
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header, or a scheme other than Bearer
    NoToken,
    /// Bearer scheme present but the token itself is empty
    TokenMissing,
    /// Signature, structure, or expiry validation failed
    InvalidToken,
    /// Token verified but its subject no longer exists
    UserNotFound,
    /// Storage failure while resolving the subject
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    message: String,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NoToken
            | AuthError::TokenMissing
            | AuthError::InvalidToken
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client. Internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::NoToken => "No token provided",
            AuthError::TokenMissing => "Token missing",
            AuthError::InvalidToken => "Invalid or malformed token",
            AuthError::UserNotFound => "User not found",
            AuthError::Internal(_) => "Authentication failed",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Internal(msg) => write!(f, "internal authentication error: {msg}"),
            other => write!(f, "{}", other.public_message()),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Internal(ref detail) = self {
            tracing::error!(error = %detail, "authentication infrastructure failure");
        }
        let body = Json(AuthErrorBody {
            message: self.public_message().to_string(),
        });
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn no_token_returns_401_with_wire_message() {
        let response = AuthError::NoToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["message"], "No token provided");
    }

    #[tokio::test]
    async fn internal_returns_500_without_detail() {
        let response = AuthError::Internal("disk on fire".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(!body.contains("disk on fire"));
    }

    #[test]
    fn rejection_statuses_match_wire_contract() {
        assert_eq!(AuthError::TokenMissing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::UNAUTHORIZED);
    }
}
