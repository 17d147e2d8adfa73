// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor gating requests on a bearer token.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use super::{AuthenticatedUser, AuthError};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Validates the bearer token from the Authorization header and resolves
/// its subject back to a stored account. The checks run in a fixed order
/// and the first failure wins:
///
/// 1. Header absent or scheme not `Bearer` → "No token provided"
/// 2. Scheme present but the token segment (second space-separated
///    field) missing or empty → "Token missing"
/// 3. Signature/structure/expiry invalid, or subject not a UUID →
///    "Invalid or malformed token"
/// 4. Subject not in storage → "User not found"
///
/// A storage failure during step 4 is a 500, not an authorization error.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<ProfileResponse>, ApiError> {
///     // user.id is the verified account id
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::NoToken)?
            .to_str()
            .map_err(|_| AuthError::NoToken)?;

        // Scheme first, then the token as the second space-separated
        // segment; a bare scheme or a blank segment is a missing token,
        // not a malformed one
        if !auth_header.starts_with("Bearer") {
            return Err(AuthError::NoToken);
        }
        let token = auth_header
            .split(' ')
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .ok_or(AuthError::TokenMissing)?;

        // Expired, tampered, and garbage tokens all collapse into one
        // rejection; the finer cause is only logged
        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            AuthError::InvalidToken
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
            tracing::debug!(error = %e, "token subject is not a valid user id");
            AuthError::InvalidToken
        })?;

        let user = state
            .users
            .find_by_id(user_id)
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        Ok(Auth(AuthenticatedUser::from(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::{TokenService, TOKEN_TTL_SECS};
    use crate::auth::Claims;
    use crate::state::AppState;
    use crate::storage::{NewUser, StoredUser, UserDatabase};
    use axum::http::Request;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let users = UserDatabase::open(&temp_dir.path().join("users.redb"))
            .expect("Failed to open user database");
        let state = AppState::new(users, TokenService::new("extractor-test-secret"));
        (state, temp_dir)
    }

    fn insert_user(state: &AppState, email: &str) -> StoredUser {
        state
            .users
            .create(NewUser {
                email: email.to_string(),
                password_hash: "$2b$12$placeholderplaceholderpla".to_string(),
                first_name: "Mia".to_string(),
                last_name: None,
                gender: None,
                date_of_birth: None,
            })
            .expect("Failed to create user")
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/profile/me");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_rejected() {
        let (state, _temp_dir) = test_state();
        let mut parts = parts_with_auth(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::NoToken)));
    }

    #[tokio::test]
    async fn non_bearer_scheme_rejected() {
        let (state, _temp_dir) = test_state();
        let mut parts = parts_with_auth(Some("Basic bWlhOnNlY3JldA=="));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::NoToken)));
    }

    #[tokio::test]
    async fn missing_token_segment_rejected() {
        let (state, _temp_dir) = test_state();

        // A bare scheme, trailing spaces, and a blank segment before the
        // token all mean "no token was sent", never "bad token"
        for header in ["Bearer", "Bearer ", "Bearer   ", "Bearer  abc"] {
            let mut parts = parts_with_auth(Some(header));
            let result = Auth::from_request_parts(&mut parts, &state).await;
            assert!(matches!(result, Err(AuthError::TokenMissing)), "header {header:?}");
        }
    }

    #[tokio::test]
    async fn unsigned_token_rejected() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let (state, _temp_dir) = test_state();
        let user = insert_user(&state, "mia@example.com");

        // Well-formed JWT structure, no real signature
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(
            format!(r#"{{"sub":"{}","iat":1700000000,"exp":9999999999}}"#, user.id).as_bytes(),
        );
        let token = format!("{header}.{claims}.fake_signature");

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_rejected() {
        let (state, _temp_dir) = test_state();
        let user = insert_user(&state, "mia@example.com");

        let token = TokenService::new("some-other-secret").issue(user.id).unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_rejected_like_tampered() {
        let (state, _temp_dir) = test_state();
        let user = insert_user(&state, "mia@example.com");

        let token = TokenService::with_ttl("extractor-test-secret", -TOKEN_TTL_SECS)
            .issue(user.id)
            .unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn non_uuid_subject_rejected() {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let (state, _temp_dir) = test_state();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"extractor-test-secret"),
        )
        .unwrap();

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn unknown_subject_rejected() {
        let (state, _temp_dir) = test_state();

        // Valid signature, but the subject was never registered
        let token = state.tokens.issue(Uuid::new_v4()).unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn deleted_subject_rejected() {
        let (state, _temp_dir) = test_state();
        let user = insert_user(&state, "mia@example.com");
        let token = state.tokens.issue(user.id).unwrap();

        state.users.delete(user.id).unwrap();

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn valid_token_resolves_user() {
        let (state, _temp_dir) = test_state();
        let user = insert_user(&state, "mia@example.com");
        let token = state.tokens.issue(user.id).unwrap();

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let result = Auth::from_request_parts(&mut parts, &state).await;

        let Auth(authenticated) = result.expect("valid token resolves");
        assert_eq!(authenticated.id, user.id);
        assert_eq!(authenticated.email, "mia@example.com");
        assert_eq!(authenticated.xp, 0);
    }
}
