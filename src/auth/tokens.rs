// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuance and verification (HS256).
//!
//! Issuing and verifying share one secret, so any process configured with
//! the same `JWT_SECRET` accepts tokens minted by any other. Tokens carry
//! no per-process state and there is no revocation list; a token stays
//! valid until it expires or its subject disappears from storage.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::claims::Claims;

/// Default token lifetime: seven days.
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Issues and verifies signed bearer tokens.
///
/// Both keys are derived once from the configured secret at startup, so
/// issuance can only fail for encoding reasons, never for configuration
/// reasons, at request time.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    /// Build a service with the default seven-day lifetime.
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, TOKEN_TTL_SECS)
    }

    /// Build a service with an explicit lifetime in seconds.
    pub fn with_ttl(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Sign a token for the given user id.
    pub fn issue(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Decode and validate a token, returning its claims.
    ///
    /// Signature, structure, and expiry are all checked here. Callers
    /// collapse every failure into one client-facing rejection; the error
    /// kind is only interesting for debug logging.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}
