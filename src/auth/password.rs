// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification.
//!
//! Digests use bcrypt at the crate's default cost. A fresh random salt is
//! generated per call and embedded in the digest string along with the
//! algorithm and cost, so equal passwords never share a digest and
//! verification needs no side table.

use bcrypt::DEFAULT_COST;

/// Errors from digest creation.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Hashing the empty string is always a caller bug
    #[error("refusing to hash an empty password")]
    EmptyPassword,

    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }
    Ok(bcrypt::hash(password, DEFAULT_COST)?)
}

/// Check a plaintext password against a stored digest.
///
/// A malformed digest counts as a mismatch rather than an error; callers
/// treat every failure as bad credentials.
pub fn verify(password: &str, digest: &str) -> bool {
    bcrypt::verify(password, digest).unwrap_or(false)
}
