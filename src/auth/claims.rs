// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and the authenticated user representation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::storage::StoredUser;

/// Claims carried by a Mindgarden bearer token.
///
/// Deliberately minimal: the subject is the only identity the token needs.
/// Everything else about the user is read from storage at verification
/// time, so removed accounts stop resolving immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id as a UUID string
    pub sub: String,

    /// Issued-at (seconds since epoch)
    pub iat: i64,

    /// Expiration (seconds since epoch)
    pub exp: i64,
}

/// Authenticated user attached to a request once its bearer token resolves.
///
/// This is the primary type used throughout the application to represent
/// the user making a request, and doubles as the `user` object in auth
/// responses. The stored bcrypt digest never enters this type.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Canonical user id (token `sub` claim)
    pub id: Uuid,

    pub email: String,

    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,

    /// Wellness XP counter, maintained by the gamification service
    pub xp: u32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl From<StoredUser> for AuthenticatedUser {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
            xp: user.xp,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
