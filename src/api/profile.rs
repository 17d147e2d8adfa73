// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Profile endpoints for the authenticated account.

use axum::Json;

use crate::{auth::Auth, models::ProfileResponse};

/// The gate has already resolved the bearer token to a live account by
/// the time this handler runs, so it only echoes the profile back.
#[utoipa::path(
    get,
    path = "/api/profile/me",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile of the authenticated account", body = ProfileResponse),
        (status = 401, description = "Missing, malformed, or expired token")
    ),
    security(("bearer" = []))
)]
pub async fn me(Auth(user): Auth) -> Json<ProfileResponse> {
    Json(ProfileResponse { user })
}
