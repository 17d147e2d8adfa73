// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login flows.
//!
//! Both flows end with a signed bearer token. Failure messages are part
//! of the wire contract: a duplicate registration always reads
//! "Email already registered", and the two login failure causes (unknown
//! email, wrong password) are indistinguishable on the wire.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::password,
    error::ApiError,
    models::{AuthResponse, LoginRequest, RegisterRequest},
    state::AppState,
    storage::{NewUser, UserDbError},
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid input or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if request.email.trim().is_empty() {
        return Err(ApiError::bad_request("Email must not be empty"));
    }
    if request.password.is_empty() {
        return Err(ApiError::bad_request("Password must not be empty"));
    }
    if request.first_name.trim().is_empty() {
        return Err(ApiError::bad_request("First name must not be empty"));
    }

    let existing = state.users.find_by_email(&request.email).map_err(|e| {
        tracing::error!(error = %e, "user lookup failed during registration");
        ApiError::internal("Failed to create user")
    })?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let password_hash = password::hash(&request.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::internal("Failed to create user")
    })?;

    let user = match state.users.create(NewUser {
        email: request.email,
        password_hash,
        first_name: request.first_name,
        last_name: request.last_name,
        gender: request.gender,
        date_of_birth: request.date_of_birth,
    }) {
        Ok(user) => user,
        // A concurrent registration won the insert race after our lookup;
        // the store's own constraint is authoritative
        Err(UserDbError::EmailTaken) => {
            return Err(ApiError::bad_request("Email already registered"));
        }
        Err(e) => {
            tracing::error!(error = %e, "user insert failed");
            return Err(ApiError::internal("Failed to create user"));
        }
    };

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!(error = %e, user_id = %user.id, "token issuance failed");
        ApiError::internal("Failed to create user")
    })?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state.users.find_by_email(&request.email).map_err(|e| {
        tracing::error!(error = %e, "user lookup failed during login");
        ApiError::internal("Failed to log in")
    })?;

    let Some(user) = user else {
        tracing::debug!("login rejected: unknown email");
        return Err(ApiError::bad_request("Invalid credentials"));
    };

    if !password::verify(&request.password, &user.password_hash) {
        tracing::debug!(user_id = %user.id, "login rejected: password mismatch");
        return Err(ApiError::bad_request("Invalid credentials"));
    }

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!(error = %e, user_id = %user.id, "token issuance failed");
        ApiError::internal("Failed to log in")
    })?;

    tracing::debug!(user_id = %user.id, "user logged in");

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}
