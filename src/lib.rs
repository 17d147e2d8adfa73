// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mindgarden Identity Service
//!
//! This crate provides account registration, credential verification and
//! bearer-token authorization for the Mindgarden wellness platform. Other
//! services trust its signed tokens to identify the calling account.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Password hashing, token issuance and the request gate
//! - `storage` - Embedded user store (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
