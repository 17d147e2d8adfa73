// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential and token handling for the Mindgarden API.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in with email + password
//! 2. Server checks the password against the stored bcrypt digest
//! 3. Server issues an HS256 JWT (`sub` = user id, seven-day expiry)
//! 4. Client sends `Authorization: Bearer <token>` on protected routes
//! 5. The `Auth` extractor:
//!    - Validates header shape, signature, and expiry
//!    - Resolves `sub` back to a stored account
//!    - Attaches the account (minus its digest) to the request
//!
//! ## Security
//!
//! - The signing secret comes from `JWT_SECRET`; startup fails without it
//! - Expired and tampered tokens share one client-facing rejection
//! - Unknown email and wrong password share one login failure message
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod tokens;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::Auth;
pub use tokens::TokenService;
