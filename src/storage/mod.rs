// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # User Storage Module
//!
//! Persistent storage for user accounts, backed by redb (an embedded,
//! pure-Rust, ACID key-value store). The database lives in a single file
//! under `DATA_DIR` and is opened once at startup.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   users.redb    # accounts table + email uniqueness index
//! ```
//!
//! ## Important Notes
//!
//! - Write transactions are serialized by redb; the email uniqueness check
//!   and the insert share one transaction, so registration races resolve to
//!   exactly one winner
//! - Password digests are stored as opaque strings; hashing and
//!   verification live in `crate::auth::password`

pub mod users;

pub use users::{NewUser, StoredUser, UserDatabase, UserDbError, UserDbResult};
