// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenService;
use crate::storage::UserDatabase;

/// Shared application state handed to every request handler.
///
/// Cloned per request; both members sit behind `Arc` so clones are cheap.
/// `UserDatabase` synchronizes its own transactions internally and the
/// token keys are immutable after startup, so no lock is needed here.
#[derive(Clone)]
pub struct AppState {
    /// Persistent user accounts.
    pub users: Arc<UserDatabase>,
    /// Token issuance and verification keys.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(users: UserDatabase, tokens: TokenService) -> Self {
        Self {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
        }
    }
}
