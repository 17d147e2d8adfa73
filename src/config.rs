// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. A missing
//! or blank signing secret is a fatal startup error; token issuance must
//! never discover a configuration problem at request time.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Root directory for the user database | `/data` |
//! | `JWT_SECRET` | HS256 signing secret for bearer tokens | Required, non-blank |
//! | `TOKEN_TTL_DAYS` | Bearer token lifetime in days | `7` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token lifetime override.
pub const TOKEN_TTL_DAYS_ENV: &str = "TOKEN_TTL_DAYS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("invalid TOKEN_TTL_DAYS value: {0}")]
    InvalidTtl(String),
}

/// Startup configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// HS256 signing secret shared by every process of the platform.
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_raw = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let port: u16 = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        let data_dir = PathBuf::from(env::var(DATA_DIR_ENV).unwrap_or_else(|_| "/data".to_string()));

        let jwt_secret = env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingSecret)?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let ttl_raw = env::var(TOKEN_TTL_DAYS_ENV).unwrap_or_else(|_| "7".to_string());
        let ttl_days: i64 = ttl_raw
            .parse()
            .map_err(|_| ConfigError::InvalidTtl(ttl_raw.clone()))?;
        if ttl_days <= 0 {
            return Err(ConfigError::InvalidTtl(ttl_raw));
        }

        Ok(Self {
            host,
            port,
            data_dir,
            jwt_secret,
            token_ttl_secs: ttl_days * 24 * 60 * 60,
        })
    }

    /// Bind address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Location of the user database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("users.redb")
    }
}
