// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded user database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: user_id (UUID string) → serialized StoredUser (JSON bytes)
//! - `user_emails`: email → user_id (uniqueness index for registration)
//!
//! Emails are indexed exactly as stored: lookups and the uniqueness
//! constraint are case sensitive, so `A@example.com` and `a@example.com`
//! are distinct accounts.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: user_id → serialized StoredUser (JSON bytes).
const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Index: email (raw bytes, case sensitive) → user_id.
const USER_EMAILS: TableDefinition<&str, &str> = TableDefinition::new("user_emails");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserDbError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("email already registered")]
    EmailTaken,
}

pub type UserDbResult<T> = Result<T, UserDbError>;

// =============================================================================
// Records
// =============================================================================

/// A persisted user account.
///
/// `password_hash` is a bcrypt digest. It stays inside the storage and
/// credential-verification layers and must never be serialized into an API
/// response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Wellness XP accumulated in the companion app. Zeroed at registration
    /// and written by the gamification service, never by this one.
    #[serde(default)]
    pub xp: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating an account. The id, xp counter, and
/// timestamps are assigned by [`UserDatabase::create`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

// =============================================================================
// UserDatabase
// =============================================================================

/// Embedded ACID user database.
pub struct UserDatabase {
    db: Database,
}

impl UserDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> UserDbResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(USER_EMAILS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Insert a new account, enforcing email uniqueness.
    ///
    /// The index check and both inserts run inside one write transaction.
    /// redb serializes write transactions, so a concurrent registration for
    /// the same email cannot slip between the check and the insert; the
    /// loser gets [`UserDbError::EmailTaken`] and nothing is persisted.
    pub fn create(&self, new: NewUser) -> UserDbResult<StoredUser> {
        let now = Utc::now();
        let user = StoredUser {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            gender: new.gender,
            date_of_birth: new.date_of_birth,
            xp: 0,
            created_at: now,
            updated_at: now,
        };
        let id = user.id.to_string();
        let json = serde_json::to_vec(&user)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut emails = write_txn.open_table(USER_EMAILS)?;
            if emails.get(user.email.as_str())?.is_some() {
                // Dropping the uncommitted transaction aborts it
                return Err(UserDbError::EmailTaken);
            }
            emails.insert(user.email.as_str(), id.as_str())?;

            let mut users = write_txn.open_table(USERS)?;
            users.insert(id.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;

        Ok(user)
    }

    /// Look up an account by id.
    pub fn find_by_id(&self, id: Uuid) -> UserDbResult<Option<StoredUser>> {
        let key = id.to_string();
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        match table.get(key.as_str())? {
            Some(value) => {
                let user: StoredUser = serde_json::from_slice(value.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Look up an account by email (exact match, case sensitive).
    pub fn find_by_email(&self, email: &str) -> UserDbResult<Option<StoredUser>> {
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(USER_EMAILS)?;
        let id = match emails.get(email)? {
            Some(v) => v.value().to_string(),
            None => return Ok(None),
        };
        let users = read_txn.open_table(USERS)?;
        match users.get(id.as_str())? {
            Some(value) => {
                let user: StoredUser = serde_json::from_slice(value.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Remove an account and its email index entry.
    ///
    /// Returns `true` if a record was deleted. Account removal is driven by
    /// the platform's support tooling; tokens for a deleted account stop
    /// resolving on their next use.
    pub fn delete(&self, id: Uuid) -> UserDbResult<bool> {
        let key = id.to_string();
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut users = write_txn.open_table(USERS)?;
            let email = match users.remove(key.as_str())? {
                Some(value) => {
                    let user: StoredUser = serde_json::from_slice(value.value())?;
                    Some(user.email)
                }
                None => None,
            };
            match email {
                Some(email) => {
                    let mut emails = write_txn.open_table(USER_EMAILS)?;
                    emails.remove(email.as_str())?;
                    true
                }
                None => false,
            }
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    /// Cheap read-transaction probe for readiness checks.
    pub fn ping(&self) -> UserDbResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(USERS)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db() -> (UserDatabase, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = UserDatabase::open(&dir.path().join("test.redb")).unwrap();
        (db, dir)
    }

    fn sample_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            // Never verified by these tests, only stored
            password_hash: "$2b$12$placeholderplaceholderpla".to_string(),
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            gender: None,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10),
        }
    }

    #[test]
    fn create_and_find_by_id() {
        let (db, _dir) = temp_db();
        let user = db.create(sample_user("ada@example.com")).unwrap();

        assert_eq!(user.xp, 0);
        assert_eq!(user.created_at, user.updated_at);

        let retrieved = db.find_by_id(user.id).unwrap().unwrap();
        assert_eq!(retrieved.email, "ada@example.com");
        assert_eq!(retrieved.first_name, "Ada");
        assert_eq!(retrieved.date_of_birth, NaiveDate::from_ymd_opt(1990, 12, 10));
    }

    #[test]
    fn find_by_email_is_exact_match() {
        let (db, _dir) = temp_db();
        db.create(sample_user("Ada@example.com")).unwrap();

        assert!(db.find_by_email("Ada@example.com").unwrap().is_some());
        assert!(db.find_by_email("ada@example.com").unwrap().is_none());
        assert!(db.find_by_email("missing@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_rejected() {
        let (db, _dir) = temp_db();
        let first = db.create(sample_user("dup@example.com")).unwrap();

        let mut second = sample_user("dup@example.com");
        second.first_name = "Grace".to_string();
        let err = db.create(second).unwrap_err();
        assert!(matches!(err, UserDbError::EmailTaken));

        // The original record is untouched
        let stored = db.find_by_email("dup@example.com").unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.first_name, "Ada");
    }

    #[test]
    fn email_uniqueness_is_case_sensitive() {
        let (db, _dir) = temp_db();
        let upper = db.create(sample_user("User@example.com")).unwrap();
        let lower = db.create(sample_user("user@example.com")).unwrap();
        assert_ne!(upper.id, lower.id);
    }

    #[test]
    fn delete_removes_account_and_index() {
        let (db, _dir) = temp_db();
        let user = db.create(sample_user("gone@example.com")).unwrap();

        assert!(db.delete(user.id).unwrap());
        assert!(db.find_by_id(user.id).unwrap().is_none());
        assert!(db.find_by_email("gone@example.com").unwrap().is_none());

        // Index entry is gone, so the email can be registered again
        db.create(sample_user("gone@example.com")).unwrap();

        assert!(!db.delete(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.redb");

        let id = {
            let db = UserDatabase::open(&path).unwrap();
            db.create(sample_user("persist@example.com")).unwrap().id
        };

        let db = UserDatabase::open(&path).unwrap();
        let retrieved = db.find_by_email("persist@example.com").unwrap().unwrap();
        assert_eq!(retrieved.id, id);
    }

    #[test]
    fn ping_succeeds_on_open_database() {
        let (db, _dir) = temp_db();
        db.ping().unwrap();
    }
}
