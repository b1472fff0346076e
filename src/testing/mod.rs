//! In-memory store and fixtures for tests. Mirrors the Postgres store's
//! semantics closely enough that the router tests exercise the real handler
//! and gate code paths without a live database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::database::manager::DatabaseError;
use crate::database::models::{Account, AdminSummary, Announcement, Role};
use crate::database::store::Store;

#[derive(Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
    announcements: Mutex<Vec<Announcement>>,
    /// When set, every store call fails with this message (500-path tests).
    fail_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, for exercising the 500 mapping.
    pub fn broken(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn insert_account(&self, account: Account) {
        self.accounts.lock().unwrap().insert(account.id, account);
    }

    pub fn insert_announcement(&self, announcement: Announcement) {
        self.announcements.lock().unwrap().push(announcement);
    }

    pub fn account(&self, id: Uuid) -> Option<Account> {
        self.accounts.lock().unwrap().get(&id).cloned()
    }

    fn check_failure(&self) -> Result<(), DatabaseError> {
        match &self.fail_with {
            Some(message) => Err(DatabaseError::QueryError(message.clone())),
            None => Ok(()),
        }
    }

    fn update_account<F>(&self, id: Uuid, apply: F) -> Result<Account, DatabaseError>
    where
        F: FnOnce(&mut Account),
    {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("account {} not found", id)))?;
        apply(account);
        account.updated_at = Utc::now();
        Ok(account.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_failure()
    }

    async fn account_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError> {
        self.check_failure()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn unlock_account(&self, id: Uuid) -> Result<Account, DatabaseError> {
        self.check_failure()?;
        self.update_account(id, |account| {
            account.failed_attempts = 0;
            account.restricted = false;
        })
    }

    async fn record_failed_login(&self, id: Uuid, max_failed: i32) -> Result<Account, DatabaseError> {
        self.check_failure()?;
        self.update_account(id, |account| {
            account.failed_attempts += 1;
            account.restricted = account.restricted || account.failed_attempts >= max_failed;
        })
    }

    async fn clear_failed_logins(&self, id: Uuid) -> Result<Account, DatabaseError> {
        self.check_failure()?;
        self.update_account(id, |account| {
            account.failed_attempts = 0;
        })
    }

    async fn active_announcement(&self) -> Result<Option<Announcement>, DatabaseError> {
        self.check_failure()?;
        let now = Utc::now();
        let announcements = self.announcements.lock().unwrap();
        Ok(announcements
            .iter()
            .filter(|a| a.is_live(now))
            .max_by_key(|a| a.updated_at)
            .cloned())
    }

    async fn list_admins(&self) -> Result<Vec<AdminSummary>, DatabaseError> {
        self.check_failure()?;
        let accounts = self.accounts.lock().unwrap();
        let mut admins: Vec<AdminSummary> = accounts
            .values()
            .filter(|a| a.role == Role::Admin)
            .map(|a| AdminSummary {
                id: a.id,
                email: a.email.clone(),
                name: a.name.clone(),
            })
            .collect();
        admins.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(admins)
    }
}

// Fixtures

pub fn account(email: &str, password: &str, role: Role) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        password_hash: auth::hash_password(password),
        role,
        restricted: false,
        failed_attempts: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn admin_account(email: &str, password: &str) -> Account {
    account(email, password, Role::Admin)
}

pub fn customer_account(email: &str, password: &str) -> Account {
    account(email, password, Role::Customer)
}

pub fn announcement(
    title: &str,
    active: bool,
    expires_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
) -> Announcement {
    Announcement {
        id: Uuid::new_v4(),
        title: title.to_string(),
        body: format!("{} body", title),
        active,
        expires_at,
        created_at: updated_at,
        updated_at,
    }
}

/// A valid bearer token for the given account.
pub fn token_for(account: &Account) -> String {
    auth::generate_jwt(&Claims::for_account(account)).expect("token generation")
}
