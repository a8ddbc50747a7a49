use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{User, UserSettings};
use crate::session::traits::SessionProvider;
use crate::session::types::{SignupData, UserUpdate};
use crate::storage::{KeyValueStore, KeyValueStoreExt, StoreError};

const USERS_KEY: &str = "users";
const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Account record as kept in the `users` key
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAccount {
    #[serde(flatten)]
    user: User,
    password: String,
}

#[derive(Debug, Clone)]
struct ActiveSession {
    user: User,
    token: String,
}

/// Local authentication backed by a key-value store.
///
/// Accounts, the signed-in user and its token are kept in the store so a
/// session survives a reload; there is no real backend behind it.
pub struct MockAuth {
    store: Arc<dyn KeyValueStore>,
    latency: Duration,
    session: Mutex<Option<ActiveSession>>,
}

impl MockAuth {
    /// Restore any persisted session from `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Result<Self, AuthError> {
        let user: Option<User> = store.get_json(USER_KEY)?;
        let token = store.get(TOKEN_KEY)?;

        let session = match (user, token) {
            (Some(user), Some(token)) => {
                info!("Restored session for {}", user.email);
                Some(ActiveSession { user, token })
            }
            (Some(user), None) => {
                warn!("Stored user {} has no token, starting signed out", user.email);
                None
            }
            _ => None,
        };

        Ok(Self {
            store,
            latency: Duration::ZERO,
            session: Mutex::new(session),
        })
    }

    /// Simulated round-trip delay applied to login and signup
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn session(&self) -> MutexGuard<'_, Option<ActiveSession>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn accounts(&self) -> Result<Vec<StoredAccount>, AuthError> {
        Ok(self.store.get_json(USERS_KEY)?.unwrap_or_default())
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn start_session(&self, user: User) -> Result<User, AuthError> {
        let token = Uuid::new_v4().to_string();
        self.store.set_json(USER_KEY, &user)?;
        self.store.set(TOKEN_KEY, &token)?;
        *self.session() = Some(ActiveSession {
            user: user.clone(),
            token,
        });
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_round_trip().await;

        let account = self
            .accounts()?
            .into_iter()
            .find(|a| a.user.email == email)
            .filter(|a| a.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        info!("✅ Signed in {}", account.user.email);
        self.start_session(account.user)
    }

    pub async fn signup(&self, data: SignupData) -> Result<User, AuthError> {
        self.simulate_round_trip().await;

        let mut accounts = self.accounts()?;
        if accounts.iter().any(|a| a.user.email == data.email) {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().simple().to_string()[..9].to_string(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            role: data.role,
            phone: None,
            brand_name: None,
            address: None,
            area_of_specialization: None,
            about: None,
            image_url: None,
            settings: UserSettings::default(),
            created_at: Utc::now(),
        };

        accounts.push(StoredAccount {
            user: user.clone(),
            password: data.password,
        });
        self.store.set_json(USERS_KEY, &accounts)?;

        info!("✅ Created account for {}", user.email);
        self.start_session(user)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        if let Some(session) = self.session().take() {
            debug!("Signing out {}", session.user.email);
        }
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        Ok(())
    }

    /// Merge a profile edit into the signed-in user and its stored account
    pub async fn update_user(&self, update: UserUpdate) -> Result<User, AuthError> {
        let mut current = self
            .current_user()
            .ok_or(AuthError::NotAuthenticated)?;

        apply_update(&mut current, update);

        let mut accounts = self.accounts()?;
        for account in accounts.iter_mut().filter(|a| a.user.id == current.id) {
            account.user = current.clone();
        }
        self.store.set_json(USERS_KEY, &accounts)?;
        self.store.set_json(USER_KEY, &current)?;

        if let Some(session) = self.session().as_mut() {
            session.user = current.clone();
        }

        info!("Profile updated for {}", current.email);
        Ok(current)
    }
}

fn apply_update(user: &mut User, update: UserUpdate) {
    if let Some(first_name) = update.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = update.last_name {
        user.last_name = last_name;
    }

    let optional = [
        (&mut user.phone, update.phone),
        (&mut user.brand_name, update.brand_name),
        (&mut user.address, update.address),
        (&mut user.area_of_specialization, update.area_of_specialization),
        (&mut user.about, update.about),
        (&mut user.image_url, update.image_url),
    ];
    for (slot, value) in optional {
        if value.is_some() {
            *slot = value;
        }
    }

    if let Some(settings) = update.settings {
        let current = &mut user.settings;
        current.email_notifications = settings
            .email_notifications
            .unwrap_or(current.email_notifications);
        current.push_notifications = settings
            .push_notifications
            .unwrap_or(current.push_notifications);
        current.marketing_emails = settings.marketing_emails.unwrap_or(current.marketing_emails);
        current.profile_visibility = settings
            .profile_visibility
            .unwrap_or(current.profile_visibility);
    }
}

impl SessionProvider for MockAuth {
    fn current_user(&self) -> Option<User> {
        self.session().as_ref().map(|s| s.user.clone())
    }

    fn token(&self) -> Option<String> {
        self.session().as_ref().map(|s| s.token.clone())
    }
}
