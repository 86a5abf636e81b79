//! Local sign-up / log-in against records kept in a [`KeyValueStore`].
//!
//! Two keys are used: `users` holds every [`CredentialRecord`] ever created on
//! this device, `currentUser` holds the signed-in [`SessionUser`]. Nothing is
//! sent to the server. Passwords are stored and compared as entered; emails
//! are matched exactly, without case folding or trimming.

use tracing::{debug, info, warn};

use crate::error::{PresaleError, Result};
use crate::session::{UserChange, UserChangeNotifier};
use crate::storage::{get_json, set_json, KeyValueStore};
use crate::types::{CredentialRecord, SessionUser};

pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Credential store over a key-value backend.
#[derive(Debug, Clone)]
pub struct CredentialStore<S> {
    store: S,
    notifier: UserChangeNotifier,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S, notifier: UserChangeNotifier) -> Self {
        Self { store, notifier }
    }

    pub fn notifier(&self) -> &UserChangeNotifier {
        &self.notifier
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// [`PresaleError::DuplicateEmail`] if a record with the same email
    /// exists; the stored records are left untouched. If the new account
    /// cannot be signed in, its record is removed again so a retry starts
    /// clean.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<SessionUser> {
        require_filled(&[email, password, name])?;

        let mut users = self.credentials().await?;
        if users.iter().any(|u| u.email == email) {
            debug!(email, "signup rejected: email taken");
            return Err(PresaleError::DuplicateEmail);
        }

        let record = CredentialRecord {
            id: next_id(&users),
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        };
        let user = record.to_session_user();

        users.push(record);
        set_json(&self.store, USERS_KEY, &users).await?;
        if let Err(e) = set_json(&self.store, CURRENT_USER_KEY, &user).await {
            users.pop();
            if let Err(undo) = set_json(&self.store, USERS_KEY, &users).await {
                warn!(error = %undo, email, "could not roll back new account");
            }
            return Err(e);
        }

        info!(id = %user.id, email = %user.email, "user registered");
        self.notifier.notify(UserChange::SignedUp);
        Ok(user)
    }

    /// Sign in with an exact email + password match.
    ///
    /// # Errors
    ///
    /// [`PresaleError::InvalidCredentials`] if no record matches; the current
    /// user is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser> {
        require_filled(&[email, password])?;

        let users = self.credentials().await?;
        let user = users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(CredentialRecord::to_session_user)
            .ok_or(PresaleError::InvalidCredentials)?;

        set_json(&self.store, CURRENT_USER_KEY, &user).await?;

        info!(id = %user.id, email = %user.email, "user logged in");
        self.notifier.notify(UserChange::LoggedIn);
        Ok(user)
    }

    /// Clear the current user. Stored credentials are kept.
    pub async fn logout(&self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY).await?;
        info!("user logged out");
        self.notifier.notify(UserChange::LoggedOut);
        Ok(())
    }

    /// The signed-in user, if any.
    pub async fn current_user(&self) -> Result<Option<SessionUser>> {
        get_json(&self.store, CURRENT_USER_KEY).await
    }

    /// All stored credential records.
    pub async fn credentials(&self) -> Result<Vec<CredentialRecord>> {
        Ok(get_json(&self.store, USERS_KEY).await?.unwrap_or_default())
    }
}

fn require_filled(fields: &[&str]) -> Result<()> {
    if fields.iter().any(|f| f.is_empty()) {
        return Err(PresaleError::Validation(
            "please fill in all fields".to_string(),
        ));
    }
    Ok(())
}

/// Millisecond timestamp id, bumped past any id already taken.
fn next_id(users: &[CredentialRecord]) -> String {
    let mut id = chrono::Utc::now().timestamp_millis();
    while users.iter().any(|u| u.id == id.to_string()) {
        id += 1;
    }
    id.to_string()
}
