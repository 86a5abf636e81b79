use serde::{Deserialize, Serialize};

/// The signed-in user as persisted under `currentUser`. Never carries a
/// password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// A stored credential as persisted in the `users` list.
///
/// The password is kept in clear text, matching the records already on
/// devices. Do not reuse this for anything server-facing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

impl CredentialRecord {
    /// The record with its password stripped.
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}
