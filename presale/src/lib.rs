pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod rest;
pub mod session;
pub mod storage;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config
pub use client::{Dashboard, InitialData, Presale};
pub use config::PresaleConfig;
pub use error::{PresaleError, Result};

// REST client
pub use rest::PresaleHttpClient;

// Local auth + persistence
pub use auth::CredentialStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

// Session gate
pub use session::{
    GateState, Route, SessionGate, UserChange, UserChangeNotifier, UserChangeSubscription,
};

// Server-modeled records
pub use types::{Batch, LeaderboardEntry, Task, TaskTracker, User, UserRef};

// Mutations
pub use types::{BalanceUpdate, MIN_PURCHASE_USD};

// Local session records
pub use types::{CredentialRecord, SessionUser};
