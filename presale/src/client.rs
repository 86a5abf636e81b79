use tracing::{info, warn};

use crate::auth::CredentialStore;
use crate::config::PresaleConfig;
use crate::error::{PresaleError, Result};
use crate::rest::PresaleHttpClient;
use crate::session::{SessionGate, UserChangeNotifier};
use crate::storage::{FileStore, KeyValueStore};
use crate::types::*;

/// Main presale client: remote data plus the local session.
#[derive(Debug, Clone)]
pub struct Presale<S> {
    /// HTTP client.
    pub http_client: PresaleHttpClient,
    auth: CredentialStore<S>,
}

/// Everything the app shows on first launch.
#[derive(Debug, Clone)]
pub struct InitialData {
    pub default_user: User,
    pub batch: Batch,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Home screen data. Each half loads independently; one failing does not
/// hide the other.
#[derive(Debug)]
pub struct Dashboard {
    pub user: Result<User>,
    pub batch: Result<Batch>,
}

impl Dashboard {
    pub fn is_complete(&self) -> bool {
        self.user.is_ok() && self.batch.is_ok()
    }
}

impl Presale<FileStore> {
    /// Client persisting the session under `config.data_dir`.
    pub fn from_config(config: &PresaleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            &config.api_base_url,
            FileStore::new(config.data_dir.clone()),
        ))
    }
}

impl<S: KeyValueStore> Presale<S> {
    pub fn new(base_url: &str, store: S) -> Self {
        Self {
            http_client: PresaleHttpClient::new(base_url),
            auth: CredentialStore::new(store, UserChangeNotifier::new()),
        }
    }

    /// Local credential store.
    pub fn auth(&self) -> &CredentialStore<S> {
        &self.auth
    }

    /// A gate already settled against the persisted current user.
    pub async fn session_gate(&self) -> SessionGate {
        let gate = SessionGate::new();
        gate.load(&self.auth).await;
        gate
    }

    /// Default user, current batch and leaderboard, fetched in that order.
    /// The first failure aborts.
    pub async fn load_initial_data(&self) -> Result<InitialData> {
        let result = async {
            let default_user = self.http_client.get_default_user().await?;
            let batch = self.http_client.get_current_batch().await?;
            let leaderboard = self.http_client.get_leaderboard().await?;
            Ok::<_, PresaleError>(InitialData {
                default_user,
                batch,
                leaderboard,
            })
        }
        .await;

        if let Err(e) = &result {
            warn!(error = %e, "loading initial data failed");
        }
        result
    }

    /// Id to act as: `user_id` when given, otherwise the seeded default
    /// user's. Only the fallback hits the server.
    pub async fn resolve_user_id(&self, user_id: Option<&str>) -> Result<String> {
        match user_id {
            Some(id) => Ok(id.to_string()),
            None => Ok(self.http_client.get_default_user().await?.id),
        }
    }

    /// Fetch the user and the current batch concurrently.
    ///
    /// Returns once both requests have resolved. Without a `user_id` the
    /// server's `/user/default` profile is used.
    pub async fn load_dashboard(&self, user_id: Option<&str>) -> Dashboard {
        let user = async {
            match user_id {
                Some(id) => self.http_client.get_user(id).await,
                None => self.http_client.get_default_user_profile().await,
            }
        };
        let (user, batch) = tokio::join!(user, self.http_client.get_current_batch());

        if let Err(e) = &user {
            warn!(error = %e, "failed to load user");
        }
        if let Err(e) = &batch {
            warn!(error = %e, "failed to load batch");
        }
        Dashboard { user, batch }
    }

    /// Fetch the airdrop tasks into a fresh tracker.
    pub async fn load_airdrop(&self) -> Result<TaskTracker> {
        let tasks = self.http_client.get_tasks().await?;
        Ok(TaskTracker::new(tasks))
    }

    /// Claim the reward for `task_id` and mark it completed on success.
    ///
    /// Returns `Ok(None)` when the task was already completed this session;
    /// nothing is sent in that case.
    pub async fn complete_task(
        &self,
        tracker: &mut TaskTracker,
        user_id: &str,
        task_id: &str,
    ) -> Result<Option<BalanceUpdate>> {
        let task = tracker
            .find(task_id)
            .ok_or_else(|| PresaleError::Validation(format!("unknown task {task_id:?}")))?;
        if tracker.is_completed(task_id) {
            return Ok(None);
        }

        let update = self.http_client.complete_task(user_id, &task.task).await?;
        if update.success {
            tracker.mark_completed(task_id);
            info!(task_id, new_balance = update.new_balance, "task completed");
        } else {
            warn!(task_id, "server declined task completion");
        }
        Ok(Some(update))
    }

    /// Buy `usd` worth of tokens for `user_id`.
    ///
    /// # Errors
    ///
    /// [`PresaleError::Validation`] for amounts that are not finite or are
    /// below [`MIN_PURCHASE_USD`]; no request is made.
    pub async fn buy_tokens(&self, user_id: &str, usd: f64) -> Result<BalanceUpdate> {
        if !usd.is_finite() || usd < MIN_PURCHASE_USD {
            return Err(PresaleError::Validation(format!(
                "minimum purchase is ${MIN_PURCHASE_USD:.0}"
            )));
        }
        let update = self.http_client.purchase_tokens(user_id, usd).await?;
        info!(
            user_id,
            usd,
            success = update.success,
            new_balance = update.new_balance,
            "purchase submitted"
        );
        Ok(update)
    }

    /// Leaderboard sorted by position.
    pub async fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let mut entries = self.http_client.get_leaderboard().await?;
        entries.sort_by_key(|e| e.position);
        Ok(entries)
    }
}
