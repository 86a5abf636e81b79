use crate::error::{PresaleError, Result};
use crate::rest::PresaleHttpClient;
use crate::types::*;

/// Placeholder id the screens use before a real user is loaded.
pub const PLACEHOLDER_USER_ID: &str = "default-user";

impl PresaleHttpClient {
    // --- Users ---

    /// GET /admin/users - All users known to the server.
    pub async fn get_users(&self) -> Result<Vec<User>> {
        self.get("/admin/users").await
    }

    /// First user from `/admin/users`, used to seed the demo session.
    pub async fn get_default_user(&self) -> Result<User> {
        self.get_users()
            .await?
            .into_iter()
            .next()
            .ok_or(PresaleError::NoUsers)
    }

    /// GET /user/default - The server's default user.
    pub async fn get_default_user_profile(&self) -> Result<User> {
        self.get("/user/default").await
    }

    /// GET /user/{id} - A user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.get(&format!("/user/{user_id}")).await
    }

    // --- Pre-sale ---

    /// GET /batch/current - The batch currently on sale.
    pub async fn get_current_batch(&self) -> Result<Batch> {
        self.get("/batch/current").await
    }

    /// POST /tokens/purchase - Buy tokens for `amount` USD.
    pub async fn purchase_tokens(&self, user_id: &str, amount: f64) -> Result<BalanceUpdate> {
        let body = PurchaseRequest {
            user_id: user_id.to_string(),
            amount,
        };
        self.post_json("/tokens/purchase", &body).await
    }

    // --- Airdrop ---

    /// GET /api/tasks - Airdrop tasks.
    pub async fn get_tasks(&self) -> Result<Vec<Task>> {
        self.get("/api/tasks").await
    }

    /// POST /tasks/complete - Claim the reward for a task.
    pub async fn complete_task(&self, user_id: &str, task: &str) -> Result<BalanceUpdate> {
        if user_id.is_empty() || user_id == PLACEHOLDER_USER_ID {
            return Err(PresaleError::Validation(
                "valid user ID is required".to_string(),
            ));
        }
        let body = CompleteTaskRequest {
            user_id: user_id.to_string(),
            task: task.to_string(),
        };
        self.post_json("/tasks/complete", &body).await
    }

    // --- Leaderboard ---

    /// GET /leaderboard - Current ranking.
    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let entries: Vec<LeaderboardEntry> = self.get("/leaderboard").await?;
        tracing::debug!(entries = entries.len(), "leaderboard received");
        Ok(entries)
    }
}
