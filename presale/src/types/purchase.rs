use serde::{Deserialize, Serialize};

/// Smallest purchase the pre-sale accepts, in USD.
pub const MIN_PURCHASE_USD: f64 = 100.0;

/// Body of `POST /tokens/purchase`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub user_id: String,
    pub amount: f64,
}

/// Body of `POST /tasks/complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    pub user_id: String,
    pub task: String,
}

/// Server reply to either mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    pub success: bool,
    pub new_balance: f64,
}
