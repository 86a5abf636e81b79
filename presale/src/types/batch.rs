use serde::{Deserialize, Serialize};

/// A pre-sale tranche. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "super::de_u32")]
    pub batch_number: u32,
    pub current_price: f64,
    pub next_price: f64,
    /// Fractional once purchases at non-round prices land.
    pub tokens_sold: f64,
    pub total_tokens: f64,
}

impl Batch {
    /// Percentage of the batch already sold, in `[0, 100]` for sane data.
    pub fn progress_pct(&self) -> f64 {
        if self.total_tokens <= 0.0 {
            return 0.0;
        }
        self.tokens_sold / self.total_tokens * 100.0
    }

    /// Tokens left in this batch.
    pub fn tokens_remaining(&self) -> f64 {
        (self.total_tokens - self.tokens_sold).max(0.0)
    }

    /// How many tokens `usd` buys at the current price.
    pub fn tokens_for_usd(&self, usd: f64) -> f64 {
        if self.current_price <= 0.0 {
            return 0.0;
        }
        usd / self.current_price
    }

    /// Relative price step to the next batch, as a percentage.
    pub fn price_increase_pct(&self) -> f64 {
        if self.current_price <= 0.0 {
            return 0.0;
        }
        (self.next_price - self.current_price) / self.current_price * 100.0
    }
}
