use serde::{Deserialize, Serialize};

use super::user::UserRef;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "super::de_u32")]
    pub position: u32,
    #[serde(rename = "userId")]
    pub user: UserRef,
    pub coins: f64,
    pub shares: f64,
}

impl LeaderboardEntry {
    /// Prize for this entry's rank, if it places.
    pub fn prize(&self) -> Option<u64> {
        prize_for_position(self.position)
    }
}

/// Coin prizes for the top three positions.
pub const LEADERBOARD_PRIZES: [u64; 3] = [25_000, 15_000, 10_000];

/// Prize awarded at `position` (1-based).
pub fn prize_for_position(position: u32) -> Option<u64> {
    let idx = usize::try_from(position).ok()?.checked_sub(1)?;
    LEADERBOARD_PRIZES.get(idx).copied()
}
