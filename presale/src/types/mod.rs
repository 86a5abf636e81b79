pub mod batch;
pub mod leaderboard;
pub mod purchase;
pub mod session;
pub mod task;
pub mod user;

pub use batch::*;
pub use leaderboard::*;
pub use purchase::*;
pub use session::*;
pub use task::*;
pub use user::*;

/// Whole-number `u32` that the server may send as a float (`9` or `9.0`).
pub(crate) fn de_u32<'de, D: serde::Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    use serde::Deserialize;
    let n = serde_json::Number::deserialize(d)?;
    if let Some(v) = n.as_u64() {
        return u32::try_from(v).map_err(|_| serde::de::Error::custom(format!("{v} out of range")));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => Ok(f as u32),
        _ => Err(serde::de::Error::custom(format!("expected a whole number, got {n}"))),
    }
}
