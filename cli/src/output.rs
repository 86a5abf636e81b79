//! Rendering of command results, as text or one JSON document per command.

use std::io::Write;

use presale::{
    Batch, BalanceUpdate, Dashboard, LeaderboardEntry, SessionUser, TaskTracker, User,
};
use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

/// Text or JSON writer over any `Write`.
pub struct Output<W: Write> {
    writer: W,
    json: bool,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, json: bool) -> Self {
        Self { writer, json }
    }

    fn emit_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CliError> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Signed-in user, or a note that nobody is.
    pub fn session(&mut self, user: Option<&SessionUser>) -> Result<(), CliError> {
        if self.json {
            return self.emit_json(&json!({ "user": user }));
        }
        match user {
            Some(u) => writeln!(self.writer, "{} <{}> (id {})", u.name, u.email, u.id)?,
            None => writeln!(self.writer, "not signed in")?,
        }
        Ok(())
    }

    pub fn welcome(&mut self, user: &SessionUser) -> Result<(), CliError> {
        if self.json {
            return self.emit_json(&json!({ "user": user }));
        }
        writeln!(self.writer, "Welcome, {}!", user.name)?;
        Ok(())
    }

    pub fn logged_out(&mut self) -> Result<(), CliError> {
        if self.json {
            return self.emit_json(&json!({ "loggedOut": true }));
        }
        writeln!(self.writer, "Signed out.")?;
        Ok(())
    }

    /// Home screen. Missing halves are shown as unavailable.
    pub fn dashboard(&mut self, dash: &Dashboard) -> Result<(), CliError> {
        let user = dash.user.as_ref().ok();
        let batch = dash.batch.as_ref().ok();
        if self.json {
            return self.emit_json(&json!({
                "user": user,
                "batch": batch,
                "errors": {
                    "user": dash.user.as_ref().err().map(ToString::to_string),
                    "batch": dash.batch.as_ref().err().map(ToString::to_string),
                },
            }));
        }

        match user {
            Some(u) => self.user_summary(u)?,
            None => writeln!(self.writer, "User: unavailable")?,
        }
        match batch {
            Some(b) => self.batch_summary(b)?,
            None => writeln!(self.writer, "Batch: unavailable")?,
        }
        Ok(())
    }

    fn user_summary(&mut self, user: &User) -> Result<(), CliError> {
        writeln!(self.writer, "Welcome back, {}", user.name)?;
        writeln!(self.writer, "  Tokens: {:.2}", user.tokens)?;
        writeln!(self.writer, "  Shares: {}", user.shares)?;
        if let Some(code) = &user.referral_code {
            writeln!(self.writer, "  Referral code: {code}")?;
        }
        Ok(())
    }

    fn batch_summary(&mut self, batch: &Batch) -> Result<(), CliError> {
        writeln!(self.writer, "Batch #{}", batch.batch_number)?;
        writeln!(
            self.writer,
            "  Price: ${:.2} (next ${:.2}, +{:.1}%)",
            batch.current_price,
            batch.next_price,
            batch.price_increase_pct()
        )?;
        writeln!(
            self.writer,
            "  Sold: {:.0} / {:.0} tokens ({:.1}%)",
            batch.tokens_sold,
            batch.total_tokens,
            batch.progress_pct()
        )?;
        Ok(())
    }

    /// Pre-sale screen with a token estimate for `usd`.
    pub fn presale(&mut self, batch: &Batch, usd: f64) -> Result<(), CliError> {
        let estimate = batch.tokens_for_usd(usd);
        if self.json {
            return self.emit_json(&json!({
                "batch": batch,
                "progressPct": batch.progress_pct(),
                "estimate": { "usd": usd, "tokens": estimate },
            }));
        }
        self.batch_summary(batch)?;
        writeln!(self.writer, "  ${usd:.0} buys about {estimate:.2} tokens")?;
        Ok(())
    }

    pub fn purchase(&mut self, usd: f64, update: &BalanceUpdate) -> Result<(), CliError> {
        if self.json {
            return self.emit_json(&json!({ "usd": usd, "result": update }));
        }
        if update.success {
            writeln!(
                self.writer,
                "Purchased ${usd:.2} of tokens. New balance: {:.2}",
                update.new_balance
            )?;
        } else {
            writeln!(self.writer, "Purchase was not accepted.")?;
        }
        Ok(())
    }

    /// Airdrop screen: tasks with completion marks and totals.
    pub fn airdrop(&mut self, tracker: &TaskTracker) -> Result<(), CliError> {
        if self.json {
            let tasks: Vec<_> = tracker
                .tasks()
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "task": t.task,
                        "reward": t.reward,
                        "completed": tracker.is_completed(&t.id),
                    })
                })
                .collect();
            return self.emit_json(&json!({
                "tasks": tasks,
                "earned": tracker.total_earned(),
                "remaining": tracker.remaining(),
                "totalAvailable": tracker.total_available(),
            }));
        }

        for t in tracker.tasks() {
            let mark = if tracker.is_completed(&t.id) { "x" } else { " " };
            writeln!(self.writer, "[{mark}] {}\t{}\t+{:.2}", t.id, t.task, t.reward)?;
        }
        writeln!(
            self.writer,
            "Earned: {:.2} coins, available to earn: {:.2} coins",
            tracker.total_earned(),
            tracker.remaining()
        )?;
        Ok(())
    }

    pub fn leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<(), CliError> {
        if self.json {
            return self.emit_json(entries);
        }
        if entries.is_empty() {
            writeln!(self.writer, "No rankings yet.")?;
            return Ok(());
        }
        for e in entries {
            let prize = e
                .prize()
                .map(|p| format!("\tprize {p}"))
                .unwrap_or_default();
            writeln!(
                self.writer,
                "#{}\t{}\t{:.2} coins\t{} shares{prize}",
                e.position, e.user.name, e.coins, e.shares
            )?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
