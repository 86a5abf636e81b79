//! One function per screen. Each runs after the session gate has let the
//! command through.

use std::io::Write;

use presale::{KeyValueStore, Presale};
use tracing::{info, warn};

use crate::cli::{AirdropArgs, LoginArgs, PresaleArgs, SignupArgs, UserArgs};
use crate::error::CliError;
use crate::output::Output;

/// Amount used for the token estimate when not buying.
const DEFAULT_ESTIMATE_USD: f64 = 1000.0;

pub async fn signup<S: KeyValueStore, W: Write>(
    client: &Presale<S>,
    args: &SignupArgs,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let user = client
        .auth()
        .signup(&args.email, &args.password, &args.name)
        .await?;
    out.welcome(&user)
}

pub async fn login<S: KeyValueStore, W: Write>(
    client: &Presale<S>,
    args: &LoginArgs,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let user = client.auth().login(&args.email, &args.password).await?;
    out.welcome(&user)
}

pub async fn logout<S: KeyValueStore, W: Write>(
    client: &Presale<S>,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    client.auth().logout().await?;
    out.logged_out()
}

pub async fn whoami<S: KeyValueStore, W: Write>(
    client: &Presale<S>,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let user = client.auth().current_user().await?;
    out.session(user.as_ref())
}

/// Dashboard. Partial data is still shown; the command only fails when
/// neither half loaded.
pub async fn home<S: KeyValueStore, W: Write>(
    client: &Presale<S>,
    args: &UserArgs,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let dash = client.load_dashboard(args.user_id.as_deref()).await;
    out.dashboard(&dash)?;
    match (dash.user, dash.batch) {
        (Err(e), Err(_)) => Err(e.into()),
        _ => Ok(()),
    }
}

/// Airdrop tasks, completing the requested ones first.
///
/// A failed completion is logged and the remaining ones are still tried.
pub async fn airdrop<S: KeyValueStore, W: Write>(
    client: &Presale<S>,
    args: &AirdropArgs,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let mut tracker = client.load_airdrop().await?;

    if !args.complete.is_empty() {
        let user_id = client.resolve_user_id(args.user.user_id.as_deref()).await?;
        for task_id in &args.complete {
            match client.complete_task(&mut tracker, &user_id, task_id).await {
                Ok(Some(update)) => {
                    info!(task_id = %task_id, new_balance = update.new_balance, "reward claimed")
                }
                Ok(None) => info!(task_id = %task_id, "already completed"),
                Err(e) => warn!(task_id = %task_id, error = %e, "could not complete task"),
            }
        }
    }

    out.airdrop(&tracker)
}

pub async fn leaderboard<S: KeyValueStore, W: Write>(
    client: &Presale<S>,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let entries = client.load_leaderboard().await?;
    out.leaderboard(&entries)
}

/// Pre-sale batch, then an optional purchase.
pub async fn presale<S: KeyValueStore, W: Write>(
    client: &Presale<S>,
    args: &PresaleArgs,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let batch = client.http_client.get_current_batch().await?;
    out.presale(&batch, args.buy.unwrap_or(DEFAULT_ESTIMATE_USD))?;

    if let Some(usd) = args.buy {
        let user_id = client.resolve_user_id(args.user.user_id.as_deref()).await?;
        let update = client.buy_tokens(&user_id, usd).await?;
        out.purchase(usd, &update)?;
    }
    Ok(())
}
