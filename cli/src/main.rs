mod cli;
mod error;
mod output;
mod screens;

use clap::Parser;
use cli::{Cli, Command, UserArgs};
use error::CliError;
use output::Output;
use presale::{FileStore, Presale, PresaleConfig, Route};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    let cancel = setup_signal_handler();

    let result = tokio::select! {
        r = run(cli) => r,
        _ = cancel.cancelled() => Err(CliError::Interrupted),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        // 2: the user can fix it by re-entering details.
        let code = match &e {
            CliError::Presale(pe) if pe.is_auth_error() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

/// Resolve config, pass the command through the session gate, run it.
async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = PresaleConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_base_url(url);
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    debug!(api = %config.api_base_url, data_dir = %config.data_dir.display(), "config");

    let client = Presale::from_config(&config)?;
    let mut out = Output::new(std::io::stdout().lock(), cli.json);

    let gate = client.session_gate().await;
    if let Some(route) = cli.command.route() {
        match gate.redirect_for(route) {
            Some(Route::Home) => {
                info!(from = %route, "already signed in, showing home");
                return screens::home(&client, &UserArgs::default(), &mut out).await;
            }
            Some(to) => return Err(CliError::SignInRequired { from: route, to }),
            None => {}
        }
    }

    dispatch(&client, cli.command, &mut out).await
}

async fn dispatch<W: std::io::Write>(
    client: &Presale<FileStore>,
    command: Command,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    match command {
        Command::Signup(args) => screens::signup(client, &args, out).await,
        Command::Login(args) => screens::login(client, &args, out).await,
        Command::Logout => screens::logout(client, out).await,
        Command::Whoami => screens::whoami(client, out).await,
        Command::Home(args) => screens::home(client, &args, out).await,
        Command::Airdrop(args) => screens::airdrop(client, &args, out).await,
        Command::Leaderboard => screens::leaderboard(client, out).await,
        Command::Presale(args) => screens::presale(client, &args, out).await,
    }
}

/// Register a SIGINT handler that triggers the returned token.
fn setup_signal_handler() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    cancel
}
