use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use presale::Route;

/// presale: command-line client for the token pre-sale and airdrop.
#[derive(Parser, Debug)]
#[command(name = "presale", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// API base URL (overrides PRESALE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for the local session (overrides PRESALE_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a local account and sign in
    Signup(SignupArgs),

    /// Sign in with a local account
    Login(LoginArgs),

    /// Sign out (stored accounts are kept)
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Dashboard: your balance and the current batch
    Home(UserArgs),

    /// Airdrop tasks and rewards
    Airdrop(AirdropArgs),

    /// Top performers
    Leaderboard,

    /// Current pre-sale batch, optionally buying tokens
    Presale(PresaleArgs),
}

impl Command {
    /// The screen this command stands for, if it is gated.
    pub fn route(&self) -> Option<Route> {
        match self {
            Command::Signup(_) => Some(Route::Signup),
            Command::Login(_) => Some(Route::Login),
            Command::Home(_) => Some(Route::Home),
            Command::Airdrop(_) => Some(Route::Airdrop),
            Command::Leaderboard => Some(Route::Leaderboard),
            Command::Presale(_) => Some(Route::Presale),
            Command::Logout | Command::Whoami => None,
        }
    }
}

/// Arguments for the `signup` subcommand.
#[derive(Parser, Debug)]
pub struct SignupArgs {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Arguments for the `login` subcommand.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
}

/// Server-side user selection shared by the data screens.
#[derive(Args, Debug, Clone, Default)]
pub struct UserArgs {
    /// Server user id (defaults to the server's default user)
    #[arg(long)]
    pub user_id: Option<String>,
}

/// Arguments for the `airdrop` subcommand.
#[derive(Parser, Debug)]
pub struct AirdropArgs {
    #[command(flatten)]
    pub user: UserArgs,

    /// Task ids to complete, in order
    #[arg(long = "complete", value_name = "TASK_ID")]
    pub complete: Vec<String>,
}

/// Arguments for the `presale` subcommand.
#[derive(Parser, Debug)]
pub struct PresaleArgs {
    #[command(flatten)]
    pub user: UserArgs,

    /// Buy tokens for this many USD
    #[arg(long, value_name = "USD")]
    pub buy: Option<f64>,
}
