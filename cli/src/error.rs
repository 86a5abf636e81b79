use presale::{PresaleError, Route};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Presale(#[from] PresaleError),

    #[error("not signed in: run `presale login` or `presale signup` first ({from} -> {to})")]
    SignInRequired { from: Route, to: Route },

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("interrupted")]
    Interrupted,
}
