/*
[INPUT]:  Parsed subcommand and CLI configuration
[OUTPUT]: Human-readable command output, persisted session snapshot
[POS]:    Command layer - drives the adapter client
[UPDATE]: When adding subcommands or changing output format
*/

use anyhow::{Context, Result, bail};
use b2binpay_adapter::{B2BinPayClient, Decimal, Method, SessionSnapshot};
use clap::Subcommand;
use tracing::{debug, info, warn};

use crate::config::CliConfig;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in and print the session expiries
    Connect,
    /// List merchant wallets
    Wallets,
    /// Send an authenticated request and print the JSON response
    Request {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE)
        method: String,
        /// Path relative to the API base URL, e.g. /wallet/
        path: String,
        /// JSON:API request body
        #[arg(long)]
        body: Option<String>,
    },
}

/// Execute `command` and return its output
pub async fn run(command: &Command, config: &CliConfig) -> Result<String> {
    let client = build_client(config)?;

    let outcome = match command {
        Command::Connect => connect(&client, config).await,
        Command::Wallets => wallets(&client).await,
        Command::Request { method, path, body } => {
            request(&client, method, path, body.as_deref()).await
        }
    };

    // Tokens may have rotated during the preflight even if the command failed.
    match (persist_session(&client, config), outcome) {
        (Ok(()), outcome) => outcome,
        (Err(err), Ok(_)) => Err(err),
        (Err(err), Err(command_err)) => {
            warn!(error = %err, "session snapshot not saved");
            Err(command_err)
        }
    }
}

fn build_client(config: &CliConfig) -> Result<B2BinPayClient> {
    let client = match config.credentials() {
        Some((key, secret)) => {
            B2BinPayClient::with_credentials(config.client_config(), key, secret)
        }
        None => B2BinPayClient::new(config.client_config()),
    }
    .context("create client")?;

    if let Some(path) = config.session_file.as_deref().filter(|path| path.exists()) {
        match SessionSnapshot::load(path) {
            Ok(snapshot) => {
                let usable = client.session().restore(&snapshot);
                debug!(path = %path.display(), usable, "session snapshot loaded");
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable session snapshot");
            }
        }
    }

    Ok(client)
}

fn persist_session(client: &B2BinPayClient, config: &CliConfig) -> Result<()> {
    let (Some(path), Some(snapshot)) = (&config.session_file, client.session().snapshot()) else {
        return Ok(());
    };
    snapshot
        .save(path)
        .with_context(|| format!("save session snapshot to {}", path.display()))?;
    debug!(path = %path.display(), "session snapshot saved");
    Ok(())
}

async fn connect(client: &B2BinPayClient, config: &CliConfig) -> Result<String> {
    let Some((key, secret)) = config.credentials() else {
        bail!("key and secret are required to connect");
    };

    if !client.connect(key, secret).await.context("login request")? {
        bail!("login response failed signature verification");
    }

    let state = client.session().state();
    info!("connected");
    Ok(format!(
        "connected\naccess expires:  {}\nrefresh expires: {}\n2fa confirmed:   {}",
        format_expiry(state.access_expires_at),
        format_expiry(state.refresh_expires_at),
        state.two_factor_confirmed
    ))
}

async fn wallets(client: &B2BinPayClient) -> Result<String> {
    let wallets = client.get_wallets().await.context("list wallets")?;

    let mut lines = vec![format!("{:<10} {:>20} {:>20}", "ID", "CONFIRMED", "PENDING")];
    for wallet in &wallets.data {
        lines.push(format!(
            "{:<10} {:>20} {:>20}",
            wallet.id,
            format_amount(wallet.attributes.balance_confirmed),
            format_amount(wallet.attributes.balance_pending)
        ));
    }
    Ok(lines.join("\n"))
}

async fn request(
    client: &B2BinPayClient,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> Result<String> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method: {method}"))?;
    let body = body
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("request body must be valid JSON")?;

    let response: serde_json::Value = client
        .dispatch(method, path, body)
        .await
        .with_context(|| format!("request {path}"))?;
    serde_json::to_string_pretty(&response).context("format response")
}

fn format_expiry(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

fn format_amount(value: Option<Decimal>) -> String {
    value
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| "-".to_string())
}
