/*
[INPUT]:  CLI arguments, YAML configuration file, environment
[OUTPUT]: Command output on stdout, logs on stderr
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use b2binpay_cli::{CliConfig, Command, run};

#[derive(Parser, Debug)]
#[command(name = "b2binpay", version, about = "B2BinPay API session client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "session-file", value_name = "PATH")]
    session_file: Option<PathBuf>,
    #[arg(long)]
    sandbox: bool,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let mut config = CliConfig::load(args.config_path.as_deref()).context("load config")?;
    if args.session_file.is_some() {
        config.session_file = args.session_file;
    }
    if args.sandbox {
        config.sandbox = true;
    }

    let client_config = config.client_config();
    info!(
        base_url = client_config.base_url(),
        command = ?args.command,
        "starting b2binpay"
    );

    let output = run(&args.command, &config).await?;
    println!("{output}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
