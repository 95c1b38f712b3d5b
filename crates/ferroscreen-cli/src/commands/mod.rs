mod compile;
mod fields;
mod query;
mod scan;
mod watch;

use std::sync::Arc;

use ferroscreen_core::{ClientConfig, HttpTransport, ScreenerTransport};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Scan(args) => scan::run(args, &client_config(cli)?, cli.pretty).await,
        Command::Watch(args) => watch::run(args, &client_config(cli)?).await,
        Command::Compile(args) => compile::run(args, &client_config(cli)?, cli.pretty),
        Command::Fields { command } => fields::run(command, cli.pretty),
    }
}

/// File, then environment, then command-line flags.
fn client_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let base = match &cli.config {
        Some(path) => ClientConfig::from_path(path)?,
        None => ClientConfig::default(),
    };
    let mut config = base.apply_env(|name| std::env::var(name).ok())?;

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    if let Some(max_retries) = cli.max_retries {
        config = config.with_max_retries(max_retries);
    }
    Ok(config)
}

fn transport(config: &ClientConfig) -> Result<Arc<dyn ScreenerTransport>, CliError> {
    Ok(Arc::new(HttpTransport::new(config)?))
}
