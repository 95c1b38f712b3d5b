use std::time::Duration;

use ferroscreen_core::{ClientConfig, CompileOptions, ScreenerSession, StreamConfig};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::output::NdjsonWriter;

use super::query::build_query;

pub async fn run(args: &WatchArgs, config: &ClientConfig) -> Result<(), CliError> {
    if !args.every.is_finite() || args.every < 0.0 {
        return Err(CliError::Usage(format!(
            "--every must be a non-negative number of seconds, got {}",
            args.every
        )));
    }

    let query = build_query(&args.query)?;
    let options = CompileOptions {
        language: config.language.clone(),
    };
    let session = ScreenerSession::with_options(query, super::transport(config)?, options);
    // Fail on an invalid query before the first poll.
    session.compile()?;

    let cancellation = CancellationToken::new();
    let ctrl_c = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping after the current request");
            ctrl_c.cancel();
        }
    });

    let mut stream_config =
        StreamConfig::new(Duration::from_secs_f64(args.every)).with_cancellation(cancellation);
    if let Some(max_iterations) = args.max_iterations {
        stream_config = stream_config.with_max_iterations(max_iterations);
    }

    let mut writer = NdjsonWriter::stdout();
    let mut tables = session.stream(stream_config);
    while let Some(table) = tables.next().await {
        writer.write(&table?)?;
    }
    Ok(())
}
