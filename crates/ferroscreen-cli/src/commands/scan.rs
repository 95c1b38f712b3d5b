use ferroscreen_core::{ClientConfig, CompileOptions, ScreenerSession};

use crate::cli::QueryArgs;
use crate::error::CliError;
use crate::output;

use super::query::build_query;

pub async fn run(args: &QueryArgs, config: &ClientConfig, pretty: bool) -> Result<(), CliError> {
    let query = build_query(args)?;
    let options = CompileOptions {
        language: config.language.clone(),
    };
    let session = ScreenerSession::with_options(query, super::transport(config)?, options);

    let table = session.execute().await?;
    output::render(&table, pretty)
}
