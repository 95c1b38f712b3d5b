use ferroscreen_core::{compile_with, ClientConfig, CompileOptions};

use crate::cli::QueryArgs;
use crate::error::CliError;
use crate::output;

use super::query::build_query;

pub fn run(args: &QueryArgs, config: &ClientConfig, pretty: bool) -> Result<(), CliError> {
    let query = build_query(args)?;
    let options = CompileOptions {
        language: config.language.clone(),
    };
    let wire = compile_with(&query, &options)?;

    tracing::info!(endpoint = %wire.endpoint(&config.base_url), "compiled query");
    output::render(&wire.to_json()?, pretty)
}
