use ferroscreen_core::{FieldCatalog, FieldDescriptor};

use crate::cli::FieldsCommand;
use crate::error::CliError;
use crate::output;

pub fn run(command: &FieldsCommand, pretty: bool) -> Result<(), CliError> {
    let catalog = FieldCatalog::builtin();
    match command {
        FieldsCommand::Search { text, kind } => {
            let found: Vec<&FieldDescriptor> = catalog
                .search(text)
                .into_iter()
                .filter(|descriptor| kind.map_or(true, |kind| descriptor.supports(kind)))
                .map(|descriptor| descriptor.as_ref())
                .collect();
            output::render(&found, pretty)
        }
        FieldsCommand::Category { tag } => {
            let found: Vec<&FieldDescriptor> = catalog
                .by_category(*tag)
                .into_iter()
                .map(|descriptor| descriptor.as_ref())
                .collect();
            output::render(&found, pretty)
        }
        FieldsCommand::Show { key } => {
            let descriptor = catalog.lookup(&key.trim().to_ascii_uppercase())?;
            output::render(descriptor.as_ref(), pretty)
        }
    }
}
