//! `config show` and `config path`.

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::error::AlfredError;
use crate::output::to_json;

use super::Context;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn config(ctx: &Context, cmd: &ConfigCommands) -> Result<String, AlfredError> {
    match cmd {
        ConfigCommands::Show => match ctx.format {
            OutputFormat::Json => to_json(&ctx.config),
            OutputFormat::Pretty => ctx.config.to_yaml().map(|yaml| yaml.trim_end().to_string()),
        },
        ConfigCommands::Path => Ok(ctx.config_path.display().to_string()),
    }
}
