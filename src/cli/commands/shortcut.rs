//! `shortcut check` and `shortcut install`.

use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::cli::args::{OutputFormat, ShortcutCommands};
use crate::error::AlfredError;
use crate::menu::INSTALL_MESSAGE;
use crate::output::to_json;
use crate::system::shortcut;

#[derive(Debug, Serialize)]
struct ShortcutStatus<'a> {
    name: &'a str,
    installed: bool,
}

/// Execute shortcut subcommands.
///
/// # Errors
///
/// Returns an error if `shortcuts` or `open` fails, or if the packaged
/// shortcut file is missing.
pub fn shortcut(ctx: &Context, cmd: &ShortcutCommands) -> Result<String, AlfredError> {
    let runner = ctx.runner();
    let name = ctx.config.shortcut.name.as_str();

    match cmd {
        ShortcutCommands::Check => {
            let installed = shortcut::is_installed(&runner, name)?;
            match ctx.format {
                OutputFormat::Json => to_json(&ShortcutStatus { name, installed }),
                OutputFormat::Pretty if installed => {
                    Ok(format!("{} '{name}' is installed", "Shortcut".green().bold()))
                }
                OutputFormat::Pretty => Ok(format!(
                    "{} '{name}' is not installed. Run 'alfred shortcut install'.",
                    "Shortcut".yellow().bold()
                )),
            }
        }
        ShortcutCommands::Install => {
            shortcut::install(&runner, &ctx.config.shortcut.file)?;
            tracing::info!(file = %ctx.config.shortcut.file.display(), "opened shortcut file");
            Ok(INSTALL_MESSAGE.to_string())
        }
    }
}
