use clap::Parser;
use colored::Colorize;

use alfred::cli::args::{Cli, Commands, ConfigArgs, ShortcutArgs};
use alfred::cli::commands::{self, Context};
use alfred::config::Paths;
use alfred::error::AlfredError;
use alfred::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AlfredError> {
    let cli = Cli::parse();

    // The menu owns the terminal, so its logs go to a file.
    if matches!(cli.command, Commands::Menu) {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        logging::init_file(&paths.log_file, cli.verbose)?;
    } else {
        logging::init_stderr(cli.verbose);
    }

    let ctx = Context::load(cli.config, cli.output)?;

    let output = match cli.command {
        Commands::Start { minutes } => commands::start(&ctx, minutes)?,
        Commands::Pomodoro(args) => commands::pomodoro(&ctx, &args)?,
        Commands::Menu => commands::menu(&ctx)?,
        Commands::Enable { minutes, pid } => commands::enable(&ctx, minutes, pid.pid_file)?,
        Commands::Disable { pid } => commands::disable(&ctx, pid.pid_file)?,
        Commands::Status { pid } => commands::status(&ctx, pid.pid_file)?,
        Commands::Daemon { minutes, pid } => commands::daemon(&ctx, minutes, pid.pid_file)?,
        Commands::Shortcut(ShortcutArgs { command }) => commands::shortcut(&ctx, &command)?,
        Commands::Config(ConfigArgs { command }) => commands::config(&ctx, &command)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
