use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "alfred")]
#[command(about = "Timed focus sessions for macOS: Do Not Disturb, a hidden Dock and a countdown")]
#[command(long_about = "alfred - timed focus sessions for macOS

Starting a session turns on Do Not Disturb through a Shortcuts automation,
toggles Dock auto-hide and counts down. When the time is up (or the session
is ended early) both are put back.

QUICK START:
  alfred start 25             Focus for 25 minutes (Ctrl+C ends early)
  alfred pomodoro             Run Pomodoro cycles, prompting for settings
  alfred menu                 Open the interactive focus menu
  alfred shortcut install     Install the Do Not Disturb shortcut

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  alfred <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Log progress to stderr (overridden by ALFRED_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file [default: ~/.alfred/config.yaml]
    #[arg(long, env = "ALFRED_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Focus for a number of minutes
    ///
    /// Turns on Do Not Disturb, toggles the Dock and prints the time left
    /// as it changes. Press Ctrl+C to end early; the system is restored
    /// either way.
    ///
    /// # Examples
    ///
    ///   alfred start 25
    ///   alfred start 90 --output json
    #[command(alias = "s")]
    Start {
        /// Session length in minutes
        minutes: u32,
    },

    /// Run Pomodoro cycles
    ///
    /// Alternates focus sessions and breaks. Do Not Disturb and the Dock
    /// are toggled for every phase. Values not given as flags are asked
    /// for interactively.
    ///
    /// # Examples
    ///
    ///   alfred pomodoro
    ///   alfred pomodoro --session 25 --count 4 --break 5
    #[command(alias = "p")]
    Pomodoro(PomodoroArgs),

    /// Open the interactive focus menu
    ///
    /// Lists the focus lengths from the config, a Pomodoro entry and
    /// "End Focus". Quitting the menu ends any running session.
    ///
    /// Keys: j/k or arrows to move, Enter to select, q to quit.
    #[command(alias = "m")]
    Menu,

    /// Start focus in the background
    ///
    /// Hands the countdown to a detached worker and records its pid, so
    /// the terminal is free. Use 'alfred disable' to end it early.
    Enable {
        /// Session length in minutes
        minutes: u32,

        #[command(flatten)]
        pid: PidFileArgs,
    },

    /// End a background focus session early
    Disable {
        #[command(flatten)]
        pid: PidFileArgs,
    },

    /// Show whether a background focus session is running
    Status {
        #[command(flatten)]
        pid: PidFileArgs,
    },

    /// Background worker started by 'enable'
    #[command(hide = true)]
    Daemon {
        minutes: u32,

        #[command(flatten)]
        pid: PidFileArgs,
    },

    /// Check or install the Do Not Disturb shortcut
    Shortcut(ShortcutArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   alfred completions zsh > ~/.zsh/completions/_alfred
    ///   source <(alfred completions bash)
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args, Default)]
pub struct PomodoroArgs {
    /// Focus session length in minutes
    #[arg(short, long)]
    pub session: Option<u32>,

    /// Number of focus sessions
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Break length in minutes
    #[arg(short = 'b', long = "break")]
    pub break_minutes: Option<u32>,
}

#[derive(Args)]
pub struct PidFileArgs {
    /// Where the background worker pid is recorded [default: from config]
    #[arg(long, env = "ALFRED_PID_FILE")]
    pub pid_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShortcutArgs {
    #[command(subcommand)]
    pub command: ShortcutCommands,
}

#[derive(Subcommand)]
pub enum ShortcutCommands {
    /// Check that the shortcut is installed
    Check,

    /// Open the packaged shortcut file so Shortcuts can import it
    Install,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start() {
        let cli = Cli::try_parse_from(["alfred", "start", "25"]).unwrap();
        assert!(matches!(cli.command, Commands::Start { minutes: 25 }));
        assert_eq!(cli.output, OutputFormat::Pretty);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_start_rejects_non_numeric() {
        assert!(Cli::try_parse_from(["alfred", "start", "soon"]).is_err());
        assert!(Cli::try_parse_from(["alfred", "start", "-5"]).is_err());
    }

    #[test]
    fn test_parse_pomodoro_flags() {
        let cli = Cli::try_parse_from([
            "alfred", "pomodoro", "--session", "50", "--count", "2", "--break", "10",
        ])
        .unwrap();
        let Commands::Pomodoro(args) = cli.command else {
            panic!("expected pomodoro");
        };
        assert_eq!(args.session, Some(50));
        assert_eq!(args.count, Some(2));
        assert_eq!(args.break_minutes, Some(10));
    }

    #[test]
    fn test_parse_pomodoro_without_flags() {
        let cli = Cli::try_parse_from(["alfred", "p"]).unwrap();
        let Commands::Pomodoro(args) = cli.command else {
            panic!("expected pomodoro");
        };
        assert_eq!(args.session, None);
        assert_eq!(args.break_minutes, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "alfred",
            "status",
            "--output",
            "json",
            "-v",
            "--pid-file",
            "/tmp/x.pid",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.verbose);
        let Commands::Status { pid } = cli.command else {
            panic!("expected status");
        };
        assert_eq!(pid.pid_file, Some(PathBuf::from("/tmp/x.pid")));
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["alfred", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
        assert!(Cli::try_parse_from(["alfred", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn test_parse_nested_subcommands() {
        let cli = Cli::try_parse_from(["alfred", "shortcut", "install"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Shortcut(ShortcutArgs { command: ShortcutCommands::Install })
        ));

        let cli = Cli::try_parse_from(["alfred", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs { command: ConfigCommands::Path })
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
