//! jumpdeck - a single-track terminal player.
//!
//! Plays one track with play, pause, jump-back and jump-forward controls, a
//! display-only progress bar and elapsed/total time labels. The track comes
//! from the command line, the configuration file, or falls back to a built-in
//! demo track. Jump size, poll interval and every user-visible message are
//! configurable.

use clap::{CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use std::error::Error;
use std::io;

mod cli;

#[cfg(feature = "player")]
mod player;

#[derive(Parser)]
#[command(name = "jumpdeck")]
#[command(about = "Single-track terminal player with jump controls")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a track (defaults to the configured track or the bundled demo)
    Play {
        /// Path to an audio file
        track: Option<String>,
    },
    /// Write the default configuration file
    Init,
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new(["track", "jump_ms", "poll_interval_ms", "toast_ms", "log_level"]))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { track } => {
            cli::play::handle_play(track.as_deref())?;
        }
        Commands::Init => {
            cli::init::handle_init()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_play_track_is_optional() {
        let cli = Cli::try_parse_from(["jumpdeck", "play"]).unwrap();
        assert!(matches!(cli.command, Commands::Play { track: None }));

        let cli = Cli::try_parse_from(["jumpdeck", "play", "anthem.wav"]).unwrap();
        match cli.command {
            Commands::Play { track } => assert_eq!(track.as_deref(), Some("anthem.wav")),
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn test_config_set_rejects_unknown_key() {
        assert!(Cli::try_parse_from(["jumpdeck", "config", "set", "volume", "1"]).is_err());
        assert!(Cli::try_parse_from(["jumpdeck", "config", "set", "jump_ms", "3000"]).is_ok());
    }
}
