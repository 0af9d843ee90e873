mod api;
mod commands;
mod config;
mod ui;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "checkstats")]
#[command(about = "Report detections to, and read usage statistics from, the checkstats API")]
#[command(version)]
#[command(after_help = "Examples:
  checkstats report                 Record one detection for this machine
  checkstats report --best-effort   Never fail the calling script
  checkstats stats                  Show today's unique callers and lifetime total")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one detection for this machine's address
    #[command(after_help = "Example: checkstats report --best-effort")]
    Report {
        /// Print failures but exit successfully
        #[arg(long)]
        best_effort: bool,
    },

    /// Show today's unique callers and the lifetime detection count
    #[command(after_help = "Examples:
  checkstats stats
  checkstats stats --json")]
    Stats {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    #[command(after_help = "Examples:
  checkstats completions bash > ~/.bash_completion.d/checkstats
  checkstats completions zsh > ~/.zfunc/_checkstats")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        ui::print_error(&err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = envy::prefixed("CHECKSTATS_").from_env::<Config>()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { best_effort } => commands::report::run(&config, best_effort).await,
        Commands::Stats { json } => commands::stats::run(&config, json).await,
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "checkstats", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_flags() {
        let cli = Cli::try_parse_from(["checkstats", "report", "--best-effort"]).unwrap();
        assert!(matches!(cli.command, Commands::Report { best_effort: true }));
    }

    #[test]
    fn parses_stats_json() {
        let cli = Cli::try_parse_from(["checkstats", "stats", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Stats { json: true }));
    }
}
