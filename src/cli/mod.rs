//! CLI module for the staffing service
//!
//! - `serve`: run the HTTP API
//! - `check-config`: print the resolved configuration and exit

pub mod check_config;
pub mod serve;

use clap::{Parser, Subcommand};

/// Staffing service - companies, projects, teams and developers
#[derive(Parser)]
#[command(name = "staffing-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Print the resolved configuration as JSON
    CheckConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["staffing-service", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));

        let cli = Cli::try_parse_from(["staffing-service", "check-config"]).unwrap();
        assert!(matches!(cli.command, Command::CheckConfig));

        assert!(Cli::try_parse_from(["staffing-service", "api"]).is_err());
    }
}
