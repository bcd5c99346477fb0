//! Command-line interface.

use clap::{Parser, Subcommand};

/// Filmoteka - people and movie catalog service
#[derive(Parser)]
#[command(name = "filmoteka")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_the_default() {
        let cli = Cli::try_parse_from(["filmoteka"]).unwrap();
        assert_eq!(cli.command(), &Commands::Serve);
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["filmoteka", "migrate"]).unwrap();
        assert_eq!(cli.command(), &Commands::Migrate);

        let cli = Cli::try_parse_from(["filmoteka", "init"]).unwrap();
        assert_eq!(cli.command(), &Commands::Init);

        assert!(Cli::try_parse_from(["filmoteka", "rss"]).is_err());
    }
}
