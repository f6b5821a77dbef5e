//! This module defines the command line arguments we accept.

use std::{io::IsTerminal, path::PathBuf};
use termcolor::ColorChoice;


#[derive(Debug, clap::Parser)]
#[command(
    about = "GraphQL API for projects and their workflows.",
    version,
    propagate_version = true,
)]
pub(crate) struct Args {
    /// Whether to use colors and other ANSI codes in output.
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub(crate) color: ColorMode,

    #[command(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command {
    /// Starts the HTTP server serving the GraphQL API.
    Serve {
        #[command(flatten)]
        shared: Shared,
    },

    /// Checks the config and the data that would be served, and makes sure
    /// the API schema can be built. Exits with 0 if everything is Ok, and
    /// with 1 otherwise.
    Check {
        #[command(flatten)]
        shared: Shared,
    },

    /// Outputs a template for the configuration file (which includes
    /// descriptions of all options).
    WriteConfig {
        /// Target file. If not specified, the template is written to stdout.
        target: Option<PathBuf>,
    },

    /// Exports the API as GraphQL schema.
    ExportApiSchema {
        /// Target file. If not specified, the schema is written to stdout.
        target: Option<PathBuf>,
    },
}

#[derive(Debug, clap::Args)]
pub(crate) struct Shared {
    /// Path to the configuration file. If this is not specified, the path in
    /// `WORKFLOW_API_CONFIG_PATH` is used or `config.toml` and
    /// `/etc/workflow-api/config.toml` are tried. If none of these exist, the
    /// default configuration is used.
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ColorMode {
    /// Use colors when writing to a terminal.
    Auto,
    Always,
    Never,
}

impl Args {
    pub(crate) fn stdout_color(&self) -> ColorChoice {
        self.color.choice(std::io::stdout().is_terminal())
    }

    pub(crate) fn stderr_color(&self) -> ColorChoice {
        self.color.choice(std::io::stderr().is_terminal())
    }
}

impl ColorMode {
    fn choice(self, is_terminal: bool) -> ColorChoice {
        match self {
            Self::Auto if is_terminal => ColorChoice::Auto,
            Self::Auto | Self::Never => ColorChoice::Never,
            Self::Always => ColorChoice::Always,
        }
    }
}


#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use termcolor::ColorChoice;

    use super::{Args, ColorMode, Command};

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_serve() {
        let args = Args::try_parse_from(["workflow-api", "serve", "-c", "dev.toml"]).unwrap();
        assert_eq!(args.color, ColorMode::Auto);
        match args.cmd {
            Command::Serve { shared } => {
                assert_eq!(shared.config.as_deref(), Some(std::path::Path::new("dev.toml")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn color_choice() {
        let args = Args::try_parse_from(["workflow-api", "export-api-schema", "--color", "always"])
            .unwrap();
        assert_eq!(args.stdout_color(), ColorChoice::Always);
        assert_eq!(ColorMode::Auto.choice(false), ColorChoice::Never);
        assert_eq!(ColorMode::Auto.choice(true), ColorChoice::Auto);
    }
}
