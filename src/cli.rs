use std::path::PathBuf;

mod catalog;
mod chat;
mod requests;
mod shell;
mod stats;
mod terminal;
mod track;

use catalog::Catalog;
use chat::Chat;
use clap::{ArgAction, ValueEnum};
use portal::Config;
use requests::Requests;
use shell::Shell;
use stats::Stats;
use track::Track;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };
        tracing::debug!(?config, "configuration loaded");

        self.command.run(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Browse the dataset catalog
    Catalog(Catalog),

    /// List data requests
    Requests(Requests),

    /// Show the progress of a data request
    Track(Track),

    /// Show request statistics
    Stats(Stats),

    /// Ask the portal assistant a question
    Chat(Chat),

    /// Start an interactive portal session
    ///
    /// The session starts from the seeded catalog and requests. Changes are
    /// discarded on exit.
    Shell(Shell),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Catalog(command) => command.run(),
            Self::Requests(command) => command.run(),
            Self::Track(command) => command.run(),
            Self::Stats(command) => command.run(),
            Self::Chat(command) => command.run(),
            Self::Shell(command) => command.run(config),
        }
    }
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
