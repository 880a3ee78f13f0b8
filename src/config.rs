// SPDX-License-Identifier: PMPL-1.0-or-later

//! Command-line surface and the settings derived from it.

use crate::i18n::{Language, Revision};
use crate::ip::{HttpIpLookup, IpLookup, DEFAULT_ENDPOINT};
use crate::view::GreeterView;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "greeter")]
#[command(version)]
#[command(about = "Say hello in a handful of languages, with a flag and your public IP")]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Catalog revision to run
    #[arg(long, global = true, value_enum, default_value = "localized")]
    pub revision: RevisionArg,

    /// Skip the public IP lookup
    #[arg(long, global = true)]
    pub no_ip: bool,

    /// Plain-text IP echo endpoint
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    pub ip_endpoint: String,

    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Interactive terminal greeter (default)
    Tui,

    /// Desktop window greeter
    Gui,

    /// Print one greeting and exit
    Greet {
        /// Name to greet
        #[arg(short, long)]
        name: String,

        /// Language name or ISO code
        #[arg(short, long, default_value = "English")]
        lang: Language,

        /// Emit the greeting card as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the languages of the selected revision
    Languages {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RevisionArg {
    Basic,
    Flags,
    Network,
    Localized,
}

impl From<RevisionArg> for Revision {
    fn from(arg: RevisionArg) -> Self {
        match arg {
            RevisionArg::Basic => Revision::Basic,
            RevisionArg::Flags => Revision::Flags,
            RevisionArg::Network => Revision::Network,
            RevisionArg::Localized => Revision::Localized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    Terminal,
    Window,
    OneShot,
    Listing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub verbose: bool,
    pub file: Option<PathBuf>,
    /// Level used when neither `RUST_LOG` nor `verbose` is set.
    pub default_level: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreeterConfig {
    pub revision: Revision,
    pub ip_enabled: bool,
    pub ip_endpoint: String,
    pub frontend: Frontend,
    pub log: LogConfig,
}

impl From<&Cli> for GreeterConfig {
    fn from(cli: &Cli) -> Self {
        let frontend = match &cli.command {
            None | Some(Commands::Tui) => Frontend::Terminal,
            Some(Commands::Gui) => Frontend::Window,
            Some(Commands::Greet { .. }) => Frontend::OneShot,
            Some(Commands::Languages { .. }) => Frontend::Listing,
        };
        // Anything on stderr would tear the terminal screen.
        let file = match (&cli.global.log_file, frontend) {
            (Some(path), _) => Some(path.clone()),
            (None, Frontend::Terminal) => Some(default_terminal_log()),
            (None, _) => None,
        };
        Self {
            revision: cli.global.revision.into(),
            ip_enabled: !cli.global.no_ip,
            ip_endpoint: cli.global.ip_endpoint.clone(),
            frontend,
            log: LogConfig {
                verbose: cli.global.verbose,
                file,
                default_level: "warn",
            },
        }
    }
}

/// Where the terminal front end logs when no `--log-file` is given.
pub fn default_terminal_log() -> PathBuf {
    std::env::temp_dir().join("greeter.log")
}

impl GreeterConfig {
    pub fn lookup(&self) -> Arc<dyn IpLookup> {
        Arc::new(HttpIpLookup::new(self.ip_endpoint.clone()))
    }

    pub fn build_view(&self) -> GreeterView {
        GreeterView::new(self.revision, self.ip_enabled, self.lookup())
    }
}
