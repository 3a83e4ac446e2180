//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use htcap::config::ProbeConfig;
use htcap::output::OutputMode;

/// htcap - Probe which .htaccess directives a web server honors
#[derive(Parser, Debug)]
#[command(
    name = "htcap",
    version,
    about = "Probe which .htaccess directives a web server honors",
    long_about = "Find out what a live web server actually does with .htaccess files.\n\n\
                  Each probe writes a small fixture below the base directory, requests it\n\
                  through the base URL and reports yes, no or unknown."
)]
pub struct Cli {
    /// Config file (default: ./htcap.toml, then ~/.htcap/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the web server serves at the base URL
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// URL that serves the base directory
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask one capability question (e.g. canRewrite, moduleLoaded(headers))
    Probe {
        /// Capability name from `htcap list`
        name: String,
    },

    /// Run every built-in probe and print a summary
    Report,

    /// Check whether a set of .htaccess rules makes the server fail
    Crash {
        /// File containing the rules
        rules_file: PathBuf,

        /// Subdirectory below crash-tests/ (default: derived from the rules)
        #[arg(short, long)]
        subdir: Option<String>,
    },

    /// Run a test described by a TOML or JSON definition file
    Custom {
        /// Definition file (.toml or .json)
        definition_file: PathBuf,
    },

    /// List the capability names accepted by `probe`
    List,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command.take() else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("htcap v{}", env!("CARGO_PKG_VERSION"));
            println!("\nRun 'htcap --help' for usage");
            println!("Run 'htcap list' to see the available probes");
        }
        return Ok(());
    };

    match command {
        Command::List => commands::list(output_mode),
        Command::Version => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("htcap v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        Command::Probe { name } => commands::probe(&load_config(cli)?, &name, output_mode),
        Command::Report => commands::report(&load_config(cli)?, output_mode),
        Command::Crash { rules_file, subdir } => {
            commands::crash(&load_config(cli)?, &rules_file, subdir.as_deref(), output_mode)
        },
        Command::Custom { definition_file } => {
            commands::custom(&load_config(cli)?, &definition_file, output_mode)
        },
    }
}

/// Resolve the configuration file and apply the command-line overrides
fn load_config(cli: Cli) -> anyhow::Result<ProbeConfig> {
    Ok(ProbeConfig::load(cli.config.as_deref())?.with_overrides(cli.base_dir, cli.base_url))
}
