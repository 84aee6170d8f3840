// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
use anyhow::Result;
use clap::{Parser, Subcommand};
use mte_cli::commands::{self, EnvOptions};
use mte_cli::format::{OutputFormat, render};
use mte_core::{EnvironmentMap, MapEnvironment, ProcessEnvironment};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mte",
    version,
    about = "Derive JAVA_HOME, PATH and MAVEN_* for a project's terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the variables a terminal in the project should have.
    Env {
        /// Config file (defaults to mte.toml in the project directory).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Project directory (defaults to the current directory).
        #[arg(long)]
        project: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Shell)]
        format: OutputFormat,

        /// Start from an empty environment instead of the current one.
        #[arg(long)]
        clean: bool,
    },

    /// Check a config file and print its warnings.
    Validate {
        /// Config file (defaults to ./mte.toml).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Commands {
    fn env_options(&self) -> EnvOptions {
        match self {
            Commands::Env {
                config, project, ..
            } => EnvOptions {
                config: config.clone(),
                project: project.clone(),
            },
            Commands::Validate { config } => EnvOptions {
                config: config.clone(),
                project: None,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("mte=debug")
    } else {
        match commands::configured_log_level(&cli.command.env_options(), ProcessEnvironment) {
            Some(level) => EnvFilter::try_new(format!("mte={level}"))
                .unwrap_or_else(|_| EnvFilter::new("mte=info")),
            None => EnvFilter::new("mte=info"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Env {
            config,
            project,
            format,
            clean,
        } => cmd_env(EnvOptions { config, project }, format, clean),
        Commands::Validate { config } => cmd_validate(config),
    }
}

fn cmd_env(opts: EnvOptions, format: OutputFormat, clean: bool) -> Result<()> {
    let env = if clean {
        commands::resolve_environment(
            &opts,
            EnvironmentMap::new(),
            ProcessEnvironment,
            MapEnvironment::new(),
        )?
    } else {
        commands::resolve_environment(
            &opts,
            EnvironmentMap::from_process(),
            ProcessEnvironment,
            ProcessEnvironment,
        )?
    };
    print!("{}", render(&env, format));
    Ok(())
}

fn cmd_validate(config: Option<PathBuf>) -> Result<()> {
    let warnings = commands::validate(config.as_deref(), ProcessEnvironment)?;
    for w in &warnings {
        println!("warning: {w}");
    }
    println!("ok");
    Ok(())
}
