// ============================================================================
// src/main.rs – `lightsail` command group entry point
// ============================================================================
mod cmd;
mod config;
mod error;
mod host;
mod lightsail;
mod ui;
mod util;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{prelude::*, EnvFilter};

use config::Config;
use error::CliError;
use host::driver::Driver;
use host::model::lightsail_model;
use host::session::GlobalOptions;
use host::transport::ReplayTransport;
use host::Session;
use ui::UX;

#[derive(Debug, Parser)]
#[command(
    name = "lightsail",
    version,
    about = "Amazon Lightsail commands",
    after_help = "Global options must come before the command name."
)]
struct Cli {
    #[command(flatten)]
    globals: GlobalOptions,

    /// Config file (TOML when the extension is .toml, YAML otherwise)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Invocation>,
}

#[derive(Debug, Subcommand)]
enum Invocation {
    /// Command name followed by its own arguments.
    #[command(external_subcommand)]
    Command(Vec<String>),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.globals.debug);
    let ui = UX::new();

    match run(cli, &ui) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(e)) => e.exit(),
        Err(e) => {
            debug!(error = ?e, "command failed");
            ui.error(&e.to_string());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: Cli, ui: &UX) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let transport = Rc::new(ReplayTransport::new(config.transport.replay_dir.clone()));
    let session = Session::new(config, cli.globals, transport);
    lightsail::initialize(&session);
    let driver = Driver::new(Rc::clone(&session), lightsail_model());

    let Some(Invocation::Command(argv)) = cli.command else {
        ui.warn("usage: lightsail [options] <command> [parameters]\n");
        ui.warn(&format!("Available commands:\n{}", driver.command_summary()?));
        return Err(CliError::MissingCommand);
    };
    let Some((command, args)) = argv.split_first() else {
        return Err(CliError::MissingCommand);
    };

    if let Some(document) = driver.run(command, args)? {
        ui.document(&document)?;
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
