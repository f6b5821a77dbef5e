//! The workflow API server: serves projects, their names and their workflows
//! via GraphQL.

use clap::Parser;
use std::env;

use crate::{
    args::{Args, Command},
    config::Config,
    model::Store,
    prelude::*,
};

mod api;
mod args;
mod cmd;
mod config;
mod http;
mod logger;
mod model;
mod prelude;


#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Configure output via `bunt`
    bunt::set_stdout_color_choice(args.stdout_color());
    bunt::set_stderr_color_choice(args.stderr_color());

    if let Err(e) = run(&args).await {
        // Log error in case stdout is not connected and it is logged into a file.
        error!("{:?}", e);

        // Show a somewhat nice representation of the error
        eprintln!();
        eprintln!();
        bunt::eprintln!("{$red}▶▶▶ {$bold}Error:{/$}{/$} {[yellow+intense]}", e);
        eprintln!();
        if e.chain().len() > 1 {
            bunt::eprintln!("{$red+italic}Caused by:{/$}");
        }

        for (i, cause) in e.chain().skip(1).enumerate() {
            eprint!(" {: >1$}", "", i * 2);
            eprintln!("‣ {cause}");
        }

        std::process::exit(1);
    }
}

/// Main entry point.
async fn run(args: &Args) -> Result<()> {
    // If `RUST_BACKTRACE` wasn't already set, we default to `1`. Panics are
    // not expected to occur regularly, so the cost of generating backtraces
    // does not matter.
    if env::var("RUST_BACKTRACE") == Err(env::VarError::NotPresent) {
        env::set_var("RUST_BACKTRACE", "1");
    }

    // Dispatch subcommand.
    match &args.cmd {
        Command::Serve { shared } => {
            let config = load_config_and_init_logger(shared, args)?;
            start_server(config).await?;
        }
        Command::Check { shared } => cmd::check::run(shared, args)?,
        Command::WriteConfig { target } => config::write_template(target.as_ref())?,
        Command::ExportApiSchema { target } => cmd::export_api_schema::run(target.as_ref())?,
    }

    Ok(())
}

async fn start_server(config: Config) -> Result<()> {
    info!("Starting workflow API server ...");
    trace!("Configuration: {:#?}", config);

    let store = Store::load(&config.data).context("failed to load data")?;
    store.lint();

    http::serve(config, api::root_node(), store).await
        .context("failed to run HTTP server")?;

    info!("Shut down");
    Ok(())
}

fn load_config_and_init_logger(shared: &args::Shared, args: &Args) -> Result<Config> {
    // Load configuration.
    let (config, path) = match &shared.config {
        Some(path) => {
            let config = Config::load_from(path)
                .context(format!("failed to load config from '{}'", path.display()))?;
            (config, Some(path.clone()))
        }
        None => Config::from_env_or_default_locations()?,
    };

    // Initialize logger. Unfortunately, we can only do this here
    // after reading the config.
    logger::init(&config.log, args.stdout_color())?;
    match path {
        Some(path) => info!("Loaded config from '{}'", path.display()),
        None => info!("No config file found, using default configuration"),
    }

    Ok(config)
}
