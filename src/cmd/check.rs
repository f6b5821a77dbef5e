//! A subcommand making sure the configuration and the data are fine. Useful
//! before restarting the server with changed config or fixture files.

use std::{net::{SocketAddr, TcpListener}, panic};

use crate::{
    api,
    args::{self, Args},
    config::Config,
    load_config_and_init_logger,
    model::Store,
    prelude::*,
};


pub(crate) fn run(shared: &args::Shared, args: &Args) -> Result<()> {
    let config = load_config_and_init_logger(shared, args)
        .context("failed to load config: cannot proceed with `check` command")?;


    // Perform main checks
    info!("Starting to verify various things...");
    let store = Store::load(&config.data);
    let consistency = match &store {
        Ok(store) => check_consistency(store),
        Err(_) => Err(anyhow!("data could not be loaded")),
    };
    let schema = check_schema();
    let http_address = check_http_address(&config);
    info!("Done verifing various things");


    // Print summary after all log output
    let mut any_errors = false;
    println!();
    bunt::println!("{$bold+blue+intense}Summary{/$}");
    println!();
    print_outcome(&mut any_errors, "Load configuration", &Ok(()));
    print_outcome(&mut any_errors, "Load data", &store);
    print_outcome(&mut any_errors, "Data consistency", &consistency);
    print_outcome(&mut any_errors, "Build API schema", &schema);
    print_outcome(&mut any_errors, "HTTP address available", &http_address);

    println!();
    if any_errors {
        bunt::println!("{$red+intense}➡  Errors have occured!{/$}");
        std::process::exit(1);
    } else {
        bunt::println!("{$green+intense}⮕  Everything OK{/$}");
        Ok(())
    }
}

fn print_outcome<T>(any_errors: &mut bool, label: &str, result: &Result<T>) {
    match result {
        Ok(_) => {
            bunt::println!(" ▸ {[bold+intense]}  {$green+bold}✔ ok{/$}", label);
        }
        Err(e) => {
            *any_errors = true;
            bunt::println!(" ▸ {[bold+intense]}  {$red+bold}✘ error{/$}", label);
            bunt::println!("      {$red}▶▶▶ {$bold}Error:{/$}{/$} {[yellow+intense]}", e);

            if e.chain().len() > 1 {
                println!();
                bunt::println!("      {$red+italic}Caused by:{/$}");
            }
            for (i, cause) in e.chain().skip(1).enumerate() {
                print!("       {: >1$}", "", i * 2);
                println!("‣ {cause}");
            }
            println!();
        }
    }
}

fn check_consistency(store: &Store) -> Result<()> {
    let issues = store.lint();
    if !issues.is_empty() {
        let list = issues.iter().map(|i| i.to_string()).collect::<Vec<_>>().join("; ");
        bail!("found {} inconsistencies: {list}", issues.len());
    }

    Ok(())
}

fn check_schema() -> Result<()> {
    let sdl = panic::catch_unwind(|| api::root_node().as_sdl())
        .map_err(|_| anyhow!("building the API schema panicked"))?;
    debug!("API schema has {} lines", sdl.lines().count());
    Ok(())
}

fn check_http_address(config: &Config) -> Result<()> {
    let addr = SocketAddr::new(config.http.address, config.http.port);
    let _listener = TcpListener::bind(addr)
        .with_context(|| format!("cannot listen on {addr} (is the server already running?)"))?;
    Ok(())
}
