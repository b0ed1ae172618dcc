use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;

use commands::{Command, Context};
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "rolegraph")]
#[command(about = "Manage users, roles and grants in a rolegraph catalog", long_about = None)]
#[command(version)]
struct Args {
    /// Catalog file (defaults to the path in ~/.rolegraphrc)
    #[arg(short, long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// User to run statements as
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Log filter when RUST_LOG is unset (e.g. info, debug)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config file: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    let level = args.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_lowercase())),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let ctx = Context {
        catalog_path: args.catalog.clone().unwrap_or_else(|| PathBuf::from(&config.catalog.path)),
        database: config.database_config(args.user.clone()),
    };
    tracing::debug!("Using catalog {}", ctx.catalog_path.display());

    for line in commands::run(&args.command, &ctx)? {
        println!("{}", line);
    }
    Ok(())
}
