use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::error;
use std::process;

use sim_bank_cli::{cli, config, store::JsonFileStore};

/// Simulated Banking Demo - a client-side banking simulation for the terminal
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Sets the configuration file
    #[clap(short, long, value_name = "FILE", default_value = "config.toml")]
    config: String,

    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() {
    dotenv().ok();

    let args = Cli::parse();

    let default_level = match args.debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(e) = config::load_config(&args.config) {
        error!("Failed to load configuration: {:#}", e);
        process::exit(1);
    }

    let store = match JsonFileStore::open(config::get_config().store.path) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open the state store: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = cli::dashboard::run(&store) {
        error!("{:#}", e);
        process::exit(1);
    }
}
