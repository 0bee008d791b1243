//! Firetest binary: serve an empty tree on loopback until ctrl-c.
//!
//! ```text
//! firetest [--config firetest.toml] [--bind 127.0.0.1:9000]
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use firetest_server::config::CONFIG_FILE_NAME;
use firetest_server::{Firetest, ServerConfig, ServerError};

fn build_cli() -> Command {
    Command::new("firetest")
        .about("In-process emulator of a realtime JSON tree database")
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file, created with defaults if missing")
                .value_parser(value_parser!(PathBuf))
                .default_value(CONFIG_FILE_NAME),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .env("FIRETEST_BIND")
                .help("Listen address, overrides the config file")
                .value_parser(value_parser!(SocketAddr)),
        )
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut ft = Firetest::with_config(config);
    if let Err(e) = ft.run_until_ctrl_c().await {
        tracing::error!(target: "firetest::server", error = %e, "server stopped");
        process::exit(1);
    }
}

fn load_config(matches: &clap::ArgMatches) -> Result<ServerConfig, ServerError> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ServerConfig::load_or_init(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = matches.get_one::<SocketAddr>("bind") {
        config.bind = *bind;
    }
    Ok(config)
}
