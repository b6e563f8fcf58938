mod cleaner;
mod cli;
mod dates;
mod error;
mod files;
mod fmt;
mod grid;
mod settings;
mod sorter;
mod table;
mod validator;

use clap::Parser;
use tracing_subscriber::{fmt as log_fmt, EnvFilter};

use cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    log_fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config_dir.as_deref();
    let result = match cli.command {
        Commands::Format { path } => cli::format::run(&path, config),
        Commands::Sort { path } => cli::sort::run(&path),
        Commands::Validate { path } => cli::validate::run(&path, config),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
