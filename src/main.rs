use chemflow_adme::{logging, run, AppConfig, Cli};
use clap::Parser;
use log::error;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet) {
        eprintln!("{e}");
    }
    let result = AppConfig::from_cli(cli).and_then(|config| run(&config));
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
