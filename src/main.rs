mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod quota;
mod store;
mod utils;
mod watch;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::init_logging;

fn main() {
    let cli = Cli::parse();

    // Watch mode owns the terminal, so its logs go to a file
    let log_dir = cli
        .watch_interval()
        .filter(|_| cli.command.is_none())
        .and_then(|_| store::state_dir())
        .map(|dir| dir.join("logs"));
    init_logging(cli.debug, log_dir.as_deref());

    let cli = cli.with_config(&Config::load());

    if let Err(e) = app::run(cli) {
        eprintln!("error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(1);
    }
}
