mod aggregate;
mod config;
mod context_menu;
mod logging;
mod models;
mod nav;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let (config, rest) = config::Config::load(&args[1..])?;

    if rest.is_empty() {
        if let Some(path) = &config.log_file {
            logging::init_file(path)?;
        }
        run::as_tui(&config)
    } else {
        logging::init_stderr();
        tracing::debug!(?config, "running command");
        run::as_cli(&rest, &config)
    }
}
