use std::io::{self, IsTerminal};

use clap::Parser;
use log::{error, info};

use quicknotes::{App, Cli, Config, Flow, NoteStore, Result};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.no_color {
        config.color_output = false;
    }
    if !config.color_output {
        console::set_colors_enabled(false);
    }

    // One store for the lifetime of the process, nothing is saved on exit
    let mut app = App::new(NoteStore::new(), config, io::stdout().lock());

    if cli.exec.is_empty() {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        return app.run_session(stdin.lock(), interactive);
    }

    for line in &cli.exec {
        if app.execute_line(line)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    info!("Application shutting down");
}
