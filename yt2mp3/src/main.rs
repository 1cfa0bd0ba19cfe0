//! yt2mp3 CLI - YouTube to tagged MP3

use clap::Parser;
use eyre::Result;
use yt2mp3::cli::{Cli, run_cli};
use yt2mp3::logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let logs = logging::init();

    // Ctrl-C ends the session like a blank line does
    let on_interrupt = logs.clone();
    ctrlc::set_handler(move || {
        on_interrupt.flush();
        println!();
        std::process::exit(0);
    })?;

    run_cli(Cli::parse())
}
