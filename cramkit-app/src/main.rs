mod cli;
mod sample;
pub mod tui;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()
use std::sync::Arc;
use tokio::runtime::Runtime;

use cli::commands::{open_repo, run_cli};
use cli::opts::{Cli, Command};
use tui::app::TuiApp;

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    match &args.cmd {
        // Run TUI on its own thread/runtime (no nested Tokio)
        Command::Tui => {
            let rt = Arc::new(Runtime::new()?);
            let repo = rt.block_on(open_repo(!args.no_seed))?;
            let mut app = TuiApp::new(repo, rt);
            app.run()
        }
        // Everything else uses a single runtime here
        _ => {
            let rt = Runtime::new()?;
            rt.block_on(run_cli(args))
        }
    }
}
