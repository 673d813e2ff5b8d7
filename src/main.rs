mod board;
mod commands;
mod data;
mod options;
mod snapshot;
mod throttle;
mod tile_name;

use std::process;

use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn main() {
    env_logger::init();

    let options = Options::from_args();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:?}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    match options.command {
        Subcommand::Layout(layout_options) => {
            commands::layout(options.global, layout_options)?;
        }
        Subcommand::Drag(drag_options) => {
            commands::drag(options.global, drag_options)?;
        }
    }

    Ok(())
}
