use std::{path::PathBuf, time::Duration};

use structopt::StructOpt;

use crate::throttle::DEFAULT_THROTTLE;

#[derive(Debug, StructOpt)]
#[structopt(about = "Lays out rectangular tiles on a fixed-size board and drags them around")]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// Where to write the resulting JSON snapshot of the board. If not
    /// specified, Tiler prints it to stdout.
    #[structopt(long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack every tile of a board and print where they ended up.
    Layout(LayoutOptions),

    /// Pack a board, then replay a recorded drag gesture on one of its tiles.
    Drag(DragOptions),
}

#[derive(Debug, StructOpt)]
pub struct LayoutOptions {
    /// The path to the board file to lay out.
    pub board: PathBuf,

    /// Repack every tile from scratch after appending them.
    #[structopt(long)]
    pub relayout: bool,

    /// Settle every tile into the top of its column after packing.
    #[structopt(long)]
    pub align: bool,
}

#[derive(Debug, StructOpt)]
pub struct DragOptions {
    /// The path to the board file to lay out.
    pub board: PathBuf,

    /// The path to the recorded drag gesture to replay.
    pub trace: PathBuf,

    /// Minimum time between two relocations, in milliseconds. Pointer moves
    /// that arrive sooner are held back and only the latest one is used.
    /// Defaults to 200.
    #[structopt(long)]
    pub throttle_ms: Option<u64>,
}

impl DragOptions {
    pub fn throttle(&self) -> Duration {
        self.throttle_ms.map_or(DEFAULT_THROTTLE, Duration::from_millis)
    }
}
