use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tiles",
    version,
    about = "Deterministic mosaic layout for photo grids"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file with a layout config; omitted fields keep their defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the grid parameters for a container width
    Grid {
        /// Container width in pixels
        #[arg(long)]
        width: f64,
    },

    /// Lay out a JSON array of photos
    Layout {
        /// Container width in pixels
        #[arg(long)]
        width: f64,

        /// Photo list file, or `-` for stdin
        #[arg(long, default_value = "-")]
        photos: String,

        /// Shuffle the photos through a photo stream seeded with this value
        #[arg(long)]
        shuffle: Option<u64>,
    },

    /// Print every grid block down to a container height
    Preview {
        /// Container width in pixels
        #[arg(long)]
        width: f64,

        /// Container height in pixels
        #[arg(long)]
        height: f64,
    },
}
