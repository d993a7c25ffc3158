//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flagdraw_game::DATASET_URL;

/// Display width used when a command doesn't name one
pub const DEFAULT_DISPLAY_WIDTH: u32 = 256;

#[derive(Debug, Parser)]
#[command(
    name = "flagdraw",
    version,
    about = "Draw a country's flag from memory and see how close you got"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Score an image file against a reference
    Score { drawing: PathBuf, reference: String },
    /// Print a reference's aspect ratio
    Ratio { reference: String },
    /// Apply surface commands and print the replies
    Replay {
        /// One JSON surface command per line
        commands: PathBuf,
        /// Write the final surface here as PNG
        output: Option<PathBuf>,
    },
    /// Play one round of the game from recorded commands
    Play {
        dataset: PathBuf,
        commands: PathBuf,
        /// Country index; a random country when absent
        #[arg(long)]
        round: Option<usize>,
        #[arg(long, env = "FLAGDRAW_DISPLAY_WIDTH", default_value_t = DEFAULT_DISPLAY_WIDTH)]
        display_width: u32,
    },
    /// Download the country dataset
    FetchDataset {
        output: PathBuf,
        #[arg(long, env = "FLAGDRAW_DATASET_URL", default_value = DATASET_URL)]
        url: String,
    },
}
