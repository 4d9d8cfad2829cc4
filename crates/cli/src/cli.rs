use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cartonforge_observability::LogFormat;

use crate::gesture::Gesture;

#[derive(Parser, Debug)]
#[command(name = "cartonforge", version, about = "Split order lines into cartons and print labels")]
pub struct Cli {
    /// Log output format (json or pretty); filtering follows RUST_LOG.
    #[arg(
        long,
        global = true,
        env = "CARTONFORGE_LOG_FORMAT",
        default_value = "json"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the lines of an order as the label screen shows them.
    Lines {
        /// Order proxy response (JSON).
        order: PathBuf,
    },
    /// Apply split and selection gestures, then emit the labels as JSON.
    ///
    /// Gestures run left to right: `split:N`, `unsplit:N`, `set:N:C=QTY`,
    /// `toggle:N`, `all`, `none`. N is the 1-based line number from `lines`,
    /// C the 1-based carton number.
    Print {
        /// Order proxy response (JSON).
        order: PathBuf,
        /// Gestures to apply before printing.
        gestures: Vec<Gesture>,
    },
}
