//! Process command-line options.
//!
//! # Examples
//!
//! List the built-in levels:
//!
//! ```text
//! $ digger-maze --list
//!  1  Very simple (5x5)
//!  2  Slightly more complex (6x6)
//!  ...
//! ```
//!
//! Play a custom level pack, starting at its second level, with debug logs in a file:
//!
//! ```text
//! $ digger-maze --levels my-mazes.json --level 2 --debug --log-file maze.log
//! ```

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::constants::SAMPLES_PER_CELL;
use crate::game::level::{builtin_levels, load_levels, Level, LevelError};

/// Lead the digger to the treasure by drawing a path through the maze with the mouse.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Level to start on (1 is the first)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub level: u32,

    /// JSON file with custom levels to play instead of the built-in ones
    #[arg(long, value_name = "FILE")]
    pub levels: Option<PathBuf>,

    /// Collision samples per cell edge when checking a dragged segment against the walls
    #[arg(long, default_value_t = SAMPLES_PER_CELL, value_parser = clap::value_parser!(u32).range(1..))]
    pub samples_per_cell: u32,

    /// List the levels and exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Write log messages to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Levels to play: the custom pack when one is given, otherwise the built-in levels.
    pub fn load_levels(&self) -> Result<Vec<Level>, LevelError> {
        match &self.levels {
            Some(path) => load_levels(path),
            None => Ok(builtin_levels()),
        }
    }

    /// Index of the first level, counting from 0.
    pub fn first_level(&self) -> usize {
        self.level.saturating_sub(1) as usize
    }
}

/// Set up logging.
///
/// The terminal belongs to the game while it runs, so logs go to `--log-file`. Without a log
/// file, messages are only written to stderr when `RUST_LOG` asks for them.
pub fn init_logging(args: &Args) -> std::io::Result<()> {
    let default_filter = match (&args.log_file, args.debug) {
        (_, true) => "debug",
        (Some(_), false) => "info",
        (None, false) => "off",
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    if let Some(path) = &args.log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

/// Print the level list for `--list`.
pub fn print_levels(levels: &[Level]) {
    for (i, level) in levels.iter().enumerate() {
        println!(
            "{:>2}  {} ({}x{})",
            i + 1,
            level.name,
            level.board.cols(),
            level.board.rows()
        );
    }
}

/// Parse and process command-line options.
pub fn parse() -> Args {
    Args::parse()
}
