//! Command-line interface parsing for bdcv
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the options the lookup pipeline works with.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::data::DEFAULT_ENDPOINT;
use crate::ui::Palette;

/// Whether output is colorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Wrap headers, translations and highlights in terminal colors
    #[default]
    On,
    /// Print plain text
    Off,
}

impl ColorMode {
    /// The palette matching this mode
    pub fn palette(self) -> Palette {
        match self {
            ColorMode::On => Palette::colored(),
            ColorMode::Off => Palette::plain(),
        }
    }
}

/// bdcv - Look up a word in the Bing dictionary
#[derive(Parser, Debug)]
#[command(name = "bdcv")]
#[command(about = "Look up English or Chinese words in the Bing dictionary")]
#[command(version)]
pub struct Cli {
    /// The word to look up
    pub word: Option<String>,

    /// Print sample sentences as well
    #[arg(short, long)]
    pub long: bool,

    /// Colorize output
    #[arg(long, value_enum, default_value_t = ColorMode::On)]
    pub color: ColorMode,

    /// Cache file [default: ~/.bdcv]
    #[arg(long, value_name = "PATH", env = "BDCV_CACHE_FILE")]
    pub cache_file: Option<PathBuf>,

    /// Dictionary service URL
    #[arg(long, value_name = "URL", env = "BDCV_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Give up on the dictionary service after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    pub log_level: String,
}

/// Options controlling a single lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LookupOptions {
    /// Include the samples section
    pub long: bool,
    /// Colorize output
    pub color: ColorMode,
}

impl LookupOptions {
    /// Creates LookupOptions from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            long: cli.long,
            color: cli.color,
        }
    }
}

impl Cli {
    /// The word to look up, exactly as given, unless missing or blank
    pub fn query(&self) -> Option<&str> {
        self.word.as_deref().filter(|w| !w.trim().is_empty())
    }
}
