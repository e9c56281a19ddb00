use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::keying::ColorKey;

#[derive(Parser, Debug)]
#[command(name = "spritepress")]
#[command(version, about = "Sprite color keying, slicing and atlas packing", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Make background colors transparent
    Key(KeyArgs),
    /// Cut a sprite sheet into tiles
    Slice(SliceArgs),
    /// Pack sprites into an atlas image plus JSON metadata
    Pack(PackArgs),
}

#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Input image files
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Color to remove as RRGGBB[:TOLERANCE]; repeat for more, first match wins
    #[arg(short = 'k', long = "color", value_name = "COLOR", required = true)]
    pub colors: Vec<ColorKey>,

    /// Output directory [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct SliceArgs {
    /// Sprite sheet to slice
    pub input: PathBuf,

    /// Full x cut list including both boundaries (e.g. 0,32,64)
    #[arg(long, value_delimiter = ',', requires = "y_cuts", conflicts_with_all = ["cols", "split_x"])]
    pub x_cuts: Option<Vec<u32>>,

    /// Full y cut list including both boundaries (e.g. 0,32,64)
    #[arg(long, value_delimiter = ',', requires = "x_cuts", conflicts_with_all = ["rows", "split_y"])]
    pub y_cuts: Option<Vec<u32>>,

    /// Interior x splits; the image edges are the boundaries
    #[arg(long, value_delimiter = ',', conflicts_with = "cols")]
    pub split_x: Option<Vec<u32>>,

    /// Interior y splits; the image edges are the boundaries
    #[arg(long, value_delimiter = ',', conflicts_with = "rows")]
    pub split_y: Option<Vec<u32>>,

    /// Number of equal columns
    #[arg(long)]
    pub cols: Option<u32>,

    /// Number of equal rows
    #[arg(long)]
    pub rows: Option<u32>,

    /// Remove these colors before slicing
    #[arg(short = 'k', long = "color", value_name = "COLOR")]
    pub colors: Vec<ColorKey>,

    /// Output directory [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base name for tiles [default: input file stem]
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct PackArgs {
    /// Input image files or directories
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for atlas files [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base name for output files (atlas.png, atlas.json) [default: atlas]
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Transparent margin around every sprite in pixels [default: 1]
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Remove these colors from every sprite before packing
    #[arg(short = 'k', long = "color", value_name = "COLOR")]
    pub colors: Vec<ColorKey>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
