mod args;

pub use args::{CliArgs, Command, CompressionLevel, KeyArgs, PackArgs, SliceArgs};
