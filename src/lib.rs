pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod keying;
pub mod output;
pub mod packing;
pub mod slicing;
pub mod sprite;

pub use atlas::{Atlas, AtlasCompiler, FrameRecord, Placement, compile_atlas};
pub use cli::{CliArgs, Command};
pub use error::PressError;
pub use keying::{ColorKey, remove_colors};
pub use slicing::{AxisCuts, slice};
pub use sprite::{NamedSprite, PixelBuffer};
