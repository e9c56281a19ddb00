mod color_key;
mod engine;

pub use color_key::{ColorKey, DEFAULT_TOLERANCE, MAX_RGB_DISTANCE};
pub use engine::remove_colors;
