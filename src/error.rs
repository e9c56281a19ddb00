use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PressError {
    #[error("Pixel buffer is {actual} bytes but {width}x{height} RGBA needs {expected}")]
    Decode {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid cut configuration: {0}")]
    InvalidCut(String),

    #[error("No sprites to pack")]
    EmptyInput,

    #[error("Sprites do not fit into a {max_edge}x{max_edge} atlas")]
    PackingOverflow { max_edge: u32 },

    #[error("Sprite name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("Invalid color key '{input}': {reason}")]
    InvalidColorKey { input: String, reason: String },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, PressError>;
