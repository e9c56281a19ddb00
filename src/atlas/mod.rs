mod builder;
mod metadata;
mod types;

pub use builder::{AtlasCompiler, compile_atlas};
pub use metadata::AtlasMetadata;
pub use types::{Atlas, DEFAULT_IMAGE_NAME, FrameRecord, Placement};
