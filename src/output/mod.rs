mod format;
mod json;
mod tiles;

pub use format::save_png;
pub use json::write_json;
pub use tiles::write_tiles;
