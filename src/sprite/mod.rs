mod buffer;
mod loader;
mod sprite;

pub use buffer::{PixelBuffer, PixelView};
pub use loader::{load_buffer, load_sprites};
pub use sprite::NamedSprite;
