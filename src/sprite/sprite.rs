use super::PixelBuffer;

/// A named frame handed to the atlas compiler
#[derive(Debug, Clone)]
pub struct NamedSprite {
    /// Key of the frame record in the atlas metadata, unique per compile
    pub name: String,
    /// Decoded sprite pixels
    pub buffer: PixelBuffer,
    /// Authored horizontal nudge, copied into the metadata untouched
    pub offset_x: i32,
    /// Authored vertical nudge, copied into the metadata untouched
    pub offset_y: i32,
}

impl NamedSprite {
    pub fn new(name: impl Into<String>, buffer: PixelBuffer) -> Self {
        Self {
            name: name.into(),
            buffer,
            offset_x: 0,
            offset_y: 0,
        }
    }

    pub fn with_offset(mut self, offset_x: i32, offset_y: i32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    pub fn height(&self) -> u32 {
        self.buffer.height
    }
}
