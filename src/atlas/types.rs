use std::collections::BTreeMap;

use crate::sprite::PixelBuffer;

/// Image name written into the metadata unless the compiler is told otherwise
pub const DEFAULT_IMAGE_NAME: &str = "atlas.png";

/// Top-left of a sprite's padded box inside the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the sprite list handed to the compiler
    pub sprite_index: usize,
    pub x: u32,
    pub y: u32,
    /// Padded box width
    pub width: u32,
    /// Padded box height
    pub height: u32,
}

/// Where one sprite ended up and how it should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRecord {
    /// Sprite pixels inside the atlas, padding excluded
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Authored nudge, passed through untouched
    pub offset_x: i32,
    pub offset_y: i32,
}

/// A completed texture atlas
#[derive(Debug, Clone)]
pub struct Atlas {
    /// Atlas width
    pub width: u32,
    /// Atlas height
    pub height: u32,
    /// Rendered atlas image
    pub image: PixelBuffer,
    /// Frame record per sprite name
    pub frames: BTreeMap<String, FrameRecord>,
    /// Padded boxes, in the order the sprites were given
    pub placements: Vec<Placement>,
    /// Image file name recorded in the metadata
    pub image_name: String,
    /// Edge of the square bin the layout was found in
    pub bin_edge: u32,
}

impl Atlas {
    /// Copy the pixels of one frame back out of the atlas image
    pub fn extract_frame(&self, name: &str) -> Option<PixelBuffer> {
        let frame = self.frames.get(name)?;
        let stride = self.width as usize * 4;
        let row_len = frame.width as usize * 4;
        let mut pixels = Vec::with_capacity(row_len * frame.height as usize);

        for row in frame.y..frame.y + frame.height {
            let start = row as usize * stride + frame.x as usize * 4;
            pixels.extend_from_slice(self.image.pixels.get(start..start + row_len)?);
        }

        Some(PixelBuffer {
            width: frame.width,
            height: frame.height,
            pixels,
        })
    }
}
