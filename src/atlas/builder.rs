use std::collections::{BTreeMap, HashSet};

use image::imageops;
use log::info;

use super::{Atlas, DEFAULT_IMAGE_NAME, FrameRecord, Placement};
use crate::error::{PressError, Result};
use crate::packing::pack_boxes;
use crate::sprite::{NamedSprite, PixelBuffer};

/// Compile sprites into an atlas with the default image name
pub fn compile_atlas(sprites: &[NamedSprite], padding: u32) -> Result<Atlas> {
    AtlasCompiler::new().padding(padding).compile(sprites)
}

/// Configuration for atlas compilation
pub struct AtlasCompiler {
    pub padding: u32,
    pub image_name: String,
}

impl Default for AtlasCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasCompiler {
    pub fn new() -> Self {
        Self {
            padding: 1,
            image_name: DEFAULT_IMAGE_NAME.to_string(),
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn image_name(mut self, name: impl Into<String>) -> Self {
        self.image_name = name.into();
        self
    }

    /// Pack every sprite into one atlas image and describe where each landed.
    ///
    /// Each sprite gets `padding` transparent pixels on every side. Either all
    /// sprites are placed or an error is returned; the inputs are not touched.
    pub fn compile(&self, sprites: &[NamedSprite]) -> Result<Atlas> {
        if sprites.is_empty() {
            return Err(PressError::EmptyInput);
        }

        let mut seen = HashSet::with_capacity(sprites.len());
        for sprite in sprites {
            sprite.buffer.validate()?;
            if !seen.insert(sprite.name.as_str()) {
                return Err(PressError::DuplicateName(sprite.name.clone()));
            }
        }

        // Hand the packer a name-sorted list so the layout does not depend
        // on the order sprites were given in
        let mut by_name: Vec<usize> = (0..sprites.len()).collect();
        by_name.sort_by(|&a, &b| sprites[a].name.cmp(&sprites[b].name));

        let sizes: Vec<(u32, u32)> = by_name
            .iter()
            .map(|&i| self.padded_size(&sprites[i]))
            .collect::<Result<_>>()?;

        let packing = pack_boxes(&sizes)?;

        let mut placements: Vec<Placement> = by_name
            .iter()
            .zip(&packing.rects)
            .map(|(&sprite_index, rect)| Placement {
                sprite_index,
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            })
            .collect();
        placements.sort_by_key(|p| p.sprite_index);

        let mut canvas = image::RgbaImage::new(packing.width, packing.height);
        let mut frames = BTreeMap::new();

        for placement in &placements {
            let sprite = &sprites[placement.sprite_index];
            let x = placement.x + self.padding;
            let y = placement.y + self.padding;

            imageops::replace(
                &mut canvas,
                &sprite.buffer.view()?,
                i64::from(x),
                i64::from(y),
            );

            frames.insert(
                sprite.name.clone(),
                FrameRecord {
                    x,
                    y,
                    width: sprite.width(),
                    height: sprite.height(),
                    offset_x: sprite.offset_x,
                    offset_y: sprite.offset_y,
                },
            );
        }

        info!(
            "Atlas: {}x{} with {} sprites (bin {}, {:.1}% efficiency)",
            packing.width,
            packing.height,
            frames.len(),
            packing.bin_edge,
            packing.occupancy * 100.0
        );

        Ok(Atlas {
            width: packing.width,
            height: packing.height,
            image: PixelBuffer::from_image(canvas),
            frames,
            placements,
            image_name: self.image_name.clone(),
            bin_edge: packing.bin_edge,
        })
    }

    fn padded_size(&self, sprite: &NamedSprite) -> Result<(u32, u32)> {
        let pad = self.padding.checked_mul(2);
        let padded = |side: u32| pad.and_then(|p| side.checked_add(p));
        match (padded(sprite.width()), padded(sprite.height())) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(PressError::PackingOverflow {
                max_edge: crate::packing::MAX_BIN_EDGE,
            }),
        }
    }
}
