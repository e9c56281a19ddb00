//! Engine-facing atlas description.
//!
//! Field names and nesting follow the hash-style frame format understood by
//! Phaser, PixiJS and most TexturePacker JSON importers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Atlas, FrameRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasMetadata {
    pub frames: BTreeMap<String, JsonFrame>,
    pub meta: Meta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFrame {
    pub frame: Frame,
    pub rotated: bool,
    pub trimmed: bool,
    pub sprite_source_size: Frame,
    pub source_size: Size,
    pub pivot: Pivot,
    pub offset: Offset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub image: String,
    pub size: Size,
    pub scale: u32,
}

impl From<&FrameRecord> for JsonFrame {
    fn from(record: &FrameRecord) -> Self {
        Self {
            frame: Frame {
                x: record.x,
                y: record.y,
                w: record.width,
                h: record.height,
            },
            rotated: false,
            trimmed: false,
            sprite_source_size: Frame {
                x: 0,
                y: 0,
                w: record.width,
                h: record.height,
            },
            source_size: Size {
                w: record.width,
                h: record.height,
            },
            pivot: Pivot { x: 0.5, y: 0.5 },
            offset: Offset {
                x: record.offset_x,
                y: record.offset_y,
            },
        }
    }
}

impl Atlas {
    pub fn metadata(&self) -> AtlasMetadata {
        AtlasMetadata {
            frames: self
                .frames
                .iter()
                .map(|(name, record)| (name.clone(), JsonFrame::from(record)))
                .collect(),
            meta: Meta {
                image: self.image_name.clone(),
                size: Size {
                    w: self.width,
                    h: self.height,
                },
                scale: 1,
            },
        }
    }

    /// Pretty-printed metadata JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.metadata())
    }
}
