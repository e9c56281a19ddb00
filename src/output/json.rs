use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::atlas::Atlas;
use crate::error::PressError;

/// Write `<base_name>.json` next to the atlas image and return its path
pub fn write_json(atlas: &Atlas, output_dir: &Path, base_name: &str) -> Result<PathBuf> {
    let json_path = output_dir.join(format!("{}.json", base_name));
    let content = atlas
        .to_json()
        .context("failed to serialize atlas metadata")?;

    fs::write(&json_path, content).map_err(|e| PressError::OutputWrite {
        path: json_path.clone(),
        source: e,
    })?;

    Ok(json_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{AtlasCompiler, AtlasMetadata};
    use crate::sprite::{NamedSprite, PixelBuffer};

    #[test]
    fn test_written_json_matches_atlas() {
        let dir = std::env::temp_dir().join(format!("spritepress-json-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let atlas = AtlasCompiler::new()
            .padding(1)
            .image_name("heroes.png")
            .compile(&[NamedSprite::new("idle", PixelBuffer::new(3, 3))])
            .unwrap();

        let path = write_json(&atlas, &dir, "heroes").unwrap();
        assert_eq!(path, dir.join("heroes.json"));

        let parsed: AtlasMetadata =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, atlas.metadata());
        assert_eq!(parsed.meta.image, "heroes.png");

        fs::remove_dir_all(dir).ok();
    }
}
