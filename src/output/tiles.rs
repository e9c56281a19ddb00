use std::path::{Path, PathBuf};

use anyhow::Result;

use super::save_png;
use crate::cli::CompressionLevel;
use crate::sprite::PixelBuffer;

/// Save tiles as `<stem>_<index>.png`, keeping their order in the file names
pub fn write_tiles(
    tiles: &[PixelBuffer],
    output_dir: &Path,
    stem: &str,
    compress: Option<CompressionLevel>,
) -> Result<Vec<PathBuf>> {
    let width = tiles.len().saturating_sub(1).to_string().len();

    tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let path = output_dir.join(format!("{}_{:0width$}.png", stem, index, width = width));
            save_png(tile, &path, compress)?;
            Ok(path)
        })
        .collect()
}
