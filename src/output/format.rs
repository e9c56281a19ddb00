use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::ImageFormat;

use crate::cli::CompressionLevel;
use crate::error::PressError;
use crate::sprite::PixelBuffer;

/// Save a buffer as PNG, optionally running it through oxipng
pub fn save_png(
    buffer: &PixelBuffer,
    path: &Path,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    let png_data = encode_png(buffer, path)?;

    let output_data = if let Some(level) = compress {
        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        oxipng::optimize_from_memory(&png_data, &opts).map_err(|e| {
            PressError::PngCompress {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?
    } else {
        png_data
    };

    fs::write(path, output_data).map_err(|e| PressError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn encode_png(buffer: &PixelBuffer, path: &Path) -> Result<Vec<u8>> {
    let mut png_data = Cursor::new(Vec::new());
    buffer
        .view()?
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| PressError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(png_data.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::load_buffer;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("spritepress-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_png_round_trip() {
        let dir = scratch_dir("png");
        let path = dir.join("tile.png");
        let buffer =
            PixelBuffer::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();

        save_png(&buffer, &path, None).unwrap();
        assert_eq!(load_buffer(&path).unwrap(), buffer);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_compressed_png_is_lossless() {
        let dir = scratch_dir("oxipng");
        let path = dir.join("tile.png");
        let buffer = PixelBuffer::from_raw(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        save_png(&buffer, &path, Some(CompressionLevel::Level(1))).unwrap();
        assert_eq!(load_buffer(&path).unwrap(), buffer);

        fs::remove_dir_all(dir).ok();
    }
}
