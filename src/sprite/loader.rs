use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageReader;
use log::info;
use rayon::prelude::*;

use super::{NamedSprite, PixelBuffer};
use crate::error::PressError;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Image path with its base directory for computing sprite names
struct ImagePath {
    path: PathBuf,
    base: Option<PathBuf>,
}

/// Load named sprites from input paths (files or directories)
///
/// Sprites found under a directory input are named by their path relative to
/// that directory with the extension dropped (`hero/idle_0`). Individual files
/// are named by their stem, or relative to `base_dir` when one is given.
/// The result is sorted by name so repeated runs see the same list.
pub fn load_sprites(
    inputs: &[impl AsRef<Path>],
    base_dir: Option<&Path>,
) -> Result<Vec<NamedSprite>> {
    let image_paths = collect_image_paths(inputs, base_dir)?;

    if image_paths.is_empty() {
        return Err(PressError::EmptyInput.into());
    }

    info!("Loading {} images...", image_paths.len());

    let sprites: Result<Vec<_>> = image_paths
        .par_iter()
        .map(|img_path| {
            let buffer = load_buffer(&img_path.path)?;
            Ok(NamedSprite::new(
                sprite_name(&img_path.path, img_path.base.as_deref()),
                buffer,
            ))
        })
        .collect();

    let mut sprites = sprites?;
    sprites.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(sprites)
}

/// Decode a single image file into an RGBA buffer
pub fn load_buffer(path: &Path) -> Result<PixelBuffer> {
    if !path.exists() {
        return Err(PressError::InputNotFound(path.to_path_buf()).into());
    }

    let img = ImageReader::open(path)
        .map_err(|e| PressError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| PressError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| PressError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    Ok(PixelBuffer::from_image(img))
}

fn collect_image_paths(
    inputs: &[impl AsRef<Path>],
    base_dir: Option<&Path>,
) -> Result<Vec<ImagePath>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        if !path.exists() {
            return Err(PressError::InputNotFound(path.to_path_buf()).into());
        }

        if path.is_file() {
            if is_supported_image(path) {
                paths.push(ImagePath {
                    path: path.to_path_buf(),
                    base: base_dir.map(Path::to_path_buf),
                });
            }
        } else if path.is_dir() {
            collect_from_directory(path, path, &mut paths)?;
        }
    }

    Ok(paths)
}

fn collect_from_directory(base: &Path, dir: &Path, paths: &mut Vec<ImagePath>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();

        if path.is_file() && is_supported_image(&path) {
            paths.push(ImagePath {
                path,
                base: Some(base.to_path_buf()),
            });
        } else if path.is_dir() {
            collect_from_directory(base, &path, paths)?;
        }
    }

    Ok(())
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Relative path without extension, using `/` on every platform
fn sprite_name(path: &Path, base: Option<&Path>) -> String {
    let relative = base
        .and_then(|b| path.strip_prefix(b).ok())
        .unwrap_or_else(|| Path::new(path.file_name().unwrap_or(path.as_os_str())));

    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_name_from_file() {
        assert_eq!(sprite_name(Path::new("art/hero_idle_0.png"), None), "hero_idle_0");
    }

    #[test]
    fn test_sprite_name_relative_to_base() {
        let name = sprite_name(
            Path::new("/project/sprites/hero/idle_0.png"),
            Some(Path::new("/project/sprites")),
        );
        assert_eq!(name, "hero/idle_0");
    }

    #[test]
    fn test_sprite_name_outside_base_falls_back_to_stem() {
        let name = sprite_name(Path::new("/other/walk.png"), Some(Path::new("/project")));
        assert_eq!(name, "walk");
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn test_missing_input_is_reported() {
        let err = load_sprites(&[Path::new("/definitely/not/here.png")], None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PressError>(),
            Some(PressError::InputNotFound(_))
        ));
    }
}
