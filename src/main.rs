use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;

use spritepress::atlas::AtlasCompiler;
use spritepress::cli::{CliArgs, Command, CompressionLevel, KeyArgs, PackArgs, SliceArgs};
use spritepress::config::LoadedConfig;
use spritepress::keying::{ColorKey, remove_colors};
use spritepress::output::{save_png, write_json, write_tiles};
use spritepress::slicing::{AxisCuts, slice};
use spritepress::sprite::{load_buffer, load_sprites};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., argument parsing fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("spritepress v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Key(args) => run_key(args)?,
        Command::Slice(args) => run_slice(args)?,
        Command::Pack(args) => run_pack(args)?,
    }

    info!("Done!");

    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_string()
}

fn run_key(args: &KeyArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    ensure_dir(&output)?;

    args.input.par_iter().try_for_each(|input| -> Result<()> {
        let buffer = load_buffer(input)?;
        let keyed = remove_colors(&buffer, &args.colors)?;
        let path = keyed_output_path(&output, input);
        save_png(&keyed, &path, args.compress)?;
        info!("Saved {}", path.display());
        Ok(())
    })
}

/// `<stem>_keyed.png` in the output directory, never the input file itself
fn keyed_output_path(output: &Path, input: &Path) -> PathBuf {
    output.join(format!("{}_keyed.png", file_stem(input)))
}

fn run_slice(args: &SliceArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    ensure_dir(&output)?;

    let mut buffer = load_buffer(&args.input)?;
    if !args.colors.is_empty() {
        buffer = remove_colors(&buffer, &args.colors)?;
    }

    let vertical = axis_cuts(
        buffer.width,
        args.x_cuts.as_deref(),
        args.split_x.as_deref(),
        args.cols,
    )?;
    let horizontal = axis_cuts(
        buffer.height,
        args.y_cuts.as_deref(),
        args.split_y.as_deref(),
        args.rows,
    )?;

    let tiles = slice(&buffer, &horizontal, &vertical)?;
    let stem = args.name.clone().unwrap_or_else(|| file_stem(&args.input));
    let paths = write_tiles(&tiles, &output, &stem, args.compress)?;

    info!(
        "Wrote {} tiles ({} rows x {} columns) to {}",
        paths.len(),
        horizontal.spans(),
        vertical.spans(),
        output.display()
    );

    Ok(())
}

/// Build the cuts for one axis from whichever form the user gave
fn axis_cuts(
    length: u32,
    cuts: Option<&[u32]>,
    splits: Option<&[u32]>,
    count: Option<u32>,
) -> Result<AxisCuts> {
    let cuts = match (cuts, splits, count) {
        (Some(cuts), _, _) => AxisCuts::new(cuts.to_vec())?,
        (None, Some(splits), _) => AxisCuts::from_splits(length, splits)?,
        (None, None, Some(count)) => AxisCuts::divide(length, count)?,
        (None, None, None) => AxisCuts::from_splits(length, &[])?,
    };
    Ok(cuts)
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: Vec<PathBuf>,
    base_dir: Option<PathBuf>,
    output: PathBuf,
    name: String,
    padding: u32,
    colors: Vec<ColorKey>,
    offsets: Vec<(String, [i32; 2])>,
    compress: Option<CompressionLevel>,
}

fn run_pack(args: &PackArgs) -> Result<()> {
    let merged = merge_config_with_args(args)?;
    ensure_dir(&merged.output)?;

    let mut sprites = load_sprites(&merged.input, merged.base_dir.as_deref())?;
    info!("Loaded {} sprites", sprites.len());

    if !merged.colors.is_empty() {
        sprites.par_iter_mut().try_for_each(|sprite| -> Result<()> {
            sprite.buffer = remove_colors(&sprite.buffer, &merged.colors)?;
            Ok(())
        })?;
    }

    for (name, [x, y]) in &merged.offsets {
        match sprites.iter_mut().find(|s| &s.name == name) {
            Some(sprite) => {
                sprite.offset_x = *x;
                sprite.offset_y = *y;
            }
            None => warn!("Offset given for unknown sprite '{}'", name),
        }
    }

    let image_name = format!("{}.png", merged.name);
    let atlas = AtlasCompiler::new()
        .padding(merged.padding)
        .image_name(image_name.clone())
        .compile(&sprites)?;

    let image_path = merged.output.join(&image_name);
    save_png(&atlas.image, &image_path, merged.compress)?;
    info!("Saved {}", image_path.display());

    let json_path = write_json(&atlas, &merged.output, &merged.name)?;
    info!("Generated {}", json_path.display());

    Ok(())
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &PackArgs) -> Result<MergedConfig> {
    // Load config if specified
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine input files: CLI args override config
    let (input, base_dir) = if !args.input.is_empty() {
        (args.input.clone(), None)
    } else if let Some(ref lc) = loaded_config {
        (
            lc.resolve_inputs()
                .context("failed to resolve input files from config")?,
            Some(lc.config_dir.clone()),
        )
    } else {
        // This shouldn't happen due to clap's required_unless_present
        (Vec::new(), None)
    };

    // Determine output directory: CLI > config > default
    let output = args.output.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.resolve_output_dir())
            .unwrap_or_else(|| PathBuf::from("."))
    });

    // Determine name: CLI > config > default
    let name = args.name.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.name.clone())
            .unwrap_or_else(|| "atlas".to_string())
    });

    let padding = args.padding.unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.padding)
            .unwrap_or(1)
    });

    // Colors: any on the command line replace the config list
    let colors = if !args.colors.is_empty() {
        args.colors.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.config.color_keys.clone()
    } else {
        Vec::new()
    };

    // Offsets only come from the config file
    let offsets = loaded_config
        .as_ref()
        .map(|lc| {
            lc.config
                .offsets
                .iter()
                .map(|(name, offset)| (name.clone(), *offset))
                .collect()
        })
        .unwrap_or_default();

    // Compress: CLI option overrides config
    let compress = if args.compress.is_some() {
        args.compress
    } else if let Some(ref lc) = loaded_config {
        lc.config.compress.as_ref().map(|c| c.level())
    } else {
        None
    };

    Ok(MergedConfig {
        input,
        base_dir,
        output,
        name,
        padding,
        colors,
        offsets,
        compress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_output_does_not_overwrite_input() {
        let input = Path::new("sheet.png");
        let path = keyed_output_path(Path::new("."), input);
        assert_eq!(path, Path::new(".").join("sheet_keyed.png"));
        assert_ne!(path, Path::new(".").join(input));

        let nested = keyed_output_path(Path::new("out"), Path::new("art/hero.bmp"));
        assert_eq!(nested, Path::new("out").join("hero_keyed.png"));
    }
}
