use log::debug;

use super::AxisCuts;
use crate::error::Result;
use crate::sprite::PixelBuffer;

/// Crop a buffer into tiles along the given cuts.
///
/// `horizontal` holds y positions, `vertical` holds x positions. Tiles come
/// out row-major: top row first, left to right within a row. Pixels outside
/// the first and last cut of either axis end up in no tile.
pub fn slice(
    buffer: &PixelBuffer,
    horizontal: &AxisCuts,
    vertical: &AxisCuts,
) -> Result<Vec<PixelBuffer>> {
    buffer.validate()?;
    horizontal.check_within(buffer.height, "horizontal")?;
    vertical.check_within(buffer.width, "vertical")?;

    let mut tiles = Vec::with_capacity(horizontal.spans() * vertical.spans());
    for (y, h) in horizontal.segments() {
        for (x, w) in vertical.segments() {
            tiles.push(crop(buffer, x, y, w, h));
        }
    }

    debug!(
        "Sliced {}x{} image into {} tiles ({} rows, {} columns)",
        buffer.width,
        buffer.height,
        tiles.len(),
        horizontal.spans(),
        vertical.spans()
    );

    Ok(tiles)
}

/// Copy a rectangle known to lie inside `buffer`
fn crop(buffer: &PixelBuffer, x: u32, y: u32, w: u32, h: u32) -> PixelBuffer {
    let stride = buffer.width as usize * 4;
    let row_len = w as usize * 4;
    let mut pixels = Vec::with_capacity(row_len * h as usize);

    for row in y..y + h {
        let start = row as usize * stride + x as usize * 4;
        pixels.extend_from_slice(&buffer.pixels[start..start + row_len]);
    }

    PixelBuffer {
        width: w,
        height: h,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PressError;

    /// Every pixel encodes its own coordinates
    fn coordinate_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        PixelBuffer::from_raw(width, height, pixels).unwrap()
    }

    #[test]
    fn test_boundary_only_cuts_round_trip() {
        let image = coordinate_image(13, 7);
        let tiles = slice(
            &image,
            &AxisCuts::new(vec![0, 7]).unwrap(),
            &AxisCuts::new(vec![0, 13]).unwrap(),
        )
        .unwrap();

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0], image);
    }

    #[test]
    fn test_boundary_cuts_discard_border() {
        let image = coordinate_image(10, 10);
        let tiles = slice(
            &image,
            &AxisCuts::new(vec![2, 9]).unwrap(),
            &AxisCuts::new(vec![1, 4]).unwrap(),
        )
        .unwrap();

        assert_eq!(tiles.len(), 1);
        assert_eq!((tiles[0].width, tiles[0].height), (3, 7));
        assert_eq!(tiles[0].pixel(0, 0), Some([1, 2, 7, 255]));
        assert_eq!(tiles[0].pixel(2, 6), Some([3, 8, 7, 255]));
    }

    #[test]
    fn test_row_major_order() {
        let image = coordinate_image(6, 4);
        let tiles = slice(
            &image,
            &AxisCuts::from_splits(4, &[2]).unwrap(),
            &AxisCuts::from_splits(6, &[1, 3]).unwrap(),
        )
        .unwrap();

        assert_eq!(tiles.len(), 6);
        let origins: Vec<_> = tiles.iter().map(|t| t.pixel(0, 0).unwrap()).collect();
        assert_eq!(
            origins,
            vec![
                [0, 0, 7, 255],
                [1, 0, 7, 255],
                [3, 0, 7, 255],
                [0, 2, 7, 255],
                [1, 2, 7, 255],
                [3, 2, 7, 255],
            ]
        );
    }

    #[test]
    fn test_tiles_cover_cropped_region_exactly() {
        let image = coordinate_image(20, 15);
        let horizontal = AxisCuts::new(vec![1, 5, 6, 14]).unwrap();
        let vertical = AxisCuts::new(vec![0, 3, 11, 19]).unwrap();
        let tiles = slice(&image, &horizontal, &vertical).unwrap();

        let mut coverage = vec![0u32; 20 * 15];
        let mut tile_iter = tiles.iter();
        for (y0, h) in horizontal.segments() {
            for (x0, w) in vertical.segments() {
                let tile = tile_iter.next().unwrap();
                assert_eq!((tile.width, tile.height), (w, h));
                for ty in 0..h {
                    for tx in 0..w {
                        let (x, y) = (x0 + tx, y0 + ty);
                        assert_eq!(tile.pixel(tx, ty), image.pixel(x, y));
                        coverage[(y * 20 + x) as usize] += 1;
                    }
                }
            }
        }

        for y in 0..15 {
            for x in 0..20 {
                let inside = (1..14).contains(&y) && (0..19).contains(&x);
                assert_eq!(coverage[(y * 20 + x) as usize], u32::from(inside));
            }
        }
    }

    #[test]
    fn test_cut_beyond_edge_is_rejected() {
        let image = coordinate_image(8, 8);
        let err = slice(
            &image,
            &AxisCuts::new(vec![0, 8]).unwrap(),
            &AxisCuts::new(vec![0, 9]).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, PressError::InvalidCut(_)));
    }

    #[test]
    fn test_input_is_not_modified() {
        let image = coordinate_image(4, 4);
        let before = image.clone();
        let _ = slice(
            &image,
            &AxisCuts::from_splits(4, &[2]).unwrap(),
            &AxisCuts::from_splits(4, &[2]).unwrap(),
        )
        .unwrap();
        assert_eq!(image, before);
    }
}
