use log::debug;

use super::ColorKey;
use crate::error::Result;
use crate::sprite::PixelBuffer;

/// Make every pixel matched by one of `keys` fully transparent.
///
/// Keys are tried in list order and the first match wins; later keys are not
/// consulted for that pixel. The input is left untouched and a new buffer is
/// returned. Existing alpha plays no part in matching.
pub fn remove_colors(buffer: &PixelBuffer, keys: &[ColorKey]) -> Result<PixelBuffer> {
    buffer.validate()?;

    let mut output = buffer.clone();
    if keys.is_empty() {
        return Ok(output);
    }

    let mut hits = vec![0usize; keys.len()];
    for pixel in output.pixels.chunks_exact_mut(4) {
        let rgb = [pixel[0], pixel[1], pixel[2]];
        if let Some(index) = keys.iter().position(|key| key.matches(rgb)) {
            pixel[3] = 0;
            hits[index] += 1;
        }
    }

    for (key, count) in keys.iter().zip(&hits) {
        debug!("Color key {} cleared {} pixels", key, count);
    }

    Ok(output)
}
