use log::debug;

use super::{MaxRectsPacker, Rect};
use crate::error::{PressError, Result};

/// First square bin edge tried
pub const START_BIN_EDGE: u32 = 256;
/// Largest square bin edge tried before giving up
pub const MAX_BIN_EDGE: u32 = 4096;

/// Outcome of a successful bin search
#[derive(Debug, Clone)]
pub struct BinPacking {
    /// Edge of the square bin that accepted every box
    pub bin_edge: u32,
    /// Tight bounding width over all placed boxes
    pub width: u32,
    /// Tight bounding height over all placed boxes
    pub height: u32,
    /// Placed box for each input size, in input order
    pub rects: Vec<Rect>,
    pub occupancy: f64,
}

/// Pack boxes into the smallest square bin that holds all of them.
///
/// Bins start at [`START_BIN_EDGE`] and double until [`MAX_BIN_EDGE`]; the
/// first bin that accepts every box wins. Boxes are inserted largest first
/// (area, then width, then height) with input index as the final tie-break.
pub fn pack_boxes(sizes: &[(u32, u32)]) -> Result<BinPacking> {
    if sizes.is_empty() {
        return Err(PressError::EmptyInput);
    }

    // Nothing can succeed if a box is wider than the biggest bin or the
    // boxes together cover more area than it has.
    let too_wide = sizes
        .iter()
        .any(|&(w, h)| w > MAX_BIN_EDGE || h > MAX_BIN_EDGE);
    let total_area: u64 = sizes
        .iter()
        .map(|&(w, h)| u64::from(w) * u64::from(h))
        .sum();
    if too_wide || total_area > u64::from(MAX_BIN_EDGE) * u64::from(MAX_BIN_EDGE) {
        return Err(PressError::PackingOverflow {
            max_edge: MAX_BIN_EDGE,
        });
    }

    let order = insertion_order(sizes);

    let mut edge = START_BIN_EDGE;
    while edge <= MAX_BIN_EDGE {
        if let Some(packing) = try_bin(sizes, &order, edge) {
            return Ok(packing);
        }
        debug!("{} boxes do not fit a {}x{} bin", sizes.len(), edge, edge);
        edge *= 2;
    }

    Err(PressError::PackingOverflow {
        max_edge: MAX_BIN_EDGE,
    })
}

fn insertion_order(sizes: &[(u32, u32)]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| {
        let (wa, ha) = sizes[a];
        let (wb, hb) = sizes[b];
        let area_a = u64::from(wa) * u64::from(ha);
        let area_b = u64::from(wb) * u64::from(hb);
        area_b
            .cmp(&area_a)
            .then(wb.cmp(&wa))
            .then(hb.cmp(&ha))
            .then(a.cmp(&b))
    });
    order
}

fn try_bin(sizes: &[(u32, u32)], order: &[usize], edge: u32) -> Option<BinPacking> {
    let mut packer = MaxRectsPacker::new(edge, edge);
    let mut rects = vec![Rect::new(0, 0, 0, 0); sizes.len()];

    for &i in order {
        let (w, h) = sizes[i];
        rects[i] = if w == 0 || h == 0 {
            // Empty boxes cover no pixels and never need free space
            if w > edge || h > edge {
                return None;
            }
            Rect::new(0, 0, w, h)
        } else {
            packer.insert(w, h)?
        };
    }

    let (width, height) = rects.iter().fold(packer.extent(), |(w, h), r| {
        (w.max(r.right()), h.max(r.bottom()))
    });
    Some(BinPacking {
        bin_edge: edge,
        width,
        height,
        rects,
        occupancy: packer.occupancy(),
    })
}
