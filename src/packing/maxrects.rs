use super::Rect;

/// MaxRects bin packer with best-fit placement.
///
/// A box goes into the free rectangle it leaves the least unused area in.
/// Ties prefer the spot that keeps the bounding box of everything placed so
/// far smallest, then the top-most, then the left-most position.
pub struct MaxRectsPacker {
    free_rects: Vec<Rect>,
    used_area: u64,
    extent: (u32, u32),
}

/// Lower is better, compared lexicographically
type Score = (u64, u64, u32, u32, u32);

impl MaxRectsPacker {
    pub fn new(width: u32, height: u32) -> Self {
        let initial_rect = Rect::new(0, 0, width, height);
        Self {
            free_rects: vec![initial_rect],
            used_area: 0,
            extent: (0, 0),
        }
    }

    /// Try to insert a rectangle with the given dimensions
    /// Returns the placed rectangle if successful
    pub fn insert(&mut self, width: u32, height: u32) -> Option<Rect> {
        let best_rect = self.find_position(width, height)?;
        self.place_rect(best_rect);
        Some(best_rect)
    }

    /// Width and height of the box spanning every placed rectangle
    pub fn extent(&self) -> (u32, u32) {
        self.extent
    }

    fn find_position(&self, width: u32, height: u32) -> Option<Rect> {
        let mut best: Option<(Score, Rect)> = None;

        for free_rect in &self.free_rects {
            if width <= free_rect.width && height <= free_rect.height {
                let candidate = Rect::new(free_rect.x, free_rect.y, width, height);
                let score = self.score_rect(free_rect, &candidate);
                if best.as_ref().is_none_or(|(b, _)| score < *b) {
                    best = Some((score, candidate));
                }
            }
        }

        best.map(|(_, rect)| rect)
    }

    fn score_rect(&self, free_rect: &Rect, candidate: &Rect) -> Score {
        let waste = free_rect.area() - candidate.area();

        let bound_w = self.extent.0.max(candidate.right());
        let bound_h = self.extent.1.max(candidate.bottom());
        let bound_area = u64::from(bound_w) * u64::from(bound_h);

        (
            waste,
            bound_area,
            bound_w.max(bound_h),
            candidate.y,
            candidate.x,
        )
    }

    fn place_rect(&mut self, rect: Rect) {
        let mut new_rects = Vec::new();

        self.free_rects.retain(|free_rect| {
            if !rect.intersects(free_rect) {
                return true;
            }

            // Split the free rectangle around the placed rectangle
            // Left portion
            if rect.x > free_rect.x {
                new_rects.push(Rect::new(
                    free_rect.x,
                    free_rect.y,
                    rect.x - free_rect.x,
                    free_rect.height,
                ));
            }

            // Right portion
            if rect.right() < free_rect.right() {
                new_rects.push(Rect::new(
                    rect.right(),
                    free_rect.y,
                    free_rect.right() - rect.right(),
                    free_rect.height,
                ));
            }

            // Top portion
            if rect.y > free_rect.y {
                new_rects.push(Rect::new(
                    free_rect.x,
                    free_rect.y,
                    free_rect.width,
                    rect.y - free_rect.y,
                ));
            }

            // Bottom portion
            if rect.bottom() < free_rect.bottom() {
                new_rects.push(Rect::new(
                    free_rect.x,
                    rect.bottom(),
                    free_rect.width,
                    free_rect.bottom() - rect.bottom(),
                ));
            }

            false
        });

        self.free_rects.extend(new_rects);
        self.prune_free_rects();

        self.used_area += rect.area();
        self.extent = (
            self.extent.0.max(rect.right()),
            self.extent.1.max(rect.bottom()),
        );
    }

    fn prune_free_rects(&mut self) {
        // Remove rectangles that are fully contained within others
        let mut i = 0;
        while i < self.free_rects.len() {
            let mut j = i + 1;
            while j < self.free_rects.len() {
                if self.free_rects[i].contains(&self.free_rects[j]) {
                    self.free_rects.swap_remove(j);
                } else if self.free_rects[j].contains(&self.free_rects[i]) {
                    self.free_rects.swap_remove(i);
                    j = i + 1;
                    continue;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }

    /// Share of the placed extent covered by rectangles (0.0 to 1.0)
    pub fn occupancy(&self) -> f64 {
        let extent_area = u64::from(self.extent.0) * u64::from(self.extent.1);
        if extent_area == 0 {
            return 0.0;
        }
        self.used_area as f64 / extent_area as f64
    }
}
