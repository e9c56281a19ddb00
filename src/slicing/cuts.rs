use crate::error::{PressError, Result};

/// Cut positions along one axis.
///
/// The first and last entries are boundary cuts (everything outside them is
/// dropped), the ones in between split the kept span into separate tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisCuts(Vec<u32>);

impl AxisCuts {
    /// Cuts taken verbatim, boundaries included
    pub fn new(positions: Vec<u32>) -> Result<Self> {
        if positions.len() < 2 {
            return Err(PressError::InvalidCut(format!(
                "an axis needs at least two boundary cuts, got {}",
                positions.len()
            )));
        }

        if let Some(pair) = positions.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(PressError::InvalidCut(format!(
                "cuts must be strictly increasing, found {} then {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self(positions))
    }

    /// Boundaries at 0 and `length` with the given interior splits between
    pub fn from_splits(length: u32, splits: &[u32]) -> Result<Self> {
        let mut positions = Vec::with_capacity(splits.len() + 2);
        positions.push(0);
        positions.extend_from_slice(splits);
        positions.push(length);
        Self::new(positions)
    }

    /// Equal cells of `cell` pixels across `length`; the last one may be shorter
    pub fn uniform(length: u32, cell: u32) -> Result<Self> {
        if cell == 0 {
            return Err(PressError::InvalidCut("cell size must be non-zero".to_string()));
        }
        let mut positions: Vec<u32> = (0..length).step_by(cell as usize).collect();
        positions.push(length);
        Self::new(positions)
    }

    /// `count` cells spread across `length` as evenly as integer positions allow
    pub fn divide(length: u32, count: u32) -> Result<Self> {
        if count == 0 {
            return Err(PressError::InvalidCut("cell count must be non-zero".to_string()));
        }
        let positions = (0..=count)
            .map(|i| (u64::from(length) * u64::from(i) / u64::from(count)) as u32)
            .collect();
        Self::new(positions)
    }

    pub fn positions(&self) -> &[u32] {
        &self.0
    }

    /// Number of tiles along this axis
    pub fn spans(&self) -> usize {
        self.0.len() - 1
    }

    /// `(start, length)` of every tile along this axis, in order
    pub fn segments(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1] - pair[0]))
    }

    /// Fail if the last boundary lies past the end of an axis of `length` pixels
    pub fn check_within(&self, length: u32, axis: &str) -> Result<()> {
        let last = self.0[self.0.len() - 1];
        if last > length {
            return Err(PressError::InvalidCut(format!(
                "{} cut at {} lies beyond the image edge at {}",
                axis, last, length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_too_few_cuts() {
        assert!(AxisCuts::new(vec![]).is_err());
        assert!(AxisCuts::new(vec![5]).is_err());
    }

    #[test]
    fn test_rejects_non_increasing() {
        assert!(AxisCuts::new(vec![0, 10, 10, 20]).is_err());
        assert!(AxisCuts::new(vec![0, 12, 8]).is_err());
    }

    #[test]
    fn test_from_splits_adds_boundaries() {
        let cuts = AxisCuts::from_splits(64, &[16, 40]).unwrap();
        assert_eq!(cuts.positions(), &[0, 16, 40, 64]);
        assert_eq!(cuts.spans(), 3);
    }

    #[test]
    fn test_from_splits_rejects_split_on_boundary() {
        assert!(AxisCuts::from_splits(64, &[0]).is_err());
        assert!(AxisCuts::from_splits(64, &[64]).is_err());
    }

    #[test]
    fn test_uniform_with_remainder() {
        let cuts = AxisCuts::uniform(50, 16).unwrap();
        assert_eq!(cuts.positions(), &[0, 16, 32, 48, 50]);
        let segments: Vec<_> = cuts.segments().collect();
        assert_eq!(segments, vec![(0, 16), (16, 16), (32, 16), (48, 2)]);
    }

    #[test]
    fn test_uniform_exact() {
        assert_eq!(AxisCuts::uniform(32, 16).unwrap().positions(), &[0, 16, 32]);
        assert!(AxisCuts::uniform(32, 0).is_err());
    }

    #[test]
    fn test_divide() {
        assert_eq!(AxisCuts::divide(10, 3).unwrap().positions(), &[0, 3, 6, 10]);
        assert!(AxisCuts::divide(2, 3).is_err());
        assert!(AxisCuts::divide(10, 0).is_err());
    }

    #[test]
    fn test_check_within() {
        let cuts = AxisCuts::new(vec![2, 30]).unwrap();
        assert!(cuts.check_within(30, "x").is_ok());
        assert!(cuts.check_within(29, "x").is_err());
    }
}
