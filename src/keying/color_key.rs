use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PressError;

/// Largest possible Euclidean distance between two RGB colors, `sqrt(3 * 255^2)`
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

/// `MAX_RGB_DISTANCE` squared, kept exact so a 100% key covers every color
const MAX_RGB_DISTANCE_SQ: f64 = 195_075.0;

/// Tolerance used when a key is written without one
pub const DEFAULT_TOLERANCE: u8 = 10;

/// A background color to strip, with a tolerance radius in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Percentage (0-100) of [`MAX_RGB_DISTANCE`]; larger values are clamped
    pub tolerance: u8,
}

impl ColorKey {
    pub fn new(r: u8, g: u8, b: u8, tolerance: u8) -> Self {
        Self {
            r,
            g,
            b,
            tolerance: tolerance.min(100),
        }
    }

    /// Squared distance radius this key claims
    fn radius_sq(&self) -> f64 {
        let ratio = f64::from(self.tolerance.min(100)) / 100.0;
        ratio * ratio * MAX_RGB_DISTANCE_SQ
    }

    /// Euclidean RGB distance from this key to a pixel, alpha ignored
    pub fn distance(&self, rgb: [u8; 3]) -> f64 {
        f64::from(self.distance_sq(rgb)).sqrt()
    }

    fn distance_sq(&self, rgb: [u8; 3]) -> u32 {
        let dr = i32::from(rgb[0]) - i32::from(self.r);
        let dg = i32::from(rgb[1]) - i32::from(self.g);
        let db = i32::from(rgb[2]) - i32::from(self.b);
        dr.unsigned_abs().pow(2) + dg.unsigned_abs().pow(2) + db.unsigned_abs().pow(2)
    }

    /// True when the pixel lies within `tolerance / 100 * MAX_RGB_DISTANCE`
    pub fn matches(&self, rgb: [u8; 3]) -> bool {
        f64::from(self.distance_sq(rgb)) <= self.radius_sq()
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}:{}",
            self.r, self.g, self.b, self.tolerance
        )
    }
}

/// Parses `#RRGGBB`, `RRGGBB`, and either followed by `:TOL`
impl FromStr for ColorKey {
    type Err = PressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| PressError::InvalidColorKey {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (hex, tolerance) = match s.split_once(':') {
            Some((hex, tol)) => {
                let tol: u8 = tol
                    .trim()
                    .parse()
                    .map_err(|_e| invalid("tolerance must be an integer 0-100"))?;
                if tol > 100 {
                    return Err(invalid("tolerance must be an integer 0-100"));
                }
                (hex, tol)
            }
            None => (s, DEFAULT_TOLERANCE),
        };

        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid("expected six hex digits"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_e| invalid("expected six hex digits"))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_tolerance() {
        assert_eq!(
            "#ff00ff:25".parse::<ColorKey>().unwrap(),
            ColorKey::new(255, 0, 255, 25)
        );
        assert_eq!(
            "00FF00".parse::<ColorKey>().unwrap(),
            ColorKey::new(0, 255, 0, DEFAULT_TOLERANCE)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#ff00f".parse::<ColorKey>().is_err());
        assert!("#gg0000".parse::<ColorKey>().is_err());
        assert!("#ff0000:101".parse::<ColorKey>().is_err());
        assert!("#ff0000:abc".parse::<ColorKey>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let key = ColorKey::new(18, 52, 86, 7);
        assert_eq!(key.to_string(), "#123456:7");
        assert_eq!(key.to_string().parse::<ColorKey>().unwrap(), key);
    }

    #[test]
    fn test_tolerance_is_clamped() {
        assert_eq!(ColorKey::new(0, 0, 0, 250).tolerance, 100);
    }

    #[test]
    fn test_full_tolerance_reaches_opposite_corner() {
        let key = ColorKey::new(0, 0, 0, 100);
        assert!(key.matches([255, 255, 255]));
        assert!((key.distance([255, 255, 255]) - MAX_RGB_DISTANCE).abs() < 1e-9);
    }

    #[test]
    fn test_zero_tolerance_is_exact_match() {
        let key = ColorKey::new(10, 20, 30, 0);
        assert!(key.matches([10, 20, 30]));
        assert!(!key.matches([10, 20, 31]));
    }

    #[test]
    fn test_boundary_distance_is_inclusive() {
        // 10% of 441.67 is 44.17, so a pure 44-step red offset is inside
        let key = ColorKey::new(0, 0, 0, 10);
        assert!(key.matches([44, 0, 0]));
        assert!(!key.matches([45, 0, 0]));
    }
}
