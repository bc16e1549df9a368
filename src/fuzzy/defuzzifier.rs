//! Centroid (centre-of-area) defuzzification.
//!
//! The aggregated set is sampled at the midpoints of `resolution` equal
//! slices of `[minimum, maximum]`:
//!
//! ```text
//!   x_i = min + (i + ½)·Δ,   Δ = (max − min) / resolution
//!   centroid = Σ x_i·μ(x_i) / Σ μ(x_i)
//! ```
//!
//! Midpoint sampling keeps the centroid of a set that is symmetric about
//! the domain centre exactly on that centre.

use serde::{Deserialize, Serialize};

/// Sample count used by every output of the driving rule base.
pub const DEFAULT_RESOLUTION: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Centroid {
    resolution: u16,
}

impl Centroid {
    /// A resolution of 0 is raised to 1.
    pub const fn new(resolution: u16) -> Self {
        Self {
            resolution: if resolution == 0 { 1 } else { resolution },
        }
    }

    pub fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Centroid of `membership` over `[minimum, maximum]`, or `None` when
    /// the sampled area is zero or the domain is not finite.
    pub fn defuzzify(&self, membership: impl Fn(f64) -> f64, minimum: f64, maximum: f64) -> Option<f64> {
        if !minimum.is_finite() || !maximum.is_finite() || maximum < minimum {
            return None;
        }
        let n = self.resolution;
        let dx = (maximum - minimum) / f64::from(n);

        let mut area = 0.0;
        let mut moment = 0.0;
        for i in 0..n {
            let x = minimum + (f64::from(i) + 0.5) * dx;
            let y = membership(x);
            area += y;
            moment += x * y;
        }

        if area > 0.0 { Some(moment / area) } else { None }
    }
}

impl Default for Centroid {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION)
    }
}
