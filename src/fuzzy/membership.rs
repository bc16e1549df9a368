//! Membership functions.
//!
//! Each shape maps a crisp value onto a degree of membership in `[0, 1]`.
//! Every shape is total: values far outside the declared break points
//! saturate instead of failing, and collapsed edges (`a == b`, `c == d`,
//! `start == end`) become a step at that point rather than a division by
//! zero.  `NaN` maps to `0.0`.

use serde::{Deserialize, Serialize};

/// Closed set of membership shapes used by the rule base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Linear edge from 0 at `start` to 1 at `end`.  Descending when
    /// `start > end`.
    Ramp { start: f64, end: f64 },
    /// Rise `a → b`, plateau `b → c`, fall `c → d`.  Requires `a ≤ b ≤ c ≤ d`.
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    /// Crisp band: 1 on `[start, end]` inclusive, 0 elsewhere.
    Rectangle { start: f64, end: f64 },
}

impl MembershipFunction {
    pub const fn ramp(start: f64, end: f64) -> Self {
        Self::Ramp { start, end }
    }

    pub const fn trapezoid(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::Trapezoid { a, b, c, d }
    }

    pub const fn rectangle(start: f64, end: f64) -> Self {
        Self::Rectangle { start, end }
    }

    /// Degree of membership of `x`.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        match *self {
            Self::Ramp { start, end } => ramp(x, start, end),
            Self::Trapezoid { a, b, c, d } => trapezoid(x, a, b, c, d),
            Self::Rectangle { start, end } => {
                if x >= start && x <= end {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Finite break points in the order the shape requires.
    pub(crate) fn is_well_formed(&self) -> bool {
        match *self {
            Self::Ramp { start, end } => start.is_finite() && end.is_finite(),
            Self::Trapezoid { a, b, c, d } => {
                [a, b, c, d].iter().all(|v| v.is_finite()) && a <= b && b <= c && c <= d
            }
            Self::Rectangle { start, end } => start.is_finite() && end.is_finite() && start <= end,
        }
    }
}

fn ramp(x: f64, start: f64, end: f64) -> f64 {
    if start == end {
        return if x >= end { 1.0 } else { 0.0 };
    }
    if start < end {
        if x <= start {
            0.0
        } else if x >= end {
            1.0
        } else {
            (x - start) / (end - start)
        }
    } else if x >= start {
        0.0
    } else if x <= end {
        1.0
    } else {
        (start - x) / (start - end)
    }
}

fn trapezoid(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a || x > d {
        return 0.0;
    }
    // Within the rise `a <= x < b` implies `b > a`.
    if x < b {
        return ((x - a) / (b - a)).min(1.0);
    }
    if x <= c {
        return 1.0;
    }
    // Within the fall `c < x < d` implies `d > c`.
    if x < d {
        return (d - x) / (d - c);
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn ascending_ramp_clamps_outside_interval() {
        let r = MembershipFunction::ramp(80.0, 85.0);
        assert_eq!(r.degree(-1_000.0), 0.0);
        assert_eq!(r.degree(80.0), 0.0);
        assert!((r.degree(82.5) - 0.5).abs() < EPS);
        assert_eq!(r.degree(85.0), 1.0);
        assert_eq!(r.degree(1e9), 1.0);
    }

    #[test]
    fn descending_ramp_mirrors_ascending() {
        let r = MembershipFunction::ramp(-0.4, -0.5);
        assert_eq!(r.degree(0.0), 0.0);
        assert_eq!(r.degree(-0.4), 0.0);
        assert!((r.degree(-0.45) - 0.5).abs() < 1e-9);
        assert_eq!(r.degree(-0.5), 1.0);
        assert_eq!(r.degree(-3.0), 1.0);
    }

    #[test]
    fn ramp_is_monotonic_inside_interval() {
        let r = MembershipFunction::ramp(0.2, 0.4);
        let mut prev = 0.0;
        for i in 0..=100 {
            let x = 0.2 + 0.2 * f64::from(i) / 100.0;
            let d = r.degree(x);
            assert!(d >= prev, "ramp not monotonic at {x}");
            prev = d;
        }
    }

    #[test]
    fn collapsed_ramp_is_a_step() {
        let r = MembershipFunction::ramp(1.0, 1.0);
        assert_eq!(r.degree(0.999), 0.0);
        assert_eq!(r.degree(1.0), 1.0);
        assert_eq!(r.degree(2.0), 1.0);
    }

    #[test]
    fn trapezoid_boundaries() {
        let t = MembershipFunction::trapezoid(60.0, 65.0, 80.0, 85.0);
        assert_eq!(t.degree(60.0), 0.0);
        assert_eq!(t.degree(65.0), 1.0);
        assert_eq!(t.degree(80.0), 1.0);
        assert_eq!(t.degree(85.0), 0.0);
        assert!((t.degree(62.5) - 0.5).abs() < EPS);
        assert!((t.degree(82.5) - 0.5).abs() < EPS);
        assert_eq!(t.degree(59.0), 0.0);
        assert_eq!(t.degree(90.0), 0.0);
    }

    #[test]
    fn trapezoid_shape_is_rise_plateau_fall() {
        let t = MembershipFunction::trapezoid(-0.15, -0.07, 0.07, 0.15);
        let samples: Vec<f64> = (0..=300).map(|i| -0.15 + 0.3 * f64::from(i) / 300.0).collect();
        for w in samples.windows(2) {
            let (x0, x1) = (w[0], w[1]);
            let (d0, d1) = (t.degree(x0), t.degree(x1));
            if x1 <= -0.07 {
                assert!(d1 >= d0);
            } else if x0 >= -0.07 && x1 <= 0.07 {
                assert_eq!(d0, 1.0);
                assert_eq!(d1, 1.0);
            } else if x0 >= 0.07 {
                assert!(d1 <= d0);
            }
        }
    }

    #[test]
    fn degenerate_trapezoid_is_a_triangle_or_step() {
        let triangle = MembershipFunction::trapezoid(0.0, 1.0, 1.0, 2.0);
        assert_eq!(triangle.degree(1.0), 1.0);
        assert!((triangle.degree(0.5) - 0.5).abs() < EPS);
        assert!((triangle.degree(1.5) - 0.5).abs() < EPS);

        let step = MembershipFunction::trapezoid(3.0, 3.0, 4.0, 4.0);
        assert_eq!(step.degree(2.999), 0.0);
        assert_eq!(step.degree(3.0), 1.0);
        assert_eq!(step.degree(4.0), 1.0);
        assert_eq!(step.degree(4.001), 0.0);

        let point = MembershipFunction::trapezoid(5.0, 5.0, 5.0, 5.0);
        assert_eq!(point.degree(5.0), 1.0);
        assert_eq!(point.degree(5.1), 0.0);
    }

    #[test]
    fn rectangle_is_inclusive() {
        let r = MembershipFunction::rectangle(2.0, 3.0);
        assert_eq!(r.degree(1.999), 0.0);
        assert_eq!(r.degree(2.0), 1.0);
        assert_eq!(r.degree(2.5), 1.0);
        assert_eq!(r.degree(3.0), 1.0);
        assert_eq!(r.degree(3.001), 0.0);
    }

    #[test]
    fn nan_and_infinities_are_handled() {
        let shapes = [
            MembershipFunction::ramp(0.0, 1.0),
            MembershipFunction::ramp(1.0, 0.0),
            MembershipFunction::trapezoid(0.0, 1.0, 2.0, 3.0),
            MembershipFunction::rectangle(0.0, 1.0),
        ];
        for s in shapes {
            assert_eq!(s.degree(f64::NAN), 0.0);
            for x in [f64::INFINITY, f64::NEG_INFINITY] {
                let d = s.degree(x);
                assert!((0.0..=1.0).contains(&d), "{s:?} at {x} gave {d}");
            }
        }
    }

    #[test]
    fn well_formedness() {
        assert!(MembershipFunction::trapezoid(0.0, 1.0, 2.0, 3.0).is_well_formed());
        assert!(!MembershipFunction::trapezoid(0.0, 2.0, 1.0, 3.0).is_well_formed());
        assert!(!MembershipFunction::rectangle(2.0, 1.0).is_well_formed());
        assert!(!MembershipFunction::ramp(f64::NAN, 1.0).is_well_formed());
        assert!(MembershipFunction::ramp(1.0, 0.0).is_well_formed());
    }
}
