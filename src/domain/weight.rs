//! Scalar weight carried by leaves and derived by containers.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Non-negative, finite quantity being aggregated (bytes, salary, ...).
///
/// Construction goes through [`Weight::new`], so every value in a tree
/// satisfies `w >= 0` and `w.is_finite()`. Sums of valid weights stay valid
/// except for overflow to infinity, which the type does not guard against.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);

    /// Returns `None` for negative, NaN or infinite input.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            // normalize -0.0
            Some(Self(value + 0.0))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0 + rhs.0)
    }
}

impl AddAssign for Weight {
    fn add_assign(&mut self, rhs: Weight) {
        self.0 += rhs.0;
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.fold(Weight::ZERO, Add::add)
    }
}

impl From<u32> for Weight {
    fn from(value: u32) -> Self {
        Weight(f64::from(value))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // whole numbers print without a fractional part: 1300, not 1300.0
        if self.0.fract() == 0.0 && self.0 < 1e15 {
            write!(f, "{}", self.0 as u64)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}
