use std::cmp::Ordering;
use std::fmt::{Debug, Display};

/// Wrapper around the [`float_cmp::approx_eq!()`] macro for easy comparison of floats with
/// a certain tolerance. Two FPAs are considered equal if they are within tolerance of each
/// other. This is the declared numeric epsilon of the crate: geometry that matches within
/// FPA tolerance is treated as identical.
#[derive(Debug, Clone, Copy)]
pub struct FPA(pub f64);

impl From<f64> for FPA {
    fn from(n: f64) -> Self {
        FPA(n)
    }
}

impl PartialEq<Self> for FPA {
    fn eq(&self, other: &Self) -> bool {
        float_cmp::approx_eq!(f64, self.0, other.0)
    }
}

impl PartialOrd<Self> for FPA {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.eq(other) {
            true => Some(Ordering::Equal),
            false => self.0.partial_cmp(&other.0),
        }
    }
}

impl Display for FPA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
