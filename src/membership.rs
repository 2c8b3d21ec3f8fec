use num::Float;

use crate::error::{FuzzyError, Result};

/// A value between zero and one
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ZeroOne<F = f64>(F);

impl<F: Float> ZeroOne<F> {
    /// Fails with a domain error for anything outside of [0, 1], NaN included.
    pub fn new(value: F) -> Result<Self> {
        if is_membership(value) {
            Ok(Self(value))
        } else {
            Err(domain_error(value))
        }
    }

    pub fn get(self) -> F {
        self.0
    }

    /// `1 - x`
    pub fn complement(self) -> Self {
        Self(F::one() - self.0)
    }
}

impl<F: Float> TryFrom<f64> for ZeroOne<F> {
    type Error = FuzzyError;

    fn try_from(value: f64) -> Result<Self> {
        match F::from(value) {
            Some(value) => Self::new(value),
            None => Err(FuzzyError::domain(value)),
        }
    }
}

// NaN fails both comparisons
#[inline]
pub(crate) fn is_membership<F: Float>(value: F) -> bool {
    value >= F::zero() && value <= F::one()
}

pub(crate) fn check<F: Float>(value: F) -> Result<F> {
    ZeroOne::new(value).map(ZeroOne::get)
}

pub(crate) fn complement<F: Float>(value: F) -> F {
    ZeroOne(value).complement().get()
}

pub(crate) fn domain_error<F: Float>(value: F) -> FuzzyError {
    FuzzyError::domain(value.to_f64().unwrap_or(f64::NAN))
}

#[test]
fn test_zero_one_bounds() {
    assert_eq!(ZeroOne::new(0.).map(ZeroOne::get).ok(), Some(0.));
    assert_eq!(ZeroOne::new(1.).map(ZeroOne::get).ok(), Some(1.));
    assert_eq!(ZeroOne::new(0.25f32).map(ZeroOne::get).ok(), Some(0.25));
    assert!(ZeroOne::new(1.2).is_err());
    assert!(ZeroOne::new(-0.1).is_err());
    assert!(ZeroOne::new(f64::NAN).is_err());
    assert!(ZeroOne::new(f64::INFINITY).is_err());
}

#[test]
fn test_zero_one_complement() {
    let value = ZeroOne::new(0.25).unwrap();

    assert_eq!(value.complement().get(), 0.75);
    assert_eq!(ZeroOne::new(0.).unwrap().complement().get(), 1.);
    assert_eq!(complement(1f32), 0.);
}

#[test]
fn test_zero_one_try_from() {
    let value: ZeroOne<f32> = ZeroOne::try_from(0.5f64).unwrap();

    assert_eq!(value.get(), 0.5f32);
    assert_eq!(
        ZeroOne::<f32>::try_from(2f64).unwrap_err().kind(),
        crate::error::ErrorKind::Domain
    );
}
