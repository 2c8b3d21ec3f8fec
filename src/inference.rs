use num::Float;

use crate::error::Result;
use crate::matrix::FuzzyMatrix;
use crate::ops::{conjunction, disjunction};

/// Implication operator used to turn an antecedent and a consequent fuzzy set
/// into a fuzzy relation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImplicationOp {
    /// `min(u, v)`
    Mandani,
    /// `max(min(u, v), 1 - u)`
    Zadeh,
}

impl ImplicationOp {
    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| match self {
            Self::Mandani => F::min(u, v),
            Self::Zadeh => F::max(F::min(u, v), F::one() - u),
        })
    }

    /// Builds the relation between antecedent `x` and consequent `y`. For two
    /// row vectors the result has one row per entry of `x` and one column per
    /// entry of `y`.
    pub fn relation<F: Float>(self, x: &FuzzyMatrix<F>, y: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
        match self {
            Self::Mandani => mandani(x, y),
            Self::Zadeh => zadeh(x, y),
        }
    }
}

/// Mandani inference: `conjunction(xᵀ, y)`
pub fn mandani<F: Float>(x: &FuzzyMatrix<F>, y: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
    conjunction(&x.transpose(), y)
}

/// Zadeh inference: `disjunction(conjunction(xᵀ, y), negate(xᵀ))`
pub fn zadeh<F: Float>(x: &FuzzyMatrix<F>, y: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
    let xt = x.transpose();

    disjunction(&conjunction(&xt, y)?, &xt.negate())
}

#[cfg(test)]
fn worked_example() -> (FuzzyMatrix, FuzzyMatrix, FuzzyMatrix) {
    let x = FuzzyMatrix::from_row(&[1., 0.7, 0.3, 0., 0.]).unwrap();
    let y = FuzzyMatrix::from_row(&[0., 0., 0.4, 0.7, 1.]).unwrap();
    let x1 = FuzzyMatrix::from_row(&[1., 0.6, 0.4, 0.2, 0.]).unwrap();

    (x, y, x1)
}

#[test]
fn test_mandani() {
    let (x, y, x1) = worked_example();
    let r = mandani(&x, &y).unwrap();

    assert_eq!(r.shape(), (5, 5));
    assert_eq!(r.row(1).unwrap(), vec![0., 0., 0.4, 0.7, 0.7]);
    assert_eq!(r.row(4).unwrap(), vec![0.; 5]);
    assert_eq!(crate::ops::o(&x1, &r).unwrap().value(), vec![vec![0.0, 0.0, 0.4, 0.7, 1.0]]);
}

#[test]
fn test_zadeh() {
    let (x, y, x1) = worked_example();
    let r = zadeh(&x, &y).unwrap();

    assert_eq!(r.shape(), (5, 5));
    assert_eq!(r.row(0).unwrap(), vec![0., 0., 0.4, 0.7, 1.]);
    assert_eq!(r.row(2).unwrap(), vec![0.7; 5]);
    assert_eq!(r.row(3).unwrap(), vec![1.; 5]);
    assert_eq!(crate::ops::o(&x1, &r).unwrap().value(), vec![vec![0.4, 0.4, 0.4, 0.7, 1.0]]);
}

#[test]
fn test_relation_shape() {
    let x = FuzzyMatrix::from_row(&[0.2, 0.9]).unwrap();
    let y = FuzzyMatrix::from_row(&[0.1, 0.5, 1.0]).unwrap();

    for op in [ImplicationOp::Mandani, ImplicationOp::Zadeh] {
        assert_eq!(op.relation(&x, &y).unwrap().shape(), (3, 2));
    }
}

#[test]
fn test_relation_matches_scalar_call() {
    let x = FuzzyMatrix::from_row(&[0.25, 0.5, 1.]).unwrap();
    let y = FuzzyMatrix::from_row(&[0., 0.75]).unwrap();

    for op in [ImplicationOp::Mandani, ImplicationOp::Zadeh] {
        let r = op.relation(&x, &y).unwrap();

        for (i, u) in x.iter().enumerate() {
            let expected: Vec<_> = op.call(std::iter::repeat(u), y.iter()).collect();

            assert_eq!(r.row(i).unwrap(), expected);
        }
    }
}
