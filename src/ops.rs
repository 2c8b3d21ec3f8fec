use std::borrow::Cow;

use num::Float;

use crate::error::{FuzzyError, Result};
use crate::matrix::FuzzyMatrix;

/// Elementwise connective for combining two fuzzy relations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Connective {
    /// Conjunction
    Min,
    /// Disjunction
    Max,
}

impl Connective {
    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| match self {
            Self::Min => F::min(u, v),
            Self::Max => F::max(u, v),
        })
    }

    /// Broadcasts the operands to a common shape, then combines them entry by entry.
    pub fn apply<F: Float>(self, a: &FuzzyMatrix<F>, b: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
        let (a, b) = broadcast(a, b)?;
        let (width, height) = a.shape();

        debug_assert_eq!(a.shape(), b.shape());

        let data = self.call(a.iter(), b.iter()).collect();

        Ok(FuzzyMatrix::from_parts(data, width, height))
    }
}

/// Resolves two operands to the same shape, expanding whichever of them is a
/// row or column vector. Operands that already fit are borrowed as-is.
///
/// Two matrices that are neither the same shape nor related by a vector
/// expansion are rejected; in particular a 1 x 1 matrix only broadcasts against
/// a row or column vector, never against a full matrix.
pub fn broadcast<'a, F: Float>(
    a: &'a FuzzyMatrix<F>,
    b: &'a FuzzyMatrix<F>,
) -> Result<(Cow<'a, FuzzyMatrix<F>>, Cow<'a, FuzzyMatrix<F>>)> {
    let (a_width, a_height) = a.shape();
    let (b_width, b_height) = b.shape();

    let resolved = if a.shape() == b.shape() {
        tracing::trace!(width = a_width, height = a_height, "shapes match");

        (Cow::Borrowed(a), Cow::Borrowed(b))
    } else if a.is_column_vector() && a_height == b_height {
        tracing::trace!(width = b_width, "widening left column");

        (Cow::Owned(a.reset_width(b_width)?), Cow::Borrowed(b))
    } else if b.is_column_vector() && b_height == a_height {
        tracing::trace!(width = a_width, "widening right column");

        (Cow::Borrowed(a), Cow::Owned(b.reset_width(a_width)?))
    } else if a.is_row_vector() && a_width == b_width {
        tracing::trace!(height = b_height, "stacking left row");

        (Cow::Owned(a.reset_height(b_height)?), Cow::Borrowed(b))
    } else if b.is_row_vector() && b_width == a_width {
        tracing::trace!(height = a_height, "stacking right row");

        (Cow::Borrowed(a), Cow::Owned(b.reset_height(a_height)?))
    } else if a.is_column_vector() && b.is_row_vector() {
        tracing::trace!(width = b_width, height = a_height, "outer broadcast");

        (Cow::Owned(a.reset_width(b_width)?), Cow::Owned(b.reset_height(a_height)?))
    } else if a.is_row_vector() && b.is_column_vector() {
        tracing::trace!(width = a_width, height = b_height, "outer broadcast");

        (Cow::Owned(a.reset_height(b_height)?), Cow::Owned(b.reset_width(a_width)?))
    } else {
        return Err(FuzzyError::shape(format!(
            "incompatible shapes {a_width} x {a_height} and {b_width} x {b_height}"
        )));
    };

    Ok(resolved)
}

/// Elementwise min of two fuzzy matrices, after broadcasting.
pub fn conjunction<F: Float>(a: &FuzzyMatrix<F>, b: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
    Connective::Min.apply(a, b)
}

/// Elementwise max of two fuzzy matrices, after broadcasting.
pub fn disjunction<F: Float>(a: &FuzzyMatrix<F>, b: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
    Connective::Max.apply(a, b)
}

/// Max-min composition of an `m x k` relation with a `k x n` one (height x width).
///
/// `C[y][x] = max over i of min(A[y][i], B[i][x])`
pub fn composition<F: Float>(a: &FuzzyMatrix<F>, b: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
    if a.width() != b.height() {
        return Err(FuzzyError::shape(format!(
            "cannot compose a {} x {} fuzzy matrix with a {} x {} one",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }

    let inner = a.width();
    let (width, height) = (b.width(), a.height());

    tracing::trace!(width, height, inner, "max-min composition");

    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                (0..inner)
                    .map(|i| F::min(a.at(i, y), b.at(x, i)))
                    .fold(F::zero(), F::max)
            })
        })
        .collect();

    Ok(FuzzyMatrix::from_parts(data, width, height))
}

/// Shorthand for [`composition`].
pub fn o<F: Float>(a: &FuzzyMatrix<F>, b: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
    composition(a, b)
}

#[test]
fn test_connective_call() {
    let u = [0.1, 0.5, 0.9];
    let v = [0.4, 0.5, 0.2];

    assert_eq!(Connective::Min.call(u, v).collect::<Vec<_>>(), vec![0.1, 0.5, 0.2]);
    assert_eq!(Connective::Max.call(u, v).collect::<Vec<_>>(), vec![0.4, 0.5, 0.9]);
}

#[test]
fn test_same_shape() {
    let a = FuzzyMatrix::from_rows(&[[0.1, 0.8], [0.6, 0.3]]).unwrap();
    let b = FuzzyMatrix::from_rows(&[[0.5, 0.5], [0.2, 0.9]]).unwrap();

    assert_eq!(conjunction(&a, &b).unwrap().value(), vec![vec![0.1, 0.5], vec![0.2, 0.3]]);
    assert_eq!(disjunction(&a, &b).unwrap().value(), vec![vec![0.5, 0.8], vec![0.6, 0.9]]);
}

#[test]
fn test_broadcast_column() {
    let a = FuzzyMatrix::from_rows(&[[0.1, 0.8, 0.4], [0.6, 0.3, 1.0]]).unwrap();
    let column = FuzzyMatrix::from_rows(&[[0.5], [0.7]]).unwrap();
    let expected = vec![vec![0.1, 0.5, 0.4], vec![0.6, 0.3, 0.7]];

    assert_eq!(conjunction(&a, &column).unwrap().value(), expected);
    assert_eq!(conjunction(&column, &a).unwrap().value(), expected);
    assert_eq!(
        conjunction(&a, &column).unwrap(),
        conjunction(&a, &column.reset_width(a.width()).unwrap()).unwrap()
    );
}

#[test]
fn test_broadcast_row() {
    let a = FuzzyMatrix::from_rows(&[[0.1, 0.8], [0.6, 0.3], [0.0, 1.0]]).unwrap();
    let row = FuzzyMatrix::from_row(&[0.5, 0.4]).unwrap();
    let expected = vec![vec![0.5, 0.8], vec![0.6, 0.4], vec![0.5, 1.0]];

    assert_eq!(disjunction(&a, &row).unwrap().value(), expected);
    assert_eq!(disjunction(&row, &a).unwrap().value(), expected);
}

#[test]
fn test_broadcast_outer() {
    let column = FuzzyMatrix::from_rows(&[[0.2], [0.9]]).unwrap();
    let row = FuzzyMatrix::from_row(&[0.1, 0.5, 1.0]).unwrap();

    let r = conjunction(&column, &row).unwrap();

    assert_eq!(r.shape(), (3, 2));
    assert_eq!(r.value(), vec![vec![0.1, 0.2, 0.2], vec![0.1, 0.5, 0.9]]);

    let r = disjunction(&row, &column).unwrap();

    assert_eq!(r.shape(), (3, 2));
    assert_eq!(r.value(), vec![vec![0.2, 0.5, 1.0], vec![0.9, 0.9, 1.0]]);
}

#[test]
fn test_broadcast_borrows_matching_operands() {
    let a = FuzzyMatrix::from_rows(&[[0.1, 0.8], [0.6, 0.3]]).unwrap();
    let column = FuzzyMatrix::from_rows(&[[0.5], [0.7]]).unwrap();

    let (left, right) = broadcast(&a, &column).unwrap();

    assert!(matches!(left, Cow::Borrowed(_)));
    assert!(matches!(right, Cow::Owned(_)));
}

#[test]
fn test_incompatible_shapes() {
    let a = FuzzyMatrix::<f64>::zeros(3, 2).unwrap();
    let b = FuzzyMatrix::<f64>::zeros(2, 2).unwrap();
    let scalar = FuzzyMatrix::<f64>::zeros(1, 1).unwrap();
    let tall = FuzzyMatrix::<f64>::zeros(1, 3).unwrap();

    assert_eq!(conjunction(&a, &b).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(disjunction(&b, &a).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(conjunction(&scalar, &a).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(disjunction(&tall, &a).unwrap_err().kind(), crate::error::ErrorKind::Shape);
}

#[test]
fn test_composition() {
    let a = FuzzyMatrix::from_rows(&[[0.2, 0.8, 0.5], [1.0, 0.1, 0.4]]).unwrap();
    let b = FuzzyMatrix::from_rows(&[[0.3, 0.9], [0.7, 0.2], [0.6, 0.0]]).unwrap();

    let c = composition(&a, &b).unwrap();

    assert_eq!(c.shape(), (2, 2));
    // c[0][0] = max(min(.2,.3), min(.8,.7), min(.5,.6)) = .7
    assert_eq!(c.value(), vec![vec![0.7, 0.2], vec![0.4, 0.9]]);
    assert_eq!(o(&a, &b).unwrap(), c);
}

#[test]
fn test_composition_shape() {
    let a = FuzzyMatrix::<f64>::zeros(3, 2).unwrap();
    let b = FuzzyMatrix::<f64>::zeros(4, 3).unwrap();

    assert_eq!(composition(&a, &b).unwrap().shape(), (4, 2));
    assert_eq!(composition(&b, &a).unwrap_err().kind(), crate::error::ErrorKind::Shape);
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    // Multiples of 1/64 keep `1 - x` exact
    fn membership() -> impl Strategy<Value = f64> {
        (0u32..=64).prop_map(|k| f64::from(k) / 64.)
    }

    fn matrix_with_shape(width: usize, height: usize) -> impl Strategy<Value = FuzzyMatrix> {
        proptest::collection::vec(membership(), width * height)
            .prop_map(move |data| FuzzyMatrix::from_parts(data, width, height))
    }

    fn matrix() -> impl Strategy<Value = FuzzyMatrix> {
        (1usize..6, 1usize..6).prop_flat_map(|(w, h)| matrix_with_shape(w, h))
    }

    fn same_shape_pair() -> impl Strategy<Value = (FuzzyMatrix, FuzzyMatrix)> {
        (1usize..6, 1usize..6).prop_flat_map(|(w, h)| (matrix_with_shape(w, h), matrix_with_shape(w, h)))
    }

    fn composable_pair() -> impl Strategy<Value = (FuzzyMatrix, FuzzyMatrix)> {
        (1usize..6, 1usize..6, 1usize..6)
            .prop_flat_map(|(m, k, n)| (matrix_with_shape(k, m), matrix_with_shape(n, k)))
    }

    fn in_domain(m: &FuzzyMatrix) -> bool {
        m.iter().all(|u| (0.0..=1.0).contains(&u))
    }

    proptest! {
        #[test]
        fn conjunction_commutes((a, b) in same_shape_pair()) {
            prop_assert_eq!(conjunction(&a, &b).unwrap(), conjunction(&b, &a).unwrap());
            prop_assert_eq!(disjunction(&a, &b).unwrap(), disjunction(&b, &a).unwrap());
        }

        #[test]
        fn connectives_are_idempotent(a in matrix()) {
            prop_assert_eq!(conjunction(&a, &a).unwrap(), a.clone());
            prop_assert_eq!(disjunction(&a, &a).unwrap(), a);
        }

        #[test]
        fn results_stay_in_domain((a, b) in same_shape_pair(), (c, d) in composable_pair()) {
            prop_assert!(in_domain(&conjunction(&a, &b).unwrap()));
            prop_assert!(in_domain(&disjunction(&a, &b).unwrap()));
            prop_assert!(in_domain(&a.negate()));
            prop_assert!(in_domain(&composition(&c, &d).unwrap()));
        }

        #[test]
        fn composition_shape_law((a, b) in composable_pair()) {
            let c = composition(&a, &b).unwrap();

            prop_assert_eq!(c.shape(), (b.width(), a.height()));
        }

        #[test]
        fn involutions(a in matrix()) {
            prop_assert_eq!(a.negate().negate(), a.clone());
            prop_assert_eq!(a.transpose().transpose(), a);
        }

        #[test]
        fn column_broadcast_matches_explicit_reset(a in matrix(), seed in proptest::collection::vec(membership(), 5)) {
            let column = FuzzyMatrix::from_parts(seed[..a.height()].to_vec(), 1, a.height());
            let explicit = column.reset_width(a.width()).unwrap();

            prop_assert_eq!(conjunction(&a, &column).unwrap(), conjunction(&a, &explicit).unwrap());
            prop_assert_eq!(disjunction(&column, &a).unwrap(), disjunction(&explicit, &a).unwrap());
        }
    }
}
