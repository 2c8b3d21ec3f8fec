use std::fmt;

use num::Float;

use crate::error::{FuzzyError, Result};
use crate::membership::{check, complement, domain_error, is_membership};
use crate::outputs::Printer;

/// A rectangular grid of membership degrees, stored row-major.
///
/// Every entry lies in [0, 1] and both dimensions are at least one. All of the
/// constructors and setters validate before they commit anything, so a matrix
/// can never be observed in a state that breaks those rules.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyMatrix<F = f64> {
    data: Vec<F>,
    width: usize,
    height: usize,
}

impl<F: Float> FuzzyMatrix<F> {
    /// Builds a matrix from a grid of rows. The grid must be non-empty and
    /// rectangular, and every entry must be a membership degree.
    pub fn from_rows<R: AsRef<[F]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(FuzzyError::shape("a fuzzy matrix needs at least one row"));
        };
        let width = first.as_ref().len();

        if width == 0 {
            return Err(FuzzyError::shape("a fuzzy matrix needs at least one column"));
        }

        for (y, row) in rows.iter().enumerate() {
            if row.as_ref().len() != width {
                return Err(FuzzyError::shape(format!(
                    "row {y} has {} entries, expected {width}",
                    row.as_ref().len()
                )));
            }
        }

        let data = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .map(check)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            data,
            width,
            height: rows.len(),
        })
    }

    /// A flat sequence is read as a single row.
    pub fn from_row(row: &[F]) -> Result<Self> {
        Self::from_rows(&[row])
    }

    /// A `width` x `height` matrix where every entry is `value`.
    pub fn filled(width: usize, height: usize, value: F) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FuzzyError::shape(format!(
                "cannot create a {width} x {height} fuzzy matrix"
            )));
        }

        let value = check(value)?;
        let mut data = allocate(width, height)?;

        data.resize(width * height, value);

        Ok(Self { data, width, height })
    }

    pub fn zeros(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, F::zero())
    }

    // Callers guarantee the shape and the membership of every entry.
    pub(crate) fn from_parts(data: Vec<F>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        debug_assert!(width > 0 && height > 0);
        debug_assert!(data.iter().copied().all(is_membership));

        Self { data, width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_row_vector(&self) -> bool {
        self.height == 1
    }

    pub fn is_column_vector(&self) -> bool {
        self.width == 1
    }

    /// The entries as a grid of owned rows.
    pub fn value(&self) -> Vec<Vec<F>> {
        self.rows().map(<[F]>::to_vec).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[F]> + '_ {
        self.data.chunks_exact(self.width)
    }

    /// Entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        self.data.iter().copied()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.data
    }

    pub fn row(&self, y: usize) -> Result<Vec<F>> {
        self.check_row(y)?;

        Ok(self.row_slice(y).to_vec())
    }

    pub fn column(&self, x: usize) -> Result<Vec<F>> {
        self.check_column(x)?;

        Ok((0..self.height).map(|y| self.at(x, y)).collect())
    }

    /// The entry in column `x` of row `y`.
    pub fn element(&self, x: usize, y: usize) -> Result<F> {
        self.check_column(x)?;
        self.check_row(y)?;

        Ok(self.at(x, y))
    }

    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> F {
        self.data[y * self.width + x]
    }

    fn row_slice(&self, y: usize) -> &[F] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Swaps the axes: the entry at (x, y) of the result is the entry at (y, x) of `self`.
    pub fn transpose(&self) -> Self {
        let data = (0..self.width)
            .flat_map(|x| (0..self.height).map(move |y| self.at(x, y)))
            .collect();

        Self::from_parts(data, self.height, self.width)
    }

    /// Replaces every entry with `1 - entry`.
    pub fn negate(&self) -> Self {
        let data = self.data.iter().copied().map(complement).collect();

        Self::from_parts(data, self.width, self.height)
    }

    /// Broadcasts a column vector horizontally into `width` identical columns.
    pub fn reset_width(&self, width: usize) -> Result<Self> {
        if !self.is_column_vector() {
            return Err(FuzzyError::shape(format!(
                "only a fuzzy matrix of width 1 can be reset, this one has width {}",
                self.width
            )));
        }
        if width == 0 {
            return Err(FuzzyError::shape("cannot reset the width to 0"));
        }

        let mut data = allocate(width, self.height)?;

        data.extend(self.data.iter().flat_map(|&u| std::iter::repeat(u).take(width)));

        Ok(Self::from_parts(data, width, self.height))
    }

    /// Broadcasts a row vector vertically into `height` identical rows.
    pub fn reset_height(&self, height: usize) -> Result<Self> {
        if !self.is_row_vector() {
            return Err(FuzzyError::shape(format!(
                "only a fuzzy matrix of height 1 can be reset, this one has height {}",
                self.height
            )));
        }
        if height == 0 {
            return Err(FuzzyError::shape("cannot reset the height to 0"));
        }

        let mut data = allocate(self.width, height)?;

        for _ in 0..height {
            data.extend_from_slice(&self.data);
        }

        Ok(Self::from_parts(data, self.width, height))
    }

    pub fn set_row(&mut self, y: usize, row: &[F]) -> Result<()> {
        self.check_row(y)?;
        if row.len() != self.width {
            return Err(FuzzyError::shape(format!(
                "row has {} entries, expected {}",
                row.len(),
                self.width
            )));
        }
        check_all(row)?;

        self.data[y * self.width..(y + 1) * self.width].copy_from_slice(row);

        Ok(())
    }

    pub fn set_column(&mut self, x: usize, column: &[F]) -> Result<()> {
        self.check_column(x)?;
        if column.len() != self.height {
            return Err(FuzzyError::shape(format!(
                "column has {} entries, expected {}",
                column.len(),
                self.height
            )));
        }
        check_all(column)?;

        for (y, &u) in column.iter().enumerate() {
            self.data[y * self.width + x] = u;
        }

        Ok(())
    }

    pub fn set_element(&mut self, x: usize, y: usize, value: F) -> Result<()> {
        self.check_column(x)?;
        self.check_row(y)?;

        self.data[y * self.width + x] = check(value)?;

        Ok(())
    }

    fn check_row(&self, y: usize) -> Result<()> {
        if y < self.height {
            Ok(())
        } else {
            Err(FuzzyError::range("row", y, self.height))
        }
    }

    fn check_column(&self, x: usize) -> Result<()> {
        if x < self.width {
            Ok(())
        } else {
            Err(FuzzyError::range("column", x, self.width))
        }
    }
}

// Room for exactly `width * height` entries, or a shape error when that can't be had.
fn allocate<F>(width: usize, height: usize) -> Result<Vec<F>> {
    let too_large = || FuzzyError::shape(format!("a {width} x {height} fuzzy matrix is too large"));
    let len = width.checked_mul(height).ok_or_else(too_large)?;
    let mut data = Vec::new();

    data.try_reserve_exact(len).map_err(|_| too_large())?;

    Ok(data)
}

fn check_all<F: Float>(values: &[F]) -> Result<()> {
    match values.iter().copied().find(|&u| !is_membership(u)) {
        Some(bad) => Err(domain_error(bad)),
        None => Ok(()),
    }
}

/// A `width` x `height` matrix filled with `value`.
pub fn create<F: Float>(width: usize, height: usize, value: F) -> Result<FuzzyMatrix<F>> {
    FuzzyMatrix::filled(width, height, value)
}

impl<F: Float> Default for FuzzyMatrix<F> {
    /// A fresh 1 x 1 zero matrix.
    fn default() -> Self {
        Self::from_parts(vec![F::zero()], 1, 1)
    }
}

impl<F: Float> TryFrom<Vec<Vec<F>>> for FuzzyMatrix<F> {
    type Error = FuzzyError;

    fn try_from(rows: Vec<Vec<F>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl<F: Float> TryFrom<Vec<F>> for FuzzyMatrix<F> {
    type Error = FuzzyError;

    fn try_from(row: Vec<F>) -> Result<Self> {
        Self::from_row(&row)
    }
}

impl<F: Float> fmt::Display for FuzzyMatrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::default().render(self))
    }
}

#[test]
fn test_from_rows() {
    let m = FuzzyMatrix::from_rows(&[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]).unwrap();

    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m.width(), 3);
    assert_eq!(m.height(), 2);
    assert_eq!(m.value(), vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]);
    assert_eq!(m.as_slice(), &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
}

#[test]
fn test_from_row() {
    let m = FuzzyMatrix::from_row(&[1., 0.7, 0.3, 0., 0.]).unwrap();

    assert_eq!(m.shape(), (5, 1));
    assert!(m.is_row_vector());
    assert!(!m.is_column_vector());

    let m = FuzzyMatrix::<f32>::try_from(vec![0.5]).unwrap();

    assert_eq!(m.shape(), (1, 1));
}

#[test]
fn test_invalid_construction() {
    let err = FuzzyMatrix::from_row(&[0.5, 1.2]).unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Domain);

    let err = FuzzyMatrix::from_rows(&[vec![0.5], vec![-0.1]]).unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Domain);

    let err = FuzzyMatrix::from_row(&[f64::NAN]).unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Domain);

    let err = FuzzyMatrix::<f64>::try_from(vec![vec![0.1, 0.2], vec![0.3]]).unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Shape);

    let empty: [[f64; 2]; 0] = [];
    assert_eq!(FuzzyMatrix::from_rows(&empty).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(FuzzyMatrix::<f64>::from_row(&[]).unwrap_err().kind(), crate::error::ErrorKind::Shape);
}

#[test]
fn test_shape_checked_before_domain() {
    // Ragged and out of range at once: the shape is reported
    let err = FuzzyMatrix::from_rows(&[vec![2.0, 0.2], vec![0.3]]).unwrap_err();

    assert_eq!(err.kind(), crate::error::ErrorKind::Shape);
}

#[test]
fn test_create() {
    let m = create(3, 2, 0.5).unwrap();

    assert_eq!(m.shape(), (3, 2));
    assert!(m.iter().all(|u| u == 0.5));
    assert_eq!(create(2, 2, 1.5).unwrap_err().kind(), crate::error::ErrorKind::Domain);
    assert_eq!(create(0, 2, 0.5).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(FuzzyMatrix::<f64>::zeros(2, 0).unwrap_err().kind(), crate::error::ErrorKind::Shape);
}

#[test]
fn test_default_is_fresh() {
    let mut a = FuzzyMatrix::<f64>::default();
    let b = FuzzyMatrix::<f64>::default();

    a.set_element(0, 0, 1.).unwrap();

    assert_eq!(b.value(), vec![vec![0.]]);
    assert_eq!(a.value(), vec![vec![1.]]);
}

#[test]
fn test_accessors() {
    let m = FuzzyMatrix::from_rows(&[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]).unwrap();

    assert_eq!(m.row(1).unwrap(), vec![0.4, 0.5, 0.6]);
    assert_eq!(m.column(2).unwrap(), vec![0.3, 0.6]);
    assert_eq!(m.element(2, 0).unwrap(), 0.3);
    assert_eq!(m.element(0, 1).unwrap(), 0.4);
    assert_eq!(m.rows().count(), 2);

    assert_eq!(m.row(2).unwrap_err().kind(), crate::error::ErrorKind::Range);
    assert_eq!(m.column(3).unwrap_err().kind(), crate::error::ErrorKind::Range);
    assert_eq!(m.element(0, 2).unwrap_err().kind(), crate::error::ErrorKind::Range);
}

#[test]
fn test_transpose() {
    let m = FuzzyMatrix::from_rows(&[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]).unwrap();
    let t = m.transpose();

    assert_eq!(t.shape(), (2, 3));
    assert_eq!(t.value(), vec![vec![0.1, 0.4], vec![0.2, 0.5], vec![0.3, 0.6]]);
    assert_eq!(t.transpose(), m);
}

#[test]
fn test_negate() {
    let m = FuzzyMatrix::from_rows(&[[0., 0.25], [0.5, 1.]]).unwrap();

    assert_eq!(m.negate().value(), vec![vec![1., 0.75], vec![0.5, 0.]]);
    assert_eq!(m.negate().negate(), m);
}

#[test]
fn test_reset_width() {
    let column = FuzzyMatrix::from_rows(&[[0.1], [0.9]]).unwrap();
    let wide = column.reset_width(3).unwrap();

    assert_eq!(wide.value(), vec![vec![0.1, 0.1, 0.1], vec![0.9, 0.9, 0.9]]);

    let not_column = FuzzyMatrix::from_row(&[0.1, 0.2]).unwrap();

    assert_eq!(not_column.reset_width(3).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(column.reset_width(0).unwrap_err().kind(), crate::error::ErrorKind::Shape);
}

#[test]
fn test_oversized_shapes_are_rejected() {
    let err = create(usize::MAX / 2 + 1, 2, 0.5).unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Shape);

    let err = FuzzyMatrix::<f64>::zeros(2, usize::MAX).unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Shape);

    let column = FuzzyMatrix::from_rows(&[[0.1], [0.9]]).unwrap();
    assert_eq!(column.reset_width(usize::MAX).unwrap_err().kind(), crate::error::ErrorKind::Shape);

    let row = FuzzyMatrix::from_row(&[0.1, 0.2]).unwrap();
    assert_eq!(row.reset_height(usize::MAX).unwrap_err().kind(), crate::error::ErrorKind::Shape);

    let scalar = FuzzyMatrix::from_row(&[0.3]).unwrap();
    assert_eq!(scalar.reset_height(usize::MAX).unwrap_err().kind(), crate::error::ErrorKind::Shape);
}

#[test]
fn test_reset_height() {
    let row = FuzzyMatrix::from_row(&[0.1, 0.2]).unwrap();
    let tall = row.reset_height(3).unwrap();

    assert_eq!(tall.value(), vec![vec![0.1, 0.2]; 3]);

    let not_row = FuzzyMatrix::from_rows(&[[0.1], [0.9]]).unwrap();

    assert_eq!(not_row.reset_height(3).unwrap_err().kind(), crate::error::ErrorKind::Shape);
}

#[test]
fn test_setters() {
    let mut m = FuzzyMatrix::<f64>::zeros(3, 2).unwrap();

    m.set_row(1, &[0.1, 0.2, 0.3]).unwrap();
    m.set_column(0, &[0.7, 0.8]).unwrap();
    m.set_element(2, 0, 1.).unwrap();

    assert_eq!(m.value(), vec![vec![0.7, 0., 1.], vec![0.8, 0.2, 0.3]]);
}

#[test]
fn test_setters_validate_before_writing() {
    let original = FuzzyMatrix::from_rows(&[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]).unwrap();
    let mut m = original.clone();

    assert_eq!(m.set_row(0, &[0.9, 0.9, 1.5]).unwrap_err().kind(), crate::error::ErrorKind::Domain);
    assert_eq!(m.set_row(0, &[0.9, 0.9]).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(m.set_row(5, &[0.9, 0.9, 0.9]).unwrap_err().kind(), crate::error::ErrorKind::Range);
    assert_eq!(m.set_column(1, &[0.9, -0.5]).unwrap_err().kind(), crate::error::ErrorKind::Domain);
    assert_eq!(m.set_column(1, &[0.9]).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(m.set_element(0, 0, 2.).unwrap_err().kind(), crate::error::ErrorKind::Domain);
    assert_eq!(m.set_element(3, 0, 0.5).unwrap_err().kind(), crate::error::ErrorKind::Range);

    assert_eq!(m, original);
}
