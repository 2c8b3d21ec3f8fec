use std::io::Write;

use num::Float;

use crate::error::{FuzzyError, Result};
use crate::matrix::FuzzyMatrix;

/// Renders a fuzzy matrix as a fixed-width table of rounded entries.
///
/// Entries are rounded to `precision` decimals, ties to even on the exact
/// binary value, and then written in their shortest form with at least one
/// decimal digit (`0.0`, `0.4`, `1.0`). Each entry is right-aligned in a field
/// of `precision + 3` characters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Printer {
    precision: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

impl Printer {
    pub fn new(precision: usize) -> Result<Self> {
        if precision < 1 {
            return Err(FuzzyError::Precision(precision));
        }

        Ok(Self { precision })
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// The table rows without header or borders.
    pub fn body<F: Float>(&self, matrix: &FuzzyMatrix<F>) -> String {
        let field = self.precision + 3;

        matrix
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&u| format!("{:>field$}", self.round(u)))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Header, border, body, border.
    pub fn render<F: Float>(&self, matrix: &FuzzyMatrix<F>) -> String {
        let (width, height) = matrix.shape();
        let border = "-".repeat(width * (self.precision + 4) + 1);

        format!(
            "{width} x {height} FuzzyMatrix:\n{border}\n{}\n{border}",
            self.body(matrix)
        )
    }

    /// Writes the rendered table surrounded by blank lines and returns the body.
    pub fn print<F: Float>(&self, matrix: &FuzzyMatrix<F>, mut out: impl Write) -> Result<String> {
        writeln!(out)?;
        writeln!(out, "{}", self.render(matrix))?;
        writeln!(out)?;

        Ok(self.body(matrix))
    }

    fn round<F: Float>(&self, value: F) -> String {
        let value = value.to_f64().unwrap_or(f64::NAN);
        let rounded = format!("{:.*}", self.precision, value);
        let shortest = rounded.parse::<f64>().unwrap_or(value);

        // Debug keeps the trailing `.0` that Display drops
        format!("{shortest:?}")
    }
}

/// Prints `matrix` to stdout with the given precision and returns the table body.
pub fn print_matrix<F: Float>(matrix: &FuzzyMatrix<F>, precision: usize) -> Result<String> {
    Printer::new(precision)?.print(matrix, std::io::stdout().lock())
}

#[test]
fn test_body() {
    let m = FuzzyMatrix::from_rows(&[[0., 0.4], [1., 0.123456]]).unwrap();

    assert_eq!(Printer::default().body(&m), "    0.0     0.4\n    1.0  0.1235");
}

#[test]
fn test_render() {
    let m = FuzzyMatrix::from_row(&[0.4, 0.4, 0.4, 0.7, 1.0]).unwrap();
    let printer = Printer::new(2).unwrap();
    let border = "-".repeat(31);

    assert_eq!(
        printer.render(&m),
        format!("5 x 1 FuzzyMatrix:\n{border}\n  0.4   0.4   0.4   0.7   1.0\n{border}")
    );
}

#[test]
fn test_rounding_ties_to_even() {
    // 0.125 and 0.375 are exact ties in binary
    let m = FuzzyMatrix::from_row(&[0.125, 0.375, 0.30000000000000004]).unwrap();
    let printer = Printer::new(2).unwrap();

    assert_eq!(printer.body(&m), " 0.12  0.38   0.3");
}

#[test]
fn test_small_entries_use_exponent_form() {
    let m = FuzzyMatrix::from_row(&[0.00001, 0.0001]).unwrap();
    let printer = Printer::new(5).unwrap();

    assert_eq!(printer.body(&m), "    1e-5   0.0001");
}

#[test]
fn test_print() {
    let m = FuzzyMatrix::from_rows(&[[0.5], [0.25]]).unwrap();
    let printer = Printer::new(1).unwrap();
    let mut out: Vec<u8> = Vec::new();

    let body = printer.print(&m, &mut out).unwrap();

    assert_eq!(body, " 0.5\n 0.2");
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\n1 x 2 FuzzyMatrix:\n------\n 0.5\n 0.2\n------\n\n"
    );
}

#[test]
fn test_precision_must_be_positive() {
    assert_eq!(Printer::new(0).unwrap_err().kind(), crate::error::ErrorKind::Range);
    assert_eq!(Printer::default().precision(), 4);
}

#[test]
fn test_display() {
    let m = FuzzyMatrix::<f32>::zeros(1, 1).unwrap();

    assert_eq!(m.to_string(), "1 x 1 FuzzyMatrix:\n---------\n    0.0\n---------");
}
