use std::io::{BufRead, Write};
use std::str::FromStr;

use num::Float;

use crate::error::{FuzzyError, Result};
use crate::matrix::FuzzyMatrix;

const ROW_PROMPT: &str = "Enter a single row fuzzy matrix: ";

fn parse_tokens<F: Float + FromStr>(line: &str) -> Result<Vec<F>> {
    line.split_whitespace()
        .map(|token| token.parse::<F>().map_err(|_| FuzzyError::domain(token)))
        .collect()
}

/// Parses a whitespace separated line of membership degrees into a single row matrix.
pub fn parse_row<F: Float + FromStr>(line: &str) -> Result<FuzzyMatrix<F>> {
    let row = parse_tokens(line)?;

    if row.is_empty() {
        return Err(FuzzyError::shape("expected at least one membership value"));
    }

    FuzzyMatrix::from_row(&row)
}

/// Parses `height` lines of `width` membership degrees each.
pub fn parse_matrix<'l, F: Float + FromStr>(
    lines: impl IntoIterator<Item = &'l str>,
    width: usize,
    height: usize,
) -> Result<FuzzyMatrix<F>> {
    let mut rows = Vec::with_capacity(height);

    for (y, line) in lines.into_iter().take(height).enumerate() {
        rows.push(parse_grid_line(line, y, width)?);
    }

    if rows.len() != height {
        return Err(FuzzyError::shape(format!("expected {height} lines, got {}", rows.len())));
    }

    FuzzyMatrix::from_rows(&rows)
}

fn parse_grid_line<F: Float + FromStr>(line: &str, y: usize, width: usize) -> Result<Vec<F>> {
    let row = parse_tokens(line)?;

    if row.len() != width {
        return Err(FuzzyError::shape(format!(
            "line {y} has {} values, expected {width}",
            row.len()
        )));
    }

    Ok(row)
}

/// Reads fuzzy matrices interactively, writing a prompt before each line it reads.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    row_prompt: String,
    matrix_prompt: Option<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            row_prompt: ROW_PROMPT.to_owned(),
            matrix_prompt: None,
        }
    }

    /// Overrides the prompt used by [`Prompter::read_row`].
    pub fn with_row_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.row_prompt = prompt.into();
        self
    }

    /// Overrides the header [`Prompter::read_matrix`] writes before the first row.
    /// Without one the header names the expected shape.
    pub fn with_matrix_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.matrix_prompt = Some(prompt.into());
        self
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    pub fn read_row<F: Float + FromStr>(&mut self) -> Result<FuzzyMatrix<F>> {
        let line = Self::prompt_line(&mut self.reader, &mut self.writer, &self.row_prompt)?;

        parse_row(&line)
    }

    /// Reads a `width` x `height` matrix one row at a time.
    pub fn read_matrix<F: Float + FromStr>(&mut self, width: usize, height: usize) -> Result<FuzzyMatrix<F>> {
        match &self.matrix_prompt {
            Some(prompt) => writeln!(self.writer, "{prompt}")?,
            None => writeln!(self.writer, "Enter a {width} x {height} fuzzy matrix:")?,
        }

        let mut rows = Vec::with_capacity(height);

        for y in 0..height {
            let line = Self::prompt_line(&mut self.reader, &mut self.writer, &format!("Enter line {y}: "))?;

            rows.push(parse_grid_line(&line, y, width)?);
        }

        FuzzyMatrix::from_rows(&rows)
    }

    fn prompt_line(reader: &mut R, writer: &mut W, prompt: &str) -> Result<String> {
        write!(writer, "{prompt}")?;
        writer.flush()?;

        let mut line = String::new();

        if reader.read_line(&mut line)? == 0 {
            return Err(FuzzyError::shape("input ended before a row was entered"));
        }

        tracing::trace!(line = line.trim_end(), "read input line");

        Ok(line)
    }
}

#[test]
fn test_parse_row() {
    let m: FuzzyMatrix = parse_row("1 0.7  0.3\t0 0\n").unwrap();

    assert_eq!(m.value(), vec![vec![1., 0.7, 0.3, 0., 0.]]);
    assert_eq!(parse_row::<f64>("   ").unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(parse_row::<f64>("0.5 x").unwrap_err().kind(), crate::error::ErrorKind::Domain);
    assert_eq!(parse_row::<f64>("0.5 1.2").unwrap_err().kind(), crate::error::ErrorKind::Domain);
}

#[test]
fn test_parse_matrix() {
    let m: FuzzyMatrix<f32> = parse_matrix(["0.1 0.2 0.3", "0.4 0.5 0.6", "ignored"], 3, 2).unwrap();

    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m.row(1).unwrap(), vec![0.4f32, 0.5, 0.6]);

    assert_eq!(
        parse_matrix::<f64>(["0.1 0.2 0.3", "0.4 0.5"], 3, 2).unwrap_err().kind(),
        crate::error::ErrorKind::Shape
    );
    assert_eq!(parse_matrix::<f64>(["0.1 0.2"], 2, 2).unwrap_err().kind(), crate::error::ErrorKind::Shape);
    assert_eq!(parse_matrix::<f64>(["0.1 nan"], 2, 1).unwrap_err().kind(), crate::error::ErrorKind::Domain);
}

#[test]
fn test_prompter_read_row() {
    let input = b"1 0.6 0.4 0.2 0\n" as &[u8];
    let mut prompter = Prompter::new(input, Vec::<u8>::new());

    let m: FuzzyMatrix = prompter.read_row().unwrap();
    let (_, prompts) = prompter.into_inner();

    assert_eq!(m.shape(), (5, 1));
    assert_eq!(String::from_utf8(prompts).unwrap(), ROW_PROMPT);
}

#[test]
fn test_prompter_custom_prompt() {
    let input = b"0.5\n0.25\n" as &[u8];
    let mut prompter = Prompter::new(input, Vec::<u8>::new()).with_row_prompt("x> ");

    prompter.read_row::<f64>().unwrap();
    prompter.read_row::<f64>().unwrap();

    let (_, prompts) = prompter.into_inner();

    assert_eq!(String::from_utf8(prompts).unwrap(), "x> x> ");
}

#[test]
fn test_prompter_read_matrix() {
    let input = b"0.1 0.2\n0.3 0.4\n" as &[u8];
    let mut prompter = Prompter::new(input, Vec::<u8>::new());

    let m: FuzzyMatrix = prompter.read_matrix(2, 2).unwrap();
    let (_, prompts) = prompter.into_inner();

    assert_eq!(m.value(), vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    assert_eq!(
        String::from_utf8(prompts).unwrap(),
        "Enter a 2 x 2 fuzzy matrix:\nEnter line 0: Enter line 1: "
    );
}

#[test]
fn test_prompter_custom_matrix_prompt() {
    let input = b"0.1 0.2\n" as &[u8];
    let mut prompter = Prompter::new(input, Vec::<u8>::new()).with_matrix_prompt("Relation R:");

    let m: FuzzyMatrix = prompter.read_matrix(2, 1).unwrap();
    let (_, prompts) = prompter.into_inner();

    assert_eq!(m.value(), vec![vec![0.1, 0.2]]);
    assert_eq!(String::from_utf8(prompts).unwrap(), "Relation R:\nEnter line 0: ");
}

#[test]
fn test_prompter_errors() {
    let mut prompter = Prompter::new(b"0.1 0.2 0.3\n" as &[u8], Vec::<u8>::new());

    assert_eq!(prompter.read_matrix::<f64>(2, 1).unwrap_err().kind(), crate::error::ErrorKind::Shape);

    let mut prompter = Prompter::new(b"0.1 0.2\n" as &[u8], Vec::<u8>::new());

    assert_eq!(prompter.read_matrix::<f64>(2, 2).unwrap_err().kind(), crate::error::ErrorKind::Shape);

    let mut prompter = Prompter::new(b"" as &[u8], Vec::<u8>::new());

    assert_eq!(prompter.read_row::<f64>().unwrap_err().kind(), crate::error::ErrorKind::Shape);
}
