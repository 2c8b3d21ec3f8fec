use std::io;

use thiserror::Error;

use crate::rules::RuleKey;

/// The failure taxonomy shared by every constructor, mutator and operator.
#[derive(Debug, Error)]
pub enum FuzzyError {
    /// A grid that isn't rectangular, a length mismatch, or operands whose shapes can't be broadcast together
    #[error("shape error: {reason}")]
    Shape { reason: String },
    /// A membership value outside of [0, 1], or one that isn't a number at all
    #[error("domain error: membership must be between 0 and 1, got {value}")]
    Domain { value: String },
    #[error("range error: {what} index {index} is out of range for length {len}")]
    Range { what: &'static str, index: usize, len: usize },
    #[error("range error: no rule with key {0:?}")]
    UnknownRule(RuleKey),
    #[error("range error: precision must be at least 1, got {0}")]
    Precision(usize),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    Shape,
    Domain,
    Range,
    Io,
}

impl FuzzyError {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        let reason = reason.into();

        tracing::debug!(%reason, "rejected shape");

        FuzzyError::Shape { reason }
    }

    pub(crate) fn domain(value: impl ToString) -> Self {
        let value = value.to_string();

        tracing::debug!(%value, "rejected membership value");

        FuzzyError::Domain { value }
    }

    pub(crate) fn range(what: &'static str, index: usize, len: usize) -> Self {
        FuzzyError::Range { what, index, len }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Shape { .. } => ErrorKind::Shape,
            Self::Domain { .. } => ErrorKind::Domain,
            Self::Range { .. } | Self::UnknownRule(_) | Self::Precision(_) => ErrorKind::Range,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

#[test]
fn test_error_messages() {
    assert_eq!(
        FuzzyError::shape("incompatible shapes 3 x 2 and 2 x 2").to_string(),
        "shape error: incompatible shapes 3 x 2 and 2 x 2"
    );
    assert_eq!(
        FuzzyError::domain(1.2).to_string(),
        "domain error: membership must be between 0 and 1, got 1.2"
    );
    assert_eq!(
        FuzzyError::range("row", 4, 2).to_string(),
        "range error: row index 4 is out of range for length 2"
    );
}

#[test]
fn test_error_kind() {
    assert_eq!(FuzzyError::shape("ragged").kind(), ErrorKind::Shape);
    assert_eq!(FuzzyError::domain("x").kind(), ErrorKind::Domain);
    assert_eq!(FuzzyError::range("column", 1, 1).kind(), ErrorKind::Range);

    let io = FuzzyError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));

    assert_eq!(io.kind(), ErrorKind::Io);
}
