//! Fuzzy relation algebra over matrices of membership degrees.
//!
//! ```
//! use fuzzy_matrix::{mandani, o, zadeh, FuzzyMatrix};
//!
//! let x = FuzzyMatrix::from_row(&[1., 0.7, 0.3, 0., 0.])?;
//! let y = FuzzyMatrix::from_row(&[0., 0., 0.4, 0.7, 1.])?;
//! let x1 = FuzzyMatrix::from_row(&[1., 0.6, 0.4, 0.2, 0.])?;
//!
//! assert_eq!(o(&x1, &mandani(&x, &y)?)?.value(), vec![vec![0.0, 0.0, 0.4, 0.7, 1.0]]);
//! assert_eq!(o(&x1, &zadeh(&x, &y)?)?.value(), vec![vec![0.4, 0.4, 0.4, 0.7, 1.0]]);
//! # Ok::<(), fuzzy_matrix::FuzzyError>(())
//! ```

mod error;
mod inference;
mod inputs;
mod matrix;
mod membership;
mod ops;
mod outputs;
mod rules;

pub use error::{ErrorKind, FuzzyError, Result};
pub use inference::{mandani, zadeh, ImplicationOp};
pub use inputs::{parse_matrix, parse_row, Prompter};
pub use matrix::{create, FuzzyMatrix};
pub use membership::ZeroOne;
pub use ops::{broadcast, composition, conjunction, disjunction, o, Connective};
pub use outputs::{print_matrix, Printer};
pub use rules::{Rule, RuleKey, Rules};
