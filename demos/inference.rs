//! Builds the Mandani and Zadeh relations for one antecedent/consequent pair
//! and applies a new observation through both.
//!
//! Run with `RUST_LOG=trace` to see how the operands get broadcast.

use fuzzy_matrix::{o, FuzzyMatrix, ImplicationOp, Printer, Rules};
use tracing_subscriber::EnvFilter;

fn main() -> fuzzy_matrix::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let x = FuzzyMatrix::from_row(&[1., 0.7, 0.3, 0., 0.])?;
    let y = FuzzyMatrix::from_row(&[0., 0., 0.4, 0.7, 1.])?;
    let x1 = FuzzyMatrix::from_row(&[1., 0.6, 0.4, 0.2, 0.])?;

    let mut rules = Rules::new();
    let mandani = rules.add(x.clone(), y.clone(), ImplicationOp::Mandani)?;
    let zadeh = rules.add(x, y, ImplicationOp::Zadeh)?;

    let printer = Printer::default();
    let stdout = std::io::stdout();

    for key in [mandani, zadeh] {
        let relation = rules.relation(key).ok_or(fuzzy_matrix::FuzzyError::UnknownRule(key))?;

        printer.print(&o(&x1, relation)?, stdout.lock())?;
    }

    Ok(())
}
