//! Classifies free-text math queries and solves them step by step.
//!
//! A query is a short piece of text, typed or recognized from a photo of a worksheet, in Hebrew or
//! English. [`Solver::solve`] works out what kind of problem it describes and answers it with a
//! [`Solution`]: the recognized [`Kind`](solution::Kind), a machine-readable
//! [`Outcome`](solution::Outcome), the human-readable steps taken, and a one-line summary.
//!
//! The understood problems are:
//!
//! - linear and quadratic equations in `x`, such as `x^2 + 3x = 4`
//! - linear and quadratic inequalities in `x`, such as `x^2 - 5x + 6 >= 0`
//! - absolute values compared to a constant, such as `|x - 3| <= 2`
//! - systems of 2 or 3 linear equations in `x`, `y` and `z`, one per line or separated by `;`
//! - triangular numbers, arithmetic progressions and geometric progressions
//!
//! Anything else is answered with a [`NotSupported`](solution::Kind::NotSupported) solution that
//! explains what is understood.
//!
//! ```
//! use algebrist::{Solver, solution::Kind};
//!
//! let solver = Solver::new();
//! let solution = solver.solve("|x-3| <= 2").unwrap();
//! assert_eq!(solution.kind, Kind::AbsIneq);
//! assert_eq!(solution.pretty, "solution set: [1, 5]");
//! ```
//!
//! Algebra is delegated to a [`SymbolicService`](algebrist_symbolic::SymbolicService), which is
//! [`Engine`](algebrist_symbolic::Engine) unless another is given with [`Solver::with_service`].

pub mod absolute;
pub mod config;
pub mod dispatch;
pub mod equation;
pub mod error;
pub mod extract;
pub mod fmt;
pub mod inequality;
pub mod normalize;
pub mod sequence;
pub mod solution;

pub use dispatch::Solver;
pub use solution::Solution;

/// Sample queries, one for each kind of problem.
pub const EXAMPLES: &[&str] = &[
    // triangular numbers
    "סדרת נקודות שיוצרות משולשים. כמה נקודות יהיו באיבר ה-50?",
    "נוסחת האיבר הכללי בסדרה של משולשים הבנויים מנקודות",
    "האם 29 הוא איבר בסדרה של מספרים משולשיים?",
    "Is 28 a triangular number?",

    // arithmetic progressions
    "סדרה חשבונית a1=3 d=2 מצא a_10",
    "סדרה חשבונית a1=1 d=1 מצא סכום 50 איברים",
    "In an arithmetic sequence the first term is 5 and the common difference is -3. Find the sum of the first 10 terms.",

    // geometric progressions
    "סדרה הנדסית a1=2 r=3 מצא a_6",

    // equations and inequalities
    "x^2 + 3x = 4",
    "3(x+2) = 5x - 1",
    "x^2 - 5x + 6 >= 0",
    "|x-3| <= 2",
    "|x-3| = 2",

    // linear systems
    "2x + 3y = 7\n4x - y = 5",
    "x + y + z = 6\n2x - y + z = 3\n3x + 2y - z = 10",
];

#[cfg(test)]
mod tests {
    use crate::solution::Kind;
    use super::*;

    #[test]
    fn every_example_is_understood() {
        let solver = Solver::new();
        for example in EXAMPLES {
            let solution = solver.solve(example).unwrap();
            assert_ne!(solution.kind, Kind::NotSupported, "`{}` was not understood", example);
        }
    }
}
