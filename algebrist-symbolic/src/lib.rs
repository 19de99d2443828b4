//! Algebraic manipulation of polynomial expressions.
//!
//! # Expression representation
//!
//! Expressions are represented as a tree of [`SymExpr`] nodes. It's similar to the
//! [`Expr`](algebrist_parser::parser::expr::Expr) nodes produced by `algebrist_parser`, with the
//! main difference being that [`SymExpr`] nodes **flatten** out the tree structure: `x + (y + z)`
//! is a single [`SymExpr::Add`] node with _three_ children.
//!
//! This makes it easy to combine like terms (`x + x = 2x`), since the terms in question are all at
//! the same level of the tree.
//!
//! # Operations
//!
//! - [`simplify()`] expands an expression into a canonical sum of terms with exact coefficients.
//! - [`derivative::derivative`] differentiates with respect to one variable.
//! - [`eval::evaluate`] computes a numeric value under a variable binding.
//! - [`linear::solve_linear`] solves a dense square linear system.
//!
//! The [`SymbolicService`] trait bundles these behind a string interface, implemented by
//! [`Engine`]:
//!
//! ```
//! use algebrist_symbolic::{Engine, SymbolicService};
//!
//! let f = Engine.simplify("(x - 2)(x - 3)").unwrap();
//! assert_eq!(f, "x^2 - 5x + 6");
//! assert_eq!(Engine.evaluate(&f, &[("x", 2.0)]).unwrap(), 0.0);
//! ```

pub mod derivative;
pub mod error;
pub mod eval;
pub mod expr;
pub mod linear;
pub mod primitive;
pub mod service;
pub mod simplify;
pub mod step_collector;

pub use expr::SymExpr;
pub use service::{Engine, SymbolicService};
pub use simplify::{simplify, simplify_with};
pub use step_collector::StepCollector;
