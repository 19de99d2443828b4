//! Tokenizer and parser for the arithmetic expressions that appear in algebrist queries.
//!
//! The grammar is small: numbers, single- or multi-letter names, the binary operators `+`, `-`,
//! `*`, `/` and `^`, unary negation, parentheses, and implicit multiplication (`2x`, `3(x + 1)`).
//! Comparison operators and `=` are tokenized, but never parsed into an expression; callers split
//! equations and inequalities into their sides before parsing each side.

pub mod parser;
pub mod tokenizer;
