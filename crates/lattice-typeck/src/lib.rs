//! Static type checker for the Lattice language.
//!
//! Lattice is a small, fully annotated Scheme-like language with
//! user-defined variant types (`define-type`) and a `type-case`
//! dispatch form. The checker decides whether a parsed program is
//! well-typed and computes the type of each expression; it never runs
//! anything, and every failure is a structured `TypeError` value.
//!
//! Acceptance is governed by a nominal subtype relation: every record
//! is a subtype of the user-defined types declaring it, `any` sits on
//! top, and `if` branches and `type-case` arms are unified through
//! their most specific common ancestor (the cover type).
//!
//! Entry points:
//! - [`type_of_program`] checks a whole program under the environment
//!   its declarations induce.
//! - [`type_of_exp`] checks one expression under an explicit
//!   environment, e.g. for a REPL typing expressions against an
//!   already-checked program.
//! - [`initial_env`] exposes that induced environment directly.

pub mod builtins;
pub mod check;
pub mod env;
pub mod error;
pub mod query;
pub mod subtype;
pub mod validate;

pub use check::{type_of_exp, type_of_exps, type_of_program};
pub use env::TypeEnv;
pub use error::TypeError;
pub use query::initial_env;
