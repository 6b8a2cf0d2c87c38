//! AST and type-expression model for the Lattice language.
//!
//! The Lattice frontend (outside this workspace) parses concrete
//! s-expression syntax into the `Program`/`Exp` values defined here;
//! `lattice-typeck` consumes them read-only. The `Display` impls render
//! nodes and types back to concrete syntax for error messages.

pub mod exp;
pub mod ty;

pub use exp::{
    AppExp, Binding, CaseArm, Datum, DefineExp, Exp, IfExp, LetExp, ProcExp,
    Program, SetExp, TypeCaseExp, VarDecl,
};
pub use ty::{FieldDef, RecordDef, Ty, TyVar, UnionDef};
