//! Type checker failures.
//!
//! Every failure is a value: checking returns `Result<Ty, TypeError>`
//! and the first error anywhere in a subtree short-circuits the whole
//! check. Variants that point at a concrete expression carry its
//! rendered s-expression form (`at`), since the AST holds no source
//! spans.

use std::fmt;

use serde::Serialize;

use lattice_ast::Ty;

/// A type error encountered during checking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TypeError {
    /// A variable is referenced but bound in no environment frame.
    UnboundVariable { name: String },
    /// An operator is absent from the primitive signature table.
    UnknownPrimitive { name: String },
    /// The computed type of an expression cannot be accepted where the
    /// declared type is expected.
    IncompatibleTypes {
        computed: Ty,
        expected: Ty,
        at: String,
    },
    /// The operator of an application did not type to a procedure.
    NotAProcedure { ty: Ty, at: String },
    /// Argument count differs from parameter count, or a `type-case`
    /// arm binds a different number of variables than its record has
    /// fields (`at` names the record in that case).
    ArityMismatch { at: String },
    /// Branch/arm result types share no common ancestor.
    NoCommonType { types: Vec<Ty> },
    /// A record was redeclared with a diverging field list.
    RecordMismatch { name: String },
    /// A user-defined type has no reachable base case.
    NoBaseCase { type_name: String },
    /// Two `type-case` arms name the same record.
    DuplicateCase { record_name: String },
    /// A `type-case` arm names a record no `define-type` declares.
    UnknownRecord { name: String },
    /// `letrec` may only bind procedure literals.
    LetrecRequiresProcedures { at: String },
    /// A by-name lookup over the program's declarations missed.
    NotFound { name: String },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UnboundVariable { name } => {
                write!(f, "unbound variable `{}`", name)
            }
            TypeError::UnknownPrimitive { name } => {
                write!(f, "unknown primitive operator `{}`", name)
            }
            TypeError::IncompatibleTypes {
                computed,
                expected,
                at,
            } => {
                write!(
                    f,
                    "incompatible types: computed `{}`, expected `{}` in {}",
                    computed, expected, at
                )
            }
            TypeError::NotAProcedure { ty, at } => {
                write!(f, "application of non-procedure `{}` in {}", ty, at)
            }
            TypeError::ArityMismatch { at } => {
                write!(f, "wrong number of arguments in {}", at)
            }
            TypeError::NoCommonType { types } => {
                write!(f, "no type covers")?;
                for t in types {
                    write!(f, " `{}`", t)?;
                }
                Ok(())
            }
            TypeError::RecordMismatch { name } => {
                write!(
                    f,
                    "record `{}` redeclared with a different field list",
                    name
                )
            }
            TypeError::NoBaseCase { type_name } => {
                write!(f, "user-defined type `{}` has no base case", type_name)
            }
            TypeError::DuplicateCase { record_name } => {
                write!(
                    f,
                    "more than one type-case clause for record `{}`",
                    record_name
                )
            }
            TypeError::UnknownRecord { name } => {
                write!(f, "record `{}` is not declared by any define-type", name)
            }
            TypeError::LetrecRequiresProcedures { at } => {
                write!(f, "letrec only supports binding procedures in {}", at)
            }
            TypeError::NotFound { name } => {
                write!(f, "{} not found", name)
            }
        }
    }
}

impl std::error::Error for TypeError {}
