//! Type expressions for the Lattice type system.
//!
//! Defines the closed `Ty` enum covering atomic types, procedure types,
//! placeholder type variables, and user-defined variant types with their
//! records. The checker compares these structurally; there is no
//! unification or substitution store anywhere in the model.

use std::fmt;

use serde::Serialize;

/// A placeholder type variable, identified purely by name.
///
/// Type variables appear only in the signatures of generic built-in
/// operators (e.g. `number?`), where each occurrence gets a fresh name so
/// that independent call sites cannot capture each other. Two variables
/// are equal iff their names are equal; an unbound variable dereferences
/// to itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TyVar {
    pub name: String,
}

impl TyVar {
    pub fn new(name: impl Into<String>) -> Self {
        TyVar { name: name.into() }
    }
}

impl fmt::Display for TyVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One field of a record: a name and its declared type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: Ty,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        FieldDef { name: name.into(), ty }
    }
}

/// One named variant case of a user-defined type, with an ordered field
/// list. Record names live in the same global namespace as type names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl RecordDef {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        RecordDef { name: name.into(), fields }
    }
}

/// A user-defined variant type: a nominal name owning an ordered set of
/// record cases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnionDef {
    pub name: String,
    pub records: Vec<RecordDef>,
}

impl UnionDef {
    pub fn new(name: impl Into<String>, records: Vec<RecordDef>) -> Self {
        UnionDef { name: name.into(), records }
    }
}

/// A Lattice type expression.
///
/// The set is closed: every consumption site dispatches exhaustively so
/// adding a kind is a compile-time obligation.
///
/// - `Num`/`Bool`/`Str`/`Void`: atomic types
/// - `Any`: the universal supertype
/// - `Lit`: the opaque type of quoted data
/// - `Var`: a named placeholder (built-in operator signatures only)
/// - `Proc`: a procedure type `(params -> return)`
/// - `Named`: a reference to a user-defined type or record by name,
///   resolved against the program on demand (defers cyclic lookups)
/// - `Union`/`Record`: full declarations, as written in `define-type`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Ty {
    Num,
    Bool,
    Str,
    Void,
    Any,
    Lit,
    Var(TyVar),
    Proc(Vec<Ty>, Box<Ty>),
    Named(String),
    Union(UnionDef),
    Record(RecordDef),
}

impl Ty {
    /// Create a procedure type.
    pub fn proc(params: Vec<Ty>, ret: Ty) -> Ty {
        Ty::Proc(params, Box::new(ret))
    }

    /// Create a by-name reference to a user-defined type or record.
    pub fn named(name: impl Into<String>) -> Ty {
        Ty::Named(name.into())
    }

    /// Create a fresh-by-name type variable.
    pub fn var(name: impl Into<String>) -> Ty {
        Ty::Var(TyVar::new(name))
    }

    /// True for the payload-free atomic types.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Ty::Num | Ty::Bool | Ty::Str | Ty::Void | Ty::Any)
    }

    /// Dereference a type variable.
    ///
    /// The model carries no substitution store, so an unbound variable
    /// (the only kind there is) dereferences to itself and every other
    /// type is already its own referent.
    pub fn deref(&self) -> &Ty {
        self
    }

    /// The nominal name of a named, union, or record type, if it has one.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Ty::Named(n) => Some(n),
            Ty::Union(u) => Some(&u.name),
            Ty::Record(r) => Some(&r.name),
            _ => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Num => write!(f, "number"),
            Ty::Bool => write!(f, "boolean"),
            Ty::Str => write!(f, "string"),
            Ty::Void => write!(f, "void"),
            Ty::Any => write!(f, "any"),
            Ty::Lit => write!(f, "literal"),
            Ty::Var(v) => write!(f, "{}", v),
            Ty::Proc(params, ret) => {
                write!(f, "(")?;
                if params.is_empty() {
                    write!(f, "Empty")?;
                } else {
                    for (i, p) in params.iter().enumerate() {
                        if i > 0 {
                            write!(f, " * ")?;
                        }
                        write!(f, "{}", p)?;
                    }
                }
                write!(f, " -> {})", ret)
            }
            Ty::Named(n) => write!(f, "{}", n),
            Ty::Union(u) => write!(f, "{}", u.name),
            Ty::Record(r) => write!(f, "{}", r.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_display() {
        assert_eq!(Ty::Num.to_string(), "number");
        assert_eq!(Ty::Bool.to_string(), "boolean");
        assert_eq!(Ty::Str.to_string(), "string");
        assert_eq!(Ty::Void.to_string(), "void");
        assert_eq!(Ty::Any.to_string(), "any");
        assert_eq!(Ty::Lit.to_string(), "literal");
    }

    #[test]
    fn proc_display() {
        let two = Ty::proc(vec![Ty::Num, Ty::Num], Ty::Bool);
        assert_eq!(two.to_string(), "(number * number -> boolean)");

        let thunk = Ty::proc(vec![], Ty::Void);
        assert_eq!(thunk.to_string(), "(Empty -> void)");
    }

    #[test]
    fn tyvar_equality_is_by_name() {
        assert_eq!(Ty::var("T"), Ty::var("T"));
        assert_ne!(Ty::var("T1"), Ty::var("T2"));
    }

    #[test]
    fn deref_is_identity() {
        let v = Ty::var("T");
        assert_eq!(v.deref(), &v);
        assert_eq!(Ty::Num.deref(), &Ty::Num);
    }
}
