//! Read-only queries over a parsed program.
//!
//! A `Program` is an ordered sequence of top-level expressions; the
//! checker repeatedly needs its `define`s, its `define-type`
//! declarations, and the records those declarations own. The queries
//! here are pure traversals that preserve declaration order, plus the
//! construction of the initial type environment a program induces.

use lattice_ast::{DefineExp, Exp, Program, RecordDef, Ty, UnionDef};

use crate::env::TypeEnv;
use crate::error::TypeError;

/// Anything addressable by its declared type name.
pub trait Named {
    fn type_name(&self) -> &str;
}

impl Named for UnionDef {
    fn type_name(&self) -> &str {
        &self.name
    }
}

impl Named for RecordDef {
    fn type_name(&self) -> &str {
        &self.name
    }
}

/// All top-level `define` forms, in order.
pub fn definitions(p: &Program) -> Vec<&DefineExp> {
    p.exps
        .iter()
        .filter_map(|e| match e {
            Exp::Define(d) => Some(d.as_ref()),
            _ => None,
        })
        .collect()
}

/// All top-level `define-type` declarations, in order.
pub fn type_definitions(p: &Program) -> Vec<&UnionDef> {
    p.exps
        .iter()
        .filter_map(|e| match e {
            Exp::DefineType(u) => Some(u),
            _ => None,
        })
        .collect()
}

/// Every record across every declaration, flattened in declaration
/// order (then within-declaration case order).
pub fn records(p: &Program) -> Vec<&RecordDef> {
    type_definitions(p)
        .into_iter()
        .flat_map(|u| u.records.iter())
        .collect()
}

/// Linear search by type name; the caller picks which item kind to
/// search by passing the matching iterator.
pub fn find_by_name<'a, T, I>(name: &str, items: I) -> Result<&'a T, TypeError>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .find(|item| item.type_name() == name)
        .ok_or_else(|| TypeError::NotFound {
            name: name.to_string(),
        })
}

/// The user-defined type declared under `name`, if any.
pub fn union_by_name<'a>(name: &str, p: &'a Program) -> Result<&'a UnionDef, TypeError> {
    find_by_name(name, type_definitions(p))
}

/// The record declared under `name`, if any.
pub fn record_by_name<'a>(name: &str, p: &'a Program) -> Result<&'a RecordDef, TypeError> {
    find_by_name(name, records(p))
}

/// Every user-defined type that declares a record named `record_name`
/// as one of its cases.
pub fn record_parents<'a>(record_name: &str, p: &'a Program) -> Vec<&'a UnionDef> {
    type_definitions(p)
        .into_iter()
        .filter(|u| u.records.iter().any(|r| r.name == record_name))
        .collect()
}

/// Resolve a name to the user-defined type or record it declares,
/// trying types first, then records.
pub fn type_by_name(name: &str, p: &Program) -> Result<Ty, TypeError> {
    match union_by_name(name, p) {
        Ok(u) => Ok(Ty::Union(u.clone())),
        Err(_) => record_by_name(name, p).map(|r| Ty::Record(r.clone())),
    }
}

/// Build the initial type environment a program induces.
///
/// One batch extension over the empty environment containing, in order:
/// the declared type of every global `define`; for each user-defined
/// type, its own name (usable as a dispatch target) and its implicit
/// predicate `<name>?`; for each record, its own name, its predicate
/// `<name>?`, and its constructor `make-<name>` taking the fields in
/// declared order.
pub fn initial_env(p: &Program) -> TypeEnv {
    let any_pred = || Ty::proc(vec![Ty::Any], Ty::Bool);
    let mut bindings: Vec<(String, Ty)> = Vec::new();

    for def in definitions(p) {
        bindings.push((def.var.name.clone(), def.var.ty.clone()));
    }

    let unions = type_definitions(p);
    for u in &unions {
        bindings.push((u.name.clone(), Ty::named(&u.name)));
    }
    for u in &unions {
        bindings.push((format!("{}?", u.name), any_pred()));
    }

    let recs = records(p);
    for r in &recs {
        bindings.push((r.name.clone(), Ty::named(&r.name)));
    }
    for r in &recs {
        bindings.push((format!("{}?", r.name), any_pred()));
    }
    for r in &recs {
        bindings.push((
            format!("make-{}", r.name),
            Ty::proc(
                r.fields.iter().map(|f| f.ty.clone()).collect(),
                Ty::named(&r.name),
            ),
        ));
    }

    TypeEnv::empty().extend(bindings)
}
