//! Structural validation of user-defined types and `type-case` forms.
//!
//! Both checks are pure functions of the whole program: the checker
//! runs `check_user_defined_types` when it meets a `define-type` and
//! `check_type_case` as part of typing every `type-case`.

use rustc_hash::{FxHashMap, FxHashSet};

use lattice_ast::{Program, RecordDef, Ty, TypeCaseExp, UnionDef};

use crate::error::TypeError;
use crate::query;

/// Validate every `define-type` in the program.
///
/// A record name may be redeclared only if every redeclaration carries
/// a field list identical in name, order, and type to the first one.
/// Every user-defined type must have at least one record that does not
/// (transitively) recur back to it, otherwise the type has no value.
pub fn check_user_defined_types(p: &Program) -> Result<(), TypeError> {
    let mut first_seen: FxHashMap<&str, &RecordDef> = FxHashMap::default();
    for rec in query::records(p) {
        match first_seen.get(rec.name.as_str()) {
            Some(first) if !fields_agree(first, rec) => {
                return Err(TypeError::RecordMismatch {
                    name: rec.name.clone(),
                });
            }
            Some(_) => {}
            None => {
                first_seen.insert(&rec.name, rec);
            }
        }
    }

    for union in query::type_definitions(p) {
        if !has_base_case(union, p) {
            return Err(TypeError::NoBaseCase {
                type_name: union.name.clone(),
            });
        }
    }
    Ok(())
}

/// Validate the arms of one `type-case` expression: no record matched
/// twice, every matched record declared somewhere, and each arm binding
/// exactly as many variables as its record has fields.
pub fn check_type_case(tc: &TypeCaseExp, p: &Program) -> Result<(), TypeError> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for arm in &tc.arms {
        if !seen.insert(&arm.record_name) {
            return Err(TypeError::DuplicateCase {
                record_name: arm.record_name.clone(),
            });
        }
    }

    for arm in &tc.arms {
        let rec = query::record_by_name(&arm.record_name, p).map_err(|_| {
            TypeError::UnknownRecord {
                name: arm.record_name.clone(),
            }
        })?;
        if rec.fields.len() != arm.binders.len() {
            return Err(TypeError::ArityMismatch {
                at: arm.record_name.clone(),
            });
        }
    }
    Ok(())
}

fn fields_agree(a: &RecordDef, b: &RecordDef) -> bool {
    a.fields.len() == b.fields.len()
        && a.fields
            .iter()
            .zip(&b.fields)
            .all(|(fa, fb)| fa.name == fb.name && fa.ty == fb.ty)
}

/// Does some record of `union` terminate the recursion? A record counts
/// as a base case when none of its fields reach back to the union,
/// following by-name references through other declarations.
fn has_base_case(union: &UnionDef, p: &Program) -> bool {
    union.records.iter().any(|rec| {
        let mut visited = FxHashSet::default();
        !record_reaches(rec, &union.name, p, &mut visited)
    })
}

fn record_reaches(
    rec: &RecordDef,
    target: &str,
    p: &Program,
    visited: &mut FxHashSet<String>,
) -> bool {
    rec.fields
        .iter()
        .any(|f| ty_reaches(&f.ty, target, p, visited))
}

fn ty_reaches(
    ty: &Ty,
    target: &str,
    p: &Program,
    visited: &mut FxHashSet<String>,
) -> bool {
    match ty {
        Ty::Named(name) => {
            if name == target {
                return true;
            }
            if !visited.insert(name.clone()) {
                return false;
            }
            if let Ok(u) = query::union_by_name(name, p) {
                u.records
                    .iter()
                    .any(|r| record_reaches(r, target, p, visited))
            } else if let Ok(r) = query::record_by_name(name, p) {
                record_reaches(r, target, p, visited)
            } else {
                false
            }
        }
        Ty::Union(u) => {
            u.name == target
                || u.records
                    .iter()
                    .any(|r| record_reaches(r, target, p, visited))
        }
        Ty::Record(r) => r.name == target || record_reaches(r, target, p, visited),
        Ty::Proc(params, ret) => {
            params.iter().any(|t| ty_reaches(t, target, p, visited))
                || ty_reaches(ret, target, p, visited)
        }
        _ => false,
    }
}
