//! The nominal subtype relation and the cover-type (least common
//! ancestor) engine.
//!
//! User-defined types form a two-level hierarchy: every record is a
//! subtype of each user-defined type that declares it as a case, and
//! `any` sits above everything. `check_cover_type` is the join operator
//! the checker uses to unify `if` branches and `type-case` arm results.

use lattice_ast::{Exp, Program, Ty};

use crate::error::TypeError;
use crate::query;

/// Reduce a full declaration to the by-name reference used for nominal
/// comparison. Other types pass through unchanged.
fn by_name(ty: &Ty) -> Ty {
    match ty {
        Ty::Union(u) => Ty::named(&u.name),
        Ty::Record(r) => Ty::named(&r.name),
        _ => ty.clone(),
    }
}

/// Is `a` a subtype of `b`?
///
/// True when `b` is `any`; when both are references to the same named
/// type; when `b`'s name appears in `a`'s ancestor closure; when both
/// are the identical type variable; or when both dereference to the
/// same atomic type. The relation is strictly nominal: procedure types
/// are only their own subtype, and there is no variance anywhere.
pub fn is_subtype(a: &Ty, b: &Ty, p: &Program) -> bool {
    let a = by_name(a);
    let b = by_name(b);
    match (&a, &b) {
        (_, Ty::Any) => true,
        (Ty::Named(na), Ty::Named(nb)) => {
            na == nb
                || parents_of(&a, p)
                    .iter()
                    .any(|t| t.type_name() == Some(nb.as_str()))
        }
        (Ty::Var(va), Ty::Var(vb)) => va == vb,
        _ => {
            let da = a.deref();
            let db = b.deref();
            da.is_atomic() && da == db
        }
    }
}

/// `ty` together with its ancestors in the type hierarchy, as by-name
/// references where the hierarchy is involved.
///
/// Atomic and procedure types are their own only parent. A record's
/// parents are itself plus every user-defined type declaring it. A
/// name that resolves to nothing (and `literal`/type variables, which
/// sit outside the hierarchy) has no parents at all.
pub fn parents_of(ty: &Ty, p: &Program) -> Vec<Ty> {
    match ty {
        Ty::Num | Ty::Bool | Ty::Str | Ty::Void | Ty::Any => vec![ty.clone()],
        Ty::Proc(..) => vec![ty.clone()],
        Ty::Union(_) => vec![ty.clone()],
        Ty::Record(r) => parents_of(&Ty::named(&r.name), p),
        Ty::Named(name) => {
            if let Ok(u) = query::union_by_name(name, p) {
                vec![Ty::named(&u.name)]
            } else if let Ok(rec) = query::record_by_name(name, p) {
                let mut parents = vec![Ty::named(&rec.name)];
                parents.extend(
                    query::record_parents(&rec.name, p)
                        .into_iter()
                        .map(|u| Ty::named(&u.name)),
                );
                parents
            } else {
                Vec::new()
            }
        }
        Ty::Lit | Ty::Var(_) => Vec::new(),
    }
}

/// The set of common ancestors of all given types: the intersection of
/// their parent lists, preserving the first list's order.
pub fn cover_types(types: &[Ty], p: &Program) -> Vec<Ty> {
    let mut lists = types.iter().map(|t| parents_of(t, p));
    let Some(first) = lists.next() else {
        return Vec::new();
    };
    lists.fold(first, |acc, next| {
        acc.into_iter().filter(|t| next.contains(t)).collect()
    })
}

/// The most specific candidate: fold from `any`, replacing the running
/// choice whenever a candidate is its subtype. First-found wins on
/// ties, so the input is treated as a sequence, not a set.
pub fn most_specific_type(types: &[Ty], p: &Program) -> Ty {
    types.iter().fold(Ty::Any, |min, t| {
        if is_subtype(t, &min, p) {
            t.clone()
        } else {
            min
        }
    })
}

/// The join operator: fail if the types share no ancestor, otherwise
/// produce the most specific common one.
pub fn check_cover_type(types: &[Ty], p: &Program) -> Result<Ty, TypeError> {
    let cover = cover_types(types, p);
    if cover.is_empty() {
        return Err(TypeError::NoCommonType {
            types: types.to_vec(),
        });
    }
    Ok(most_specific_type(&cover, p))
}

/// Can a value of type `computed` be used where `expected` is declared?
///
/// Accepts when `expected` is `any`, on structural equality, or when
/// `computed` is a nominal subtype of `expected`. Every typing rule
/// funnels its acceptance decisions through here; `at` is the
/// expression reported on failure.
pub fn check_compatible(
    computed: &Ty,
    expected: &Ty,
    at: &Exp,
    p: &Program,
) -> Result<Ty, TypeError> {
    if matches!(expected, Ty::Any) || computed == expected || is_subtype(computed, expected, p) {
        Ok(expected.clone())
    } else {
        Err(TypeError::IncompatibleTypes {
            computed: computed.clone(),
            expected: expected.clone(),
            at: at.to_string(),
        })
    }
}
