//! The primitive operator signature table.
//!
//! Arithmetic, comparison, and boolean operators have fixed monomorphic
//! signatures. The generic operators (type predicates, `eq?`,
//! `display`) get a fresh type-variable name per occurrence so that two
//! independent call sites can never capture each other's placeholder.

use std::sync::atomic::{AtomicU32, Ordering};

use lattice_ast::Ty;

use crate::error::TypeError;

static NEXT_VAR: AtomicU32 = AtomicU32::new(0);

/// A type variable with a name no other occurrence shares.
fn fresh(prefix: &str) -> Ty {
    let n = NEXT_VAR.fetch_add(1, Ordering::Relaxed);
    Ty::var(format!("{prefix}{n}"))
}

/// The declared signature of a primitive operator.
///
/// Operators absent from the table fail with `UnknownPrimitive`.
pub fn prim_signature(op: &str) -> Result<Ty, TypeError> {
    let sig = match op {
        // ── Arithmetic: (number * number -> number) ──────────────────
        "+" | "-" | "*" | "/" => Ty::proc(vec![Ty::Num, Ty::Num], Ty::Num),

        // ── Comparison: (number * number -> boolean) ─────────────────
        "<" | ">" | "=" => Ty::proc(vec![Ty::Num, Ty::Num], Ty::Bool),

        // ── Boolean connectives ──────────────────────────────────────
        "and" | "or" => Ty::proc(vec![Ty::Bool, Ty::Bool], Ty::Bool),
        "not" => Ty::proc(vec![Ty::Bool], Ty::Bool),

        // ── Type predicates: generic over the tested value ───────────
        "number?" | "boolean?" | "string?" | "symbol?" | "list?" | "pair?" => {
            Ty::proc(vec![fresh("T")], Ty::Bool)
        }

        // ── Equality: each operand slot gets its own placeholder ─────
        "eq?" | "string=?" => Ty::proc(vec![fresh("T"), fresh("T")], Ty::Bool),

        // ── Output ───────────────────────────────────────────────────
        "display" => Ty::proc(vec![fresh("T")], Ty::Void),
        "newline" => Ty::proc(vec![], Ty::Void),

        _ => {
            return Err(TypeError::UnknownPrimitive {
                name: op.to_string(),
            })
        }
    };
    Ok(sig)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_signature() {
        assert_eq!(
            prim_signature("+"),
            Ok(Ty::proc(vec![Ty::Num, Ty::Num], Ty::Num))
        );
        assert_eq!(
            prim_signature("<"),
            Ok(Ty::proc(vec![Ty::Num, Ty::Num], Ty::Bool))
        );
    }

    #[test]
    fn predicate_signatures_are_fresh_per_occurrence() {
        let a = prim_signature("number?").unwrap();
        let b = prim_signature("number?").unwrap();
        // Same shape, distinct placeholder names.
        assert_ne!(a, b);
        match (a, b) {
            (Ty::Proc(pa, ra), Ty::Proc(pb, rb)) => {
                assert_eq!(pa.len(), 1);
                assert_eq!(pb.len(), 1);
                assert_eq!(*ra, Ty::Bool);
                assert_eq!(*rb, Ty::Bool);
            }
            other => panic!("expected procedure signatures, got {:?}", other),
        }
    }

    #[test]
    fn unknown_operator_is_rejected() {
        assert_eq!(
            prim_signature("car"),
            Err(TypeError::UnknownPrimitive { name: "car".into() })
        );
    }
}
