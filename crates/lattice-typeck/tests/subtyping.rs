//! Tests for the nominal subtype relation and the cover-type engine.
//!
//! These exercise:
//! - Parent closures for atomic, procedure, record, and named types
//! - `is_subtype` over the record/union hierarchy and `any`
//! - Cover computation (set intersection of parent lists)
//! - Most-specific-type selection and the join operator

use lattice_ast::{Exp, FieldDef, Program, RecordDef, Ty, UnionDef};
use lattice_typeck::subtype::{
    check_compatible, check_cover_type, cover_types, is_subtype, most_specific_type,
    parents_of,
};
use lattice_typeck::TypeError;

/// `(define-type Shape (Circle (r : number)) (Square (s : number)))`
fn shape_program() -> Program {
    Program::new(vec![Exp::DefineType(UnionDef::new(
        "Shape",
        vec![
            RecordDef::new("Circle", vec![FieldDef::new("r", Ty::Num)]),
            RecordDef::new("Square", vec![FieldDef::new("s", Ty::Num)]),
        ],
    ))])
}

#[test]
fn atomic_and_proc_types_are_their_own_only_parent() {
    let p = Program::default();
    assert_eq!(parents_of(&Ty::Num, &p), vec![Ty::Num]);
    assert_eq!(parents_of(&Ty::Any, &p), vec![Ty::Any]);
    let proc = Ty::proc(vec![Ty::Num], Ty::Bool);
    assert_eq!(parents_of(&proc, &p), vec![proc.clone()]);
}

#[test]
fn record_parents_include_every_declaring_union() {
    let p = shape_program();
    assert_eq!(
        parents_of(&Ty::named("Circle"), &p),
        vec![Ty::named("Circle"), Ty::named("Shape")]
    );
    assert_eq!(parents_of(&Ty::named("Shape"), &p), vec![Ty::named("Shape")]);
}

#[test]
fn record_shared_by_two_unions_has_both_as_parents() {
    let dot = RecordDef::new("Dot", vec![]);
    let p = Program::new(vec![
        Exp::DefineType(UnionDef::new("Mark", vec![dot.clone()])),
        Exp::DefineType(UnionDef::new("Glyph", vec![dot])),
    ]);
    assert_eq!(
        parents_of(&Ty::named("Dot"), &p),
        vec![Ty::named("Dot"), Ty::named("Mark"), Ty::named("Glyph")]
    );
}

#[test]
fn unresolved_names_have_no_parents() {
    let p = shape_program();
    assert!(parents_of(&Ty::named("Triangle"), &p).is_empty());
}

#[test]
fn every_record_is_a_subtype_of_its_union() {
    let p = shape_program();
    assert!(is_subtype(&Ty::named("Circle"), &Ty::named("Shape"), &p));
    assert!(is_subtype(&Ty::named("Square"), &Ty::named("Shape"), &p));
    // Not the other way around.
    assert!(!is_subtype(&Ty::named("Shape"), &Ty::named("Circle"), &p));
    // Sibling records are unrelated.
    assert!(!is_subtype(&Ty::named("Circle"), &Ty::named("Square"), &p));
}

#[test]
fn full_declarations_compare_like_their_names() {
    let p = shape_program();
    let circle = RecordDef::new("Circle", vec![FieldDef::new("r", Ty::Num)]);
    assert!(is_subtype(&Ty::Record(circle), &Ty::named("Shape"), &p));
}

#[test]
fn everything_is_a_subtype_of_any() {
    let p = shape_program();
    for ty in [
        Ty::Num,
        Ty::Bool,
        Ty::Str,
        Ty::Void,
        Ty::Lit,
        Ty::named("Shape"),
        Ty::named("Circle"),
        Ty::proc(vec![Ty::Num], Ty::Num),
        Ty::var("T"),
    ] {
        assert!(is_subtype(&ty, &Ty::Any, &p), "{} should flow to any", ty);
    }
}

#[test]
fn type_variables_are_subtypes_only_of_themselves() {
    let p = Program::default();
    assert!(is_subtype(&Ty::var("T"), &Ty::var("T"), &p));
    assert!(!is_subtype(&Ty::var("T1"), &Ty::var("T2"), &p));
    assert!(!is_subtype(&Ty::Num, &Ty::var("T"), &p));
}

#[test]
fn cover_of_sibling_records_is_their_union() {
    let p = shape_program();
    let cover = cover_types(&[Ty::named("Circle"), Ty::named("Square")], &p);
    assert_eq!(cover, vec![Ty::named("Shape")]);
}

#[test]
fn cover_of_disjoint_types_is_empty() {
    let p = shape_program();
    assert!(cover_types(&[Ty::Num, Ty::Str], &p).is_empty());
    assert!(cover_types(&[Ty::named("Circle"), Ty::Num], &p).is_empty());
}

#[test]
fn most_specific_type_prefers_records_over_unions() {
    let p = shape_program();
    let picked = most_specific_type(
        &[Ty::named("Shape"), Ty::named("Circle")],
        &p,
    );
    assert_eq!(picked, Ty::named("Circle"));
}

#[test]
fn most_specific_type_keeps_first_candidate_on_ties() {
    let p = shape_program();
    // Circle and Square are both subtypes of the running choice at the
    // moment they are visited; the earlier one wins.
    let picked = most_specific_type(
        &[Ty::named("Circle"), Ty::named("Square"), Ty::named("Shape")],
        &p,
    );
    assert_eq!(picked, Ty::named("Circle"));
}

#[test]
fn most_specific_type_defaults_to_any() {
    let p = Program::default();
    assert_eq!(most_specific_type(&[], &p), Ty::Any);
}

#[test]
fn check_cover_type_joins_or_fails() {
    let p = shape_program();
    assert_eq!(
        check_cover_type(&[Ty::named("Circle"), Ty::named("Square")], &p),
        Ok(Ty::named("Shape"))
    );
    assert_eq!(check_cover_type(&[Ty::Num, Ty::Num], &p), Ok(Ty::Num));
    assert_eq!(
        check_cover_type(&[Ty::Num, Ty::Str], &p),
        Err(TypeError::NoCommonType {
            types: vec![Ty::Num, Ty::Str]
        })
    );
}

#[test]
fn check_compatible_accepts_equal_subtype_and_any() {
    let p = shape_program();
    let at = Exp::var("x");
    assert_eq!(check_compatible(&Ty::Num, &Ty::Num, &at, &p), Ok(Ty::Num));
    assert_eq!(
        check_compatible(&Ty::named("Circle"), &Ty::named("Shape"), &at, &p),
        Ok(Ty::named("Shape"))
    );
    assert_eq!(check_compatible(&Ty::Str, &Ty::Any, &at, &p), Ok(Ty::Any));
}

#[test]
fn check_compatible_reports_the_offending_expression() {
    let p = shape_program();
    let at = Exp::app(Exp::prim("+"), vec![Exp::num(1.0), Exp::Bool(true)]);
    assert_eq!(
        check_compatible(&Ty::Bool, &Ty::Num, &at, &p),
        Err(TypeError::IncompatibleTypes {
            computed: Ty::Bool,
            expected: Ty::Num,
            at: "(+ 1 #t)".into(),
        })
    );
}
