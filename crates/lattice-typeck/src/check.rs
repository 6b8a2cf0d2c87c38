//! The recursive expression type checker.
//!
//! One function, `type_of_exp`, dispatches exhaustively on the
//! syntactic variant of the expression and computes its type or the
//! first failure in any sub-expression. Nothing here mutates shared
//! state: environments grow by pure extension and are dropped on
//! return, so checking the same expression twice yields the same
//! result.

use lattice_ast::{
    AppExp, CaseArm, DefineExp, Exp, IfExp, LetExp, ProcExp, Program, SetExp,
    Ty, TypeCaseExp, VarDecl,
};

use crate::builtins;
use crate::env::TypeEnv;
use crate::error::TypeError;
use crate::query;
use crate::subtype;
use crate::validate;

/// Compute the type of a whole program: build the initial environment
/// (globals plus the bindings every `define-type` induces) and type the
/// top-level sequence. The program's type is its last expression's.
///
/// An empty program is a caller precondition violation.
pub fn type_of_program(p: &Program) -> Result<Ty, TypeError> {
    type_of_exps(&p.exps, &query::initial_env(p), p)
}

/// Compute the type of one expression under an environment, in the
/// context of the program whose declarations resolve named types.
pub fn type_of_exp(exp: &Exp, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    match exp {
        Exp::Num(_) => Ok(Ty::Num),
        Exp::Bool(_) => Ok(Ty::Bool),
        Exp::Str(_) => Ok(Ty::Str),
        Exp::Lit(_) => Ok(Ty::Lit),
        Exp::Prim(op) => builtins::prim_signature(op),
        Exp::Var(name) => env.lookup(name),
        Exp::If(e) => type_of_if(e, exp, env, p),
        Exp::Proc(e) => type_of_proc(e, exp, env, p),
        Exp::App(e) => type_of_app(e, exp, env, p),
        Exp::Let(e) => type_of_let(e, exp, env, p),
        Exp::Letrec(e) => type_of_letrec(e, exp, env, p),
        Exp::Define(e) => type_of_define(e, exp, env, p),
        Exp::DefineType(_) => {
            validate::check_user_defined_types(p)?;
            Ok(Ty::Void)
        }
        Exp::Set(e) => type_of_set(e, env, p),
        Exp::TypeCase(e) => type_of_type_case(e, env, p),
    }
}

/// Type every expression of a body sequence; the sequence's type is the
/// last member's. Sequences are never empty (caller precondition).
pub fn type_of_exps(exps: &[Exp], env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    debug_assert!(!exps.is_empty(), "expression sequences are never empty");
    let mut last = Ty::Void;
    for e in exps {
        last = type_of_exp(e, env, p)?;
    }
    Ok(last)
}

fn param_bindings(params: &[VarDecl]) -> Vec<(String, Ty)> {
    params
        .iter()
        .map(|vd| (vd.name.clone(), vd.ty.clone()))
        .collect()
}

/// The test must be boolean; equal branch types pass through, otherwise
/// the branches are joined via their most specific common ancestor.
fn type_of_if(e: &IfExp, at: &Exp, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    let test_ty = type_of_exp(&e.test, env, p)?;
    subtype::check_compatible(&test_ty, &Ty::Bool, at, p)?;
    let then_ty = type_of_exp(&e.then, env, p)?;
    let alt_ty = type_of_exp(&e.alt, env, p)?;
    match subtype::check_compatible(&then_ty, &alt_ty, at, p) {
        Ok(t) => Ok(t),
        Err(_) => subtype::check_cover_type(&[then_ty, alt_ty], p),
    }
}

/// The body is typed with the parameters bound; its type must be
/// acceptable as the declared return type.
fn type_of_proc(e: &ProcExp, at: &Exp, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    let param_tys: Vec<Ty> = e.params.iter().map(|vd| vd.ty.clone()).collect();
    let body_env = env.extend(param_bindings(&e.params));
    let body_ty = type_of_exps(&e.body, &body_env, p)?;
    let ret = subtype::check_compatible(&body_ty, &e.return_ty, at, p)?;
    Ok(Ty::Proc(param_tys, Box::new(ret)))
}

/// The operator must type to a procedure, the argument count must match
/// its parameter count, and each argument must be acceptable at its
/// parameter's declared type (left to right, first mismatch reported).
fn type_of_app(e: &AppExp, at: &Exp, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    let (param_tys, ret) = match type_of_exp(&e.rator, env, p)? {
        Ty::Proc(params, ret) => (params, ret),
        other => {
            return Err(TypeError::NotAProcedure {
                ty: other,
                at: at.to_string(),
            })
        }
    };
    if e.rands.len() != param_tys.len() {
        return Err(TypeError::ArityMismatch { at: at.to_string() });
    }
    for (rand, param_ty) in e.rands.iter().zip(&param_tys) {
        let rand_ty = type_of_exp(rand, env, p)?;
        subtype::check_compatible(&rand_ty, param_ty, at, p)?;
    }
    Ok(*ret)
}

/// Binding values are typed against the ambient environment (bindings
/// are non-recursive and cannot see each other); the body sees all of
/// them at once.
fn type_of_let(e: &LetExp, at: &Exp, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    for b in &e.bindings {
        let val_ty = type_of_exp(&b.val, env, p)?;
        subtype::check_compatible(&val_ty, &b.var.ty, at, p)?;
    }
    let body_env = env.extend(
        e.bindings
            .iter()
            .map(|b| (b.var.name.clone(), b.var.ty.clone()))
            .collect(),
    );
    type_of_exps(&e.body, &body_env, p)
}

/// `letrec` binds procedure literals only. All headers are bound first
/// (mutual recursion), then each body is checked with its own
/// parameters also in scope, and the `letrec` body is typed against the
/// header-only environment.
fn type_of_letrec(e: &LetExp, at: &Exp, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    let mut procs: Vec<(&VarDecl, &ProcExp)> = Vec::with_capacity(e.bindings.len());
    for b in &e.bindings {
        match &b.val {
            Exp::Proc(pe) => procs.push((&b.var, pe)),
            _ => {
                return Err(TypeError::LetrecRequiresProcedures {
                    at: at.to_string(),
                })
            }
        }
    }

    let header_env = env.extend(
        procs
            .iter()
            .map(|(var, pe)| {
                let header = Ty::proc(
                    pe.params.iter().map(|vd| vd.ty.clone()).collect(),
                    pe.return_ty.clone(),
                );
                (var.name.clone(), header)
            })
            .collect(),
    );

    for (_, pe) in &procs {
        let body_env = header_env.extend(param_bindings(&pe.params));
        let body_ty = type_of_exps(&pe.body, &body_env, p)?;
        subtype::check_compatible(&body_ty, &pe.return_ty, at, p)?;
    }

    type_of_exps(&e.body, &header_env, p)
}

/// The value is typed with the defined name already bound to its
/// declared type, so recursive definitions can reference themselves.
/// A `define` itself has type `void`.
fn type_of_define(
    e: &DefineExp,
    at: &Exp,
    env: &TypeEnv,
    p: &Program,
) -> Result<Ty, TypeError> {
    let def_env = env.extend(vec![(e.var.name.clone(), e.var.ty.clone())]);
    let val_ty = type_of_exp(&e.val, &def_env, p)?;
    subtype::check_compatible(&val_ty, &e.var.ty, at, p)?;
    Ok(Ty::Void)
}

/// The assigned value is typed, and the target variable must already be
/// bound (the binding is consulted for validation only). The result is
/// a type variable named after the target rather than `void`.
fn type_of_set(e: &SetExp, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    type_of_exp(&e.val, env, p)?;
    env.lookup(&e.name)?;
    Ok(Ty::var(e.name.clone()))
}

/// Resolve the arm's record, bind its fields to the arm's pattern
/// variables, and type the arm body.
fn type_of_case_arm(arm: &CaseArm, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    let rec = query::record_by_name(&arm.record_name, p).map_err(|_| {
        TypeError::UnknownRecord {
            name: arm.record_name.clone(),
        }
    })?;
    let arm_env = env.extend(
        arm.binders
            .iter()
            .cloned()
            .zip(rec.fields.iter().map(|f| f.ty.clone()))
            .collect(),
    );
    type_of_exps(&arm.body, &arm_env, p)
}

/// Validate the arm set (duplicates, unknown records, binder arity),
/// type every arm, and join the arm result types via the cover engine.
fn type_of_type_case(e: &TypeCaseExp, env: &TypeEnv, p: &Program) -> Result<Ty, TypeError> {
    validate::check_type_case(e, p)?;
    let mut arm_tys = Vec::with_capacity(e.arms.len());
    for arm in &e.arms {
        arm_tys.push(type_of_case_arm(arm, env, p)?);
    }
    subtype::check_cover_type(&arm_tys, p)
}
