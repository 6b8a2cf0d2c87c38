//! Expression AST for Lattice programs.
//!
//! These are the fully parsed nodes the type checker consumes; the
//! parser that produces them lives outside this workspace. Every binder
//! carries an explicit type annotation (`VarDecl`), so the checker
//! verifies consistency rather than inferring types.
//!
//! `Display` renders nodes back to concrete s-expression syntax; the
//! checker embeds that rendering in its failure messages.

use std::fmt;

use serde::Serialize;

use crate::ty::{Ty, UnionDef};

/// A quoted s-expression datum. Opaque to the type system: every datum
/// has type `literal`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Datum {
    Symbol(String),
    Number(f64),
    Boolean(bool),
    Text(String),
    /// The empty list `()`.
    Nil,
    List(Vec<Datum>),
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Symbol(s) => write!(f, "{}", s),
            Datum::Number(n) => write!(f, "{}", fmt_num(*n)),
            Datum::Boolean(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Datum::Text(s) => write!(f, "\"{}\"", s),
            Datum::Nil => write!(f, "()"),
            Datum::List(items) => {
                write!(f, "(")?;
                for (i, d) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", d)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// An annotated binder: `(name : type)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VarDecl {
    pub name: String,
    pub ty: Ty,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        VarDecl { name: name.into(), ty }
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} : {})", self.name, self.ty)
    }
}

/// `(if test then alt)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IfExp {
    pub test: Exp,
    pub then: Exp,
    pub alt: Exp,
}

/// `(lambda ((x : t) ...) : ret body ...)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcExp {
    pub params: Vec<VarDecl>,
    pub return_ty: Ty,
    pub body: Vec<Exp>,
}

/// `(rator rand ...)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppExp {
    pub rator: Exp,
    pub rands: Vec<Exp>,
}

/// One `let`/`letrec` binding: `((var : t) val)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Binding {
    pub var: VarDecl,
    pub val: Exp,
}

impl Binding {
    pub fn new(var: VarDecl, val: Exp) -> Self {
        Binding { var, val }
    }
}

/// `(let (binding ...) body ...)` -- also reused for `letrec`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LetExp {
    pub bindings: Vec<Binding>,
    pub body: Vec<Exp>,
}

/// `(define (var : t) val)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DefineExp {
    pub var: VarDecl,
    pub val: Exp,
}

/// `(set! var val)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SetExp {
    pub name: String,
    pub val: Exp,
}

/// One arm of a `type-case`: `(record (binder ...) body ...)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaseArm {
    pub record_name: String,
    pub binders: Vec<String>,
    pub body: Vec<Exp>,
}

impl CaseArm {
    pub fn new(
        record_name: impl Into<String>,
        binders: Vec<String>,
        body: Vec<Exp>,
    ) -> Self {
        CaseArm { record_name: record_name.into(), binders, body }
    }
}

/// `(type-case type-name scrutinee arm ...)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeCaseExp {
    pub type_name: String,
    pub scrutinee: Exp,
    pub arms: Vec<CaseArm>,
}

/// A Lattice expression.
///
/// Closed set: the checker dispatches exhaustively over these variants.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Exp {
    Num(f64),
    Bool(bool),
    Str(String),
    /// Quoted data: `'datum`.
    Lit(Datum),
    /// A primitive operator reference, e.g. `+` or `number?`.
    Prim(String),
    /// A variable reference.
    Var(String),
    If(Box<IfExp>),
    Proc(Box<ProcExp>),
    App(Box<AppExp>),
    Let(Box<LetExp>),
    Letrec(Box<LetExp>),
    Define(Box<DefineExp>),
    DefineType(UnionDef),
    Set(Box<SetExp>),
    TypeCase(Box<TypeCaseExp>),
}

impl Exp {
    pub fn num(n: f64) -> Exp {
        Exp::Num(n)
    }

    pub fn str(s: impl Into<String>) -> Exp {
        Exp::Str(s.into())
    }

    pub fn prim(op: impl Into<String>) -> Exp {
        Exp::Prim(op.into())
    }

    pub fn var(name: impl Into<String>) -> Exp {
        Exp::Var(name.into())
    }

    pub fn if_(test: Exp, then: Exp, alt: Exp) -> Exp {
        Exp::If(Box::new(IfExp { test, then, alt }))
    }

    pub fn proc(params: Vec<VarDecl>, return_ty: Ty, body: Vec<Exp>) -> Exp {
        Exp::Proc(Box::new(ProcExp { params, return_ty, body }))
    }

    pub fn app(rator: Exp, rands: Vec<Exp>) -> Exp {
        Exp::App(Box::new(AppExp { rator, rands }))
    }

    pub fn let_(bindings: Vec<Binding>, body: Vec<Exp>) -> Exp {
        Exp::Let(Box::new(LetExp { bindings, body }))
    }

    pub fn letrec(bindings: Vec<Binding>, body: Vec<Exp>) -> Exp {
        Exp::Letrec(Box::new(LetExp { bindings, body }))
    }

    pub fn define(var: VarDecl, val: Exp) -> Exp {
        Exp::Define(Box::new(DefineExp { var, val }))
    }

    pub fn set(name: impl Into<String>, val: Exp) -> Exp {
        Exp::Set(Box::new(SetExp { name: name.into(), val }))
    }

    pub fn type_case(
        type_name: impl Into<String>,
        scrutinee: Exp,
        arms: Vec<CaseArm>,
    ) -> Exp {
        Exp::TypeCase(Box::new(TypeCaseExp {
            type_name: type_name.into(),
            scrutinee,
            arms,
        }))
    }
}

/// A parsed program: an ordered sequence of top-level expressions.
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
pub struct Program {
    pub exps: Vec<Exp>,
}

impl Program {
    pub fn new(exps: Vec<Exp>) -> Self {
        Program { exps }
    }
}

/// Render an f64 the way the surface syntax writes it: integral values
/// without a trailing `.0`.
fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn write_body(f: &mut fmt::Formatter<'_>, body: &[Exp]) -> fmt::Result {
    for e in body {
        write!(f, " {}", e)?;
    }
    Ok(())
}

fn write_bindings(f: &mut fmt::Formatter<'_>, bindings: &[Binding]) -> fmt::Result {
    write!(f, "(")?;
    for (i, b) in bindings.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "({} {})", b.var, b.val)?;
    }
    write!(f, ")")
}

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exp::Num(n) => write!(f, "{}", fmt_num(*n)),
            Exp::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Exp::Str(s) => write!(f, "\"{}\"", s),
            Exp::Lit(d) => write!(f, "'{}", d),
            Exp::Prim(op) => write!(f, "{}", op),
            Exp::Var(name) => write!(f, "{}", name),
            Exp::If(e) => write!(f, "(if {} {} {})", e.test, e.then, e.alt),
            Exp::Proc(e) => {
                write!(f, "(lambda (")?;
                for (i, p) in e.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ") : {}", e.return_ty)?;
                write_body(f, &e.body)?;
                write!(f, ")")
            }
            Exp::App(e) => {
                write!(f, "({}", e.rator)?;
                for r in &e.rands {
                    write!(f, " {}", r)?;
                }
                write!(f, ")")
            }
            Exp::Let(e) => {
                write!(f, "(let ")?;
                write_bindings(f, &e.bindings)?;
                write_body(f, &e.body)?;
                write!(f, ")")
            }
            Exp::Letrec(e) => {
                write!(f, "(letrec ")?;
                write_bindings(f, &e.bindings)?;
                write_body(f, &e.body)?;
                write!(f, ")")
            }
            Exp::Define(e) => write!(f, "(define {} {})", e.var, e.val),
            Exp::DefineType(u) => {
                write!(f, "(define-type {}", u.name)?;
                for r in &u.records {
                    write!(f, " ({}", r.name)?;
                    for fd in &r.fields {
                        write!(f, " ({} : {})", fd.name, fd.ty)?;
                    }
                    write!(f, ")")?;
                }
                write!(f, ")")
            }
            Exp::Set(e) => write!(f, "(set! {} {})", e.name, e.val),
            Exp::TypeCase(e) => {
                write!(f, "(type-case {} {}", e.type_name, e.scrutinee)?;
                for arm in &e.arms {
                    write!(f, " ({} ({})", arm.record_name, arm.binders.join(" "))?;
                    write_body(f, &arm.body)?;
                    write!(f, ")")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::{FieldDef, RecordDef};

    #[test]
    fn renders_literals() {
        assert_eq!(Exp::num(3.0).to_string(), "3");
        assert_eq!(Exp::num(3.5).to_string(), "3.5");
        assert_eq!(Exp::Bool(true).to_string(), "#t");
        assert_eq!(Exp::str("hi").to_string(), "\"hi\"");
        assert_eq!(
            Exp::Lit(Datum::Symbol("ok".into())).to_string(),
            "'ok"
        );
    }

    #[test]
    fn renders_compound_forms() {
        let e = Exp::if_(Exp::Bool(true), Exp::num(1.0), Exp::num(2.0));
        assert_eq!(e.to_string(), "(if #t 1 2)");

        let lam = Exp::proc(
            vec![VarDecl::new("x", Ty::Num)],
            Ty::Num,
            vec![Exp::var("x")],
        );
        assert_eq!(lam.to_string(), "(lambda ((x : number)) : number x)");

        let app = Exp::app(Exp::prim("+"), vec![Exp::num(1.0), Exp::num(2.0)]);
        assert_eq!(app.to_string(), "(+ 1 2)");
    }

    #[test]
    fn renders_define_type() {
        let shape = UnionDef::new(
            "Shape",
            vec![
                RecordDef::new("Circle", vec![FieldDef::new("r", Ty::Num)]),
                RecordDef::new("Square", vec![FieldDef::new("s", Ty::Num)]),
            ],
        );
        assert_eq!(
            Exp::DefineType(shape).to_string(),
            "(define-type Shape (Circle (r : number)) (Square (s : number)))"
        );
    }
}
