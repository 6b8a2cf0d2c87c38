//! The type environment: an immutable, chainable map from variable
//! names to type expressions.
//!
//! Extension never mutates an existing frame; it prepends a new one
//! linked to its parent via `Rc`. Sibling branches of the checker's
//! recursion (the two arms of an `if`, the cases of a `type-case`)
//! therefore observe independent extensions of the same captured
//! environment.

use std::rc::Rc;

use lattice_ast::Ty;

use crate::error::TypeError;

#[derive(Debug)]
struct Frame {
    bindings: Vec<(String, Ty)>,
    parent: Option<Rc<Frame>>,
}

/// A persistent chain of binding frames.
///
/// Cloning is cheap (one `Rc` bump) and shares structure with the
/// original; lookups walk the chain from the newest frame outward.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    head: Option<Rc<Frame>>,
}

impl TypeEnv {
    /// The environment with no bindings at all.
    pub fn empty() -> TypeEnv {
        TypeEnv { head: None }
    }

    /// Extend with a batch of bindings, all visible together.
    ///
    /// Returns the extended environment; `self` is untouched, so a
    /// caller can keep using it for sibling scopes.
    pub fn extend(&self, bindings: Vec<(String, Ty)>) -> TypeEnv {
        TypeEnv {
            head: Some(Rc::new(Frame {
                bindings,
                parent: self.head.clone(),
            })),
        }
    }

    /// Look a variable up, walking the full chain to the root.
    pub fn lookup(&self, name: &str) -> Result<Ty, TypeError> {
        let mut frame = self.head.as_deref();
        while let Some(fr) = frame {
            if let Some((_, ty)) = fr.bindings.iter().find(|(n, _)| n == name) {
                return Ok(ty.clone());
            }
            frame = fr.parent.as_deref();
        }
        Err(TypeError::UnboundVariable {
            name: name.to_string(),
        })
    }
}
