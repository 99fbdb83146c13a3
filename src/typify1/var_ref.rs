//! Variable reference (spec.md §4.2: "type is copied from the
//! declaration's initializer type").

use crate::ast::VarExpr;
use crate::diagnostics::TypeError;
use crate::pass::{Context, Payload};
use crate::types::TypeRef;

pub(crate) fn typify(e: &VarExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    match ctx.scope.get_variable(&e.name) {
        Some(ty) => Some(ty),
        None => {
            payload.report(TypeError::Mismatch {
                expected: "a declared variable or function".into(),
                found: e.name.clone(),
                span: e.span.clone(),
            });
            None
        }
    }
}
