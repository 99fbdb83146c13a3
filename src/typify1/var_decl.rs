//! Variable declarations. Not one of spec.md §4.2's named handlers (the
//! declaration side of "variable reference" is trivial: typify the
//! initializer, bind its type), but needed so later variable references
//! have somewhere to look.

use crate::ast::VarDeclStmt;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};

use super::{is_promotable, resolve_type_expr, typify_expr};

pub(crate) fn typify(s: &mut VarDeclStmt, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    if typify_expr(&mut s.initializer, ctx, payload) == Outcome::Error {
        return Outcome::Error;
    }
    let Some(init_ty) = s.initializer.ty() else {
        return Outcome::Error;
    };

    let ty = match &mut s.declared_type {
        Some(declared) => {
            let Some(declared_ty) = resolve_type_expr(declared, ctx, payload) else {
                return Outcome::Error;
            };
            if !is_promotable(&init_ty, &declared_ty) {
                payload.report(TypeError::Mismatch {
                    expected: format!("{declared_ty:?}"),
                    found: format!("{init_ty:?}"),
                    span: s.span.clone(),
                });
                return Outcome::Error;
            }
            declared_ty
        }
        None => init_ty,
    };

    if ctx.scope.add_variable(&s.name, ty, s.mutable).is_err() {
        payload.report(TypeError::Mismatch {
            expected: "a unique variable name".into(),
            found: s.name.clone(),
            span: s.span.clone(),
        });
        return Outcome::Error;
    }

    Outcome::Continue
}
