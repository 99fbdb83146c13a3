//! Loop statements: `for`, `while`, `for-in` (spec.md §4.2's "Loop" handler).
//!
//! All three kinds share one scope: the loop variable (the `for` init, or
//! the iterator binding for `for-in`) lives in a frame that also covers the
//! condition and the body, so it's entered once here rather than per-kind.

use crate::ast::{Expr, LoopKind, LoopStmt};
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{Type, TypeKind};

use super::{typify_block, typify_expr, typify_stmt};

pub(crate) fn typify(s: &mut LoopStmt, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    ctx.scope.enter_scope();
    let outcome = typify_inner(s, ctx, payload);
    ctx.scope.exit_scope();
    outcome
}

fn typify_inner(s: &mut LoopStmt, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    match &mut s.kind {
        LoopKind::For { init, cond, step } => {
            if let Some(init) = init {
                if typify_stmt(init, ctx, payload) == Outcome::Error {
                    return Outcome::Error;
                }
            }
            if let Some(cond) = cond {
                if !typify_condition(cond.as_mut(), ctx, payload) {
                    return Outcome::Error;
                }
            }
            if let Some(step) = step {
                if typify_stmt(step, ctx, payload) == Outcome::Error {
                    return Outcome::Error;
                }
            }
        }
        LoopKind::While { cond } => {
            if !typify_condition(cond.as_mut(), ctx, payload) {
                return Outcome::Error;
            }
        }
        LoopKind::ForIn { var_name, container } => {
            if typify_expr(container, ctx, payload) == Outcome::Error {
                return Outcome::Error;
            }
            let Some(container_ty) = container.ty() else {
                return Outcome::Error;
            };
            let elem_ty = match &container_ty.kind {
                TypeKind::Array { elem, .. } => elem.clone(),
                TypeKind::String => Type::integral(8, false, container.span().clone()),
                _ => {
                    payload.report(TypeError::Mismatch {
                        expected: "array or string".into(),
                        found: format!("{container_ty:?}"),
                        span: container.span().clone(),
                    });
                    return Outcome::Error;
                }
            };
            if ctx
                .scope
                .add_variable(var_name.clone(), elem_ty, false)
                .is_err()
            {
                payload.report(TypeError::Mismatch {
                    expected: "a unique loop variable name".into(),
                    found: var_name.clone(),
                    span: s.span.clone(),
                });
                return Outcome::Error;
            }
        }
    }

    typify_block(&mut s.body, ctx, payload);
    Outcome::Continue
}

/// A loop condition must reduce to the canonical boolean type (spec.md
/// §4.2), not merely any integral.
fn typify_condition(cond: &mut Expr, ctx: &mut Context, payload: &mut Payload) -> bool {
    if typify_expr(cond, ctx, payload) == Outcome::Error {
        return false;
    }
    let Some(ty) = cond.ty() else {
        return false;
    };
    match ty.as_integral() {
        Some((32, true)) => true,
        _ => {
            payload.report(TypeError::Mismatch {
                expected: "int<32>".into(),
                found: format!("{ty:?}"),
                span: cond.span().clone(),
            });
            false
        }
    }
}
