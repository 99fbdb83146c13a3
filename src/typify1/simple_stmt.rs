//! The small single-purpose statements: `print`, `raise`, `try`/`catch`,
//! `return` (spec.md §4.2).

use crate::ast::{PrintStmt, RaiseStmt, ReturnStmt, TryCatchStmt};
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::Type;

use super::{is_promotable, typify_block, typify_expr};

/// `print e` requires a string operand. No implicit broadening beyond that
/// — callers format non-string values themselves before printing.
pub(crate) fn typify_print(s: &mut PrintStmt, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    if typify_expr(&mut s.value, ctx, payload) == Outcome::Error {
        return Outcome::Error;
    }
    let Some(ty) = s.value.ty() else {
        return Outcome::Error;
    };
    if !ty.is_string() {
        payload.report(TypeError::Mismatch {
            expected: "string".into(),
            found: format!("{ty:?}"),
            span: s.value.span().clone(),
        });
        return Outcome::Error;
    }
    Outcome::Continue
}

/// `raise e?` — when a value is raised, it must be integral (an error
/// code), matching what `catch` binds its argument as.
pub(crate) fn typify_raise(s: &mut RaiseStmt, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    let Some(value) = &mut s.value else {
        return Outcome::Continue;
    };
    if typify_expr(value, ctx, payload) == Outcome::Error {
        return Outcome::Error;
    }
    let Some(ty) = value.ty() else {
        return Outcome::Error;
    };
    if !ty.is_integral() {
        payload.report(TypeError::Mismatch {
            expected: "integral".into(),
            found: format!("{ty:?}"),
            span: value.span().clone(),
        });
        return Outcome::Error;
    }
    Outcome::Continue
}

/// `try { } catch (arg)? (if cond)? { }`. The caught value, if bound, has
/// the same canonical integral type `raise` accepts; the guard condition,
/// if present, must itself be integral.
pub(crate) fn typify_try_catch(
    s: &mut TryCatchStmt,
    ctx: &mut Context,
    payload: &mut Payload,
) -> Outcome {
    typify_block(&mut s.try_block, ctx, payload);

    ctx.scope.enter_scope();
    if let Some(name) = &s.catch_arg {
        let _ = ctx
            .scope
            .add_variable(name, Type::integral(32, true, s.span.clone()), false);
    }
    if let Some(cond) = &mut s.catch_cond {
        if typify_expr(cond, ctx, payload) == Outcome::Continue {
            if let Some(ty) = cond.ty() {
                if !ty.is_integral() {
                    payload.report(TypeError::Mismatch {
                        expected: "integral".into(),
                        found: format!("{ty:?}"),
                        span: cond.span().clone(),
                    });
                }
            }
        }
    }
    for stmt in &mut s.catch_block.stmts {
        super::typify_stmt(stmt, ctx, payload);
    }
    ctx.scope.exit_scope();

    Outcome::Continue
}

/// `return e?`. A void-returning function must not return a value; any
/// other function must return one promotable to its declared return type.
pub(crate) fn typify_return(s: &mut ReturnStmt, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    let Some(return_ty) = ctx.current_return_type() else {
        return Outcome::Continue;
    };

    match &mut s.value {
        None => {
            if !return_ty.is_void() {
                payload.report(TypeError::Mismatch {
                    expected: format!("{return_ty:?}"),
                    found: "nothing".into(),
                    span: s.span.clone(),
                });
                return Outcome::Error;
            }
            Outcome::Continue
        }
        Some(value) => {
            if return_ty.is_void() {
                payload.report(TypeError::Mismatch {
                    expected: "no return value".into(),
                    found: "a value".into(),
                    span: value.span().clone(),
                });
                return Outcome::Error;
            }
            if typify_expr(value, ctx, payload) == Outcome::Error {
                return Outcome::Error;
            }
            let Some(value_ty) = value.ty() else {
                return Outcome::Error;
            };
            if !is_promotable(&value_ty, &return_ty) {
                payload.report(TypeError::Mismatch {
                    expected: format!("{return_ty:?}"),
                    found: format!("{value_ty:?}"),
                    span: value.span().clone(),
                });
                return Outcome::Error;
            }
            Outcome::Continue
        }
    }
}
