//! Function calls (spec.md §4.2, the most involved rule: arity checking,
//! named-argument reordering, per-argument promotion, and the
//! void-in-expression-position restriction).

use crate::ast::CallExpr;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::span::Span;
use crate::types::{TypeKind, TypeRef};

use super::{is_promotable, typify_expr};

pub(crate) fn typify(
    e: &mut CallExpr,
    ctx: &mut Context,
    payload: &mut Payload,
    in_statement_position: bool,
) -> Option<TypeRef> {
    if typify_expr(&mut e.callee, ctx, payload) == Outcome::Error {
        return None;
    }
    let callee_ty = e.callee.ty()?;
    let TypeKind::Function { ret, args: formals } = &callee_ty.kind else {
        payload.report(TypeError::NotAFunction {
            found: format!("{callee_ty:?}"),
            span: e.callee.span().clone(),
        });
        return None;
    };
    let ret = ret.clone();
    let formals = formals.clone();

    let mut actuals: Vec<(Option<String>, TypeRef, Span)> = Vec::with_capacity(e.args.len());
    for arg in &mut e.args {
        if typify_expr(&mut arg.value, ctx, payload) == Outcome::Error {
            return None;
        }
        let ty = arg.value.ty()?;
        actuals.push((arg.name.clone(), ty, arg.value.span().clone()));
    }

    let mandatory_args = formals
        .iter()
        .take_while(|f| !f.optional && !f.vararg)
        .count();
    if actuals.len() < mandatory_args {
        payload.report(TypeError::TooFewArguments {
            expected: mandatory_args,
            found: actuals.len(),
            span: e.span.clone(),
        });
        return None;
    }

    let vararg_index = formals.iter().position(|f| f.vararg);
    if vararg_index.is_none() && actuals.len() > formals.len() {
        payload.report(TypeError::TooManyArguments {
            expected: formals.len(),
            found: actuals.len(),
            span: e.span.clone(),
        });
        return None;
    }

    let any_named = actuals.iter().any(|(name, ..)| name.is_some());
    // One slot per non-vararg formal; `None` means "omitted, must be optional".
    let mut slots: Vec<Option<(TypeRef, Span)>> = vec![None; formals.len()];

    if any_named {
        if actuals.iter().any(|(name, ..)| name.is_none()) {
            payload.report(TypeError::Mismatch {
                expected: "either all arguments named or none".into(),
                found: "a mix of positional and named arguments".into(),
                span: e.span.clone(),
            });
            return None;
        }
        if formals.iter().all(|f| f.name.is_none()) {
            payload.report(TypeError::NoNamedArguments {
                span: e.span.clone(),
            });
            return None;
        }
        for (name, ty, span) in &actuals {
            let name = name.as_deref().expect("checked above");
            let Some(idx) = formals.iter().position(|f| f.name.as_deref() == Some(name)) else {
                payload.report(TypeError::Mismatch {
                    expected: "a known parameter name".into(),
                    found: name.to_string(),
                    span: span.clone(),
                });
                return None;
            };
            slots[idx] = Some((ty.clone(), span.clone()));
        }
        for (idx, formal) in formals.iter().enumerate() {
            if slots[idx].is_none() && !formal.optional && !formal.vararg {
                payload.report(TypeError::RequiredArgumentMissing {
                    name: formal.name.clone().unwrap_or_default(),
                    span: e.span.clone(),
                });
                return None;
            }
        }
    } else {
        for (i, (_, ty, span)) in actuals.iter().enumerate() {
            if let Some(vi) = vararg_index {
                if i >= vi {
                    continue;
                }
            }
            if i < formals.len() {
                slots[i] = Some((ty.clone(), span.clone()));
            }
        }
    }

    for (idx, formal) in formals.iter().enumerate() {
        if formal.vararg {
            continue;
        }
        if let Some((actual_ty, actual_span)) = &slots[idx] {
            if !is_promotable(actual_ty, &formal.ty) {
                payload.report(TypeError::Mismatch {
                    expected: format!("{:?}", formal.ty),
                    found: format!("{actual_ty:?}"),
                    span: actual_span.clone(),
                });
                return None;
            }
        }
    }

    if ret.is_void() && !in_statement_position {
        payload.report(TypeError::VoidInExpressionPosition {
            span: e.span.clone(),
        });
        return None;
    }

    Some(ret)
}
