//! `isa` and `cast` (spec.md §4.2).
//!
//! `isa` is the one construct that performs genuine subtree replacement: a
//! statically-decidable `isa` rewrites itself to the literal `1` or `0` and
//! asks the driver to restart, per spec.md §3.3 and §9's "subtree
//! replacement with `PASS_RESTART`".

use crate::ast::{CastExpr, Expr, IntLiteral, TypeSlot};
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::TypeRef;

use super::{resolve_type_expr, typify_expr};

fn boolean_literal(value: i64, span: crate::span::Span) -> Expr {
    Expr::IntLiteral(IntLiteral {
        value,
        size: 32,
        signed: true,
        info: TypeSlot::empty(),
        span,
    })
}

pub(crate) fn typify_isa(expr: &mut Expr, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    let Expr::Isa(e) = expr else {
        unreachable!("typify_isa called on a non-Isa node");
    };

    if typify_expr(&mut e.operand, ctx, payload) == Outcome::Error {
        return Outcome::Error;
    }
    let Some(target_ty) = resolve_type_expr(&mut e.target, ctx, payload) else {
        return Outcome::Error;
    };
    let Some(operand_ty) = e.operand.ty() else {
        return Outcome::Error;
    };
    let span = e.span.clone();

    if target_ty.is_any() {
        *expr = boolean_literal(1, span);
        return Outcome::Restart;
    }
    if !operand_ty.is_any() {
        let value = if operand_ty == target_ty { 1 } else { 0 };
        *expr = boolean_literal(value, span);
        return Outcome::Restart;
    }

    // Operand is `any` and the target isn't: the check can only be resolved
    // at runtime, so the node is left in place with its boolean result type.
    let Expr::Isa(e) = expr else {
        unreachable!();
    };
    e.info.set(crate::types::Type::boolean(span));
    Outcome::Continue
}

pub(crate) fn typify_cast(e: &mut CastExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.operand, ctx, payload) == Outcome::Error {
        return None;
    }
    let target_ty = resolve_type_expr(&mut e.target, ctx, payload)?;
    let operand_ty = e.operand.ty()?;
    let span = e.span.clone();

    if target_ty.is_any() {
        payload.report(TypeError::ForbiddenCast {
            reason: "cannot cast to 'any'".into(),
            span,
        });
        return None;
    }
    if target_ty.is_function() || operand_ty.is_function() {
        payload.report(TypeError::ForbiddenCast {
            reason: "cannot cast to or from a function type".into(),
            span,
        });
        return None;
    }
    if target_ty.is_string() && operand_ty.as_integral() != Some((8, false)) {
        payload.report(TypeError::ForbiddenCast {
            reason: "cast to 'string' requires an uint<8> operand".into(),
            span,
        });
        return None;
    }

    Some(target_ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, IntLiteral, TypeExpr, TypeSlot};
    use crate::diagnostics::CollectingSink;
    use crate::pass::{Context, Payload};
    use crate::span::Span;

    fn int_lit(value: i64, size: u8, signed: bool) -> Expr {
        Expr::IntLiteral(IntLiteral {
            value,
            size,
            signed,
            info: TypeSlot::empty(),
            span: Span::default(),
        })
    }

    #[test]
    fn isa_any_folds_to_one() {
        let mut ctx = Context::new();
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, Default::default());
        let mut expr = Expr::Isa(crate::ast::IsaExpr {
            operand: Box::new(int_lit(1, 32, true)),
            target: Box::new(TypeExpr::Any { span: Span::default() }),
            info: TypeSlot::empty(),
            span: Span::default(),
        });
        let outcome = typify_isa(&mut expr, &mut ctx, &mut payload);
        assert_eq!(outcome, Outcome::Restart);
        match expr {
            Expr::IntLiteral(lit) => assert_eq!(lit.value, 1),
            _ => panic!("expected fold to a literal"),
        }
    }

    #[test]
    fn isa_structural_mismatch_folds_to_zero() {
        let mut ctx = Context::new();
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, Default::default());
        let mut expr = Expr::Isa(crate::ast::IsaExpr {
            operand: Box::new(int_lit(1, 32, true)),
            target: Box::new(TypeExpr::String { span: Span::default() }),
            info: TypeSlot::empty(),
            span: Span::default(),
        });
        typify_isa(&mut expr, &mut ctx, &mut payload);
        match expr {
            Expr::IntLiteral(lit) => assert_eq!(lit.value, 0),
            _ => panic!("expected fold to a literal"),
        }
    }

    #[test]
    fn cast_to_string_requires_uint8() {
        let mut ctx = Context::new();
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, Default::default());
        let mut e = CastExpr {
            operand: Box::new(int_lit(1, 8, true)),
            target: Box::new(TypeExpr::String { span: Span::default() }),
            info: TypeSlot::empty(),
            span: Span::default(),
        };
        assert!(typify_cast(&mut e, &mut ctx, &mut payload).is_none());
    }
}
