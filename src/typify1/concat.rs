//! Bit concatenation `::` (spec.md §4.2).

use crate::ast::ConcatExpr;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{Type, TypeRef};

use super::typify_expr;

pub(crate) fn typify(e: &mut ConcatExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.left, ctx, payload) == Outcome::Error
        || typify_expr(&mut e.right, ctx, payload) == Outcome::Error
    {
        return None;
    }
    let lhs = e.left.ty()?;
    let rhs = e.right.ty()?;

    let (Some((size_a, signed_a)), Some((size_b, _))) = (lhs.as_integral(), rhs.as_integral())
    else {
        payload.report(TypeError::Mismatch {
            expected: "two integrals".into(),
            found: format!("{lhs:?} and {rhs:?}"),
            span: e.span.clone(),
        });
        return None;
    };

    let total = size_a as u32 + size_b as u32;
    if total > 64 {
        payload.report(TypeError::BitConcatOverflow {
            total,
            span: e.span.clone(),
        });
        return None;
    }

    Some(Type::integral(total as u8, signed_a, e.span.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, IntLiteral, TypeSlot};
    use crate::diagnostics::CollectingSink;
    use crate::span::Span;

    fn int_lit(size: u8, signed: bool) -> Expr {
        Expr::IntLiteral(IntLiteral {
            value: 1,
            size,
            signed,
            info: TypeSlot::empty(),
            span: Span::default(),
        })
    }

    fn concat(left_size: u8, right_size: u8) -> Option<TypeRef> {
        let mut ctx = Context::new();
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, Default::default());
        let mut e = ConcatExpr {
            left: Box::new(int_lit(left_size, true)),
            right: Box::new(int_lit(right_size, false)),
            info: TypeSlot::empty(),
            span: Span::default(),
        };
        typify(&mut e, &mut ctx, &mut payload)
    }

    #[test]
    fn width_law_holds_at_the_boundary() {
        let ty = concat(32, 32).unwrap();
        assert_eq!(ty.as_integral(), Some((64, true)));
    }

    #[test]
    fn exceeding_64_bits_is_rejected() {
        assert!(concat(33, 32).is_none());
    }

    #[test]
    fn signedness_follows_the_left_operand() {
        let ty = concat(8, 8).unwrap();
        assert_eq!(ty.as_integral(), Some((16, true)));
    }
}
