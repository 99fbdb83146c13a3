//! Offset literals, e.g. `10#B` (spec.md §3.1's `Offset` variant: "base
//! integral type; unit expression").

use crate::ast::OffsetLiteralExpr;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{Type, TypeRef};

use super::typify_expr;

pub(crate) fn typify(e: &mut OffsetLiteralExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.magnitude, ctx, payload) == Outcome::Error {
        return None;
    }
    let magnitude_ty = e.magnitude.ty()?;
    if !magnitude_ty.is_integral() {
        payload.report(TypeError::Mismatch {
            expected: "integral".into(),
            found: format!("{magnitude_ty:?}"),
            span: e.span.clone(),
        });
        return None;
    }
    Some(Type::offset(magnitude_ty, e.unit, e.span.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, IntLiteral, TypeSlot};
    use crate::diagnostics::CollectingSink;
    use crate::span::Span;

    #[test]
    fn magnitude_type_becomes_the_offset_base() {
        let mut ctx = Context::new();
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, Default::default());
        let mut e = OffsetLiteralExpr {
            magnitude: Box::new(Expr::IntLiteral(IntLiteral {
                value: 10,
                size: 32,
                signed: false,
                info: TypeSlot::empty(),
                span: Span::default(),
            })),
            unit: 8,
            info: TypeSlot::empty(),
            span: Span::default(),
        };
        let ty = typify(&mut e, &mut ctx, &mut payload).unwrap();
        assert_eq!(ty.as_offset().map(|(b, u)| (b.as_integral(), u)), Some((Some((32, false)), 8)));
    }
}
