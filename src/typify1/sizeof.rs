//! `sizeof` (spec.md §4.2, §4.3, §8: "`sizeof(e)` and attribute `'size`
//! both yield `Offset(Integral(64, unsigned), unit=1)`").
//!
//! Completeness of a `sizeof(type)` operand is a typify-2 concern (spec.md
//! §4.3); typify-1 only resolves the operand and fixes the result type.

use crate::ast::{SizeofExpr, SizeofOperand};
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{Type, TypeRef};

use super::{resolve_type_expr, typify_expr};

pub(crate) fn typify(e: &mut SizeofExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    match &mut e.operand {
        SizeofOperand::Expr(operand) => {
            if typify_expr(operand, ctx, payload) == Outcome::Error {
                return None;
            }
        }
        SizeofOperand::Type(te) => {
            let ty = resolve_type_expr(te, ctx, payload)?;
            *e.operand_type.borrow_mut() = Some(ty);
        }
    }
    Some(Type::bit_offset(e.span.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, IntLiteral, TypeSlot};
    use crate::diagnostics::CollectingSink;
    use crate::span::Span;

    #[test]
    fn sizeof_expression_yields_bit_offset() {
        let mut ctx = Context::new();
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, Default::default());
        let mut e = SizeofExpr {
            operand: SizeofOperand::Expr(Box::new(Expr::IntLiteral(IntLiteral {
                value: 1,
                size: 32,
                signed: true,
                info: TypeSlot::empty(),
                span: Span::default(),
            }))),
            operand_type: std::cell::RefCell::new(None),
            operand_type_complete: std::cell::RefCell::new(None),
            info: TypeSlot::empty(),
            span: Span::default(),
        };
        let ty = typify(&mut e, &mut ctx, &mut payload).unwrap();
        assert_eq!(ty.as_offset().map(|(b, u)| (b.as_integral(), u)), Some((Some((64, false)), 1)));
    }
}
