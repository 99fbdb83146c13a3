//! Binary operators: arithmetic, relational, logical, shifts and bitwise
//! (spec.md §4.2's `+`, `-`, `*`, `/`, `%`, relational, logical, shifts,
//! bitwise entries). One file, like `why_lib::typed_ast::expression::binary`,
//! since every arm shares the same "typify both operands, then dispatch on
//! operator" shape.

use crate::ast::{BinaryExpr, BinaryOp};
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::promotion::combine_integral;
use crate::types::{Type, TypeRef};

use super::typify_expr;

pub(crate) fn typify(e: &mut BinaryExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.left, ctx, payload) == Outcome::Error
        || typify_expr(&mut e.right, ctx, payload) == Outcome::Error
    {
        return None;
    }
    let lhs = e.left.ty()?;
    let rhs = e.right.ty()?;
    let span = e.span.clone();

    use BinaryOp::*;
    match e.op {
        Add => add(&lhs, &rhs, &span, payload),
        Sub => sub(&lhs, &rhs, &span, payload),
        Mul => mul(&lhs, &rhs, &span, payload),
        Div => div(&lhs, &rhs, &span, payload),
        Mod => rem(&lhs, &rhs, &span, payload),
        BitOr | BitXor | BitAnd => bitwise(&lhs, &rhs, &span, payload),
        Shl | Shr => shift(&lhs, &rhs, &span, payload),
        Eq | Ne | Lt | Gt | Le | Ge => relational(&lhs, &rhs, &span, payload),
        And | Or => Some(Type::boolean(span)),
    }
}

fn mismatch(expected: &str, lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    payload.report(TypeError::Mismatch {
        expected: expected.into(),
        found: format!("{lhs:?} and {rhs:?}"),
        span: span.clone(),
    });
    None
}

fn add(lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    if let (Some(a), Some(b)) = (lhs.as_integral(), rhs.as_integral()) {
        let (size, signed) = combine_integral(a, b);
        return Some(Type::integral(size, signed, span.clone()));
    }
    if lhs.is_string() && rhs.is_string() {
        return Some(Type::string(span.clone()));
    }
    if let (Some((base_a, unit_a)), Some((base_b, _))) = (lhs.as_offset(), rhs.as_offset()) {
        let (size, signed) = combine_integral(base_a.as_integral()?, base_b.as_integral()?);
        let base = Type::integral(size, signed, span.clone());
        return Some(Type::offset(base, unit_a, span.clone()));
    }
    mismatch("two integrals, two strings, or two offsets", lhs, rhs, span, payload)
}

fn sub(lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    if let (Some(a), Some(b)) = (lhs.as_integral(), rhs.as_integral()) {
        let (size, signed) = combine_integral(a, b);
        return Some(Type::integral(size, signed, span.clone()));
    }
    if let (Some((base_a, _)), Some((base_b, _))) = (lhs.as_offset(), rhs.as_offset()) {
        let (size, signed) = combine_integral(base_a.as_integral()?, base_b.as_integral()?);
        let base = Type::integral(size, signed, span.clone());
        // Unit is always bits here; see DESIGN.md's Open Question decision.
        return Some(Type::offset(base, 1, span.clone()));
    }
    mismatch("two integrals or two offsets", lhs, rhs, span, payload)
}

fn mul(lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    if let (Some(a), Some(b)) = (lhs.as_integral(), rhs.as_integral()) {
        let (size, signed) = combine_integral(a, b);
        return Some(Type::integral(size, signed, span.clone()));
    }
    if lhs.is_string() && rhs.is_string() {
        return Some(Type::string(span.clone()));
    }
    if let (Some((base, unit)), Some(int_rhs)) = (lhs.as_offset(), rhs.as_integral()) {
        let (size, signed) = combine_integral(base.as_integral()?, int_rhs);
        return Some(Type::offset(Type::integral(size, signed, span.clone()), unit, span.clone()));
    }
    if let (Some(int_lhs), Some((base, unit))) = (lhs.as_integral(), rhs.as_offset()) {
        let (size, signed) = combine_integral(int_lhs, base.as_integral()?);
        return Some(Type::offset(Type::integral(size, signed, span.clone()), unit, span.clone()));
    }
    mismatch(
        "two integrals, two strings, or an integral and an offset",
        lhs,
        rhs,
        span,
        payload,
    )
}

fn div(lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    if let (Some(a), Some(b)) = (lhs.as_integral(), rhs.as_integral()) {
        let (size, signed) = combine_integral(a, b);
        return Some(Type::integral(size, signed, span.clone()));
    }
    if let (Some((base_a, _)), Some((base_b, _))) = (lhs.as_offset(), rhs.as_offset()) {
        let (size, signed) = combine_integral(base_a.as_integral()?, base_b.as_integral()?);
        return Some(Type::integral(size, signed, span.clone()));
    }
    mismatch("two integrals or two offsets", lhs, rhs, span, payload)
}

fn rem(lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    if let (Some(a), Some(b)) = (lhs.as_integral(), rhs.as_integral()) {
        let (size, signed) = combine_integral(a, b);
        return Some(Type::integral(size, signed, span.clone()));
    }
    if let (Some((base_a, _)), Some((_, unit_b))) = (lhs.as_offset(), rhs.as_offset()) {
        return Some(Type::offset(base_a.clone(), unit_b, span.clone()));
    }
    mismatch("two integrals or two offsets", lhs, rhs, span, payload)
}

fn bitwise(lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    match (lhs.as_integral(), rhs.as_integral()) {
        (Some(a), Some(b)) => {
            let (size, signed) = combine_integral(a, b);
            Some(Type::integral(size, signed, span.clone()))
        }
        _ => mismatch("two integrals", lhs, rhs, span, payload),
    }
}

fn shift(lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    if lhs.is_integral() && rhs.is_integral() {
        // Shifts preserve the shifted (left) operand's exact type.
        return Some(lhs.clone());
    }
    mismatch("two integrals", lhs, rhs, span, payload)
}

fn relational(lhs: &TypeRef, rhs: &TypeRef, span: &crate::span::Span, payload: &mut Payload) -> Option<TypeRef> {
    let same_kind = (lhs.is_integral() && rhs.is_integral())
        || (lhs.is_string() && rhs.is_string())
        || (lhs.is_offset() && rhs.is_offset());
    if same_kind {
        Some(Type::boolean(span.clone()))
    } else {
        mismatch(
            "operands of the same kind (integral, string or offset)",
            lhs,
            rhs,
            span,
            payload,
        )
    }
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

    fn offset_lit(size: u8, signed: bool, unit: u64) -> Expr {
        Expr::OffsetLiteral(crate::ast::OffsetLiteralExpr {
            magnitude: Box::new(int_lit(size, signed)),
            unit,
            info: TypeSlot::empty(),
            span: Span::default(),
        })
    }

    fn run(op: BinaryOp, left: Expr, right: Expr) -> Option<TypeRef> {
        let mut ctx = Context::new();
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, Default::default());
        let mut e = BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            info: TypeSlot::empty(),
            span: Span::default(),
        };
        typify(&mut e, &mut ctx, &mut payload)
    }

    #[test]
    fn scenario_one_plus_two_is_signed_32() {
        let ty = run(BinaryOp::Add, int_lit(32, true), int_lit(32, true)).unwrap();
        assert_eq!(ty.as_integral(), Some((32, true)));
    }

    #[test]
    fn scenario_mixed_width_and_sign_promotes() {
        let ty = run(BinaryOp::Add, int_lit(16, false), int_lit(8, true)).unwrap();
        assert_eq!(ty.as_integral(), Some((16, false)));
    }

    #[test]
    fn shift_preserves_left_operand_exactly() {
        let ty = run(BinaryOp::Shl, int_lit(8, false), int_lit(32, true)).unwrap();
        assert_eq!(ty.as_integral(), Some((8, false)));
    }

    /// scenario 3: subtracting two `offset<uint<32>,8>` values keeps the
    /// promoted `uint<32>` base but forces the unit to bits, not bytes (see
    /// DESIGN.md's Open Question decision 1).
    #[test]
    fn offset_subtraction_forces_unit_to_bits() {
        let ty = run(BinaryOp::Sub, offset_lit(32, false, 8), offset_lit(32, false, 8)).unwrap();
        assert_eq!(
            ty.as_offset().map(|(base, unit)| (base.as_integral(), unit)),
            Some((Some((32, false)), 1))
        );
    }

    #[test]
    fn relational_rejects_mixed_kinds() {
        let mut ctx = Context::new();
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, Default::default());
        let mut e = BinaryExpr {
            op: BinaryOp::Lt,
            left: Box::new(int_lit(32, true)),
            right: Box::new(Expr::StringLiteral(crate::ast::StringLiteral {
                value: "x".into(),
                info: TypeSlot::empty(),
                span: Span::default(),
            })),
            info: TypeSlot::empty(),
            span: Span::default(),
        };
        assert!(typify(&mut e, &mut ctx, &mut payload).is_none());
    }
}
