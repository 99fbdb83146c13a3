//! Unary operators (spec.md §4.2 "Unary operators").

use crate::ast::{UnaryExpr, UnaryOp};
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{Type, TypeRef};

use super::typify_expr;

pub(crate) fn typify(e: &mut UnaryExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.operand, ctx, payload) == Outcome::Error {
        return None;
    }
    let operand_ty = e.operand.ty()?;

    match e.op {
        UnaryOp::Not => {
            if !operand_ty.is_integral() {
                payload.report(TypeError::Mismatch {
                    expected: "integral".into(),
                    found: format!("{operand_ty:?}"),
                    span: e.span.clone(),
                });
                return None;
            }
            Some(Type::boolean(e.span.clone()))
        }
        UnaryOp::Neg | UnaryOp::Pos | UnaryOp::BNot => Some(operand_ty),
    }
}
