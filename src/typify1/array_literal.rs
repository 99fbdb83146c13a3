//! Array literals (spec.md §4.2: "every initializer must have the *same*
//! type; result is `Array(elem = commonType, nelem = none)`").

use crate::ast::ArrayLiteralExpr;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{ArrayLength, Type, TypeRef};

use super::typify_expr;

pub(crate) fn typify(e: &mut ArrayLiteralExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    let mut elem_ty: Option<TypeRef> = None;
    for element in &mut e.elements {
        if typify_expr(element, ctx, payload) == Outcome::Error {
            return None;
        }
        let ty = element.ty()?;
        match &elem_ty {
            None => elem_ty = Some(ty),
            Some(common) if *common == ty => {}
            Some(common) => {
                payload.report(TypeError::Mismatch {
                    expected: format!("{common:?}"),
                    found: format!("{ty:?}"),
                    span: element.span().clone(),
                });
                return None;
            }
        }
    }

    let elem_ty = elem_ty.unwrap_or_else(|| Type::any(e.span.clone()));
    Some(Type::array(elem_ty, ArrayLength::Unsized, e.span.clone()))
}
