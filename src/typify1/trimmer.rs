//! Trimmer `a[i:j]` (spec.md §4.2: "both bounds must be integral; result
//! type equals the container's type").

use crate::ast::TrimmerExpr;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::TypeRef;

use super::typify_expr;

pub(crate) fn typify(e: &mut TrimmerExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.container, ctx, payload) == Outcome::Error
        || typify_expr(&mut e.from, ctx, payload) == Outcome::Error
        || typify_expr(&mut e.to, ctx, payload) == Outcome::Error
    {
        return None;
    }
    let container_ty = e.container.ty()?;
    let from_ty = e.from.ty()?;
    let to_ty = e.to.ty()?;

    if !from_ty.is_integral() || !to_ty.is_integral() {
        payload.report(TypeError::Mismatch {
            expected: "integral bounds".into(),
            found: format!("{from_ty:?} and {to_ty:?}"),
            span: e.span.clone(),
        });
        return None;
    }

    Some(container_ty)
}
