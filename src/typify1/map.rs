//! Map expression `T @ off` (spec.md §4.2).

use crate::ast::MapExpr;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::TypeRef;

use super::{resolve_type_expr, typify_expr};

pub(crate) fn typify(e: &mut MapExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    let target_ty = resolve_type_expr(&mut e.type_name, ctx, payload)?;
    if typify_expr(&mut e.offset, ctx, payload) == Outcome::Error {
        return None;
    }
    let offset_ty = e.offset.ty()?;
    if !offset_ty.is_offset() {
        payload.report(TypeError::Mismatch {
            expected: "offset".into(),
            found: format!("{offset_ty:?}"),
            span: e.offset.span().clone(),
        });
        return None;
    }
    Some(target_ty)
}
