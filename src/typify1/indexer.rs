//! Indexer `a[i]` (spec.md §4.2).

use crate::ast::IndexerExpr;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{Type, TypeKind, TypeRef};

use super::typify_expr;

pub(crate) fn typify(e: &mut IndexerExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.container, ctx, payload) == Outcome::Error
        || typify_expr(&mut e.index, ctx, payload) == Outcome::Error
    {
        return None;
    }
    let container_ty = e.container.ty()?;
    let index_ty = e.index.ty()?;

    if !index_ty.is_integral() {
        payload.report(TypeError::Mismatch {
            expected: "integral".into(),
            found: format!("{index_ty:?}"),
            span: e.index.span().clone(),
        });
        return None;
    }

    match &container_ty.kind {
        TypeKind::Array { elem, .. } => Some(elem.clone()),
        TypeKind::String => Some(Type::integral(8, false, e.span.clone())),
        _ => {
            payload.report(TypeError::Mismatch {
                expected: "array or string".into(),
                found: format!("{container_ty:?}"),
                span: e.container.span().clone(),
            });
            None
        }
    }
}
