//! Struct-field access `s.f` (spec.md §4.2's "struct-ref" handler).

use crate::ast::FieldAccessExpr;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{TypeKind, TypeRef};

use super::typify_expr;

pub(crate) fn typify(e: &mut FieldAccessExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.receiver, ctx, payload) == Outcome::Error {
        return None;
    }
    let receiver_ty = e.receiver.ty()?;

    let TypeKind::Struct { fields, .. } = &receiver_ty.kind else {
        payload.report(TypeError::Mismatch {
            expected: "struct".into(),
            found: format!("{receiver_ty:?}"),
            span: e.receiver.span().clone(),
        });
        return None;
    };

    match fields.iter().find(|f| f.name.as_deref() == Some(e.field.as_str())) {
        Some(field) => Some(field.ty.clone()),
        None => {
            payload.report(TypeError::UnknownField {
                name: e.field.clone(),
                struct_type: format!("{receiver_ty:?}"),
                span: e.span.clone(),
            });
            None
        }
    }
}
