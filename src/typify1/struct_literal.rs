//! Struct literals, struct-elems and struct constructors (spec.md §4.2's
//! "struct literal", "struct-elem" and "struct constructor" entries).
//!
//! A struct-elem is each `name: value` pair inside a literal; spec.md lists
//! it as its own handler distinct from the literal as a whole because it
//! carries its own type attribute, copied from its value.

use crate::ast::{StructConstructorExpr, StructElem, StructLiteralExpr};
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{StructField, Type, TypeKind, TypeRef};

use super::{resolve_type_expr, typify_expr};

fn typify_elem(elem: &mut StructElem, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut elem.value, ctx, payload) == Outcome::Error {
        return None;
    }
    let ty = elem.value.ty()?;
    elem.info.set(ty.clone());
    Some(ty)
}

pub(crate) fn typify_literal(e: &mut StructLiteralExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    let mut fields = Vec::with_capacity(e.elems.len());
    for elem in &mut e.elems {
        let ty = typify_elem(elem, ctx, payload)?;
        fields.push(StructField {
            name: elem.name.clone(),
            ty,
        });
    }
    Some(Type::struct_(fields, e.span.clone()))
}

pub(crate) fn typify_constructor(
    e: &mut StructConstructorExpr,
    ctx: &mut Context,
    payload: &mut Payload,
) -> Option<TypeRef> {
    let target_ty = resolve_type_expr(&mut e.type_name, ctx, payload)?;
    if !matches!(target_ty.kind, TypeKind::Struct { .. }) {
        payload.report(TypeError::Mismatch {
            expected: "struct type".into(),
            found: format!("{target_ty:?}"),
            span: e.span.clone(),
        });
        return None;
    }
    for elem in &mut e.elems {
        typify_elem(elem, ctx, payload)?;
    }
    Some(target_ty)
}
