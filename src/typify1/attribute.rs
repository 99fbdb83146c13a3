//! Attribute expressions `x'attr` (spec.md §4.2's attribute table).

use crate::ast::{AttributeExpr, AttributeKind};
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{Type, TypeKind, TypeRef};

use super::typify_expr;

fn attr_name(attr: AttributeKind) -> &'static str {
    match attr {
        AttributeKind::Size => "size",
        AttributeKind::Signed => "signed",
        AttributeKind::Magnitude => "magnitude",
        AttributeKind::Unit => "unit",
        AttributeKind::Length => "length",
        AttributeKind::Alignment => "alignment",
        AttributeKind::Offset => "offset",
        AttributeKind::Mapped => "mapped",
    }
}

pub(crate) fn typify(e: &mut AttributeExpr, ctx: &mut Context, payload: &mut Payload) -> Option<TypeRef> {
    if typify_expr(&mut e.receiver, ctx, payload) == Outcome::Error {
        return None;
    }
    let receiver_ty = e.receiver.ty()?;
    let span = e.span.clone();

    let ok = match e.attr {
        AttributeKind::Size => {
            receiver_ty.is_integral()
                || receiver_ty.is_string()
                || receiver_ty.is_offset()
                || matches!(receiver_ty.kind, TypeKind::Array { .. } | TypeKind::Struct { .. })
        }
        AttributeKind::Signed => receiver_ty.is_integral(),
        AttributeKind::Magnitude | AttributeKind::Unit => receiver_ty.is_offset(),
        AttributeKind::Length => {
            receiver_ty.is_string() || matches!(receiver_ty.kind, TypeKind::Array { .. } | TypeKind::Struct { .. })
        }
        AttributeKind::Alignment => matches!(receiver_ty.kind, TypeKind::Struct { .. }),
        AttributeKind::Offset => matches!(receiver_ty.kind, TypeKind::Array { .. } | TypeKind::Struct { .. }),
        AttributeKind::Mapped => true,
    };

    if !ok {
        payload.report(TypeError::InvalidAttribute {
            attribute: attr_name(e.attr).to_string(),
            operand_type: format!("{receiver_ty:?}"),
            span,
        });
        return None;
    }

    Some(match e.attr {
        AttributeKind::Size | AttributeKind::Offset => Type::bit_offset(e.span.clone()),
        AttributeKind::Signed | AttributeKind::Mapped => Type::boolean(e.span.clone()),
        AttributeKind::Magnitude | AttributeKind::Unit | AttributeKind::Length | AttributeKind::Alignment => {
            Type::integral(64, false, e.span.clone())
        }
    })
}
