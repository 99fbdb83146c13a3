//! Assignment `l = r` (spec.md §4.2: same promotion rule as function-call
//! arguments). Assignment to a function-typed l-value is left legal — see
//! DESIGN.md's Open Question decision.

use crate::ast::AssignmentStmt;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};

use super::{is_promotable, typify_expr};

pub(crate) fn typify(s: &mut AssignmentStmt, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    if typify_expr(&mut s.target, ctx, payload) == Outcome::Error
        || typify_expr(&mut s.value, ctx, payload) == Outcome::Error
    {
        return Outcome::Error;
    }
    let (Some(target_ty), Some(value_ty)) = (s.target.ty(), s.value.ty()) else {
        return Outcome::Error;
    };

    if !is_promotable(&value_ty, &target_ty) {
        payload.report(TypeError::Mismatch {
            expected: format!("{target_ty:?}"),
            found: format!("{value_ty:?}"),
            span: s.span.clone(),
        });
        return Outcome::Error;
    }

    Outcome::Continue
}
