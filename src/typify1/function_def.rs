//! Function definitions (spec.md §4.2: "the type is attached *pre-order*
//! so recursive references inside the body can resolve").

use crate::ast::FunctionDef;
use crate::diagnostics::TypeError;
use crate::driver::Outcome;
use crate::pass::{Context, Payload};
use crate::types::{FunctionArg, Type};

use super::{resolve_type_expr, typify_stmt};

pub(crate) fn typify(s: &mut FunctionDef, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    let Some(ret_ty) = resolve_type_expr(&mut s.return_type, ctx, payload) else {
        return Outcome::Error;
    };

    let mut args = Vec::with_capacity(s.params.len());
    for param in &mut s.params {
        let Some(ty) = resolve_type_expr(&mut param.ty, ctx, payload) else {
            return Outcome::Error;
        };
        args.push(FunctionArg {
            ty,
            name: param.name.clone(),
            optional: param.optional,
            vararg: param.vararg,
        });
    }

    let fn_ty = Type::function(ret_ty.clone(), args.clone(), s.span.clone());
    s.info.set(fn_ty.clone());

    if ctx.scope.add_variable(&s.name, fn_ty, false).is_err() {
        payload.report(TypeError::Mismatch {
            expected: "a unique function name".into(),
            found: s.name.clone(),
            span: s.span.clone(),
        });
        return Outcome::Error;
    }

    ctx.enter_function(ret_ty);
    for arg in &args {
        if let Some(name) = &arg.name {
            let _ = ctx.scope.add_variable(name, arg.ty.clone(), true);
        }
    }
    for stmt in &mut s.body.stmts {
        typify_stmt(stmt, ctx, payload);
    }
    ctx.exit_function();

    Outcome::Continue
}
