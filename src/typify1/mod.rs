//! Typify-1: bottom-up type assignment (spec.md §2, §4.2).
//!
//! One file per AST construct, matching `why_lib`'s
//! `typed_ast/{expression,statement}/*.rs` layout. This module holds the
//! dispatch that picks which handler runs for a given node, plus resolution
//! of type annotations (`TypeExpr` → `TypeRef`), since that resolution is
//! shared by every handler that consumes a declared type (casts, variable
//! declarations, struct constructors, function signatures).

mod array_literal;
mod assignment;
mod attribute;
mod binary;
mod concat;
mod function_call;
mod function_def;
mod indexer;
mod isa_cast;
mod loop_stmt;
mod map;
mod offset_literal;
mod simple_stmt;
mod sizeof;
mod struct_literal;
mod struct_ref;
mod trimmer;
mod unary;
mod var_decl;
mod var_ref;

use crate::ast::{Block, Expr, Program, Stmt, StructFieldDecl, TypeExpr};
use crate::diagnostics::TypeError;
use crate::driver::{drive, Outcome};
use crate::pass::{Context, Payload};
use crate::types::{FunctionArg, Type, TypeRef};

pub fn run(program: &mut Program, ctx: &mut Context, payload: &mut Payload) {
    for stmt in &mut program.stmts {
        typify_stmt(stmt, ctx, payload);
    }
}

pub(crate) fn typify_block(block: &mut Block, ctx: &mut Context, payload: &mut Payload) {
    ctx.scope.enter_scope();
    for stmt in &mut block.stmts {
        typify_stmt(stmt, ctx, payload);
    }
    ctx.scope.exit_scope();
}

pub(crate) fn typify_stmt(stmt: &mut Stmt, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    drive(stmt, |stmt| match stmt {
        Stmt::VarDecl(s) => var_decl::typify(s, ctx, payload),
        Stmt::Assignment(s) => assignment::typify(s, ctx, payload),
        Stmt::FunctionDef(s) => function_def::typify(s, ctx, payload),
        Stmt::StructDecl(s) => {
            let fields = match resolve_fields(&mut s.fields, ctx, payload) {
                Some(f) => f,
                None => return Outcome::Error,
            };
            let ty = Type::struct_(fields, s.span.clone());
            if ctx.scope.add_type(&s.name, ty).is_err() {
                return error(
                    payload,
                    TypeError::Mismatch {
                        expected: "a unique type name".into(),
                        found: s.name.clone(),
                        span: s.span.clone(),
                    },
                );
            }
            Outcome::Continue
        }
        Stmt::ExprStmt(e) => typify_expr_as_statement(e, ctx, payload),
        Stmt::Print(s) => simple_stmt::typify_print(s, ctx, payload),
        Stmt::Raise(s) => simple_stmt::typify_raise(s, ctx, payload),
        Stmt::TryCatch(s) => simple_stmt::typify_try_catch(s, ctx, payload),
        Stmt::Return(s) => simple_stmt::typify_return(s, ctx, payload),
        Stmt::Loop(s) => loop_stmt::typify(s, ctx, payload),
        Stmt::Block(b) => {
            typify_block(b, ctx, payload);
            Outcome::Continue
        }
    })
}

/// Typifies a sub-expression (never in statement position).
pub(crate) fn typify_expr(expr: &mut Expr, ctx: &mut Context, payload: &mut Payload) -> Outcome {
    typify_expr_inner(expr, ctx, payload, false)
}

/// Typifies an expression used directly as a statement (`Stmt::ExprStmt`),
/// the one place a void-returning call is legal (spec.md §4.2 point 9).
pub(crate) fn typify_expr_as_statement(
    expr: &mut Expr,
    ctx: &mut Context,
    payload: &mut Payload,
) -> Outcome {
    typify_expr_inner(expr, ctx, payload, true)
}

fn typify_expr_inner(
    expr: &mut Expr,
    ctx: &mut Context,
    payload: &mut Payload,
    in_statement_position: bool,
) -> Outcome {
    drive(expr, |expr| {
        if matches!(expr, Expr::Isa(_)) {
            // `isa` may rewrite `*expr` wholesale (spec.md §3.3's constant
            // folding), so it takes the whole node rather than a typed
            // sub-struct and handles its own info-slot assignment.
            return isa_cast::typify_isa(expr, ctx, payload);
        }
        let result = match expr {
            Expr::IntLiteral(e) => Some(Type::integral(e.size, e.signed, e.span.clone())),
            Expr::StringLiteral(e) => Some(Type::string(e.span.clone())),
            Expr::Var(e) => var_ref::typify(e, ctx, payload),
            Expr::Unary(e) => unary::typify(e, ctx, payload),
            Expr::Binary(e) => binary::typify(e, ctx, payload),
            Expr::Concat(e) => concat::typify(e, ctx, payload),
            Expr::Isa(_) => unreachable!("handled above"),
            Expr::Cast(e) => isa_cast::typify_cast(e, ctx, payload),
            Expr::Sizeof(e) => sizeof::typify(e, ctx, payload),
            Expr::OffsetLiteral(e) => offset_literal::typify(e, ctx, payload),
            Expr::ArrayLiteral(e) => array_literal::typify(e, ctx, payload),
            Expr::Indexer(e) => indexer::typify(e, ctx, payload),
            Expr::Trimmer(e) => trimmer::typify(e, ctx, payload),
            Expr::StructLiteral(e) => struct_literal::typify_literal(e, ctx, payload),
            Expr::StructConstructor(e) => struct_literal::typify_constructor(e, ctx, payload),
            Expr::Call(e) => function_call::typify(e, ctx, payload, in_statement_position),
            Expr::FieldAccess(e) => struct_ref::typify(e, ctx, payload),
            Expr::Attribute(e) => attribute::typify(e, ctx, payload),
            Expr::Map(e) => map::typify(e, ctx, payload),
        };
        match result {
            Some(ty) => {
                expr.info().set(ty);
                Outcome::Continue
            }
            None => Outcome::Error,
        }
    })
}

/// Resolves a type annotation to a concrete type, applying the
/// integral-type-range and sized-array-type validators inline (spec.md
/// §4.2's last two handler entries operate on exactly this conversion).
pub(crate) fn resolve_type_expr(
    te: &mut TypeExpr,
    ctx: &mut Context,
    payload: &mut Payload,
) -> Option<TypeRef> {
    match te {
        TypeExpr::Integral { size, signed, span } => {
            if *size < 1 || *size > 64 {
                return error_none(
                    payload,
                    TypeError::IntegralWidthOutOfRange {
                        size: *size,
                        span: span.clone(),
                    },
                );
            }
            Some(Type::integral(*size as u8, *signed, span.clone()))
        }
        TypeExpr::String { span } => Some(Type::string(span.clone())),
        TypeExpr::Array { elem, nelem, span } => {
            let elem_ty = resolve_type_expr(elem, ctx, payload)?;
            let nelem_info = match nelem {
                None => crate::types::ArrayLength::Unsized,
                Some(count_expr) => {
                    typify_expr(count_expr, ctx, payload);
                    let count_ty = count_expr.ty()?;
                    if !count_ty.is_integral() && !count_ty.is_offset() {
                        return error_none(
                            payload,
                            TypeError::Mismatch {
                                expected: "integral or offset".into(),
                                found: format!("{count_ty:?}"),
                                span: count_expr.span().clone(),
                            },
                        );
                    }
                    crate::types::ArrayLength::Sized {
                        constant: is_constant_expr(count_expr),
                    }
                }
            };
            Some(Type::array(elem_ty, nelem_info, span.clone()))
        }
        TypeExpr::Struct { fields, span } => {
            let fields = resolve_fields(fields, ctx, payload)?;
            Some(Type::struct_(fields, span.clone()))
        }
        TypeExpr::Offset { base, unit, span } => {
            let base_ty = resolve_type_expr(base, ctx, payload)?;
            if !base_ty.is_integral() {
                return error_none(
                    payload,
                    TypeError::Mismatch {
                        expected: "integral base type".into(),
                        found: format!("{base_ty:?}"),
                        span: span.clone(),
                    },
                );
            }
            let unit_value = match unit.as_ref() {
                Expr::IntLiteral(lit) if lit.value > 0 => lit.value as u64,
                _ => {
                    return error_none(
                        payload,
                        TypeError::Mismatch {
                            expected: "a positive constant integer unit".into(),
                            found: "non-constant or non-positive expression".into(),
                            span: span.clone(),
                        },
                    )
                }
            };
            Some(Type::offset(base_ty, unit_value, span.clone()))
        }
        TypeExpr::Function { ret, args, span } => {
            let ret_ty = resolve_type_expr(ret, ctx, payload)?;
            let mut out = Vec::with_capacity(args.len());
            for arg in args {
                let ty = resolve_type_expr(&mut arg.ty, ctx, payload)?;
                out.push(FunctionArg {
                    ty,
                    name: arg.name.clone(),
                    optional: arg.optional,
                    vararg: arg.vararg,
                });
            }
            Some(Type::function(ret_ty, out, span.clone()))
        }
        TypeExpr::Any { span } => Some(Type::any(span.clone())),
        TypeExpr::Void { span } => Some(Type::void(span.clone())),
        TypeExpr::Named { name, span } => match ctx.scope.get_type(name.clone()) {
            Some(ty) => Some(ty),
            None => error_none(
                payload,
                TypeError::UnknownType {
                    name: name.clone(),
                    span: span.clone(),
                },
            ),
        },
    }
}

fn resolve_fields(
    fields: &mut [StructFieldDecl],
    ctx: &mut Context,
    payload: &mut Payload,
) -> Option<Vec<crate::types::StructField>> {
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let span = field.ty.span().clone();
        let ty = resolve_type_expr(field.ty.as_mut(), ctx, payload)?;
        if ty.is_function() {
            error_none::<()>(payload, TypeError::FunctionTypeAsField { span });
            return None;
        }
        out.push(crate::types::StructField {
            name: field.name.clone(),
            ty,
        });
    }
    Some(out)
}

/// A sub-expression counts as constant, for `Array.complete` purposes, if it
/// is built entirely from literals — no variable reference, call or field
/// access can appear in it. This is deliberately conservative: spec.md never
/// asks for full constant folding outside `isa`/`cast`, so anything beyond
/// literal arithmetic is treated as non-constant rather than guessed at.
pub(crate) fn is_constant_expr(expr: &Expr) -> bool {
    match expr {
        Expr::IntLiteral(_) => true,
        Expr::OffsetLiteral(o) => is_constant_expr(&o.magnitude),
        Expr::Unary(u) => is_constant_expr(&u.operand),
        Expr::Binary(b) => is_constant_expr(&b.left) && is_constant_expr(&b.right),
        _ => false,
    }
}

/// The promotion exceptions shared by function-call argument matching
/// (spec.md §4.2 point 7) and assignment/return (§4.2 "Assignment", "return
/// e?"): beyond exact equality, `integral → integral` and `offset → offset`
/// are accepted silently, as is anything flowing into a `formal`/target
/// typed `any`. Narrowing *from* `any` into a concrete type is not a
/// promotion — it needs an explicit `cast`.
pub(crate) fn is_promotable(actual: &TypeRef, formal: &TypeRef) -> bool {
    actual == formal
        || (actual.is_integral() && formal.is_integral())
        || (actual.is_offset() && formal.is_offset())
        || formal.is_any()
}

pub(crate) fn error(payload: &mut Payload, err: TypeError) -> Outcome {
    payload.report(err);
    Outcome::Error
}

fn error_none<T>(payload: &mut Payload, err: TypeError) -> Option<T> {
    payload.report(err);
    None
}
