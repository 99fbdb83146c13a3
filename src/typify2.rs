//! Typify-2: the completeness-and-validity traversal (spec.md §2, §4.3).
//!
//! Runs only after typify-1 has typed the whole tree without error (spec.md
//! §5). It never assigns a new type to anything — every `Expr`/`Stmt`
//! already carries its type from typify-1 — it only:
//!
//! 1. computes and caches `Array`/`Struct` completeness (§3.3, §4.3 point 1),
//! 2. resolves the completeness of a `sizeof(type)` operand (§4.3 point 2),
//! 3. rejects a sized array type used as a function-argument type (§4.3
//!    point 3, "contextual validity" — legal as a standalone type, illegal
//!    in that one position).
//!
//! No `Context`/`Scope` is needed here: typify-1 already resolved every
//! named type reference to a concrete `TypeRef`, so there is nothing left
//! to look up.

use crate::ast::{
    Block, Expr, LoopKind, Program, SizeofOperand, Stmt,
};
use crate::diagnostics::TypeError;
use crate::pass::Payload;
use crate::types::{ArrayLength, TypeKind, TypeRef};

pub fn run(program: &mut Program, payload: &mut Payload) {
    for stmt in &mut program.stmts {
        walk_stmt(stmt, payload);
    }
}

fn walk_block(block: &mut Block, payload: &mut Payload) {
    for stmt in &mut block.stmts {
        walk_stmt(stmt, payload);
    }
}

fn walk_stmt(stmt: &mut Stmt, payload: &mut Payload) {
    match stmt {
        Stmt::VarDecl(s) => walk_expr(&mut s.initializer, payload),
        Stmt::Assignment(s) => {
            walk_expr(&mut s.target, payload);
            walk_expr(&mut s.value, payload);
        }
        Stmt::FunctionDef(s) => {
            if let Some(ty) = s.info.get() {
                cache_complete(&ty, payload);
            }
            for stmt in &mut s.body.stmts {
                walk_stmt(stmt, payload);
            }
        }
        // A struct declaration introduces no expression of its own; any
        // type built from it is cached wherever it's actually used.
        Stmt::StructDecl(_) => {}
        Stmt::ExprStmt(e) => walk_expr(e, payload),
        Stmt::Print(s) => walk_expr(&mut s.value, payload),
        Stmt::Raise(s) => {
            if let Some(value) = &mut s.value {
                walk_expr(value, payload);
            }
        }
        Stmt::TryCatch(s) => {
            walk_block(&mut s.try_block, payload);
            if let Some(cond) = &mut s.catch_cond {
                walk_expr(cond, payload);
            }
            walk_block(&mut s.catch_block, payload);
        }
        Stmt::Return(s) => {
            if let Some(value) = &mut s.value {
                walk_expr(value, payload);
            }
        }
        Stmt::Loop(s) => {
            match &mut s.kind {
                LoopKind::For { init, cond, step } => {
                    if let Some(init) = init {
                        walk_stmt(init, payload);
                    }
                    if let Some(cond) = cond {
                        walk_expr(cond, payload);
                    }
                    if let Some(step) = step {
                        walk_stmt(step, payload);
                    }
                }
                LoopKind::While { cond } => walk_expr(cond, payload),
                LoopKind::ForIn { container, .. } => walk_expr(container, payload),
            }
            walk_block(&mut s.body, payload);
        }
        Stmt::Block(b) => walk_block(b, payload),
    }
}

fn walk_expr(expr: &mut Expr, payload: &mut Payload) {
    if let Some(ty) = expr.ty() {
        cache_complete(&ty, payload);
    }

    match expr {
        Expr::IntLiteral(_) | Expr::StringLiteral(_) | Expr::Var(_) => {}
        Expr::Unary(e) => walk_expr(&mut e.operand, payload),
        Expr::Binary(e) => {
            walk_expr(&mut e.left, payload);
            walk_expr(&mut e.right, payload);
        }
        Expr::Concat(e) => {
            walk_expr(&mut e.left, payload);
            walk_expr(&mut e.right, payload);
        }
        Expr::Isa(e) => walk_expr(&mut e.operand, payload),
        Expr::Cast(e) => walk_expr(&mut e.operand, payload),
        Expr::Sizeof(e) => {
            match &mut e.operand {
                SizeofOperand::Expr(operand) => walk_expr(operand, payload),
                SizeofOperand::Type(_) => {
                    let operand_ty = e.operand_type.borrow().clone();
                    if let Some(operand_ty) = operand_ty {
                        *e.operand_type_complete.borrow_mut() = Some(cache_complete(&operand_ty, payload));
                    }
                }
            }
        }
        Expr::OffsetLiteral(e) => walk_expr(&mut e.magnitude, payload),
        Expr::ArrayLiteral(e) => {
            for elem in &mut e.elements {
                walk_expr(elem, payload);
            }
        }
        Expr::Indexer(e) => {
            walk_expr(&mut e.container, payload);
            walk_expr(&mut e.index, payload);
        }
        Expr::Trimmer(e) => {
            walk_expr(&mut e.container, payload);
            walk_expr(&mut e.from, payload);
            walk_expr(&mut e.to, payload);
        }
        Expr::StructLiteral(e) => {
            for elem in &mut e.elems {
                walk_expr(&mut elem.value, payload);
            }
        }
        Expr::StructConstructor(e) => {
            for elem in &mut e.elems {
                walk_expr(&mut elem.value, payload);
            }
        }
        Expr::Call(e) => {
            walk_expr(&mut e.callee, payload);
            for arg in &mut e.args {
                walk_expr(&mut arg.value, payload);
            }
        }
        Expr::FieldAccess(e) => walk_expr(&mut e.receiver, payload),
        Expr::Attribute(e) => walk_expr(&mut e.receiver, payload),
        Expr::Map(e) => walk_expr(&mut e.offset, payload),
    }
}

/// Computes completeness bottom-up, caching every `Array`/`Struct` node
/// reached along the way, and flags any sized array type found as a
/// function-argument type (spec.md §4.3 point 3).
fn cache_complete(ty: &TypeRef, payload: &mut Payload) -> bool {
    match &ty.kind {
        TypeKind::Integral { .. } | TypeKind::String => true,
        TypeKind::Array { elem, nelem, complete } => {
            let elem_complete = cache_complete(elem, payload);
            let result = matches!(nelem, ArrayLength::Sized { constant: true }) && elem_complete;
            complete.set(Some(result));
            result
        }
        TypeKind::Struct { fields, complete } => {
            let mut result = true;
            for field in fields {
                result &= cache_complete(&field.ty, payload);
            }
            complete.set(Some(result));
            result
        }
        TypeKind::Offset { base, .. } => {
            cache_complete(base, payload);
            true
        }
        TypeKind::Function { ret, args } => {
            cache_complete(ret, payload);
            for arg in args {
                cache_complete(&arg.ty, payload);
                if matches!(
                    &arg.ty.kind,
                    TypeKind::Array {
                        nelem: ArrayLength::Sized { .. },
                        ..
                    }
                ) {
                    payload.report(TypeError::SizedArrayInFunctionArg {
                        span: arg.ty.span.clone(),
                    });
                }
            }
            false
        }
        TypeKind::Any | TypeKind::Void => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        ArrayLiteralExpr, Block, FunctionArgDecl, FunctionDef, Program, Stmt, TypeExpr, TypeSlot,
    };
    use crate::diagnostics::CollectingSink;
    use crate::pass::{Context, Payload, TypifyOptions};
    use crate::span::Span;
    use crate::typify1;

    fn sp() -> Span {
        Span::default()
    }

    #[test]
    fn sized_constant_array_is_complete() {
        let mut program = Program {
            stmts: vec![Stmt::ExprStmt(Expr::ArrayLiteral(ArrayLiteralExpr {
                elements: vec![Expr::IntLiteral(crate::ast::IntLiteral {
                    value: 1,
                    size: 32,
                    signed: true,
                    info: TypeSlot::empty(),
                    span: sp(),
                })],
                info: TypeSlot::empty(),
                span: sp(),
            }))],
        };
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, TypifyOptions::default());
        let mut ctx = Context::new();
        typify1::run(&mut program, &mut ctx, &mut payload);
        assert_eq!(payload.errors, 0);
        run(&mut program, &mut payload);

        let Stmt::ExprStmt(e) = &program.stmts[0] else {
            panic!("expected expr stmt");
        };
        // An array literal is unsized by construction, so never complete.
        assert!(!e.ty().unwrap().is_complete());
    }

    #[test]
    fn sized_array_function_arg_is_rejected() {
        let mut program = Program {
            stmts: vec![Stmt::FunctionDef(FunctionDef {
                name: "f".into(),
                params: vec![FunctionArgDecl {
                    name: Some("xs".into()),
                    ty: Box::new(TypeExpr::Array {
                        elem: Box::new(TypeExpr::Integral {
                            size: 8,
                            signed: false,
                            span: sp(),
                        }),
                        nelem: Some(Box::new(Expr::IntLiteral(crate::ast::IntLiteral {
                            value: 4,
                            size: 32,
                            signed: true,
                            info: TypeSlot::empty(),
                            span: sp(),
                        }))),
                        span: sp(),
                    }),
                    optional: false,
                    vararg: false,
                }],
                return_type: Box::new(TypeExpr::Void { span: sp() }),
                body: Block {
                    stmts: vec![],
                    span: sp(),
                },
                info: TypeSlot::empty(),
                span: sp(),
            })],
        };
        let mut sink = CollectingSink::default();
        let mut payload = Payload::new(&mut sink, TypifyOptions::default());
        let mut ctx = Context::new();
        typify1::run(&mut program, &mut ctx, &mut payload);
        assert_eq!(payload.errors, 0);
        run(&mut program, &mut payload);

        let error_count = payload.errors;
        drop(payload);
        assert_eq!(error_count, 1);
        assert!(matches!(sink.errors[0], TypeError::SizedArrayInFunctionArg { .. }));
    }
}
