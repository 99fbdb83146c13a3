//! End-to-end scenarios exercising `Pass::run` against hand-built programs,
//! standing in for the parser output spec.md §1 scopes out (see the
//! testable scenarios of spec.md §8).

use pkl_typify::ast::{
    Argument, BinaryExpr, BinaryOp, Block, CallExpr, Expr, FunctionArgDecl, FunctionDef,
    IntLiteral, OffsetLiteralExpr, Program, Stmt, TypeExpr, TypeSlot, VarDeclStmt,
};
use pkl_typify::span::Span;
use pkl_typify::{CollectingSink, Pass, TypeError, TypifyOptions};

fn sp() -> Span {
    Span::default()
}

fn int_lit(value: i64, size: u8, signed: bool) -> Expr {
    Expr::IntLiteral(IntLiteral {
        value,
        size,
        signed,
        info: TypeSlot::empty(),
        span: sp(),
    })
}

fn offset_lit(size: u8, signed: bool, unit: u64) -> Expr {
    Expr::OffsetLiteral(OffsetLiteralExpr {
        magnitude: Box::new(int_lit(1, size, signed)),
        unit,
        info: TypeSlot::empty(),
        span: sp(),
    })
}

fn run(program: &mut Program) -> (bool, CollectingSink) {
    let mut sink = CollectingSink::default();
    let ok = Pass::run(program, &mut sink, TypifyOptions::default());
    (ok, sink)
}

/// scenario 1: `1 + 2` synthesizes `int<32>`.
#[test]
fn one_plus_two_is_signed_32() {
    let mut program = Program {
        stmts: vec![Stmt::ExprStmt(Expr::Binary(BinaryExpr {
            op: BinaryOp::Add,
            left: Box::new(int_lit(1, 32, true)),
            right: Box::new(int_lit(2, 32, true)),
            info: TypeSlot::empty(),
            span: sp(),
        }))],
    };
    let (ok, _) = run(&mut program);
    assert!(ok);
    let Stmt::ExprStmt(e) = &program.stmts[0] else {
        panic!("expected expr stmt");
    };
    assert_eq!(e.ty().unwrap().as_integral(), Some((32, true)));
}

/// scenario 2: mixed width/sign promotes to the wider, unsigned-contagious type.
#[test]
fn mixed_width_and_sign_promotes_to_uint16() {
    let mut program = Program {
        stmts: vec![Stmt::ExprStmt(Expr::Binary(BinaryExpr {
            op: BinaryOp::Add,
            left: Box::new(int_lit(1, 16, false)),
            right: Box::new(int_lit(2, 8, true)),
            info: TypeSlot::empty(),
            span: sp(),
        }))],
    };
    let (ok, _) = run(&mut program);
    assert!(ok);
    let Stmt::ExprStmt(e) = &program.stmts[0] else {
        panic!("expected expr stmt");
    };
    assert_eq!(e.ty().unwrap().as_integral(), Some((16, false)));
}

/// scenario 3: `offset<uint<32>,8> x - offset<uint<32>,8> y` keeps the
/// promoted `uint<32>` base but forces the result's unit to bits, not the
/// operands' byte unit.
#[test]
fn offset_subtraction_base_is_unsigned_32_with_unit_forced_to_bits() {
    let mut program = Program {
        stmts: vec![Stmt::ExprStmt(Expr::Binary(BinaryExpr {
            op: BinaryOp::Sub,
            left: Box::new(offset_lit(32, false, 8)),
            right: Box::new(offset_lit(32, false, 8)),
            info: TypeSlot::empty(),
            span: sp(),
        }))],
    };
    let (ok, sink) = run(&mut program);
    assert!(ok, "unexpected errors: {:?}", sink.errors);
    let Stmt::ExprStmt(e) = &program.stmts[0] else {
        panic!("expected expr stmt");
    };
    let ty = e.ty().unwrap();
    let (base, unit) = ty.as_offset().unwrap();
    assert_eq!(base.as_integral(), Some((32, false)));
    assert_eq!(unit, 1);
}

/// scenario 6: an integral type annotation outside [1,64] is rejected.
#[test]
fn out_of_range_integral_width_is_rejected() {
    let mut program = Program {
        stmts: vec![Stmt::VarDecl(VarDeclStmt {
            name: "x".into(),
            mutable: false,
            declared_type: Some(Box::new(TypeExpr::Integral {
                size: 65,
                signed: false,
                span: sp(),
            })),
            initializer: int_lit(1, 32, true),
            span: sp(),
        })],
    };
    let (ok, sink) = run(&mut program);
    assert!(!ok);
    assert!(sink
        .errors
        .iter()
        .any(|e| matches!(e, TypeError::IntegralWidthOutOfRange { size: 65, .. })));
}

/// scenario 4: named-argument reordering — a call can supply its two
/// arguments in either order as long as both are named.
#[test]
fn named_arguments_are_reordered_to_formal_position() {
    let mut program = Program {
        stmts: vec![
            Stmt::FunctionDef(FunctionDef {
                name: "f".into(),
                params: vec![
                    FunctionArgDecl {
                        name: Some("a".into()),
                        ty: Box::new(TypeExpr::Integral {
                            size: 32,
                            signed: true,
                            span: sp(),
                        }),
                        optional: false,
                        vararg: false,
                    },
                    FunctionArgDecl {
                        name: Some("b".into()),
                        ty: Box::new(TypeExpr::Integral {
                            size: 32,
                            signed: true,
                            span: sp(),
                        }),
                        optional: false,
                        vararg: false,
                    },
                ],
                return_type: Box::new(TypeExpr::Void { span: sp() }),
                body: Block {
                    stmts: vec![],
                    span: sp(),
                },
                info: TypeSlot::empty(),
                span: sp(),
            }),
            Stmt::ExprStmt(Expr::Call(CallExpr {
                callee: Box::new(Expr::Var(pkl_typify::ast::VarExpr {
                    name: "f".into(),
                    info: TypeSlot::empty(),
                    span: sp(),
                })),
                args: vec![
                    Argument {
                        name: Some("b".into()),
                        value: int_lit(2, 32, true),
                    },
                    Argument {
                        name: Some("a".into()),
                        value: int_lit(1, 32, true),
                    },
                ],
                info: TypeSlot::empty(),
                span: sp(),
            })),
        ],
    };
    let (ok, sink) = run(&mut program);
    assert!(ok, "unexpected errors: {:?}", sink.errors);
}

/// scenario 5: calling a void function in expression (non-statement)
/// position is rejected.
#[test]
fn void_call_in_expression_position_is_rejected() {
    let mut program = Program {
        stmts: vec![
            Stmt::FunctionDef(FunctionDef {
                name: "f".into(),
                params: vec![],
                return_type: Box::new(TypeExpr::Void { span: sp() }),
                body: Block {
                    stmts: vec![],
                    span: sp(),
                },
                info: TypeSlot::empty(),
                span: sp(),
            }),
            Stmt::VarDecl(VarDeclStmt {
                name: "x".into(),
                mutable: false,
                declared_type: None,
                initializer: Expr::Call(CallExpr {
                    callee: Box::new(Expr::Var(pkl_typify::ast::VarExpr {
                        name: "f".into(),
                        info: TypeSlot::empty(),
                        span: sp(),
                    })),
                    args: vec![],
                    info: TypeSlot::empty(),
                    span: sp(),
                }),
                span: sp(),
            }),
        ],
    };
    let (ok, sink) = run(&mut program);
    assert!(!ok);
    assert!(sink
        .errors
        .iter()
        .any(|e| matches!(e, TypeError::VoidInExpressionPosition { .. })));
}

/// Calling a void function directly as a statement is fine — the one
/// position spec.md §4.2 point 9 carves out as legal.
#[test]
fn void_call_as_a_bare_statement_is_accepted() {
    let mut program = Program {
        stmts: vec![
            Stmt::FunctionDef(FunctionDef {
                name: "f".into(),
                params: vec![],
                return_type: Box::new(TypeExpr::Void { span: sp() }),
                body: Block {
                    stmts: vec![],
                    span: sp(),
                },
                info: TypeSlot::empty(),
                span: sp(),
            }),
            Stmt::ExprStmt(Expr::Call(CallExpr {
                callee: Box::new(Expr::Var(pkl_typify::ast::VarExpr {
                    name: "f".into(),
                    info: TypeSlot::empty(),
                    span: sp(),
                })),
                args: vec![],
                info: TypeSlot::empty(),
                span: sp(),
            })),
        ],
    };
    let (ok, sink) = run(&mut program);
    assert!(ok, "unexpected errors: {:?}", sink.errors);
}
