//! The AST shape this core consumes.
//!
//! Lexing, parsing and AST construction are out of scope (spec.md §1): a
//! real pipeline hands typify-1 an AST built by an external parser. This
//! module defines that AST's node shapes so the crate is self-contained and
//! testable, in the same spirit `why_lib::parser::ast` defines the node
//! shapes its own typechecker consumes.
//!
//! Every expression node carries a `TypeSlot` — an `Rc<RefCell<Option<TypeRef>>>`
//! — filled in exactly once by typify-1 (spec.md §3.2), the same mutable
//! type-slot-then-freeze pattern as `why_lib::typechecker::TypeInformation`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::span::Span;
use crate::types::TypeRef;

#[derive(Clone, Default)]
pub struct TypeSlot(Rc<RefCell<Option<TypeRef>>>);

impl TypeSlot {
    pub fn empty() -> Self {
        TypeSlot(Rc::new(RefCell::new(None)))
    }

    pub fn get(&self) -> Option<TypeRef> {
        self.0.borrow().clone()
    }

    pub fn set(&self, ty: TypeRef) {
        *self.0.borrow_mut() = Some(ty);
    }
}

// ---------------------------------------------------------------------
// Type annotations (what the parser hands us for `T` in `x: T`, `T { ... }`,
// function parameter/return types, cast targets, and so on).
// ---------------------------------------------------------------------

pub struct StructFieldDecl {
    pub name: Option<String>,
    pub ty: Box<TypeExpr>,
}

pub struct FunctionArgDecl {
    pub name: Option<String>,
    pub ty: Box<TypeExpr>,
    pub optional: bool,
    pub vararg: bool,
}

pub enum TypeExpr {
    Integral {
        size: u32,
        signed: bool,
        span: Span,
    },
    String {
        span: Span,
    },
    Array {
        elem: Box<TypeExpr>,
        nelem: Option<Box<Expr>>,
        span: Span,
    },
    Struct {
        fields: Vec<StructFieldDecl>,
        span: Span,
    },
    Offset {
        base: Box<TypeExpr>,
        unit: Box<Expr>,
        span: Span,
    },
    Function {
        ret: Box<TypeExpr>,
        args: Vec<FunctionArgDecl>,
        span: Span,
    },
    Any {
        span: Span,
    },
    Void {
        span: Span,
    },
    /// A reference to a previously declared named struct type.
    Named {
        name: String,
        span: Span,
    },
}

impl TypeExpr {
    pub fn span(&self) -> &Span {
        match self {
            TypeExpr::Integral { span, .. }
            | TypeExpr::String { span }
            | TypeExpr::Array { span, .. }
            | TypeExpr::Struct { span, .. }
            | TypeExpr::Offset { span, .. }
            | TypeExpr::Function { span, .. }
            | TypeExpr::Any { span }
            | TypeExpr::Void { span }
            | TypeExpr::Named { span, .. } => span,
        }
    }
}

// ---------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------

pub struct IntLiteral {
    pub value: i64,
    pub size: u8,
    pub signed: bool,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct StringLiteral {
    pub value: String,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct VarExpr {
    pub name: String,
    pub info: TypeSlot,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
    BNot,
}

pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub info: TypeSlot,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct ConcatExpr {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct IsaExpr {
    pub operand: Box<Expr>,
    pub target: Box<TypeExpr>,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct CastExpr {
    pub operand: Box<Expr>,
    pub target: Box<TypeExpr>,
    pub info: TypeSlot,
    pub span: Span,
}

pub enum SizeofOperand {
    Expr(Box<Expr>),
    Type(Box<TypeExpr>),
}

pub struct SizeofExpr {
    pub operand: SizeofOperand,
    /// Set by typify-1 when `operand` is `SizeofOperand::Type`, so typify-2
    /// has something to compute completeness from without re-resolving.
    pub operand_type: RefCell<Option<TypeRef>>,
    /// Written by typify-2 only, per spec.md §4.3 point 2: completeness of
    /// the operand type when `sizeof` is applied to a type rather than a
    /// value.
    pub operand_type_complete: RefCell<Option<bool>>,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct OffsetLiteralExpr {
    pub magnitude: Box<Expr>,
    pub unit: u64,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct ArrayLiteralExpr {
    pub elements: Vec<Expr>,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct IndexerExpr {
    pub container: Box<Expr>,
    pub index: Box<Expr>,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct TrimmerExpr {
    pub container: Box<Expr>,
    pub from: Box<Expr>,
    pub to: Box<Expr>,
    pub info: TypeSlot,
    pub span: Span,
}

/// One `name: value` pair inside a struct literal. Carries its own type
/// attribute (copied from `value`'s), the "struct-elem" handler of spec.md
/// §4.2's handler list, distinct from the struct literal as a whole.
pub struct StructElem {
    pub name: Option<String>,
    pub value: Expr,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct StructLiteralExpr {
    pub elems: Vec<StructElem>,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct StructConstructorExpr {
    pub type_name: Box<TypeExpr>,
    pub elems: Vec<StructElem>,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct Argument {
    pub name: Option<String>,
    pub value: Expr,
}

pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Argument>,
    pub info: TypeSlot,
    pub span: Span,
}

/// `s.f`, spec.md's "struct-ref" handler.
pub struct FieldAccessExpr {
    pub receiver: Box<Expr>,
    pub field: String,
    pub info: TypeSlot,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Size,
    Signed,
    Magnitude,
    Unit,
    Length,
    Alignment,
    Offset,
    Mapped,
}

pub struct AttributeExpr {
    pub receiver: Box<Expr>,
    pub attr: AttributeKind,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct MapExpr {
    pub type_name: Box<TypeExpr>,
    pub offset: Box<Expr>,
    pub info: TypeSlot,
    pub span: Span,
}

pub enum Expr {
    IntLiteral(IntLiteral),
    StringLiteral(StringLiteral),
    Var(VarExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Concat(ConcatExpr),
    Isa(IsaExpr),
    Cast(CastExpr),
    Sizeof(SizeofExpr),
    OffsetLiteral(OffsetLiteralExpr),
    ArrayLiteral(ArrayLiteralExpr),
    Indexer(IndexerExpr),
    Trimmer(TrimmerExpr),
    StructLiteral(StructLiteralExpr),
    StructConstructor(StructConstructorExpr),
    Call(CallExpr),
    FieldAccess(FieldAccessExpr),
    Attribute(AttributeExpr),
    Map(MapExpr),
}

impl Expr {
    pub fn info(&self) -> &TypeSlot {
        match self {
            Expr::IntLiteral(e) => &e.info,
            Expr::StringLiteral(e) => &e.info,
            Expr::Var(e) => &e.info,
            Expr::Unary(e) => &e.info,
            Expr::Binary(e) => &e.info,
            Expr::Concat(e) => &e.info,
            Expr::Isa(e) => &e.info,
            Expr::Cast(e) => &e.info,
            Expr::Sizeof(e) => &e.info,
            Expr::OffsetLiteral(e) => &e.info,
            Expr::ArrayLiteral(e) => &e.info,
            Expr::Indexer(e) => &e.info,
            Expr::Trimmer(e) => &e.info,
            Expr::StructLiteral(e) => &e.info,
            Expr::StructConstructor(e) => &e.info,
            Expr::Call(e) => &e.info,
            Expr::FieldAccess(e) => &e.info,
            Expr::Attribute(e) => &e.info,
            Expr::Map(e) => &e.info,
        }
    }

    pub fn ty(&self) -> Option<TypeRef> {
        self.info().get()
    }

    pub fn span(&self) -> &Span {
        match self {
            Expr::IntLiteral(e) => &e.span,
            Expr::StringLiteral(e) => &e.span,
            Expr::Var(e) => &e.span,
            Expr::Unary(e) => &e.span,
            Expr::Binary(e) => &e.span,
            Expr::Concat(e) => &e.span,
            Expr::Isa(e) => &e.span,
            Expr::Cast(e) => &e.span,
            Expr::Sizeof(e) => &e.span,
            Expr::OffsetLiteral(e) => &e.span,
            Expr::ArrayLiteral(e) => &e.span,
            Expr::Indexer(e) => &e.span,
            Expr::Trimmer(e) => &e.span,
            Expr::StructLiteral(e) => &e.span,
            Expr::StructConstructor(e) => &e.span,
            Expr::Call(e) => &e.span,
            Expr::FieldAccess(e) => &e.span,
            Expr::Attribute(e) => &e.span,
            Expr::Map(e) => &e.span,
        }
    }
}

// ---------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------

pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

pub struct VarDeclStmt {
    pub name: String,
    pub mutable: bool,
    pub declared_type: Option<Box<TypeExpr>>,
    pub initializer: Expr,
    pub span: Span,
}

pub struct AssignmentStmt {
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
}

pub struct FunctionDef {
    pub name: String,
    pub params: Vec<FunctionArgDecl>,
    pub return_type: Box<TypeExpr>,
    pub body: Block,
    pub info: TypeSlot,
    pub span: Span,
}

pub struct StructDecl {
    pub name: String,
    pub fields: Vec<StructFieldDecl>,
    pub span: Span,
}

pub struct PrintStmt {
    pub value: Expr,
    pub span: Span,
}

pub struct RaiseStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

pub struct TryCatchStmt {
    pub try_block: Block,
    pub catch_arg: Option<String>,
    pub catch_cond: Option<Expr>,
    pub catch_block: Block,
    pub span: Span,
}

pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

pub enum LoopKind {
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Box<Expr>>,
        step: Option<Box<Stmt>>,
    },
    While {
        cond: Box<Expr>,
    },
    ForIn {
        var_name: String,
        container: Box<Expr>,
    },
}

pub struct LoopStmt {
    pub kind: LoopKind,
    pub body: Block,
    pub span: Span,
}

pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    FunctionDef(FunctionDef),
    StructDecl(StructDecl),
    ExprStmt(Expr),
    Print(PrintStmt),
    Raise(RaiseStmt),
    TryCatch(TryCatchStmt),
    Return(ReturnStmt),
    Loop(LoopStmt),
    Block(Block),
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::VarDecl(s) => &s.span,
            Stmt::Assignment(s) => &s.span,
            Stmt::FunctionDef(s) => &s.span,
            Stmt::StructDecl(s) => &s.span,
            Stmt::ExprStmt(e) => e.span(),
            Stmt::Print(s) => &s.span,
            Stmt::Raise(s) => &s.span,
            Stmt::TryCatch(s) => &s.span,
            Stmt::Return(s) => &s.span,
            Stmt::Loop(s) => &s.span,
            Stmt::Block(b) => &b.span,
        }
    }
}

pub struct Program {
    pub stmts: Vec<Stmt>,
}
