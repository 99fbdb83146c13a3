//! The semantic type lattice produced by typify-1 and refined by typify-2.
//!
//! Mirrors `why_lib::typechecker::types::Type` in spirit (a plain value enum
//! with hand-written structural equality and `Debug` pretty-printing) but
//! generalized per spec.md §3.1: integrals carry an explicit bit width and
//! signedness instead of being a fixed set of primitives, offsets carry a
//! base type and a unit, and `Array`/`Struct` carry a `complete` flag that
//! is written exactly once, by typify-2, never by typify-1 (spec.md §3.3).
//!
//! Type nodes are shared via `Rc` rather than deep-cloned (spec.md §3.2,
//! §5 "Ownership") — two expressions that synthesize the same type each
//! hold a clone of the same `Rc<Type>`.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::span::Span;

pub type TypeRef = Rc<Type>;

#[derive(Clone, Debug)]
pub struct StructField {
    pub name: Option<String>,
    pub ty: TypeRef,
}

#[derive(Clone, Debug)]
pub struct FunctionArg {
    pub ty: TypeRef,
    pub name: Option<String>,
    pub optional: bool,
    pub vararg: bool,
}

/// Whether an array type carries an element-count expression, and — once
/// typify-1 has typed that expression — whether it is constant. `Unsized`
/// arrays (no `nelem` at all) are never complete regardless of their
/// element type (spec.md §3.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayLength {
    Unsized,
    Sized { constant: bool },
}

pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

pub enum TypeKind {
    Integral {
        size: u8,
        signed: bool,
    },
    String,
    Array {
        elem: TypeRef,
        nelem: ArrayLength,
        complete: Cell<Option<bool>>,
    },
    Struct {
        fields: Vec<StructField>,
        complete: Cell<Option<bool>>,
    },
    Offset {
        base: TypeRef,
        unit: u64,
    },
    Function {
        ret: TypeRef,
        args: Vec<FunctionArg>,
    },
    Any,
    Void,
}

impl Type {
    pub fn integral(size: u8, signed: bool, span: Span) -> TypeRef {
        Rc::new(Type {
            kind: TypeKind::Integral { size, signed },
            span,
        })
    }

    pub fn string(span: Span) -> TypeRef {
        Rc::new(Type {
            kind: TypeKind::String,
            span,
        })
    }

    pub fn array(elem: TypeRef, nelem: ArrayLength, span: Span) -> TypeRef {
        Rc::new(Type {
            kind: TypeKind::Array {
                elem,
                nelem,
                complete: Cell::new(None),
            },
            span,
        })
    }

    pub fn struct_(fields: Vec<StructField>, span: Span) -> TypeRef {
        Rc::new(Type {
            kind: TypeKind::Struct {
                fields,
                complete: Cell::new(None),
            },
            span,
        })
    }

    pub fn offset(base: TypeRef, unit: u64, span: Span) -> TypeRef {
        Rc::new(Type {
            kind: TypeKind::Offset { base, unit },
            span,
        })
    }

    pub fn function(ret: TypeRef, args: Vec<FunctionArg>, span: Span) -> TypeRef {
        Rc::new(Type {
            kind: TypeKind::Function { ret, args },
            span,
        })
    }

    pub fn any(span: Span) -> TypeRef {
        Rc::new(Type {
            kind: TypeKind::Any,
            span,
        })
    }

    pub fn void(span: Span) -> TypeRef {
        Rc::new(Type {
            kind: TypeKind::Void,
            span,
        })
    }

    /// The "bits per unit" of a 64-bit unsigned offset in bits, the result
    /// type of `sizeof`, `'size` and `'offset` (spec.md §4.2).
    pub fn bit_offset(span: Span) -> TypeRef {
        Type::offset(Type::integral(64, false, span.clone()), 1, span)
    }

    /// The canonical boolean result of relational/logical/`isa` operators.
    pub fn boolean(span: Span) -> TypeRef {
        Type::integral(32, true, span)
    }

    pub fn is_integral(&self) -> bool {
        matches!(self.kind, TypeKind::Integral { .. })
    }

    pub fn is_offset(&self) -> bool {
        matches!(self.kind, TypeKind::Offset { .. })
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, TypeKind::String)
    }

    pub fn is_any(&self) -> bool {
        matches!(self.kind, TypeKind::Any)
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Void)
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, TypeKind::Function { .. })
    }

    pub fn as_integral(&self) -> Option<(u8, bool)> {
        match self.kind {
            TypeKind::Integral { size, signed } => Some((size, signed)),
            _ => None,
        }
    }

    pub fn as_offset(&self) -> Option<(&TypeRef, u64)> {
        match &self.kind {
            TypeKind::Offset { base, unit } => Some((base, *unit)),
            _ => None,
        }
    }

    /// Recompute completeness from scratch, per spec.md §8's idempotence
    /// property ("recomputing from scratch yields the same value"). This is
    /// the pure function typify-2 calls and caches; it never consults the
    /// cache itself.
    pub fn compute_complete(&self) -> bool {
        match &self.kind {
            TypeKind::Integral { .. } | TypeKind::String | TypeKind::Offset { .. } => true,
            TypeKind::Array { elem, nelem, .. } => {
                matches!(nelem, ArrayLength::Sized { constant: true }) && elem.compute_complete()
            }
            TypeKind::Struct { fields, .. } => fields.iter().all(|f| f.ty.compute_complete()),
            TypeKind::Any | TypeKind::Function { .. } | TypeKind::Void => false,
        }
    }

    /// Cached completeness, filled in by typify-2's traversal. Panics if
    /// asked before typify-2 has run on this node — callers in typify-2
    /// itself use `compute_complete` directly.
    pub fn is_complete(&self) -> bool {
        match &self.kind {
            TypeKind::Array { complete, .. } | TypeKind::Struct { complete, .. } => complete
                .get()
                .unwrap_or_else(|| self.compute_complete()),
            _ => self.compute_complete(),
        }
    }
}

impl PartialEq for Type {
    /// Structural equality, ignoring `span` (a diagnostic-only attribute)
    /// and the `complete` cache (derived, not identity-bearing). Array
    /// equality compares element type only, the same simplification
    /// `why_lib::typechecker::types::Type::does_eq` makes for `Array`.
    fn eq(&self, other: &Self) -> bool {
        use TypeKind::*;
        match (&self.kind, &other.kind) {
            (Integral { size: s1, signed: g1 }, Integral { size: s2, signed: g2 }) => {
                s1 == s2 && g1 == g2
            }
            (String, String) => true,
            (Array { elem: e1, .. }, Array { elem: e2, .. }) => e1 == e2,
            (Struct { fields: f1, .. }, Struct { fields: f2, .. }) => {
                f1.len() == f2.len()
                    && f1
                        .iter()
                        .zip(f2.iter())
                        .all(|(a, b)| a.name == b.name && a.ty == b.ty)
            }
            (Offset { base: b1, unit: u1 }, Offset { base: b2, unit: u2 }) => {
                b1 == b2 && u1 == u2
            }
            (
                Function {
                    ret: r1,
                    args: a1,
                },
                Function {
                    ret: r2,
                    args: a2,
                },
            ) => {
                r1 == r2
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2.iter()).all(|(x, y)| x.ty == y.ty)
            }
            (Any, Any) => true,
            (Void, Void) => true,
            _ => false,
        }
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Integral { size, signed } => {
                write!(f, "{}int<{size}>", if *signed { "" } else { "u" })
            }
            TypeKind::String => write!(f, "string"),
            TypeKind::Array { elem, nelem, .. } => match nelem {
                ArrayLength::Unsized => write!(f, "{elem:?}[]"),
                ArrayLength::Sized { .. } => write!(f, "{elem:?}[?]"),
            },
            TypeKind::Struct { fields, .. } => {
                write!(f, "struct {{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    match &field.name {
                        Some(name) => write!(f, "{:?} {name}", field.ty)?,
                        None => write!(f, "{:?}", field.ty)?,
                    }
                }
                write!(f, "}}")
            }
            TypeKind::Offset { base, unit } => write!(f, "offset<{base:?},{unit}>"),
            TypeKind::Function { ret, args } => {
                write!(f, "fun (")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", arg.ty)?;
                    if arg.vararg {
                        write!(f, "...")?;
                    } else if arg.optional {
                        write!(f, "?")?;
                    }
                }
                write!(f, ") {ret:?}")
            }
            TypeKind::Any => write!(f, "any"),
            TypeKind::Void => write!(f, "void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp() -> Span {
        Span::default()
    }

    #[test]
    fn integral_equality_ignores_span() {
        let a = Type::integral(32, true, Span::new((0, 0), (0, 1), "x"));
        let b = Type::integral(32, true, Span::default());
        assert_eq!(a, b);
    }

    #[test]
    fn integral_width_and_sign_matter() {
        assert_ne!(
            Type::integral(32, true, sp()),
            Type::integral(16, true, sp())
        );
        assert_ne!(
            Type::integral(32, true, sp()),
            Type::integral(32, false, sp())
        );
    }

    #[test]
    fn array_equality_ignores_nelem() {
        let a = Type::array(Type::integral(8, false, sp()), ArrayLength::Unsized, sp());
        let b = Type::array(
            Type::integral(8, false, sp()),
            ArrayLength::Sized { constant: true },
            sp(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn struct_completeness_propagates() {
        let complete = Type::struct_(
            vec![StructField {
                name: Some("a".into()),
                ty: Type::integral(32, true, sp()),
            }],
            sp(),
        );
        assert!(complete.compute_complete());

        let incomplete = Type::struct_(
            vec![StructField {
                name: Some("a".into()),
                ty: Type::array(Type::integral(8, false, sp()), ArrayLength::Unsized, sp()),
            }],
            sp(),
        );
        assert!(!incomplete.compute_complete());
    }

    #[test]
    fn any_and_function_are_never_complete() {
        assert!(!Type::any(sp()).compute_complete());
        assert!(!Type::function(Type::void(sp()), vec![], sp()).compute_complete());
    }

    #[test]
    fn debug_pretty_prints() {
        assert_eq!(format!("{:?}", Type::integral(16, false, sp())), "uint<16>");
        assert_eq!(format!("{:?}", Type::integral(8, true, sp())), "int<8>");
    }
}
