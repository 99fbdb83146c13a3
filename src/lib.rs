//! Type-inference, type-checking and type-completeness pass for Poke's Pkl
//! compiler (spec.md §1).
//!
//! Lexing, parsing, AST construction, bytecode emission and the VM are all
//! out of scope here: this crate consumes an already-parsed [`ast::Program`]
//! and annotates it with types, in the two bottom-up traversals described by
//! spec.md §2 — [`typify1`] then [`typify2`] — wired together by [`pass::Pass`].

pub mod ast;
pub mod diagnostics;
pub mod driver;
pub mod pass;
pub mod promotion;
pub mod span;
pub mod types;
pub mod typify1;
pub mod typify2;

pub use diagnostics::{CollectingSink, ColorTermSink, DiagnosticSink, TypeError};
pub use pass::{Context, Pass, Payload, TypifyOptions};
pub use span::Span;
pub use types::{Type, TypeKind, TypeRef};
