//! Error taxonomy and the pluggable error sink (spec.md §6, §7).
//!
//! `TypeError` plays the role `why_lib::typechecker::error::TypeCheckError`
//! plays in the teacher: a hand-rolled enum, one struct-shaped variant per
//! failure kind, with manual `Display`/`Error` impls rather than a derive
//! macro — the teacher doesn't pull in `thiserror` and neither do we.
//!
//! The sink itself is new relative to the teacher (which prints straight to
//! stderr from inside the checker): spec.md §6 requires the core to be
//! agnostic about where diagnostics go, so reporting goes through a small
//! `DiagnosticSink` trait instead.

use std::fmt;

use crate::span::Span;

/// The five-way taxonomy of spec.md §7. `ConstantFolding` is not an error —
/// it exists here only so the driver can log what happened when `isa`/`cast`
/// rewrite a subtree; it never increments the payload's error counter.
#[derive(Debug, Clone)]
pub enum TypeError {
    Mismatch {
        expected: String,
        found: String,
        span: Span,
    },
    TooFewArguments {
        expected: usize,
        found: usize,
        span: Span,
    },
    TooManyArguments {
        expected: usize,
        found: usize,
        span: Span,
    },
    RequiredArgumentMissing {
        name: String,
        span: Span,
    },
    NoNamedArguments {
        span: Span,
    },
    UnknownField {
        name: String,
        struct_type: String,
        span: Span,
    },
    InvalidAttribute {
        attribute: String,
        operand_type: String,
        span: Span,
    },
    ForbiddenCast {
        reason: String,
        span: Span,
    },
    IntegralWidthOutOfRange {
        size: u32,
        span: Span,
    },
    BitConcatOverflow {
        total: u32,
        span: Span,
    },
    SizedArrayInFunctionArg {
        span: Span,
    },
    VoidInExpressionPosition {
        span: Span,
    },
    NotAFunction {
        found: String,
        span: Span,
    },
    FunctionTypeAsField {
        span: Span,
    },
    UnknownType {
        name: String,
        span: Span,
    },
    Ice {
        message: String,
        span: Span,
    },
}

impl TypeError {
    pub fn span(&self) -> &Span {
        match self {
            TypeError::Mismatch { span, .. }
            | TypeError::TooFewArguments { span, .. }
            | TypeError::TooManyArguments { span, .. }
            | TypeError::RequiredArgumentMissing { span, .. }
            | TypeError::NoNamedArguments { span }
            | TypeError::UnknownField { span, .. }
            | TypeError::InvalidAttribute { span, .. }
            | TypeError::ForbiddenCast { span, .. }
            | TypeError::IntegralWidthOutOfRange { span, .. }
            | TypeError::BitConcatOverflow { span, .. }
            | TypeError::SizedArrayInFunctionArg { span }
            | TypeError::VoidInExpressionPosition { span }
            | TypeError::NotAFunction { span, .. }
            | TypeError::FunctionTypeAsField { span }
            | TypeError::UnknownType { span, .. }
            | TypeError::Ice { span, .. } => span,
        }
    }

    /// ICEs are reported through a distinct channel from user errors
    /// (spec.md §7 point 5), but still count against the phase.
    pub fn is_ice(&self) -> bool {
        matches!(self, TypeError::Ice { .. })
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::Mismatch { expected, found, .. } => {
                write!(f, "expected {expected}, got {found}")
            }
            TypeError::TooFewArguments { expected, found, .. } => {
                write!(f, "too few arguments: expected at least {expected}, got {found}")
            }
            TypeError::TooManyArguments { expected, found, .. } => {
                write!(f, "too many arguments: expected at most {expected}, got {found}")
            }
            TypeError::RequiredArgumentMissing { name, .. } => {
                write!(f, "required argument '{name}' not specified")
            }
            TypeError::NoNamedArguments { .. } => {
                write!(f, "function doesn't take named arguments")
            }
            TypeError::UnknownField { name, struct_type, .. } => {
                write!(f, "no field '{name}' on {struct_type}")
            }
            TypeError::InvalidAttribute { attribute, operand_type, .. } => {
                write!(f, "attribute '{attribute}' is not valid for {operand_type}")
            }
            TypeError::ForbiddenCast { reason, .. } => write!(f, "{reason}"),
            TypeError::IntegralWidthOutOfRange { size, .. } => write!(
                f,
                "width of an integral type should be in the [1,64] range, got {size}"
            ),
            TypeError::BitConcatOverflow { total, .. } => {
                write!(f, "bit concatenation width {total} exceeds 64")
            }
            TypeError::SizedArrayInFunctionArg { .. } => {
                write!(f, "sized array types not allowed in this context")
            }
            TypeError::VoidInExpressionPosition { .. } => {
                write!(f, "function doesn't return a value")
            }
            TypeError::NotAFunction { found, .. } => {
                write!(f, "called value of type {found} is not a function")
            }
            TypeError::FunctionTypeAsField { .. } => {
                write!(f, "a struct field may not have a function type")
            }
            TypeError::UnknownType { name, .. } => write!(f, "unknown type '{name}'"),
            TypeError::Ice { message, .. } => write!(f, "internal compiler error: {message}"),
        }
    }
}

impl std::error::Error for TypeError {}

/// Destination for diagnostics emitted during a phase. Kept deliberately
/// thin (spec.md §6's "error sink contract": `(ast, location, format,
/// args) → ()`, `ice(ast, location, msg)`) so callers can collect, print, or
/// discard without the core caring.
pub trait DiagnosticSink {
    fn report(&mut self, error: TypeError);
}

/// Accumulates every diagnostic in order; the sink a test harness reaches
/// for first.
#[derive(Default)]
pub struct CollectingSink {
    pub errors: Vec<TypeError>,
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, error: TypeError) {
        self.errors.push(error);
    }
}

/// Writes diagnostics to stderr with the same `colored`-framed span
/// rendering `why_lib::lexer::token::Span::to_string` uses, minus the
/// AST-pretty-printing that only the lexer's own `Span` had a use for.
pub struct ColorTermSink;

impl DiagnosticSink for ColorTermSink {
    fn report(&mut self, error: TypeError) {
        use colored::Colorize;

        let span = error.span();
        eprintln!(
            "{} {}",
            "error:".red().bold(),
            error.to_string().bold()
        );
        eprintln!(
            "  {} {}:{}:{}",
            "-->".blue(),
            span.source,
            span.start.0 + 1,
            span.start.1 + 1
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_preserves_order() {
        let mut sink = CollectingSink::default();
        sink.report(TypeError::IntegralWidthOutOfRange {
            size: 65,
            span: Span::default(),
        });
        sink.report(TypeError::NoNamedArguments {
            span: Span::default(),
        });
        assert_eq!(sink.errors.len(), 2);
        assert!(sink.errors[0].to_string().contains("[1,64]"));
    }

    #[test]
    fn ice_is_flagged_distinctly() {
        let ice = TypeError::Ice {
            message: "unreachable arm".into(),
            span: Span::default(),
        };
        assert!(ice.is_ice());
        let mismatch = TypeError::Mismatch {
            expected: "string".into(),
            found: "int<32>".into(),
            span: Span::default(),
        };
        assert!(!mismatch.is_ice());
    }
}
