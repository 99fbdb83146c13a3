//! Per-run configuration and the shared error-counting payload.
//!
//! `Context` plays the role `why_lib::typechecker::context::Context` plays
//! for its checker: a thin wrapper around `Scope` that also tracks what
//! encloses the node currently being typified — here, the declared return
//! type of the innermost function body, needed by the `return` handler
//! (spec.md §4.2).

use crate::diagnostics::{DiagnosticSink, TypeError};
use crate::types::TypeRef;

use super::scope::Scope;

/// Knobs spec.md leaves to the embedder: ICEs can either abort the phase on
/// the spot or be collected like any other diagnostic, and the number of
/// diagnostics collected before the pass gives up can be capped.
#[derive(Debug, Clone, Copy)]
pub struct TypifyOptions {
    pub ice_aborts: bool,
    pub diagnostic_limit: Option<usize>,
}

impl Default for TypifyOptions {
    fn default() -> Self {
        TypifyOptions {
            ice_aborts: false,
            diagnostic_limit: None,
        }
    }
}

/// The "payload carrying an error counter" of spec.md §2/§5, plus the sink
/// diagnostics are actually rendered through and the options controlling
/// both.
pub struct Payload<'a> {
    pub errors: usize,
    pub options: TypifyOptions,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Payload<'a> {
    pub fn new(sink: &'a mut dyn DiagnosticSink, options: TypifyOptions) -> Self {
        Payload {
            errors: 0,
            options,
            sink,
        }
    }

    /// Reports `error`, incrementing the counter unless the diagnostic limit
    /// has already been hit. Returns `true` if the caller should abort the
    /// current phase immediately (only ever true for an ICE under
    /// `ice_aborts`).
    pub fn report(&mut self, error: TypeError) -> bool {
        let abort = error.is_ice() && self.options.ice_aborts;
        let under_limit = self
            .options
            .diagnostic_limit
            .map(|limit| self.errors < limit)
            .unwrap_or(true);
        if under_limit {
            self.errors += 1;
            self.sink.report(error);
        }
        abort
    }

    pub fn failed(&self) -> bool {
        self.errors > 0
    }
}

/// Lexical scope plus the return-type stack needed by nested function
/// bodies.
#[derive(Default)]
pub struct Context {
    pub scope: Scope,
    return_stack: Vec<TypeRef>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            scope: Scope::new(),
            return_stack: Vec::new(),
        }
    }

    pub fn enter_function(&mut self, return_type: TypeRef) {
        self.scope.enter_scope();
        self.return_stack.push(return_type);
    }

    pub fn exit_function(&mut self) {
        self.scope.exit_scope();
        self.return_stack.pop();
    }

    pub fn current_return_type(&self) -> Option<TypeRef> {
        self.return_stack.last().cloned()
    }
}
