//! Entry point: runs typify-1 then typify-2 over a program, the two
//! traversals of spec.md §2.

pub mod context;
pub mod scope;

pub use context::{Context, Payload, TypifyOptions};
pub use scope::Scope;

use crate::ast::Program;
use crate::diagnostics::DiagnosticSink;
use crate::typify1;
use crate::typify2;

pub struct Pass;

impl Pass {
    /// Runs both traversals. Returns `true` iff the pass succeeded (the
    /// error counter is zero at the end); typify-2 never runs at all if
    /// typify-1 already failed, per spec.md §5 "if the counter is non-zero
    /// at phase end, subsequent phases are skipped".
    pub fn run(program: &mut Program, sink: &mut dyn DiagnosticSink, options: TypifyOptions) -> bool {
        let mut payload = Payload::new(sink, options);
        let mut ctx = Context::new();

        log::debug!("typify-1 start");
        typify1::run(program, &mut ctx, &mut payload);
        log::debug!("typify-1 end, errors={}", payload.errors);

        if payload.failed() {
            log::debug!(
                "typify-1 failed with {} error(s), skipping typify-2",
                payload.errors
            );
            return false;
        }

        log::debug!("typify-2 start");
        typify2::run(program, &mut payload);
        log::debug!("typify-2 end, errors={}", payload.errors);

        !payload.failed()
    }
}
