//! Source location type attached to every AST and type node.
//!
//! Kept deliberately dumb: `Span` carries no rendering logic of its own
//! (that lives in [`crate::diagnostics::ColorTermSink`]) because the type
//! system treats locations as plain data copied around during typification,
//! never inspected.

#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: (usize, usize),
    pub end: (usize, usize),
    pub source: String,
}

impl Span {
    pub fn new(start: (usize, usize), end: (usize, usize), source: impl ToString) -> Span {
        Span {
            start,
            end,
            source: source.to_string(),
        }
    }
}
