//! Lexical scope stack: variable/function bindings and user-declared types.
//!
//! Shaped after `why_lib::typechecker::scope::Scope` (inner-most-last frame
//! vector, walk-backwards lookup) but slimmed down: the teacher stores a
//! `StoredVariable` carrying the whole typed expression plus a shared type
//! slot because its variables can be re-unified after declaration. This
//! pass's variable types are fixed the moment a declaration is typified
//! (spec.md §4.2 "variable reference: type is copied from the declaration's
//! initializer type"), so a frame only needs a name → type map.

use std::collections::HashMap;

use crate::types::TypeRef;

#[derive(Default)]
struct Frame {
    variables: HashMap<String, (TypeRef, bool)>,
    types: HashMap<String, TypeRef>,
}

#[derive(Default)]
pub struct Scope {
    frames: Vec<Frame>,
}

#[derive(Debug, Clone)]
pub struct DuplicateBindingError {
    pub name: String,
}

impl Scope {
    pub fn new() -> Scope {
        Scope {
            frames: vec![Frame::default()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn exit_scope(&mut self) {
        self.frames.pop();
    }

    pub fn add_variable(
        &mut self,
        name: impl ToString,
        ty: TypeRef,
        mutable: bool,
    ) -> Result<(), DuplicateBindingError> {
        let name = name.to_string();
        let frame = self.frames.last_mut().expect("scope stack is never empty");
        if frame.variables.contains_key(&name) {
            return Err(DuplicateBindingError { name });
        }
        frame.variables.insert(name, (ty, mutable));
        Ok(())
    }

    pub fn get_variable(&self, name: impl ToString) -> Option<TypeRef> {
        let name = name.to_string();
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.variables.get(&name))
            .map(|(ty, _)| ty.clone())
    }

    pub fn is_variable_mutable(&self, name: impl ToString) -> Option<bool> {
        let name = name.to_string();
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.variables.get(&name))
            .map(|(_, mutable)| *mutable)
    }

    pub fn add_type(
        &mut self,
        name: impl ToString,
        ty: TypeRef,
    ) -> Result<(), DuplicateBindingError> {
        let name = name.to_string();
        let frame = self.frames.last_mut().expect("scope stack is never empty");
        if frame.types.contains_key(&name) {
            return Err(DuplicateBindingError { name });
        }
        frame.types.insert(name, ty);
        Ok(())
    }

    pub fn get_type(&self, name: impl ToString) -> Option<TypeRef> {
        let name = name.to_string();
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.types.get(&name))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use crate::types::Type;

    #[test]
    fn variable_lookup_walks_outward() {
        let mut scope = Scope::new();
        scope
            .add_variable("x", Type::integral(32, true, Span::default()), false)
            .unwrap();
        scope.enter_scope();
        assert!(scope.get_variable("x").is_some());
        scope.exit_scope();
        assert!(scope.get_variable("x").is_some());
    }

    #[test]
    fn inner_frame_drops_on_exit() {
        let mut scope = Scope::new();
        scope.enter_scope();
        scope
            .add_variable("y", Type::string(Span::default()), true)
            .unwrap();
        scope.exit_scope();
        assert!(scope.get_variable("y").is_none());
    }

    #[test]
    fn duplicate_variable_in_same_frame_errors() {
        let mut scope = Scope::new();
        scope
            .add_variable("x", Type::string(Span::default()), false)
            .unwrap();
        assert!(scope
            .add_variable("x", Type::string(Span::default()), false)
            .is_err());
    }
}
