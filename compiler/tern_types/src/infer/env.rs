//! Lexical scopes for local bindings.

use rustc_hash::FxHashMap;
use tern_ir::Name;

use crate::Idx;

/// A stack of scopes; lookups search innermost first.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    scopes: Vec<FxHashMap<Name, Idx>>,
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn exit_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "exiting the outermost scope");
        self.scopes.pop();
    }

    /// Bind `name` in the innermost scope, shadowing outer bindings.
    pub fn bind(&mut self, name: Name, ty: Idx) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, ty);
        }
    }

    pub fn lookup(&self, name: Name) -> Option<Idx> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).copied())
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_bindings_shadow_and_expire() {
        let mut env = TypeEnv::new();
        let x = Name::from_raw(7);
        env.bind(x, Idx::I32);
        env.enter_scope();
        env.bind(x, Idx::BOOL);
        assert_eq!(env.lookup(x), Some(Idx::BOOL));
        env.exit_scope();
        assert_eq!(env.lookup(x), Some(Idx::I32));
        assert_eq!(env.lookup(Name::from_raw(8)), None);
        assert_eq!(env.depth(), 1);
    }
}
