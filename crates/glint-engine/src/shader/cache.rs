use std::collections::HashMap;

/// Linked programs keyed by name.
///
/// Holds at most one program per name. Entries are never evicted one at a
/// time; the owning provider clears the whole map when its context is lost.
#[derive(Debug)]
pub struct ShaderCache<P> {
    programs: HashMap<String, P>,
}

impl<P> ShaderCache<P> {
    pub fn new() -> Self {
        Self {
            programs: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&P> {
        self.programs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    /// Stores `program` under `name`, returning the program it displaced.
    pub fn insert(&mut self, name: impl Into<String>, program: P) -> Option<P> {
        self.programs.insert(name.into(), program)
    }

    /// Drops every entry; returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.programs.len();
        self.programs.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl<P> Default for ShaderCache<P> {
    fn default() -> Self {
        Self::new()
    }
}
