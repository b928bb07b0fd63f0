use crate::kernel::state::FileMap;

/// Three-way partition between two virtual file sets. Paths are sorted so
/// output is deterministic regardless of map iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDiff {
    pub create: Vec<String>,
    pub update: Vec<String>,
    pub destroy: Vec<String>,
}

impl FileDiff {
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.destroy.is_empty()
    }
}

/// Computes create/update/destroy between `old` and `new`.
///
/// - path in `new` but not `old`: create
/// - path in both with differing content (exact comparison): update
/// - path in `old` but not `new`: destroy
///
/// O(n + m), side-effect-free.
pub fn diff(old: &FileMap, new: &FileMap) -> FileDiff {
    let mut result = FileDiff::default();

    for (path, content) in new {
        match old.get(path) {
            None => result.create.push(path.clone()),
            Some(previous) if previous != content => result.update.push(path.clone()),
            Some(_) => {}
        }
    }

    for path in old.keys() {
        if !new.contains_key(path) {
            result.destroy.push(path.clone());
        }
    }

    result.create.sort();
    result.update.sort();
    result.destroy.sort();
    result
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/diff.rs"]
mod tests;
