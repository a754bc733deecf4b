use crate::viewmodel::ViewModelKey;

/// Ordered history of view-model types for one host.
///
/// Index 0 is the root; the last entry is the currently displayed
/// view-model's type. Only the owning host mutates it.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    entries: Vec<ViewModelKey>,
    capacity: usize,
}

impl NavigationStack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(2),
        }
    }

    pub fn push(&mut self, key: ViewModelKey) {
        if self.entries.len() >= self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(key);
    }

    pub fn pop(&mut self) -> Option<ViewModelKey> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the whole history with a single root entry.
    pub fn reset_to(&mut self, key: ViewModelKey) {
        self.entries.clear();
        self.entries.push(key);
    }

    /// Drop oldest entries until only the current one remains.
    pub fn truncate_to_last(&mut self) {
        while self.entries.len() > 1 {
            self.entries.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<ViewModelKey> {
        self.entries.last().copied()
    }

    /// Type a back-navigation would land on: the entry below the top.
    pub fn back_target(&self) -> Option<ViewModelKey> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        Some(self.entries[len - 2])
    }

    pub fn entries(&self) -> &[ViewModelKey] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use crate::viewmodel::ViewModelKey;

    use super::NavigationStack;

    struct First;
    struct Second;
    struct Third;

    #[test]
    fn push_past_capacity_evicts_the_root_entry() {
        let mut stack = NavigationStack::with_capacity(2);
        stack.push(ViewModelKey::of::<First>());
        stack.push(ViewModelKey::of::<Second>());
        stack.push(ViewModelKey::of::<Third>());

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.entries()[0], ViewModelKey::of::<Second>());
        assert_eq!(stack.last(), Some(ViewModelKey::of::<Third>()));
    }

    #[test]
    fn back_target_is_the_entry_below_the_top() {
        let mut stack = NavigationStack::with_capacity(8);
        assert_eq!(stack.back_target(), None);

        stack.push(ViewModelKey::of::<First>());
        assert_eq!(stack.back_target(), None);

        stack.push(ViewModelKey::of::<Second>());
        assert_eq!(stack.back_target(), Some(ViewModelKey::of::<First>()));
    }

    #[test]
    fn truncate_to_last_keeps_only_the_current_entry() {
        let mut stack = NavigationStack::with_capacity(8);
        stack.push(ViewModelKey::of::<First>());
        stack.push(ViewModelKey::of::<Second>());
        stack.push(ViewModelKey::of::<Third>());

        stack.truncate_to_last();
        assert_eq!(stack.entries(), &[ViewModelKey::of::<Third>()]);

        stack.truncate_to_last();
        assert_eq!(stack.len(), 1);
    }
}
