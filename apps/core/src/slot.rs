/// Holds at most one live instance of a rendered widget (chart, search box).
///
/// Installing a new instance drops the previous one first, so a re-render
/// never leaves two behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<T> {
    current: Option<T>,
    installs: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            current: None,
            installs: 0,
        }
    }
}

impl<T> Slot<T> {
    pub fn replace(&mut self, instance: T) {
        drop(self.current.take());
        self.current = Some(instance);
        self.installs += 1;
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub const fn get(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.current.as_mut()
    }

    pub const fn instance_count(&self) -> usize {
        if self.current.is_some() {
            1
        } else {
            0
        }
    }

    /// Bumps on every install; front-ends use it to notice a new instance.
    pub const fn generation(&self) -> u64 {
        self.installs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_keeps_exactly_one_instance() {
        let mut slot = Slot::default();
        assert_eq!(slot.instance_count(), 0);
        slot.replace("first");
        slot.replace("second");
        assert_eq!(slot.instance_count(), 1);
        assert_eq!(slot.get(), Some(&"second"));
        assert_eq!(slot.generation(), 2);
        slot.clear();
        assert_eq!(slot.instance_count(), 0);
    }
}
