//! Ordered batch with a structural default slot
//!
//! The first item of a batch is its default. Instead of a per-item flag the
//! batch keeps a dedicated `default` slot and an ordered list of `others`, so
//! "exactly one default, always the first" holds by construction.

/// Ordered list whose first element is the default item.
///
/// Invariant: `others` is empty whenever `default` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedBatch<T> {
    default: Option<T>,
    others: Vec<T>,
}

impl<T> Default for OrderedBatch<T> {
    fn default() -> Self {
        Self {
            default: None,
            others: Vec::new(),
        }
    }
}

impl<T> OrderedBatch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.default.as_ref().map_or(0, |_| 1 + self.others.len())
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none()
    }

    /// The default item, i.e. the first one.
    pub fn default_item(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// Items after the default, in order.
    pub fn others(&self) -> &[T] {
        &self.others
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        match index {
            0 => self.default.as_ref(),
            n => self.others.get(n - 1),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.default.iter().chain(self.others.iter())
    }

    pub fn push(&mut self, item: T) {
        if self.default.is_none() {
            self.default = Some(item);
        } else {
            self.others.push(item);
        }
    }

    /// Remove the item at `index`. Removing the default promotes the next item.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index == 0 {
            let removed = self.default.take();
            if !self.others.is_empty() {
                self.default = Some(self.others.remove(0));
            }
            removed
        } else if index <= self.others.len() {
            Some(self.others.remove(index - 1))
        } else {
            None
        }
    }

    /// Keep only the first `max` items.
    pub fn truncate(&mut self, max: usize) {
        if max == 0 {
            self.default = None;
            self.others.clear();
        } else {
            self.others.truncate(max - 1);
        }
    }

    /// Split into the default item and the rest.
    pub fn split_default(&self) -> Option<(&T, &[T])> {
        self.default.as_ref().map(|d| (d, self.others.as_slice()))
    }
}

impl<T> FromIterator<T> for OrderedBatch<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut batch = Self::new();
        for item in iter {
            batch.push(item);
        }
        batch
    }
}

impl<T> Extend<T> for OrderedBatch<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(batch: &OrderedBatch<&'static str>) -> Vec<&'static str> {
        batch.iter().copied().collect()
    }

    #[test]
    fn test_push_fills_default_first() {
        let mut batch = OrderedBatch::new();
        assert!(batch.is_empty());
        batch.push("a");
        batch.push("b");
        assert_eq!(batch.default_item(), Some(&"a"));
        assert_eq!(batch.others(), &["b"]);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_remove_default_promotes_next() {
        let mut batch: OrderedBatch<_> = ["a", "b", "c"].into_iter().collect();
        assert_eq!(batch.remove(0), Some("a"));
        assert_eq!(batch.default_item(), Some(&"b"));
        assert_eq!(collect(&batch), vec!["b", "c"]);
    }

    #[test]
    fn test_remove_middle_reindexes() {
        let mut batch: OrderedBatch<_> = ["a", "b", "c"].into_iter().collect();
        assert_eq!(batch.remove(1), Some("b"));
        assert_eq!(batch.get(1), Some(&"c"));
        assert_eq!(batch.remove(5), None);
        assert_eq!(collect(&batch), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_last_item_empties_batch() {
        let mut batch: OrderedBatch<_> = ["a"].into_iter().collect();
        assert_eq!(batch.remove(0), Some("a"));
        assert!(batch.is_empty());
        assert_eq!(batch.remove(0), None);
    }

    #[test]
    fn test_truncate() {
        let mut batch: OrderedBatch<_> = (0..5).collect();
        batch.truncate(3);
        assert_eq!(batch.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        batch.truncate(0);
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }

    #[test]
    fn test_split_default() {
        let batch: OrderedBatch<_> = ["a", "b"].into_iter().collect();
        let (first, rest) = batch.split_default().unwrap();
        assert_eq!(*first, "a");
        assert_eq!(rest, &["b"]);
        assert!(OrderedBatch::<u8>::new().split_default().is_none());
    }
}
