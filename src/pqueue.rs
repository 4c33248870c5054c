//! A binary min-heap whose ordering comes from outside.
//!
//! The comparator is passed to every operation and evaluated fresh on every
//! comparison instead of being cached at insertion time. This is deliberate:
//! search priorities depend on the live distance map, so improving the
//! distance of a still-queued cell automatically changes its effective
//! priority without a decrease-key operation. Duplicate entries are allowed
//! (lazy deletion); the search loop skips stale pops.

/// Array-backed binary min-heap over arbitrary elements.
#[derive(Clone, Debug, Default)]
pub struct SearchQueue<T> {
    items: Vec<T>,
}

impl<T> SearchQueue<T> {
    pub fn new() -> SearchQueue<T> {
        SearchQueue { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts `item`, restoring the heap property under `less`. Prior
    /// membership of an equal element is not checked.
    pub fn push(&mut self, item: T, less: impl Fn(&T, &T) -> bool) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1, &less);
    }

    /// Removes and returns a minimum element under `less`, or [None] when the
    /// queue is empty. An empty queue is the search loop's normal termination
    /// signal, not an error.
    pub fn pop(&mut self, less: impl Fn(&T, &T) -> bool) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let item = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0, &less);
        }
        item
    }

    fn sift_up(&mut self, mut ix: usize, less: &impl Fn(&T, &T) -> bool) {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if !less(&self.items[ix], &self.items[parent]) {
                break;
            }
            self.items.swap(ix, parent);
            ix = parent;
        }
    }

    fn sift_down(&mut self, mut ix: usize, less: &impl Fn(&T, &T) -> bool) {
        loop {
            let left = 2 * ix + 1;
            let right = left + 1;
            let mut smallest = ix;
            if left < self.items.len() && less(&self.items[left], &self.items[smallest]) {
                smallest = left;
            }
            if right < self.items.len() && less(&self.items[right], &self.items[smallest]) {
                smallest = right;
            }
            if smallest == ix {
                break;
            }
            self.items.swap(ix, smallest);
            ix = smallest;
        }
    }
}
