//! Indexed minimum-priority queue over a fixed pixel domain
//!
//! Binary min-heap backed by a dense index-to-slot map, giving O(1)
//! membership tests and O(log n) insert, pop and decrease-key. This is the
//! single structure that makes interactive-rate re-propagation feasible:
//! every relaxation either inserts a pixel or lowers its key in place.

use std::fmt;

/// Slot value marking an index as not currently queued
const ABSENT: u32 = u32::MAX;

/// Minimum-priority queue keyed by `f32` priorities over indices `0..domain`
#[derive(Debug, Clone)]
pub struct IndexPriorityQueue {
    /// Heap of domain indices ordered by priority
    heap: Vec<u32>,
    /// Maps domain index to its heap slot, `ABSENT` when not queued
    slot: Vec<u32>,
    /// Current priority per domain index (valid while queued)
    key: Vec<f32>,
}

impl IndexPriorityQueue {
    /// Create an empty queue over `domain` indices
    pub fn new(domain: usize) -> Self {
        Self {
            heap: Vec::with_capacity(domain),
            slot: vec![ABSENT; domain],
            key: vec![0.0; domain],
        }
    }

    /// Number of indices the queue can hold
    pub fn domain(&self) -> usize {
        self.slot.len()
    }

    /// Number of currently queued indices
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Test whether no index is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// O(1) membership test
    pub fn in_queue(&self, index: usize) -> bool {
        self.slot.get(index).copied().unwrap_or(ABSENT) != ABSENT
    }

    /// Priority last assigned to an index
    ///
    /// Meaningful only while the index is queued; retained after a pop so the
    /// popped priority can still be inspected.
    pub fn priority(&self, index: usize) -> f32 {
        self.key.get(index).copied().unwrap_or(f32::INFINITY)
    }

    /// Queue an index with the given priority
    ///
    /// If the index is already queued its priority is updated instead,
    /// sifting in whichever direction the change requires.
    pub fn insert(&mut self, index: usize, priority: f32) {
        if index >= self.slot.len() {
            return;
        }
        if self.in_queue(index) {
            self.update(index, priority);
            return;
        }
        if let Some(k) = self.key.get_mut(index) {
            *k = priority;
        }
        let node = self.heap.len();
        self.heap.push(index as u32);
        self.sift_up(node, index as u32, priority);
    }

    /// Remove and return the index with minimum priority
    pub fn pop(&mut self) -> Option<u32> {
        let top = self.heap.first().copied()?;
        if let Some(s) = self.slot.get_mut(top as usize) {
            *s = ABSENT;
        }
        let last = self.heap.pop()?;
        if !self.heap.is_empty() {
            let priority = self.priority(last as usize);
            self.sift_down(0, last, priority);
        }
        Some(top)
    }

    /// Lower the priority of a queued index and restore heap order
    ///
    /// Precondition: `index` is queued and `priority` does not exceed its
    /// current key. A non-queued index is ignored.
    pub fn decrease_key(&mut self, index: usize, priority: f32) {
        let node = self.slot.get(index).copied().unwrap_or(ABSENT);
        if node == ABSENT {
            return;
        }
        debug_assert!(priority <= self.priority(index));
        if let Some(k) = self.key.get_mut(index) {
            *k = priority;
        }
        self.sift_up(node as usize, index as u32, priority);
    }

    /// Remove every queued index
    pub fn clear(&mut self) {
        for &index in &self.heap {
            if let Some(s) = self.slot.get_mut(index as usize) {
                *s = ABSENT;
            }
        }
        self.heap.clear();
    }

    /// Re-key a queued index, sifting up or down as needed
    fn update(&mut self, index: usize, priority: f32) {
        let node = self.slot.get(index).copied().unwrap_or(ABSENT);
        if node == ABSENT {
            return;
        }
        if let Some(k) = self.key.get_mut(index) {
            *k = priority;
        }
        let node = self.sift_up_loose(node as usize, priority);
        self.sift_down(node, index as u32, priority);
    }

    /// Move the hole at `node` toward the root while parents are larger,
    /// then place `index` there
    fn sift_up(&mut self, node: usize, index: u32, priority: f32) {
        let node = self.sift_up_loose(node, priority);
        self.place(node, index);
    }

    /// Hole-movement half of `sift_up`; returns the final hole slot
    fn sift_up_loose(&mut self, mut node: usize, priority: f32) -> usize {
        while node > 0 {
            let parent = (node - 1) / 2;
            let Some(&parent_index) = self.heap.get(parent) else {
                break;
            };
            if self.priority(parent_index as usize) > priority {
                self.place(node, parent_index);
                node = parent;
            } else {
                break;
            }
        }
        node
    }

    /// Move the hole at `node` toward the leaves while a child is smaller,
    /// then place `index` there
    fn sift_down(&mut self, mut node: usize, index: u32, priority: f32) {
        let len = self.heap.len();
        loop {
            let mut child = node * 2 + 1;
            if child >= len {
                break;
            }
            let child_priority = |queue: &Self, slot: usize| {
                queue
                    .heap
                    .get(slot)
                    .map_or(f32::INFINITY, |&i| queue.priority(i as usize))
            };
            if child + 1 < len && child_priority(self, child) > child_priority(self, child + 1) {
                child += 1;
            }
            if priority > child_priority(self, child) {
                let moved = self.heap.get(child).copied().unwrap_or(index);
                self.place(node, moved);
                node = child;
            } else {
                break;
            }
        }
        self.place(node, index);
    }

    /// Store `index` in heap slot `node` and record the slot in the map
    fn place(&mut self, node: usize, index: u32) {
        if let Some(entry) = self.heap.get_mut(node) {
            *entry = index;
        }
        if let Some(s) = self.slot.get_mut(index as usize) {
            *s = node as u32;
        }
    }
}

impl fmt::Display for IndexPriorityQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IndexPriorityQueue({} of {} queued)",
            self.len(),
            self.domain()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::IndexPriorityQueue;

    #[test]
    fn pops_in_priority_order() {
        let mut queue = IndexPriorityQueue::new(8);
        queue.insert(3, 5.0);
        queue.insert(1, 2.0);
        queue.insert(6, 9.0);
        queue.insert(0, 4.0);

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(0));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), Some(6));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn decrease_key_reorders() {
        let mut queue = IndexPriorityQueue::new(4);
        queue.insert(0, 10.0);
        queue.insert(1, 20.0);
        queue.insert(2, 30.0);

        queue.decrease_key(2, 1.0);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(0));
    }

    #[test]
    fn membership_tracks_operations() {
        let mut queue = IndexPriorityQueue::new(4);
        assert!(!queue.in_queue(2));
        queue.insert(2, 1.5);
        assert!(queue.in_queue(2));
        assert_eq!(queue.pop(), Some(2));
        assert!(!queue.in_queue(2));
    }

    #[test]
    fn clear_empties_membership() {
        let mut queue = IndexPriorityQueue::new(6);
        for index in 0..6 {
            queue.insert(index, index as f32);
        }
        queue.clear();
        assert!(queue.is_empty());
        for index in 0..6 {
            assert!(!queue.in_queue(index));
        }
    }

    #[test]
    fn insert_on_queued_index_updates_key() {
        let mut queue = IndexPriorityQueue::new(4);
        queue.insert(0, 5.0);
        queue.insert(1, 6.0);
        queue.insert(0, 7.5);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(0));
    }
}
