//! # Circular Item Buffer
//!
//! Fixed-capacity ring buffer with a "current" cursor, used for the player's
//! element inventory.

/// Fixed-capacity ring buffer with a movable cursor.
///
/// Items are never deleted, only evicted by overwriting once the buffer is full.
/// While the buffer has free slots, each new item is appended and the cursor moves
/// to it. Once full, each new item overwrites the slot after the cursor and the
/// cursor advances there.
///
/// Iteration yields the filled slots in slot order (0 up to the current size), which
/// after wrapping is not the chronological order of insertion.
///
/// # Examples
///
/// ```
/// use spellforge::CircularItemBuffer;
///
/// let mut buffer = CircularItemBuffer::new(2);
/// buffer.add("Fire");
/// buffer.add("Ice");
/// buffer.add("Wind");
/// assert_eq!(buffer.get_current(), Some(&"Wind"));
/// assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!["Wind", "Ice"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CircularItemBuffer<T> {
    slots: Vec<T>,
    capacity: usize,
    index: usize,
}

impl<T> CircularItemBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` items.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            index: 0,
        }
    }

    /// Adds an item, overwriting the slot after the cursor when full.
    pub fn add(&mut self, item: T) {
        if self.slots.len() == self.capacity {
            self.index = (self.index + 1) % self.capacity;
            self.slots[self.index] = item;
        } else {
            self.index = self.slots.len();
            self.slots.push(item);
        }
    }

    /// Item under the cursor, or `None` when empty.
    pub fn get_current(&self) -> Option<&T> {
        self.slots.get(self.index)
    }

    /// Slot index of the cursor.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Moves the cursor forward and returns the item it lands on.
    pub fn get_next(&mut self) -> Option<&T> {
        self.set_next();
        self.get_current()
    }

    /// Moves the cursor backward and returns the item it lands on.
    pub fn get_prev(&mut self) -> Option<&T> {
        self.set_prev();
        self.get_current()
    }

    /// Moves the cursor forward, wrapping over the filled slots only.
    pub fn set_next(&mut self) {
        let size = self.slots.len();
        if size == 0 {
            return;
        }
        self.index = (self.index + 1) % size;
    }

    /// Moves the cursor backward, wrapping over the filled slots only.
    pub fn set_prev(&mut self) {
        let size = self.slots.len();
        if size == 0 {
            return;
        }
        self.index = (self.index + size - 1) % size;
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates the filled slots in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }
}

impl<'a, T> IntoIterator for &'a CircularItemBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
