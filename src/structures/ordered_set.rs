//! A set that also behaves like a list.
//!
//! `OrderedSet` keeps its elements in a positional vector and a reverse
//! index from value to position. Membership tests, insertion and removal are
//! O(1); elements can also be read by position and popped from any position
//! in O(1).
//!
//! Removal from the middle moves the last element into the vacated slot, so
//! iteration follows insertion order only until the first such removal.

use core::fmt;
use core::hash::Hash;
use core::ops::Index;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Insertion-ordered set with positional access.
///
/// # Example
///
/// ```
/// use gfmatrix::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// set.add(10);
/// set.add(20);
/// set.add(10);
/// assert_eq!(set.len(), 2);
/// assert_eq!(set[1], 20);
///
/// set.remove(&10).unwrap();
/// assert_eq!(set.as_slice(), &[20]);
/// assert!(set.remove(&10).is_err());
/// ```
#[derive(Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    position: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            position: HashMap::new(),
        }
    }

    /// Create an empty set with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            position: HashMap::with_capacity(capacity),
        }
    }

    /// Append `item` unless an equal value is already present.
    ///
    /// Returns `true` if the item was inserted.
    pub fn add(&mut self, item: T) -> bool {
        if self.position.contains_key(&item) {
            return false;
        }
        self.position.insert(item.clone(), self.items.len());
        self.items.push(item);
        true
    }

    /// Remove `item`.
    ///
    /// Unless `item` was the last element, the last element takes its slot.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if `item` is not a member.
    pub fn remove(&mut self, item: &T) -> Result<()> {
        let slot = self.position.remove(item).ok_or(Error::KeyNotFound)?;
        // `position` and `items` always agree, so the vector is non-empty here.
        if let Some(last) = self.items.pop() {
            if slot != self.items.len() {
                self.position.insert(last.clone(), slot);
                self.items[slot] = last;
            }
        }
        Ok(())
    }

    /// Remove and return the element at `index`.
    ///
    /// Negative indices count from the end, `-1` being the last element.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index` is outside `[-len, len)`.
    pub fn pop(&mut self, index: isize) -> Result<T> {
        let slot = self.resolve(index)?;
        let item = self.items[slot].clone();
        self.remove(&item)?;
        Ok(item)
    }

    /// Remove and return the last element.
    pub fn pop_last(&mut self) -> Option<T> {
        let item = self.items.pop()?;
        self.position.remove(&item);
        Some(item)
    }

    /// Element at position `index`, if any.
    #[inline]
    pub fn item_at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Current position of `item`, if it is a member.
    #[inline]
    pub fn position(&self, item: &T) -> Option<usize> {
        self.position.get(item).copied()
    }

    /// O(1) membership test.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.position.contains_key(item)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First element, if any.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Last element, if any.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// The elements in their current internal order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate in current internal order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Pick an element uniformly at random in O(1).
    ///
    /// Requires the `rand` feature.
    #[cfg(feature = "rand")]
    pub fn choose<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.items.is_empty() {
            return None;
        }
        self.items.get(rng.gen_range(0..self.items.len()))
    }

    fn resolve(&self, index: isize) -> Result<usize> {
        let len = self.items.len();
        let slot = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index as usize).filter(|&i| i < len)
        };
        slot.ok_or(Error::IndexOutOfRange { index, len })
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for OrderedSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}
