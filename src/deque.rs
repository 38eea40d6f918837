//! `RingDeque`: a growable double-ended queue over a power-of-two ring.
//!
//! The ring is addressed by two sentinel cursors that always sit on the
//! vacant slots just outside the live range:
//!
//! - `head` names the slot immediately before the first element, so a front
//!   push writes in place and then steps backward.
//! - `tail` names the slot immediately after the last element, so a back
//!   push writes in place and then steps forward.
//!
//! Element count lives in a separate `len` field; the cursors alone cannot
//! distinguish a full ring from an empty one. Capacity is always a power of
//! two of at least [`MIN_CAPACITY`], which keeps every cursor step a single
//! mask operation.
//!
//! Resizing policy:
//! - A push that finds every slot occupied doubles the ring before writing.
//! - A pop that leaves the ring less than a quarter full halves it, never
//!   below [`MIN_CAPACITY`].
//! - Both directions rebuild into the same canonical layout: elements packed
//!   from physical index 0, `head` wrapped to `capacity - 1`, `tail` at
//!   `len`.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::MaybeUninit;
use std::collections::VecDeque;

use crate::cursor::{advance, retreat};
use crate::iter::Iter;

/// Smallest number of slots the deque keeps allocated.
pub const MIN_CAPACITY: usize = 8;

/// A growable double-ended queue backed by a circular ring of slots.
///
/// Pushes and pops at either end run in amortized constant time. The ring
/// doubles when an insertion finds every slot occupied and halves after a
/// removal leaves it less than a quarter full, so the allocation tracks the
/// live length within a constant factor.
///
/// Out-of-range access is reported through `Option` rather than a panic:
/// popping an empty deque and indexing past the end both return `None`.
///
/// # Example
///
/// ```
/// use ringdeque::RingDeque;
///
/// let mut deque = RingDeque::new();
/// deque.push_front(1);
/// deque.push_back(2);
/// assert_eq!(deque.len(), 2);
/// assert_eq!(deque.pop_front(), Some(1));
/// assert_eq!(deque.pop_back(), Some(2));
/// assert_eq!(deque.pop_front(), None);
/// ```
pub struct RingDeque<T> {
    /// Ring storage. Slot validity is tracked entirely by the cursors and
    /// `len`; the slots themselves carry no initialization flag.
    slots: Box<[MaybeUninit<T>]>,
    /// The vacant slot immediately before the first element.
    head: usize,
    /// The vacant slot immediately after the last element.
    tail: usize,
    /// Number of live elements.
    len: usize,
}

impl<T> RingDeque<T> {
    /// Creates an empty deque with [`MIN_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty deque with room for at least `capacity` elements.
    ///
    /// The allocation is rounded up to a power of two and never falls below
    /// [`MIN_CAPACITY`].
    ///
    /// # Panics
    ///
    /// Panics if `capacity` cannot be rounded up to a power of two without
    /// overflowing `usize`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = match capacity.max(MIN_CAPACITY).checked_next_power_of_two() {
            Some(capacity) => capacity,
            None => panic!("capacity overflow"),
        };
        Self {
            slots: Box::new_uninit_slice(capacity),
            head: capacity - 1,
            tail: 0,
            len: 0,
        }
    }

    /// Returns the number of elements in the deque.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of allocated slots.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maps a logical index (0 is the front) to a physical slot index.
    #[inline(always)]
    fn physical(&self, index: usize) -> usize {
        (self.head + 1 + index) & (self.slots.len() - 1)
    }

    /// Returns a reference to the element at `index`, front first.
    ///
    /// Returns `None` if `index` is past the last element.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let slot = self.physical(index);
        // SAFETY: indices below `len` map to slots inside the live range,
        // which hold initialized values.
        unsafe { Some(self.slots.get_unchecked(slot).assume_init_ref()) }
    }

    /// Returns a mutable reference to the element at `index`, front first.
    ///
    /// Returns `None` if `index` is past the last element.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let slot = self.physical(index);
        // SAFETY: indices below `len` map to slots inside the live range,
        // which hold initialized values.
        unsafe { Some(self.slots.get_unchecked_mut(slot).assume_init_mut()) }
    }

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            self.get(self.len - 1)
        }
    }

    /// Returns a mutable reference to the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns a mutable reference to the last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        } else {
            self.get_mut(self.len - 1)
        }
    }

    /// Adds `value` as the new first element, growing the ring if it is full.
    #[inline]
    pub fn push_front(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        // SAFETY: `head` is always in bounds, and the fullness check above
        // guarantees the slot it names is vacant.
        unsafe {
            self.slots.get_unchecked_mut(self.head).write(value);
        }
        self.head = retreat(self.head, self.slots.len());
        self.len += 1;
    }

    /// Adds `value` as the new last element, growing the ring if it is full.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        // SAFETY: `tail` is always in bounds, and the fullness check above
        // guarantees the slot it names is vacant.
        unsafe {
            self.slots.get_unchecked_mut(self.tail).write(value);
        }
        self.tail = advance(self.tail, self.slots.len());
        self.len += 1;
    }

    /// Removes and returns the first element, or `None` if the deque is
    /// empty. May halve the ring afterwards.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.head = advance(self.head, self.slots.len());
        // SAFETY: the deque is non-empty, so the slot one step ahead of the
        // old head position holds the first element. Reading it moves the
        // value out and the slot becomes vacant, which matches the new head
        // position.
        let value = unsafe { self.slots.get_unchecked(self.head).assume_init_read() };
        self.len -= 1;
        self.maybe_shrink();
        Some(value)
    }

    /// Removes and returns the last element, or `None` if the deque is
    /// empty. May halve the ring afterwards.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.tail = retreat(self.tail, self.slots.len());
        // SAFETY: the deque is non-empty, so the slot one step behind the
        // old tail position holds the last element. Reading it moves the
        // value out and the slot becomes vacant, which matches the new tail
        // position.
        let value = unsafe { self.slots.get_unchecked(self.tail).assume_init_read() };
        self.len -= 1;
        self.maybe_shrink();
        Some(value)
    }

    /// Drops every element, keeping the current allocation.
    ///
    /// The shrink rule applies to pops only, so clearing never reallocates
    /// and `Drop` stays allocation-free.
    pub fn clear(&mut self) {
        let capacity = self.slots.len();
        while self.len > 0 {
            self.head = advance(self.head, capacity);
            // The count comes off before the drop: if the element's `Drop`
            // unwinds, `head` and `len` still describe exactly the surviving
            // elements, and the destroyed slot is never revisited.
            self.len -= 1;
            // SAFETY: the slot the head cursor just moved onto held the
            // first of the `len + 1` live elements.
            unsafe {
                self.slots.get_unchecked_mut(self.head).assume_init_drop();
            }
        }
        self.head = capacity - 1;
        self.tail = 0;
    }

    /// Applies `f` to every element in front-to-back order, with exclusive
    /// access to each.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        for index in 0..self.len {
            let slot = self.physical(index);
            // SAFETY: indices below `len` name initialized slots.
            unsafe {
                f(self.slots.get_unchecked_mut(slot).assume_init_mut());
            }
        }
    }

    /// Copies the elements into a `Vec` in front-to-back order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns a borrowing iterator over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, 0..self.len)
    }

    /// Doubles the ring. Called on the push path when every slot is live.
    fn grow(&mut self) {
        self.rebuild(self.slots.len() * 2);
    }

    /// Halves the ring after a pop once occupancy drops below a quarter.
    /// The capacity floor is [`MIN_CAPACITY`].
    fn maybe_shrink(&mut self) {
        let capacity = self.slots.len();
        if capacity > MIN_CAPACITY && self.len < capacity / 4 {
            self.rebuild(capacity / 2);
        }
    }

    /// Moves the live elements into a fresh ring of `new_capacity` slots,
    /// packed from physical index 0 with the cursors in canonical form:
    /// `head` wrapped to the last slot, `tail` right after the elements.
    fn rebuild(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity.is_power_of_two());
        debug_assert!(new_capacity >= MIN_CAPACITY);
        debug_assert!(self.len < new_capacity);

        #[cfg(feature = "tracing")]
        let old_capacity = self.slots.len();

        let mut slots = Box::new_uninit_slice(new_capacity);
        for index in 0..self.len {
            let src = self.physical(index);
            // SAFETY: `src` walks exactly the initialized slots in order.
            // Each value is moved into the fresh buffer and its old slot
            // becomes vacant; the old buffer is then discarded below without
            // touching its slots again.
            unsafe {
                let value = self.slots.get_unchecked(src).assume_init_read();
                slots.get_unchecked_mut(index).write(value);
            }
        }
        self.slots = slots;
        self.head = new_capacity - 1;
        self.tail = self.len;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            old_capacity,
            new_capacity,
            len = self.len,
            "rebuilt ring storage"
        );
    }
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RingDeque<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for RingDeque<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<RingDeque<U>> for RingDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &RingDeque<U>) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T, U> PartialEq<[U]> for RingDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T, U> PartialEq<&[U]> for RingDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for RingDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self == &other[..]
    }
}

impl<T, U, const N: usize> PartialEq<&[U; N]> for RingDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U; N]) -> bool {
        self == &other[..]
    }
}

impl<T, U> PartialEq<Vec<U>> for RingDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self == other.as_slice()
    }
}

impl<T, U> PartialEq<VecDeque<U>> for RingDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &VecDeque<U>) -> bool {
        self.len == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for RingDeque<T> {}

impl<T: PartialOrd> PartialOrd for RingDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for RingDeque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for RingDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T> FromIterator<T> for RingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            deque.push_back(value);
        }
        deque
    }
}

impl<T> Extend<T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn empty_deque_behavior() {
        let mut deque: RingDeque<i32> = RingDeque::new();
        assert_eq!(deque.len(), 0);
        assert!(deque.is_empty());
        assert_eq!(deque.capacity(), MIN_CAPACITY);
        assert_eq!(deque.pop_front(), None);
        assert_eq!(deque.pop_back(), None);
        assert_eq!(deque.front(), None);
        assert_eq!(deque.back(), None);
        assert_eq!(deque.get(0), None);
    }

    #[test]
    fn basic_operations_both_ends() {
        let mut deque = RingDeque::new();
        deque.push_back(1);
        deque.push_back(2);
        deque.push_front(0);

        assert_eq!(deque.len(), 3);
        assert_eq!(deque.front(), Some(&0));
        assert_eq!(deque.back(), Some(&2));
        assert_eq!(deque.get(0), Some(&0));
        assert_eq!(deque.get(1), Some(&1));
        assert_eq!(deque.get(2), Some(&2));
        assert_eq!(deque.get(3), None);

        *deque.get_mut(1).unwrap() += 10;
        assert_eq!(deque.get(1), Some(&11));
        *deque.front_mut().unwrap() -= 1;
        *deque.back_mut().unwrap() += 1;

        assert_eq!(deque.pop_front(), Some(-1));
        assert_eq!(deque.pop_back(), Some(3));
        assert_eq!(deque.pop_front(), Some(11));
        assert!(deque.is_empty());
    }

    #[test]
    fn wrap_around_without_resize() {
        let mut deque = RingDeque::new();
        for i in 1..=4 {
            deque.push_back(i);
        }
        assert_eq!(deque.pop_front(), Some(1));
        assert_eq!(deque.pop_front(), Some(2));
        deque.push_back(5);
        deque.push_back(6);
        deque.push_back(7);
        deque.push_back(8);

        assert_eq!(deque.capacity(), MIN_CAPACITY);
        let collected: Vec<_> = deque.iter().copied().collect();
        assert_eq!(collected, vec![3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn growth_preserves_order() {
        let mut deque = RingDeque::new();
        for i in 0..100 {
            deque.push_back(i);
        }
        assert_eq!(deque.len(), 100);
        assert_eq!(deque.capacity(), 128);
        for i in 0..100 {
            assert_eq!(deque.get(i), Some(&i));
        }
    }

    #[test]
    fn growth_from_wrapped_state() {
        let mut deque = RingDeque::new();
        for i in 0..6 {
            deque.push_back(i);
        }
        deque.pop_front();
        deque.pop_front();
        for i in 6..11 {
            deque.push_back(i);
        }
        // The last push found all eight slots live and doubled the ring.
        assert_eq!(deque.capacity(), 16);
        let collected: Vec<_> = deque.iter().copied().collect();
        assert_eq!(collected, (2..11).collect::<Vec<_>>());
    }

    #[test]
    fn shrinks_when_sparse() {
        let mut deque = RingDeque::new();
        for i in 0..9 {
            deque.push_back(i);
        }
        assert_eq!(deque.capacity(), 16);

        for _ in 0..5 {
            deque.pop_front();
        }
        // Four live elements in sixteen slots is exactly a quarter full,
        // which does not yet trigger the shrink.
        assert_eq!(deque.len(), 4);
        assert_eq!(deque.capacity(), 16);

        assert_eq!(deque.pop_front(), Some(5));
        assert_eq!(deque.len(), 3);
        assert_eq!(deque.capacity(), 8);

        assert_eq!(deque.pop_front(), Some(6));
        assert_eq!(deque.pop_front(), Some(7));
        assert_eq!(deque.pop_front(), Some(8));
        assert_eq!(deque.pop_front(), None);
        assert_eq!(deque.capacity(), 8);
    }

    #[test]
    fn capacity_never_drops_below_floor() {
        let mut deque = RingDeque::new();
        for _ in 0..3 {
            deque.push_back(0u8);
            deque.pop_back();
            deque.pop_front();
        }
        assert_eq!(deque.capacity(), MIN_CAPACITY);
    }

    #[test]
    fn with_capacity_rounds_up() {
        assert_eq!(RingDeque::<u8>::with_capacity(0).capacity(), 8);
        assert_eq!(RingDeque::<u8>::with_capacity(8).capacity(), 8);
        assert_eq!(RingDeque::<u8>::with_capacity(9).capacity(), 16);
        assert_eq!(RingDeque::<u8>::with_capacity(100).capacity(), 128);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn with_capacity_rejects_overflowing_requests() {
        let _ = RingDeque::<u8>::with_capacity(usize::MAX);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut deque: RingDeque<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(deque.capacity(), 32);
        deque.clear();
        assert!(deque.is_empty());
        assert_eq!(deque.capacity(), 32);

        deque.push_back("again".to_string());
        assert_eq!(deque.get(0).map(String::as_str), Some("again"));
    }

    #[test]
    fn for_each_mut_visits_front_to_back() {
        let mut deque: RingDeque<i32> = (0..5).collect();
        let mut seen = Vec::new();
        deque.for_each_mut(|value| {
            seen.push(*value);
            *value *= 2;
        });
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(deque.to_vec(), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn elements_drop_exactly_once() {
        struct Dropper(Rc<RefCell<i32>>);
        impl Drop for Dropper {
            fn drop(&mut self) {
                *self.0.borrow_mut() += 1;
            }
        }

        let counter = Rc::new(RefCell::new(0));
        {
            let mut deque = RingDeque::new();
            for _ in 0..10 {
                deque.push_back(Dropper(counter.clone()));
            }
            deque.pop_front();
            deque.pop_back();
            assert_eq!(*counter.borrow(), 2);
        }
        assert_eq!(*counter.borrow(), 10);

        let counter = Rc::new(RefCell::new(0));
        let mut deque = RingDeque::new();
        for _ in 0..4 {
            deque.push_front(Dropper(counter.clone()));
        }
        deque.clear();
        assert_eq!(*counter.borrow(), 4);
    }

    #[test]
    fn clear_stays_consistent_when_a_drop_panics() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        struct Fused {
            id: i32,
            armed: bool,
            dropped: Rc<RefCell<Vec<i32>>>,
        }
        impl Drop for Fused {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.id);
                if self.armed {
                    panic!("armed drop");
                }
            }
        }

        let dropped = Rc::new(RefCell::new(Vec::new()));
        let mut deque = RingDeque::new();
        for id in 0..3 {
            deque.push_back(Fused {
                id,
                armed: id == 0,
                dropped: dropped.clone(),
            });
        }

        let unwound = catch_unwind(AssertUnwindSafe(|| deque.clear()));
        assert!(unwound.is_err());

        // The element destroyed by the unwinding drop is no longer counted,
        // and the survivors are still reachable.
        assert_eq!(deque.len(), 2);
        assert_eq!(deque.front().map(|e| e.id), Some(1));
        assert_eq!(deque.back().map(|e| e.id), Some(2));

        drop(deque);
        assert_eq!(*dropped.borrow(), vec![0, 1, 2]);
    }
}
