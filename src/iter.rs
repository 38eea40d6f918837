//! Borrowing and consuming iterators over [`RingDeque`].
//!
//! [`Iter`] walks logical indices through [`RingDeque::get`], so it never
//! holds a pointer into the ring itself and is unaffected by where the live
//! range wraps. [`IntoIter`] owns its deque and drains it one pop at a time,
//! from whichever end is asked.

use core::iter::FusedIterator;
use core::ops::Range;

use crate::deque::RingDeque;

/// Borrowing iterator over a [`RingDeque`], front to back.
///
/// Created by [`RingDeque::iter`]. Each call starts from a fresh cursor at
/// the front; exhausting one iterator has no effect on the next.
pub struct Iter<'a, T> {
    deque: &'a RingDeque<T>,
    range: Range<usize>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(deque: &'a RingDeque<T>, range: Range<usize>) -> Self {
        Self { deque, range }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.range.next()?;
        self.deque.get(index)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.range.next_back()?;
        self.deque.get(index)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            range: self.range.clone(),
        }
    }
}

/// Consuming iterator that drains a [`RingDeque`].
///
/// Created by [`IntoIterator::into_iter`]. Elements come off the front; the
/// reverse direction pops off the back instead.
pub struct IntoIter<T> {
    deque: RingDeque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for RingDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a RingDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
