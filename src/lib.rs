//! # `ringdeque` - Growable Ring Buffer Deque
//!
//! A double-ended queue over a power-of-two ring buffer, with an automatic
//! grow-and-shrink policy that keeps the allocation proportional to the
//! number of live elements.
//!
//! ## Guarantees
//!
//! - **Amortized O(1) at both ends**: pushes and pops touch one slot and one
//!   cursor; the occasional rebuild is paid for by the elements that caused
//!   it.
//! - **Absence, not errors**: popping an empty deque, peeking past either
//!   end, and indexing out of range all return `None`. No operation panics
//!   on an empty deque.
//! - **Bounded slack**: the ring doubles when full and halves once a pop
//!   leaves it under a quarter occupancy, so above the eight-slot floor the
//!   allocation never drifts arbitrarily far from the live length.
//! - **Exact ownership**: a popped slot releases its value to the caller and
//!   is never read again; dropping the deque drops each remaining element
//!   exactly once.
//!
//! ## Architecture
//!
//! The ring is addressed by two sentinel cursors that rest on the vacant
//! slots just outside the live range, one before the first element and one
//! after the last. A push therefore writes first and steps second, and a pop
//! steps first and reads second, at either end. Capacities are powers of two
//! of at least [`MIN_CAPACITY`], so every cursor step is a single mask
//! operation and index translation never divides.
//!
//! Rebuilds (in either direction) pack the survivors against physical index
//! zero and wrap the front cursor to the last slot, so a freshly resized
//! ring and a freshly created one have identical shape.
//!
//! ## Cargo features
//!
//! - `serde`: serialize a deque as a plain sequence of its elements.
//! - `tracing`: emit a trace event on every ring rebuild.
//!
//! Both are disabled by default.
//!
//! ## Example
//!
//! ```rust
//! use ringdeque::RingDeque;
//!
//! let mut recent: RingDeque<u32> = (1..=3).collect();
//! recent.push_front(0);
//! recent.push_back(4);
//!
//! assert_eq!(recent, [0, 1, 2, 3, 4]);
//! assert_eq!(recent.pop_front(), Some(0));
//! assert_eq!(recent.pop_back(), Some(4));
//! assert_eq!(recent.to_vec(), vec![1, 2, 3]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod cursor;
pub mod deque;
pub mod iter;
#[cfg(feature = "serde")]
mod serde_impls;

pub use deque::{RingDeque, MIN_CAPACITY};
pub use iter::{IntoIter, Iter};

// Compile-time assertions for the layout claims above.
const _: () = {
    use core::mem;

    // A slot carries no initialization flag alongside the element.
    assert!(mem::size_of::<mem::MaybeUninit<u64>>() == mem::size_of::<u64>());

    // The deque header is a boxed slice (pointer + length), two cursors and
    // a count. Nothing hidden.
    assert!(mem::size_of::<RingDeque<u64>>() == 5 * mem::size_of::<usize>());

    // The storage pointer's niche keeps `Option<RingDeque<T>>` free.
    assert!(mem::size_of::<Option<RingDeque<u64>>>() == mem::size_of::<RingDeque<u64>>());
};
