//! Circular cursor arithmetic over power-of-two capacities.
//!
//! The deque keeps its slot count a power of two so that stepping a cursor
//! compiles to a single mask instead of a divide. `retreat` uses wrapping
//! subtraction, letting a step below zero land on `capacity - 1` without
//! any signed arithmetic.

/// Steps a physical slot index one position forward, wrapping at `capacity`.
#[inline(always)]
pub(crate) fn advance(index: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    debug_assert!(index < capacity);
    (index + 1) & (capacity - 1)
}

/// Steps a physical slot index one position backward, wrapping at `capacity`.
#[inline(always)]
pub(crate) fn retreat(index: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    debug_assert!(index < capacity);
    index.wrapping_sub(1) & (capacity - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_at_capacity() {
        assert_eq!(advance(0, 8), 1);
        assert_eq!(advance(6, 8), 7);
        assert_eq!(advance(7, 8), 0);
        assert_eq!(advance(15, 16), 0);
    }

    #[test]
    fn retreat_wraps_below_zero() {
        assert_eq!(retreat(7, 8), 6);
        assert_eq!(retreat(1, 8), 0);
        assert_eq!(retreat(0, 8), 7);
        assert_eq!(retreat(0, 16), 15);
    }

    #[test]
    fn advance_and_retreat_are_inverses() {
        for capacity in [8, 16, 32, 64] {
            for index in 0..capacity {
                assert_eq!(retreat(advance(index, capacity), capacity), index);
                assert_eq!(advance(retreat(index, capacity), capacity), index);
            }
        }
    }
}
