//! Step rule and cyclic pointer arithmetic
//!
//! All modulo arithmetic on the pointer lives here; the tree only ever sees
//! plain in-range positions.

/// Operation chosen by the value under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// Odd value `x`: insert `x - 1` after the pointer, advance by `x`
    Add,

    /// Even value: remove the element after the pointer, advance by its value
    Delete,
}

impl StepKind {
    /// Odd → Add, even → Delete (mathematical parity, so -3 is odd)
    #[inline]
    pub fn for_value(value: i64) -> Self {
        if value.rem_euclid(2) == 1 {
            StepKind::Add
        } else {
            StepKind::Delete
        }
    }
}

/// What one step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRecord {
    /// Operation performed
    pub kind: StepKind,

    /// Value under the pointer that selected the operation
    pub trigger: i64,

    /// Position inserted at or removed from
    pub position: usize,

    /// Value inserted (Add) or removed (Delete)
    pub operand: i64,

    /// Pointer after the step
    pub pointer: usize,

    /// Sequence length after the step
    pub len: usize,
}

/// Slot immediately after the pointer in a sequence of length `len`.
///
/// When the pointer is on the last element this is `len` (append), not 0:
/// the new element goes after the last one rather than wrapping to the front.
#[inline]
pub(crate) fn insert_position(pointer: usize, len: usize) -> usize {
    debug_assert!(pointer < len);
    if pointer + 1 == len {
        len
    } else {
        (pointer + 1) % len
    }
}

/// Element cyclically after the pointer.
#[inline]
pub(crate) fn remove_position(pointer: usize, len: usize) -> usize {
    debug_assert!(pointer < len);
    if pointer + 1 == len {
        0
    } else {
        pointer + 1
    }
}

/// Move `pointer` by `steps` around a cycle of length `len` (> 0).
///
/// Negative steps move backwards. Computed in i128 so no `i64` step can
/// overflow.
#[inline]
pub(crate) fn advance(pointer: usize, steps: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    (pointer as i128 + steps as i128).rem_euclid(len as i128) as usize
}

/// One step backwards around a cycle of length `len` (> 0).
#[inline]
pub(crate) fn retreat(pointer: usize, len: usize) -> usize {
    advance(pointer, -1, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity() {
        assert_eq!(StepKind::for_value(1), StepKind::Add);
        assert_eq!(StepKind::for_value(-3), StepKind::Add);
        assert_eq!(StepKind::for_value(0), StepKind::Delete);
        assert_eq!(StepKind::for_value(-4), StepKind::Delete);
        assert_eq!(StepKind::for_value(i64::MAX), StepKind::Add);
        assert_eq!(StepKind::for_value(i64::MIN), StepKind::Delete);
    }

    #[test]
    fn test_insert_position_appends_after_last() {
        assert_eq!(insert_position(0, 1), 1);
        assert_eq!(insert_position(0, 2), 1);
        assert_eq!(insert_position(3, 4), 4);
        assert_eq!(insert_position(1, 4), 2);
    }

    #[test]
    fn test_remove_position_wraps() {
        assert_eq!(remove_position(0, 1), 0);
        assert_eq!(remove_position(3, 4), 0);
        assert_eq!(remove_position(1, 4), 2);
    }

    #[test]
    fn test_advance() {
        assert_eq!(advance(0, 1, 3), 1);
        assert_eq!(advance(2, 5, 3), 1);
        assert_eq!(advance(0, -1, 3), 2);
        assert_eq!(advance(1, -7, 3), 0);
        assert!(advance(4, i64::MAX, 7) < 7);
        assert!(advance(4, i64::MIN, 7) < 7);
        assert_eq!(retreat(0, 5), 4);
        assert_eq!(retreat(3, 5), 2);
    }
}
