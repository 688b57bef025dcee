//! Silence-boundary search with zero-crossing snapping.

use crate::buffer::AudioBuffer;

/// Traversal direction of a boundary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Walk frames from `start` toward `end` (exclusive) and return the last
/// zero-crossing seen before the first frame louder than `threshold`.
///
/// Returns `start` when nothing in range exceeds the threshold, or when no
/// sign change precedes the loud frame. A frame counts as a crossing when it is
/// strictly positive after a value `<= 0`, or strictly negative after a value
/// `>= 0`; the previous value starts at zero. Frames in range must exist in
/// `buffer`.
///
/// A range that stays under the threshold has no onset to cut towards, so a
/// source that is quiet throughout keeps its full length.
pub fn find_boundary(
    buffer: &AudioBuffer,
    start: usize,
    end: usize,
    threshold: f64,
    direction: Direction,
) -> usize {
    let mut last_value = 0.0;
    let mut last_crossing = start;
    let mut index = start;

    loop {
        let in_range = match direction {
            Direction::Forward => index < end,
            Direction::Reverse => index > end,
        };
        if !in_range {
            break;
        }

        let value = buffer.frame_value(index);
        if (value > 0.0 && last_value <= 0.0) || (value < 0.0 && last_value >= 0.0) {
            last_crossing = index;
        }
        if value.abs() > threshold {
            return last_crossing;
        }
        last_value = value;

        index = match direction {
            Direction::Forward => index + 1,
            Direction::Reverse => index - 1,
        };
    }

    // signal never rose above the threshold: leave the boundary where it was
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Samples;

    fn mono(values: &[f32]) -> AudioBuffer {
        AudioBuffer::mono(Samples::Float32(values.to_vec()))
    }

    #[test]
    fn snaps_back_to_sign_change() {
        let buffer = mono(&[-0.01, -0.01, 0.01, 0.02, 0.03, 0.5, 0.6]);
        assert_eq!(find_boundary(&buffer, 0, 6, 0.1, Direction::Forward), 2);
    }

    #[test]
    fn quiet_range_returns_start() {
        let buffer = mono(&[0.01, -0.01, 0.01, -0.01, 0.01]);
        assert_eq!(find_boundary(&buffer, 0, 4, 0.1, Direction::Forward), 0);
        assert_eq!(find_boundary(&buffer, 4, 0, 0.1, Direction::Reverse), 4);
        // loud frame sits at the exclusive end, so it is never visited
        let buffer = mono(&[0.01, -0.01, 0.01, 0.9]);
        assert_eq!(find_boundary(&buffer, 0, 3, 0.1, Direction::Forward), 0);
        let silent = mono(&[0.0; 8]);
        assert_eq!(find_boundary(&silent, 0, 7, 0.1, Direction::Forward), 0);
        assert_eq!(find_boundary(&silent, 7, 0, 0.1, Direction::Reverse), 7);
    }

    #[test]
    fn empty_range_returns_start() {
        let buffer = mono(&[0.9, 0.9]);
        assert_eq!(find_boundary(&buffer, 1, 1, 0.1, Direction::Forward), 1);
        assert_eq!(find_boundary(&buffer, 0, 0, 0.1, Direction::Reverse), 0);
    }

    #[test]
    fn reverse_scan_finds_tail() {
        let buffer = mono(&[0.0, 0.8, -0.7, 0.5, 0.01, -0.01, 0.01, 0.0]);
        // 6 crosses up, 5 crosses down, 4 crosses up, 3 is loud
        assert_eq!(find_boundary(&buffer, 7, 0, 0.1, Direction::Reverse), 4);
    }

    #[test]
    fn loud_first_frame_is_its_own_boundary() {
        let buffer = mono(&[-0.9, 0.0, 0.0]);
        assert_eq!(find_boundary(&buffer, 0, 2, 0.1, Direction::Forward), 0);
    }

    #[test]
    fn exact_zero_counts_toward_both_crossings() {
        let buffer = mono(&[-0.01, 0.0, 0.01, 0.9]);
        assert_eq!(find_boundary(&buffer, 0, 4, 0.1, Direction::Forward), 2);
        let buffer = mono(&[0.01, 0.0, -0.01, -0.9]);
        assert_eq!(find_boundary(&buffer, 0, 4, 0.1, Direction::Forward), 2);
    }
}
