use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Move a selection index one step through a list of `count` entries, wrapping at both ends.
///
/// `count` is non-zero by construction; an empty list has no selection to move.
pub fn advance(selection: usize, direction: Direction, count: NonZeroUsize) -> usize {
    let count = count.get();
    let selection = selection % count;
    match direction {
        Direction::Next => (selection + 1) % count,
        Direction::Prev => (selection + count - 1) % count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    #[test]
    fn next_wraps_to_start() {
        assert_eq!(advance(0, Direction::Next, n(3)), 1);
        assert_eq!(advance(2, Direction::Next, n(3)), 0);
    }

    #[test]
    fn prev_wraps_to_end() {
        assert_eq!(advance(0, Direction::Prev, n(3)), 2);
        assert_eq!(advance(1, Direction::Prev, n(3)), 0);
    }

    #[test]
    fn single_entry_stays_put() {
        assert_eq!(advance(0, Direction::Next, n(1)), 0);
        assert_eq!(advance(0, Direction::Prev, n(1)), 0);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        for count in 1..8 {
            for start in 0..count {
                let mut sel = start;
                for _ in 0..count {
                    sel = advance(sel, Direction::Next, n(count));
                }
                assert_eq!(sel, start);
            }
        }
    }

    #[test]
    fn prev_undoes_next() {
        for count in 1..8 {
            for start in 0..count {
                let there = advance(start, Direction::Next, n(count));
                assert_eq!(advance(there, Direction::Prev, n(count)), start);
            }
        }
    }
}
