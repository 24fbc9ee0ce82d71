#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Next,     // Forward through the deck, wraps N-1 -> 0
    Previous, // Backward, wraps 0 -> N-1
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }

    /// +1.0 when travelling forward, -1.0 backward. Used to orient every transform.
    pub fn sign(self) -> f32 {
        self.step() as f32
    }
}

/// The externally observable part of navigation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct NavigationState {
    pub current_index: usize,
    pub busy: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TransitionRequest {
    pub from_index: usize,
    pub to_index: usize,
    pub direction: Direction,
}

pub fn wrap(index: usize, step: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + step).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        assert_eq!(wrap(4, 1, 5), 0);
        assert_eq!(wrap(0, -1, 5), 4);
        assert_eq!(wrap(2, 1, 5), 3);
    }

    #[test]
    fn empty_deck_wraps_to_zero() {
        assert_eq!(wrap(0, 1, 0), 0);
    }
}
