//! Queue navigation rules
//!
//! Next/previous target selection over the active play context. The queue
//! itself is never reordered: shuffle only changes which index is picked.
//!
//! Precedence for a step:
//! 1. `RepeatMode::One` keeps the current index (forward only)
//! 2. Shuffle picks a uniformly random index, the current one included
//! 3. Otherwise step by one, wrapping only under `RepeatMode::All`

use rand::Rng;
use tempo_core::{RepeatMode, Track};

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `next()`
    Forward,
    /// `previous()`
    Backward,
}

/// Where a step lands before any randomness is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Index(usize),
    Random,
}

/// Compute the step target, `None` when the step is a no-op
pub(crate) fn target(
    len: usize,
    current: Option<usize>,
    repeat: RepeatMode,
    shuffled: bool,
    direction: Direction,
) -> Option<Target> {
    if len == 0 {
        return None;
    }

    if direction == Direction::Forward && repeat == RepeatMode::One {
        return current.filter(|&i| i < len).map(Target::Index);
    }

    if shuffled {
        return Some(Target::Random);
    }

    let wrap = repeat == RepeatMode::All;
    match direction {
        Direction::Forward => {
            let next = current.map_or(0, |i| i + 1);
            if next < len {
                Some(Target::Index(next))
            } else if wrap {
                Some(Target::Index(0))
            } else {
                None
            }
        }
        Direction::Backward => match current {
            Some(i) if i > 0 && i <= len => Some(Target::Index(i - 1)),
            _ if wrap => Some(Target::Index(len - 1)),
            _ => None,
        },
    }
}

/// Turn a target into a concrete index in `[0, len)`
pub(crate) fn resolve<R: Rng + ?Sized>(target: Target, len: usize, rng: &mut R) -> usize {
    match target {
        Target::Index(index) => index,
        Target::Random => rng.gen_range(0..len),
    }
}

/// Index of the first queue entry with the track's id, 0 if absent
pub fn position_of(queue: &[Track], track: &Track) -> usize {
    queue.iter().position(|t| t.id == track.id).unwrap_or(0)
}
