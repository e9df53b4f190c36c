//! Per-invocation build state machine.
//!
//! `Idle → Cleaning → Cleaned | CleanFailed → Building → Built | BuildFailed`.
//! `Building` is only reachable from `Cleaned`; the three failure states and
//! `Built` are terminal.

use crate::bundler::error::{Error, Result};
use std::fmt::{self, Display};

/// Where a clean → build sequence currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildState {
    /// Nothing has run yet.
    #[default]
    Idle,
    /// The cleaner is running.
    Cleaning,
    /// The workspace is clean; the builder may start.
    Cleaned,
    /// The cleaner failed.
    CleanFailed,
    /// The packaging tool is running.
    Building,
    /// An artifact was produced and verified.
    Built,
    /// Packaging failed.
    BuildFailed,
}

impl BuildState {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            BuildState::Idle => "idle",
            BuildState::Cleaning => "cleaning",
            BuildState::Cleaned => "cleaned",
            BuildState::CleanFailed => "clean-failed",
            BuildState::Building => "building",
            BuildState::Built => "built",
            BuildState::BuildFailed => "build-failed",
        }
    }

    /// True for states nothing can leave.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BuildState::CleanFailed | BuildState::Built | BuildState::BuildFailed
        )
    }

    /// Moves to `next`, rejecting transitions outside the sequence.
    pub fn advance(&mut self, next: BuildState) -> Result<()> {
        use BuildState::*;

        let allowed = matches!(
            (*self, next),
            (Idle, Cleaning)
                | (Cleaning, Cleaned)
                | (Cleaning, CleanFailed)
                | (Cleaned, Building)
                | (Building, Built)
                | (Building, BuildFailed)
        );

        if !allowed {
            return Err(Error::InvalidTransition {
                from: self.as_str(),
                to: next.as_str(),
            });
        }

        log::debug!("build state: {} -> {}", self, next);
        *self = next;
        Ok(())
    }
}

impl Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::BuildState::*;
    use super::*;

    #[test]
    fn happy_path_reaches_built() {
        let mut state = BuildState::default();
        for next in [Cleaning, Cleaned, Building, Built] {
            state.advance(next).unwrap();
        }
        assert_eq!(state, Built);
        assert!(state.is_terminal());
    }

    #[test]
    fn building_requires_cleaned() {
        for from in [Idle, Cleaning, CleanFailed] {
            let mut state = from;
            let err = state.advance(Building).unwrap_err();
            assert!(matches!(err, Error::InvalidTransition { to: "building", .. }));
            assert_eq!(state, from);
        }
    }

    #[test]
    fn terminal_states_do_not_move() {
        for from in [CleanFailed, Built, BuildFailed] {
            let mut state = from;
            assert!(state.advance(Cleaning).is_err());
        }
    }
}
