//! Navigation state machine states.

/// One state of the drive cycle.
///
/// `Fault` is the defensive variant for situations the runner does not
/// recognize; it transitions back to `Detect` rather than wedging the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    /// Sweeping the range sensor into the occupancy grid
    Scan,

    /// Camera object detection (external collaborator, stubbed)
    Detect,

    /// Planning a route from the believed position to the goal
    Route,

    /// Executing the planned route as motion primitives
    Move,

    /// Folding the displacement into the believed position, resetting the grid
    Update,

    /// Goal reached
    Finished,

    /// Unrecognized situation; recovers via Detect
    Fault,
}

impl NavState {
    /// Is this a terminal state?
    pub fn is_terminal(&self) -> bool {
        matches!(self, NavState::Finished)
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            NavState::Scan => "Scan",
            NavState::Detect => "Detect",
            NavState::Route => "Route",
            NavState::Move => "Move",
            NavState::Update => "Update",
            NavState::Finished => "Finished",
            NavState::Fault => "Fault",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_finished_is_terminal() {
        assert!(NavState::Finished.is_terminal());
        for state in [
            NavState::Scan,
            NavState::Detect,
            NavState::Route,
            NavState::Move,
            NavState::Update,
            NavState::Fault,
        ] {
            assert!(!state.is_terminal(), "{} must not be terminal", state.name());
        }
    }
}
