//! Mutable runtime state of a controller.

use core::fmt;

use gridstep_motion::{Direction, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which half of the two-state machine the controller is in.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementPhase {
    /// Resting on a lattice point and accepting input.
    #[default]
    Idle,
    /// Committed to one tile transition; input is ignored.
    Stepping,
}

impl MovementPhase {
    /// Returns `true` while a step is in progress.
    pub const fn is_moving(self) -> bool {
        matches!(self, MovementPhase::Stepping)
    }
}

impl fmt::Display for MovementPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementPhase::Idle => write!(f, "Idle"),
            MovementPhase::Stepping => write!(f, "Stepping"),
        }
    }
}

/// Everything that changes while the controller runs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepState {
    /// Current phase.
    pub phase: MovementPhase,
    /// Destination of the current or most recent step.
    pub target: Vec2,
    /// Tile occupied before the current step began; the rollback destination.
    pub previous: Vec2,
    /// Most recently committed direction, `None` until the first step.
    pub last_direction: Option<Direction>,
    /// Physics time accumulated since the current step began (seconds).
    pub move_timer: f32,
}

impl StepState {
    /// Fresh state resting at `position`.
    pub const fn at(position: Vec2) -> Self {
        StepState {
            phase: MovementPhase::Idle,
            target: position,
            previous: position,
            last_direction: None,
            move_timer: 0.0,
        }
    }

    /// Unit vector of the last committed direction, or zero before any step.
    pub fn last_move_vector(&self) -> Vec2 {
        self.last_direction.map_or(Vec2::ZERO, Direction::unit)
    }

    /// Commits a new step from `origin` to `target`.
    pub(crate) fn begin_step(&mut self, origin: Vec2, target: Vec2, direction: Direction) {
        self.previous = origin;
        self.target = target;
        self.phase = MovementPhase::Stepping;
        self.last_direction = Some(direction);
        self.move_timer = 0.0;
    }

    /// Returns to `Idle` after a successful arrival.
    pub(crate) fn finish_step(&mut self) {
        self.phase = MovementPhase::Idle;
        self.move_timer = 0.0;
    }

    /// Returns to `Idle` at the step origin.
    pub(crate) fn roll_back(&mut self) {
        self.phase = MovementPhase::Idle;
        self.target = self.previous;
        self.move_timer = 0.0;
    }
}

impl Default for StepState {
    fn default() -> Self {
        StepState::at(Vec2::ZERO)
    }
}
