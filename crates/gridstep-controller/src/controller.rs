//! The tile-step state machine.
//!
//! A [`GridStepController`] is driven by two entry points owned by the host:
//!
//! - [`GridStepController::on_frame`] once per rendered frame. While `Idle` it
//!   samples input and may commit to a one-tile step.
//! - [`GridStepController::on_fixed_step`] once per physics tick. While
//!   `Stepping` it moves the body toward the target, detects arrival and rolls
//!   the step back if it takes longer than the configured timeout.
//!
//! When arrival and timeout would both fire on the same tick, arrival wins:
//! the timeout check only runs for steps that are still incomplete.

use core::fmt;

use gridstep_motion::{Direction, Lattice, Vec2, advance_towards};
use tracing::{debug, info, trace, warn};

use crate::config::StepConfig;
use crate::error::ConfigError;
use crate::layer::LayerMask;
use crate::state::{MovementPhase, StepState};
use crate::traits::{AnimationSink, DirectionalInput, PhysicsBody};

/// Distance (world units) under which the body counts as having arrived.
pub const ARRIVAL_EPSILON: f32 = 0.01;

/// Result of one frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// A step is in progress; input was not read.
    Busy,
    /// No direction was pressed; the idle pose was refreshed.
    Idle,
    /// A new step was committed.
    StepStarted {
        /// Committed direction.
        direction: Direction,
        /// Position the step started from.
        from: Vec2,
        /// Target tile.
        to: Vec2,
    },
}

/// Result of one physics tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Nothing to do; the controller is resting.
    Idle,
    /// The step is still underway.
    Moving,
    /// The body reached the target and was snapped onto it.
    Arrived {
        /// The tile the body now rests on.
        at: Vec2,
    },
    /// The step timed out and the body was returned to its origin.
    RolledBack {
        /// The tile the body was returned to.
        to: Vec2,
        /// Where the body was when the timeout fired.
        stalled_at: Vec2,
    },
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Idle => write!(f, "idle"),
            StepOutcome::Moving => write!(f, "moving"),
            StepOutcome::Arrived { at } => write!(f, "arrived at {}", at),
            StepOutcome::RolledBack { to, stalled_at } => {
                write!(f, "rolled back to {} (stalled at {})", to, stalled_at)
            }
        }
    }
}

/// Discrete grid-movement controller for one actor.
///
/// Owns the actor's physics body and animation sink; input is handed in on
/// every frame tick.
#[derive(Debug)]
pub struct GridStepController<B, A> {
    config: StepConfig,
    lattice: Lattice,
    state: StepState,
    body: B,
    animator: A,
}

impl<B: PhysicsBody, A: AnimationSink> GridStepController<B, A> {
    /// Construct a controller resting at the body's current position.
    ///
    /// # Arguments
    ///
    /// * `config`: Step tuning; validated here, so a controller never ticks
    ///   with an unusable configuration.
    /// * `body`: The physics body to drive.
    /// * `animator`: Receives the walk-cycle parameters.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`StepConfig::validate`].
    pub fn new(config: StepConfig, body: B, animator: A) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        let lattice = Lattice::new(config.tile_size)?;
        let state = StepState::at(body.position());
        info!(%config, position = %state.target, "Grid step controller initialized");
        Ok(GridStepController {
            config,
            lattice,
            state,
            body,
            animator,
        })
    }

    /// Frame tick: sample input and maybe start a step.
    ///
    /// Only does work while `Idle`. Horizontal input dominates vertical input,
    /// so a diagonal press commits to the horizontal direction. The body is
    /// never moved here.
    pub fn on_frame<I: DirectionalInput + ?Sized>(&mut self, input: &mut I) -> FrameOutcome {
        if self.state.phase.is_moving() {
            return FrameOutcome::Busy;
        }

        let (x, y) = input.read();
        match Direction::from_axes(x, y) {
            Some(direction) => {
                let from = self.body.position();
                let to = self.lattice.step_from(from, direction);
                self.state.begin_step(from, to, direction);

                let unit = direction.unit();
                self.animator.set_directional(unit.x, unit.y);
                self.animator.set_moving(true);

                debug!(%direction, %from, %to, "Step started");
                FrameOutcome::StepStarted {
                    direction,
                    from,
                    to,
                }
            }
            None => {
                // Idle pose keeps facing the last travel direction.
                let facing = self.state.last_move_vector();
                self.animator.set_moving(false);
                self.animator.set_directional(facing.x, facing.y);
                FrameOutcome::Idle
            }
        }
    }

    /// Physics tick: advance the current step by `dt` seconds.
    ///
    /// Only does work while `Stepping`. A negative or non-finite `dt` is
    /// ignored and leaves both the body and the timer untouched.
    pub fn on_fixed_step(&mut self, dt: f32) -> StepOutcome {
        if !self.state.phase.is_moving() {
            return StepOutcome::Idle;
        }

        let position = self.body.position();
        let speed = self.config.move_speed;
        let next = match advance_towards(position, self.state.target, speed, dt) {
            Ok(next) => next,
            Err(err) => {
                warn!(%err, dt, "Ignoring physics tick");
                return StepOutcome::Moving;
            }
        };
        self.body.move_to(next, self.config.obstacle_layer);
        self.state.move_timer += dt;

        let reached = self.body.position();
        if reached.distance(self.state.target) < ARRIVAL_EPSILON {
            let at = self.state.target;
            self.body.move_to(at, LayerMask::NONE);
            self.state.finish_step();
            debug!(%at, "Step completed");
            return StepOutcome::Arrived { at };
        }

        if self.state.move_timer >= self.config.move_timeout {
            let to = self.state.previous;
            let elapsed = self.state.move_timer;
            self.body.move_to(to, LayerMask::NONE);
            self.state.roll_back();
            self.animator.set_moving(false);
            warn!(%to, stalled_at = %reached, elapsed, "Step timed out, rolled back");
            return StepOutcome::RolledBack {
                to,
                stalled_at: reached,
            };
        }

        trace!(position = %reached, timer = self.state.move_timer, "Stepping");
        StepOutcome::Moving
    }

    /// Current phase.
    pub fn phase(&self) -> MovementPhase {
        self.state.phase
    }

    /// Returns `true` while a step is in progress.
    pub fn is_moving(&self) -> bool {
        self.state.phase.is_moving()
    }

    /// Destination of the current or most recent step.
    pub fn target(&self) -> Vec2 {
        self.state.target
    }

    /// Origin of the current or most recent step.
    pub fn previous(&self) -> Vec2 {
        self.state.previous
    }

    /// Last committed direction, if any step has started.
    pub fn last_direction(&self) -> Option<Direction> {
        self.state.last_direction
    }

    /// Physics time spent on the current step.
    pub fn move_timer(&self) -> f32 {
        self.state.move_timer
    }

    /// The body's current position.
    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    /// The physics body.
    pub fn body(&self) -> &B {
        &self.body
    }

    /// The animation sink.
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Consumes the controller, returning its collaborators.
    pub fn into_parts(self) -> (B, A) {
        (self.body, self.animator)
    }
}
