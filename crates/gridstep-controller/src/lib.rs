#![warn(missing_docs)]
//! Discrete grid-step movement for a 2D top-down actor.
//!
//! Continuous directional input becomes single-tile, animated, timed steps on
//! a uniform lattice. A step that does not complete within the configured
//! timeout is rolled back to the tile it started from.
//!
//! The host owns the clock and calls two entry points: `on_frame` once per
//! rendered frame and `on_fixed_step` once per physics tick. Physics, input
//! and animation playback are reached only through the traits in [`traits`].

pub mod config;
pub mod controller;
pub mod error;
pub mod layer;
pub mod state;
pub mod traits;

pub use config::StepConfig;
pub use controller::{ARRIVAL_EPSILON, FrameOutcome, GridStepController, StepOutcome};
pub use error::ConfigError;
pub use layer::LayerMask;
pub use state::{MovementPhase, StepState};
pub use traits::{AnimationSink, AnimatorParams, DirectionalInput, PhysicsBody};

pub use gridstep_motion::{Direction, GridPoint, Lattice, Vec2};
