//! Collaborator interfaces consumed by the controller.
//!
//! The controller never owns input devices, physics or animation playback;
//! it talks to them only through these traits.

use gridstep_motion::Vec2;

use crate::layer::LayerMask;

/// Source of raw two-axis directional input.
pub trait DirectionalInput {
    /// Read `(horizontal, vertical)`, each nominally in `[-1, 1]`.
    ///
    /// Polled at most once per frame tick.
    fn read(&mut self) -> (f32, f32);
}

/// The body the controller displaces.
pub trait PhysicsBody {
    /// Current authoritative position of the body.
    fn position(&self) -> Vec2;

    /// Relocate the body to `position`.
    ///
    /// Expected to be immediate and idempotent. The body may refuse or
    /// shorten the move if something in `obstacles` is in the way; the
    /// controller only notices through [`PhysicsBody::position`].
    ///
    /// Arrival and rollback snaps are issued with `LayerMask::NONE` and must
    /// always be honoured.
    fn move_to(&mut self, position: Vec2, obstacles: LayerMask);
}

/// Receiver of animation intent.
pub trait AnimationSink {
    /// Set the facing / travel direction parameters.
    fn set_directional(&mut self, x: f32, y: f32);

    /// Set whether the walk cycle should play.
    fn set_moving(&mut self, moving: bool);
}

impl<T: DirectionalInput + ?Sized> DirectionalInput for &mut T {
    fn read(&mut self) -> (f32, f32) {
        (**self).read()
    }
}

impl<T: PhysicsBody + ?Sized> PhysicsBody for &mut T {
    fn position(&self) -> Vec2 {
        (**self).position()
    }

    fn move_to(&mut self, position: Vec2, obstacles: LayerMask) {
        (**self).move_to(position, obstacles)
    }
}

impl<T: AnimationSink + ?Sized> AnimationSink for &mut T {
    fn set_directional(&mut self, x: f32, y: f32) {
        (**self).set_directional(x, y)
    }

    fn set_moving(&mut self, moving: bool) {
        (**self).set_moving(moving)
    }
}

/// A constant input, handy for scripted drivers.
impl DirectionalInput for (f32, f32) {
    fn read(&mut self) -> (f32, f32) {
        *self
    }
}

/// Plain record of the last animation parameters that were set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimatorParams {
    /// Last horizontal direction parameter.
    pub move_x: f32,
    /// Last vertical direction parameter.
    pub move_y: f32,
    /// Whether the walk cycle is playing.
    pub is_moving: bool,
}

impl AnimatorParams {
    /// Direction parameters as a vector.
    pub fn facing(&self) -> Vec2 {
        Vec2::new(self.move_x, self.move_y)
    }
}

impl AnimationSink for AnimatorParams {
    fn set_directional(&mut self, x: f32, y: f32) {
        self.move_x = x;
        self.move_y = y;
    }

    fn set_moving(&mut self, moving: bool) {
        self.is_moving = moving;
    }
}
