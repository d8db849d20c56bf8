use parking_lot::RwLock;
use std::{sync::Arc, time::Instant};

use gridstep_controller::{AnimatorParams, GridStepController, MovementPhase, PhysicsBody, Vec2};

use crate::bus::StepEvent;

#[derive(Clone)]
pub struct State {
    pub position: Vec2,
    pub target: Vec2,
    pub previous: Vec2,
    pub phase: MovementPhase,
    pub animation: AnimatorParams,
    pub steps_started: u64,
    pub steps_completed: u64,
    pub rollbacks: u64,
    pub last_event: Option<StepEvent>,
    pub last_tick_ts: Instant,
}

impl Default for State {
    fn default() -> Self {
        State {
            position: Vec2::ZERO,
            target: Vec2::ZERO,
            previous: Vec2::ZERO,
            phase: MovementPhase::Idle,
            animation: AnimatorParams::default(),
            steps_started: 0,
            steps_completed: 0,
            rollbacks: 0,
            last_event: None,
            last_tick_ts: Instant::now(),
        }
    }
}

pub type Blackboard = Arc<RwLock<State>>;

pub fn snapshot(bb: &Blackboard) -> State {
    (*bb.read()).clone()
}

/// Copies the controller's pose and animation parameters onto the board.
pub fn publish_pose<B: PhysicsBody>(bb: &Blackboard, ctrl: &GridStepController<B, AnimatorParams>) {
    let mut g = bb.write();
    g.position = ctrl.position();
    g.target = ctrl.target();
    g.previous = ctrl.previous();
    g.phase = ctrl.phase();
    g.animation = *ctrl.animator();
}

pub fn touch_tick(bb: &Blackboard) {
    bb.write().last_tick_ts = Instant::now();
}

pub fn record_event(bb: &Blackboard, event: &StepEvent) {
    let mut g = bb.write();
    match event {
        StepEvent::Started { .. } => g.steps_started += 1,
        StepEvent::Arrived { .. } => g.steps_completed += 1,
        StepEvent::RolledBack { .. } => g.rollbacks += 1,
    }
    g.last_event = Some(*event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstep_controller::{Direction, LayerMask, StepConfig};

    struct Free(Vec2);

    impl PhysicsBody for Free {
        fn position(&self) -> Vec2 {
            self.0
        }

        fn move_to(&mut self, position: Vec2, _obstacles: LayerMask) {
            self.0 = position;
        }
    }

    #[test]
    fn test_record_event_counts() {
        let bb: Blackboard = Arc::default();
        record_event(&bb, &StepEvent::Started {
            direction: Direction::Up,
            from: Vec2::ZERO,
            to: Vec2::new(0.0, 1.0),
        });
        record_event(&bb, &StepEvent::RolledBack { to: Vec2::ZERO, stalled_at: Vec2::ZERO });

        let state = snapshot(&bb);
        assert_eq!(state.steps_started, 1);
        assert_eq!(state.steps_completed, 0);
        assert_eq!(state.rollbacks, 1);
        assert!(matches!(state.last_event, Some(StepEvent::RolledBack { .. })));
    }

    #[test]
    fn test_publish_pose_mirrors_controller() {
        let bb: Blackboard = Arc::default();
        let mut ctrl = GridStepController::new(
            StepConfig::default(),
            Free(Vec2::new(3.0, 4.0)),
            AnimatorParams::default(),
        )
        .unwrap();
        let mut left = (-1.0_f32, 0.0_f32);
        ctrl.on_frame(&mut left);
        publish_pose(&bb, &ctrl);

        let state = snapshot(&bb);
        assert_eq!(state.position, Vec2::new(3.0, 4.0));
        assert_eq!(state.target, Vec2::new(2.0, 4.0));
        assert_eq!(state.phase, MovementPhase::Stepping);
        assert!(state.animation.is_moving);
    }
}
