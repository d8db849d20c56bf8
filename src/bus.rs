use std::sync::Arc;

use gridstep_controller::{Direction, FrameOutcome, StepOutcome, Vec2};
use tokio::sync::broadcast;

/// Broadcast topic with bounded capacity.
/// `T` must be `Send + Sync` because we hop across threads.
#[derive(Debug, Clone)]
pub struct Topic<T> {
    tx: broadcast::Sender<Arc<T>>,
}

impl<T: Send + Sync + 'static> Topic<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes `msg`; silently dropped when nobody is listening.
    pub fn publish(&self, msg: T) {
        let _ = self.tx.send(Arc::new(msg));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<T>> {
        self.tx.subscribe()
    }
}

/// Step lifecycle transitions, published by the frame loop and the physics thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    Started { direction: Direction, from: Vec2, to: Vec2 },
    Arrived { at: Vec2 },
    RolledBack { to: Vec2, stalled_at: Vec2 },
}

impl StepEvent {
    pub fn from_frame(outcome: FrameOutcome) -> Option<Self> {
        match outcome {
            FrameOutcome::StepStarted { direction, from, to } => {
                Some(StepEvent::Started { direction, from, to })
            }
            FrameOutcome::Busy | FrameOutcome::Idle => None,
        }
    }

    pub fn from_step(outcome: StepOutcome) -> Option<Self> {
        match outcome {
            StepOutcome::Arrived { at } => Some(StepEvent::Arrived { at }),
            StepOutcome::RolledBack { to, stalled_at } => {
                Some(StepEvent::RolledBack { to, stalled_at })
            }
            StepOutcome::Idle | StepOutcome::Moving => None,
        }
    }
}
