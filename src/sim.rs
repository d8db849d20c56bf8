use parking_lot::Mutex;
use spin_sleep::SpinSleeper;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use gridstep_controller::{AnimatorParams, GridStepController};

use crate::blackboard::{Blackboard, publish_pose, record_event, snapshot, touch_tick};
use crate::bus::{StepEvent, Topic};
use crate::world::SandboxBody;

pub type SandboxController = GridStepController<SandboxBody, AnimatorParams>;
pub type SharedController = Arc<Mutex<SandboxController>>;

/// Runs `on_fixed_step` at `physics_hz` on a dedicated `physics` thread until
/// `shutdown` is raised.
pub fn spawn_physics_thread(
    controller: SharedController,
    bb: Blackboard,
    events: Topic<StepEvent>,
    physics_hz: u32,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<JoinHandle<()>> {
    let period = Duration::from_secs_f64(1.0 / f64::from(physics_hz));
    let dt = period.as_secs_f32();

    let handle = std::thread::Builder::new()
        .name("physics".into())
        .spawn(move || {
            info!(physics_hz, "Physics thread started.");
            let sleeper = SpinSleeper::new(100_000);
            let mut next_tick = Instant::now() + period;
            while !shutdown.load(Ordering::Relaxed) {
                {
                    let mut ctrl = controller.lock();
                    let outcome = ctrl.on_fixed_step(dt);
                    if let Some(event) = StepEvent::from_step(outcome) {
                        events.publish(event);
                    }
                    publish_pose(&bb, &ctrl);
                }
                touch_tick(&bb);

                let now = Instant::now();
                if next_tick > now {
                    sleeper.sleep(next_tick - now);
                    next_tick += period;
                } else {
                    // Fell behind; resync rather than burst.
                    next_tick = now + period;
                }
            }
            info!("Physics thread stopped.");
        })?;
    Ok(handle)
}

pub async fn async_runtime(
    bb: Blackboard,
    events: broadcast::Receiver<Arc<StepEvent>>,
    stall_after: Duration,
) -> anyhow::Result<()> {
    info!("Async runtime started.");
    tokio::try_join!(telemetry(bb.clone(), events), watchdog(bb, stall_after))?;
    info!("Async runtime finished.");
    Ok(())
}

/// Folds step events into the blackboard counters.
async fn telemetry(
    bb: Blackboard,
    mut events: broadcast::Receiver<Arc<StepEvent>>,
) -> anyhow::Result<()> {
    info!("Telemetry task started.");
    loop {
        match events.recv().await {
            Ok(event) => {
                record_event(&bb, &event);
                match *event {
                    StepEvent::Started { direction, to, .. } => {
                        debug!(%direction, %to, "Step started")
                    }
                    StepEvent::Arrived { at } => debug!(%at, "Step arrived"),
                    StepEvent::RolledBack { to, stalled_at } => {
                        let rollbacks = snapshot(&bb).rollbacks;
                        info!(%to, %stalled_at, rollbacks, "Step rolled back")
                    }
                }
            }
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "Telemetry receiver lagged; counters undercount.");
            }
            Err(RecvError::Closed) => {
                info!("Step event channel closed. Telemetry task exiting.");
                return Ok(());
            }
        }
    }
}

/// Warns once per stall when the physics thread stops ticking.
async fn watchdog(bb: Blackboard, stall_after: Duration) -> anyhow::Result<()> {
    info!("Watchdog task started.");
    let mut tick = tokio::time::interval(stall_after / 2);
    let mut stalled = false;
    loop {
        tick.tick().await;
        let age = Instant::now() - snapshot(&bb).last_tick_ts;
        if age > stall_after {
            if !stalled {
                warn!(?age, "Physics tick stalled!");
                stalled = true;
            }
        } else if stalled {
            info!(?age, "Physics tick resumed.");
            stalled = false;
        }
    }
}
