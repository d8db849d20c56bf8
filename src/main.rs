mod blackboard;
mod bus;
mod graphics;
mod input;
mod settings;
mod sim;
mod world;

use anyhow::Context;
use blackboard::{Blackboard, publish_pose, snapshot};
use bus::{StepEvent, Topic};
use graphics::{View, window_conf};
use input::KeyboardInput;
use world::{ObstacleField, SandboxBody};

use gridstep_controller::{AnimatorParams, GridPoint, GridStepController, Lattice};
use macroquad::prelude::*;
use parking_lot::Mutex;
use ::rand::{SeedableRng, rngs::StdRng};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

/// Physics ticks missed before the watchdog complains.
const STALL_TICKS: u32 = 10;

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Gridstep sandbox started.");

    if let Err(e) = run().await {
        error!("Sandbox failed: {:?}", e);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings()?;
    let sandbox = &settings.sandbox;

    let lattice = Lattice::new(settings.controller.tile_size)?;
    let start = GridPoint::new(sandbox.start_x, sandbox.start_y);
    let mut rng = match sandbox.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut field = ObstacleField::new(lattice, sandbox.grid_width, sandbox.grid_height)?;
    field.scatter(&mut rng, sandbox.obstacle_count, sandbox.water_ratio, start);
    let field = Arc::new(field);

    let body = SandboxBody::new(Arc::clone(&field), start);
    let controller = GridStepController::new(settings.controller, body, AnimatorParams::default())
        .context("building grid step controller")?;
    let controller = Arc::new(Mutex::new(controller));

    let bb: Blackboard = Arc::default();
    publish_pose(&bb, &controller.lock());
    let events: Topic<StepEvent> = Topic::new(64);
    let shutdown = Arc::new(AtomicBool::new(false));

    let tokio_rt = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let stall_after =
        Duration::from_secs_f64(f64::from(STALL_TICKS) / f64::from(sandbox.physics_hz));
    tokio_rt.spawn({
        let bb = Arc::clone(&bb);
        let rx = events.subscribe();
        async move {
            if let Err(e) = sim::async_runtime(bb, rx, stall_after).await {
                error!("Async tasks failed: {:?}", e);
            }
        }
    });

    info!("Spawning physics thread...");
    let physics = sim::spawn_physics_thread(
        Arc::clone(&controller),
        Arc::clone(&bb),
        events.clone(),
        sandbox.physics_hz,
        Arc::clone(&shutdown),
    )?;

    let view = View::new(&field, sandbox.pixels_per_tile);
    let mut keyboard = KeyboardInput;
    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!("Escape pressed, shutting down.");
            break;
        }

        {
            let mut ctrl = controller.lock();
            let outcome = ctrl.on_frame(&mut keyboard);
            if let Some(event) = StepEvent::from_frame(outcome) {
                events.publish(event);
            }
            publish_pose(&bb, &ctrl);
        }

        graphics::draw_scene(&view, &field, &snapshot(&bb));
        next_frame().await
    }

    shutdown.store(true, Ordering::Relaxed);
    if physics.join().is_err() {
        error!("Physics thread panicked.");
    }
    tokio_rt.shutdown_timeout(Duration::from_millis(100));
    info!("Gridstep sandbox stopped.");
    Ok(())
}
