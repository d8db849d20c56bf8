use gridstep_controller::*;
use tracing_subscriber::EnvFilter;

/// Body that stops dead at `wall_x`, standing in for an obstacle.
struct Corridor {
    position: Vec2,
    wall_x: f32,
}

impl PhysicsBody for Corridor {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn move_to(&mut self, position: Vec2, obstacles: LayerMask) {
        if !obstacles.is_empty() && position.x > self.wall_x {
            self.position.x = self.wall_x;
            self.position.y = position.y;
        } else {
            self.position = position;
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .init();

    let config = match StepConfig::new(5.0, 1.0, 0.5, LayerMask::layer(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {}", e);
            return;
        }
    };
    let dt = 0.02;
    let body = Corridor {
        position: Vec2::new(0.0, 0.0),
        wall_x: 1.5,
    };
    let mut controller = match GridStepController::new(config, body, AnimatorParams::default()) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Failed to build controller: {}", e);
            return;
        }
    };

    println!("Initializing simulation...");
    println!("  {}", config);
    println!("  Wall at x = 1.5, physics tick = {} s", dt);
    println!("\nSimulating...");

    // Right, right (blocked by the wall), then up.
    let script: [(f32, f32); 3] = [(1.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
    for (i, mut pressed) in script.into_iter().enumerate() {
        let outcome = controller.on_frame(&mut pressed);
        println!("Frame {:>2}: input {:?} -> {:?}", i + 1, pressed, outcome);

        let mut ticks = 0;
        loop {
            ticks += 1;
            match controller.on_fixed_step(dt) {
                StepOutcome::Moving => continue,
                outcome => {
                    println!("  after {:>2} ticks: {}", ticks, outcome);
                    break;
                }
            }
        }

        let facing = controller.animator().facing();
        println!(
            "  position {} facing {} moving {}",
            controller.position(),
            facing,
            controller.animator().is_moving
        );
    }

    println!("\nSimulation complete.");
    println!("Final position: {}", controller.position());
}
