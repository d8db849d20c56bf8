use gridstep_motion::*;

fn main() {
    let tile_size = 0.5;
    let speed = 2.0;
    let dt = 0.05;
    let lattice_result = Lattice::new(tile_size);

    match lattice_result {
        Ok(lattice) => {
            let mut position = Vec2::new(0.0, 0.0);
            let route = [Direction::Right, Direction::Right, Direction::Up, Direction::Left];

            println!("Initializing walk...");
            println!("  {}", lattice);
            println!("  Speed:     {} u/s", speed);
            println!("  Time Step: {} s", dt);

            for direction in route {
                let target = lattice.step_from(position, direction);
                let mut ticks = 0;
                while position != target {
                    match advance_towards(position, target, speed, dt) {
                        Ok(next) => position = next,
                        Err(e) => {
                            eprintln!("Error while stepping {}: {}", direction, e);
                            return;
                        }
                    }
                    ticks += 1;
                }
                println!(
                    "Step {:>5}: {} cell {} in {} ticks",
                    direction,
                    position,
                    lattice.cell_of(position),
                    ticks
                );
            }

            println!("Final cell: {}", lattice.cell_of(position));
        }
        Err(e) => {
            eprintln!("Failed to build lattice: {:?}", e);
            eprintln!("Please ensure tile_size ({}) is positive.", tile_size);
        }
    }
}
