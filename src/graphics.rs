use macroquad::prelude::*;

use gridstep_controller::{GridPoint, LayerMask, MovementPhase, Vec2 as WorldPos};

use crate::blackboard::State;
use crate::bus::StepEvent;
use crate::world::{ObstacleField, WALL_LAYER, WATER_LAYER};

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Gridstep Sandbox".to_string(),
        window_width: 800,
        window_height: 640,
        high_dpi: true,
        ..Default::default()
    }
}

const ORIGIN_X: f32 = 20.0;
const ORIGIN_Y: f32 = 70.0;
const HUD_FONT: f32 = 20.0;

/// Maps world positions onto the screen, world y pointing up.
#[derive(Debug, Clone, Copy)]
pub struct View {
    tile_size: f32,
    grid_height: i32,
    pixels_per_tile: f32,
}

impl View {
    pub fn new(field: &ObstacleField, pixels_per_tile: f32) -> Self {
        View {
            tile_size: field.lattice().tile_size(),
            grid_height: field.height(),
            pixels_per_tile,
        }
    }

    /// Screen coordinates of the center of the world position `p`.
    pub fn to_screen(&self, p: WorldPos) -> (f32, f32) {
        // One extra tile of offset makes room for the border walls.
        let cx = p.x / self.tile_size + 1.5;
        let cy = self.grid_height as f32 - p.y / self.tile_size + 0.5;
        (
            ORIGIN_X + cx * self.pixels_per_tile,
            ORIGIN_Y + cy * self.pixels_per_tile,
        )
    }

    fn tile_rect(&self, center: WorldPos) -> (f32, f32, f32) {
        let (x, y) = self.to_screen(center);
        let half = self.pixels_per_tile / 2.0;
        (x - half, y - half, self.pixels_per_tile)
    }
}

pub fn draw_scene(view: &View, field: &ObstacleField, state: &State) {
    clear_background(LIGHTGRAY);

    let lattice = field.lattice();
    for (cell, layers) in field.iter() {
        let (x, y, size) = view.tile_rect(lattice.center_of(cell));
        draw_rectangle(x, y, size, size, layer_color(layers));
    }

    for x in 0..field.width() {
        for y in 0..field.height() {
            let (sx, sy, size) = view.tile_rect(lattice.center_of(GridPoint::new(x, y)));
            draw_rectangle_lines(sx, sy, size, size, 1.0, GRAY);
        }
    }

    if state.phase == MovementPhase::Stepping {
        let (x, y, size) = view.tile_rect(state.previous);
        draw_rectangle_lines(x, y, size, size, 2.0, ORANGE);
        let (x, y, size) = view.tile_rect(state.target);
        draw_rectangle_lines(x, y, size, size, 3.0, GREEN);
    }

    draw_actor(view, state);
    draw_hud(state);
}

fn layer_color(layers: LayerMask) -> Color {
    if layers.contains(WALL_LAYER) {
        DARKGRAY
    } else if layers.contains(WATER_LAYER) {
        SKYBLUE
    } else {
        PINK
    }
}

fn draw_actor(view: &View, state: &State) {
    let (x, y) = view.to_screen(state.position);
    let radius = view.pixels_per_tile * 0.35;
    let body = if state.animation.is_moving { BLUE } else { DARKBLUE };
    draw_circle(x, y, radius, body);

    let facing = state.animation.facing();
    if !facing.is_zero() {
        // Screen y grows downward.
        let tip = vec2(x + facing.x * radius, y - facing.y * radius);
        draw_line(x, y, tip.x, tip.y, 3.0, YELLOW);
    }
}

fn draw_hud(state: &State) {
    let facing = state.animation.facing();
    draw_text(
        &format!(
            "Position {}  Phase {}  Facing ({:.0}, {:.0})",
            state.position, state.phase, facing.x, facing.y
        ),
        10.0,
        20.0,
        HUD_FONT,
        BLACK,
    );
    draw_text(
        &format!(
            "Steps {}/{}  Rollbacks {}  Last {}",
            state.steps_completed,
            state.steps_started,
            state.rollbacks,
            describe(state.last_event)
        ),
        10.0,
        42.0,
        HUD_FONT,
        BLACK,
    );
    draw_text("Arrows/WASD to step, Esc to quit", 10.0, 62.0, 16.0, DARKGRAY);
}

fn describe(event: Option<StepEvent>) -> String {
    match event {
        None => "-".to_string(),
        Some(StepEvent::Started { direction, .. }) => format!("started {}", direction),
        Some(StepEvent::Arrived { at }) => format!("arrived {}", at),
        Some(StepEvent::RolledBack { to, .. }) => format!("rolled back to {}", to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstep_controller::Lattice;

    #[test]
    fn test_view_flips_y_and_offsets_border() {
        let field = ObstacleField::new(Lattice::new(1.0).unwrap(), 4, 3).unwrap();
        let view = View::new(&field, 10.0);

        assert_eq!(view.to_screen(WorldPos::new(0.0, 0.0)), (ORIGIN_X + 15.0, ORIGIN_Y + 35.0));
        assert_eq!(view.to_screen(WorldPos::new(0.0, 2.0)), (ORIGIN_X + 15.0, ORIGIN_Y + 15.0));
        assert_eq!(view.to_screen(WorldPos::new(-1.0, 3.0)), (ORIGIN_X + 5.0, ORIGIN_Y + 5.0));
    }
}
