use gridstep_controller::DirectionalInput;
use macroquad::prelude::{KeyCode, is_key_down};

/// Arrow keys and WASD mapped onto two axes in `[-1, 1]`, positive up and right.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardInput;

impl DirectionalInput for KeyboardInput {
    fn read(&mut self) -> (f32, f32) {
        let left = is_key_down(KeyCode::Left) || is_key_down(KeyCode::A);
        let right = is_key_down(KeyCode::Right) || is_key_down(KeyCode::D);
        let down = is_key_down(KeyCode::Down) || is_key_down(KeyCode::S);
        let up = is_key_down(KeyCode::Up) || is_key_down(KeyCode::W);
        (axis(left, right), axis(down, up))
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}
