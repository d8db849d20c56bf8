use anyhow::Context;
use std::collections::HashMap;
use std::sync::Arc;

use gridstep_controller::{GridPoint, Lattice, LayerMask, PhysicsBody, Vec2};
use rand::Rng;
use tracing::{debug, info};

pub const WALL_LAYER: u8 = 1;
pub const WATER_LAYER: u8 = 2;

/// Half-extent of the actor's square footprint, as a fraction of a tile.
const FOOTPRINT_HALF: f32 = 0.4;

/// Static obstacles on the sandbox lattice, each tagged with its layers.
#[derive(Debug, Clone)]
pub struct ObstacleField {
    lattice: Lattice,
    width: i32,
    height: i32,
    cells: HashMap<GridPoint, LayerMask>,
}

impl ObstacleField {
    /// An empty `width` x `height` field ringed by walls.
    ///
    /// Fails if the cell count does not fit the lattice's `i32` coordinates.
    pub fn new(lattice: Lattice, width: u32, height: u32) -> anyhow::Result<Self> {
        let width = i32::try_from(width).context("grid width out of range")?;
        let height = i32::try_from(height).context("grid height out of range")?;
        width
            .checked_mul(height)
            .with_context(|| format!("{}x{} grid has too many cells", width, height))?;
        let mut field = ObstacleField {
            lattice,
            width,
            height,
            cells: HashMap::new(),
        };
        let wall = LayerMask::layer(WALL_LAYER);
        for x in -1..=width {
            field.insert(GridPoint::new(x, -1), wall);
            field.insert(GridPoint::new(x, height), wall);
        }
        for y in 0..height {
            field.insert(GridPoint::new(-1, y), wall);
            field.insert(GridPoint::new(width, y), wall);
        }
        Ok(field)
    }

    /// Randomly places `count` single-tile obstacles, never on `keep_clear`.
    ///
    /// Each obstacle is water with probability `water_ratio`, wall otherwise.
    pub fn scatter<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: u32,
        water_ratio: f64,
        keep_clear: GridPoint,
    ) {
        let interior = self.width as usize * self.height as usize;
        let wanted = (count as usize).min(interior.saturating_sub(1));
        let mut placed = 0;
        let mut attempts = 0;
        while placed < wanted && attempts < interior * 8 {
            attempts += 1;
            let cell = GridPoint::new(
                rng.random_range(0..self.width),
                rng.random_range(0..self.height),
            );
            if cell == keep_clear || self.cells.contains_key(&cell) {
                continue;
            }
            let layer = if rng.random_bool(water_ratio) {
                WATER_LAYER
            } else {
                WALL_LAYER
            };
            self.insert(cell, LayerMask::layer(layer));
            placed += 1;
        }
        info!(placed, requested = count, "Obstacles scattered");
    }

    pub fn insert(&mut self, cell: GridPoint, layers: LayerMask) {
        let entry = self.cells.entry(cell).or_default();
        *entry = *entry | layers;
    }

    pub fn layers_at(&self, cell: GridPoint) -> LayerMask {
        self.cells.get(&cell).copied().unwrap_or_default()
    }

    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPoint, LayerMask)> + '_ {
        self.cells.iter().map(|(cell, layers)| (*cell, *layers))
    }

    /// Returns `true` if an actor footprint centered at `position` overlaps
    /// any cell carrying a layer in `mask`.
    pub fn blocks(&self, position: Vec2, mask: LayerMask) -> bool {
        if mask.is_empty() {
            return false;
        }
        let tile = self.lattice.tile_size();
        let reach = (FOOTPRINT_HALF + 0.5) * tile;
        let center = self.lattice.cell_of(position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let cell = GridPoint::new(center.x + dx, center.y + dy);
                if !self.layers_at(cell).intersects(mask) {
                    continue;
                }
                let offset = position - self.lattice.center_of(cell);
                if offset.x.abs() < reach && offset.y.abs() < reach {
                    return true;
                }
            }
        }
        false
    }
}

/// Kinematic body living in an [`ObstacleField`].
///
/// A move whose destination footprint touches a blocking cell is refused
/// outright, so the body stalls in front of the obstacle.
#[derive(Debug, Clone)]
pub struct SandboxBody {
    position: Vec2,
    field: Arc<ObstacleField>,
}

impl SandboxBody {
    pub fn new(field: Arc<ObstacleField>, start: GridPoint) -> Self {
        let position = field.lattice().center_of(start);
        SandboxBody { position, field }
    }
}

impl PhysicsBody for SandboxBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn move_to(&mut self, position: Vec2, obstacles: LayerMask) {
        if self.field.blocks(position, obstacles) {
            debug!(from = %self.position, to = %position, "Move blocked");
            return;
        }
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstep_controller::{
        AnimatorParams, Direction, GridStepController, StepConfig, StepOutcome,
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn field() -> ObstacleField {
        ObstacleField::new(Lattice::new(1.0).unwrap(), 5, 4).unwrap()
    }

    fn blocking() -> LayerMask {
        LayerMask::layer(WALL_LAYER).with(WATER_LAYER)
    }

    #[test]
    fn test_border_walls() {
        let field = field();
        let wall = LayerMask::layer(WALL_LAYER);
        assert_eq!(field.layers_at(GridPoint::new(-1, -1)), wall);
        assert_eq!(field.layers_at(GridPoint::new(5, 3)), wall);
        assert_eq!(field.layers_at(GridPoint::new(2, 4)), wall);
        assert!(field.layers_at(GridPoint::new(2, 2)).is_empty());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let lattice = Lattice::new(1.0).unwrap();
        assert!(ObstacleField::new(lattice, 50_000, 50_000).is_err());
        assert!(ObstacleField::new(lattice, u32::MAX, 1).is_err());
        assert!(ObstacleField::new(lattice, 1_000, 1_000).is_ok());
    }

    #[test]
    fn test_blocks_respects_mask() {
        let mut field = field();
        field.insert(GridPoint::new(2, 0), LayerMask::layer(WATER_LAYER));

        let near_water = Vec2::new(1.2, 0.0);
        assert!(field.blocks(near_water, blocking()));
        assert!(!field.blocks(near_water, LayerMask::layer(WALL_LAYER)));
        assert!(!field.blocks(near_water, LayerMask::NONE));
        assert!(!field.blocks(Vec2::new(1.0, 0.0), blocking()));
    }

    #[test]
    fn test_scatter_is_seeded_and_keeps_start_clear() {
        let start = GridPoint::new(0, 0);
        let mut a = field();
        let mut b = field();
        a.scatter(&mut StdRng::seed_from_u64(7), 6, 0.5, start);
        b.scatter(&mut StdRng::seed_from_u64(7), 6, 0.5, start);

        let mut cells_a: Vec<_> = a.iter().collect();
        let mut cells_b: Vec<_> = b.iter().collect();
        cells_a.sort_by_key(|(cell, _)| *cell);
        cells_b.sort_by_key(|(cell, _)| *cell);
        assert_eq!(cells_a, cells_b);
        assert!(a.layers_at(start).is_empty());

        let interior = a
            .iter()
            .filter(|(c, _)| c.x >= 0 && c.x < 5 && c.y >= 0 && c.y < 4)
            .count();
        assert_eq!(interior, 6);
    }

    #[test]
    fn test_scatter_never_fills_start_even_when_overfull() {
        let start = GridPoint::new(1, 1);
        let mut field = field();
        field.scatter(&mut StdRng::seed_from_u64(1), 1_000, 0.0, start);
        assert!(field.layers_at(start).is_empty());
    }

    #[test]
    fn test_walk_into_wall_rolls_back() {
        let mut field = field();
        field.insert(GridPoint::new(1, 0), LayerMask::layer(WALL_LAYER));
        let body = SandboxBody::new(Arc::new(field), GridPoint::new(0, 0));
        let config = StepConfig::default().with_obstacle_layer(blocking());
        let mut ctrl = GridStepController::new(config, body, AnimatorParams::default()).unwrap();

        let mut right = (1.0_f32, 0.0_f32);
        ctrl.on_frame(&mut right);
        let mut outcome = StepOutcome::Moving;
        for _ in 0..100 {
            outcome = ctrl.on_fixed_step(0.02);
            if outcome != StepOutcome::Moving {
                break;
            }
        }
        assert!(matches!(outcome, StepOutcome::RolledBack { .. }));
        assert_eq!(ctrl.position(), Vec2::new(0.0, 0.0));
        assert_eq!(ctrl.last_direction(), Some(Direction::Right));
    }

    #[test]
    fn test_walk_through_open_tile_arrives() {
        let body = SandboxBody::new(Arc::new(field()), GridPoint::new(0, 0));
        let config = StepConfig::default().with_obstacle_layer(blocking());
        let mut ctrl = GridStepController::new(config, body, AnimatorParams::default()).unwrap();

        let mut up = (0.0_f32, 1.0_f32);
        ctrl.on_frame(&mut up);
        let mut outcome = StepOutcome::Moving;
        for _ in 0..100 {
            outcome = ctrl.on_fixed_step(0.02);
            if outcome != StepOutcome::Moving {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::Arrived { at: Vec2::new(0.0, 1.0) });
    }
}
