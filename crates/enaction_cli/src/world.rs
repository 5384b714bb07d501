//! A small grid world for the runner: walls, fish, and an agent that can
//! move forward, turn, and feel the cells around it.

use enaction_core::geometry::yaw;
use enaction_core::stimulation::{
    GUSTATORY_FOOD, GUSTATORY_NOTHING, KINEMATIC_BUMP, KINEMATIC_FORWARD, KINEMATIC_TURN, TACTILE_FOOD,
    TACTILE_HARD, VISUAL_FISH, VISUAL_WALL,
};
use enaction_core::{Act, Area, Motion, Position, PrimitiveSpec, Stimulation};
use enaction_memory::{Salience, SensoryFrame};
use enaction_reasoning::{Environment, SensorimotorDecoder};
use std::f32::consts::FRAC_PI_2;

/// How far the agent sees.
const SIGHT_RANGE: i32 = 3;

const MAP: &[&str] = &[
    "xxxxxxxxxx",
    "x........x",
    "x..f..x..x",
    "x.....x..x",
    "x...xx...x",
    "x.......fx",
    "x....x.f.x",
    "xxxxxxxxxx",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Wall,
    Fish,
}

/// The primitives this world understands.
pub fn primitives() -> Vec<PrimitiveSpec> {
    let ahead = Position::new(1.0, 0.0, 0.0);
    vec![
        PrimitiveSpec::new(">", 5, -10)
            .with_action("forward")
            .with_aspect("move")
            .with_motion(Motion::translate(1.0, 0.0))
            .with_start_position(ahead)
            .with_one_place(false)
            .with_phenomena(Area::B, "_", "w")
            .with_colors(0xFFFFFF, 0xFF0000),
        PrimitiveSpec::new("^", -3, -3)
            .with_action("turn_left")
            .with_aspect("turn")
            .with_motion(Motion::rotate(FRAC_PI_2))
            .with_failure_motion(Motion::rotate(FRAC_PI_2))
            .with_one_place(false),
        PrimitiveSpec::new("v", -3, -3)
            .with_action("turn_right")
            .with_aspect("turn")
            .with_motion(Motion::rotate(-FRAC_PI_2))
            .with_failure_motion(Motion::rotate(-FRAC_PI_2))
            .with_one_place(false),
        PrimitiveSpec::new("-", -1, -1)
            .with_action("touch_ahead")
            .with_aspect("touch")
            .with_start_position(ahead)
            .with_one_place(true)
            .with_phenomena(Area::B, "w", "_")
            .with_colors(VISUAL_WALL, 0xFFFFFF),
        PrimitiveSpec::new("\\", -1, -1)
            .with_action("touch_left")
            .with_aspect("touch")
            .with_start_position(Position::new(0.0, 1.0, 0.0))
            .with_one_place(true)
            .with_phenomena(Area::A, "w", "_")
            .with_colors(VISUAL_WALL, 0xFFFFFF),
        PrimitiveSpec::new("/", -1, -1)
            .with_action("touch_right")
            .with_aspect("touch")
            .with_start_position(Position::new(0.0, -1.0, 0.0))
            .with_one_place(true)
            .with_phenomena(Area::C, "w", "_")
            .with_colors(VISUAL_WALL, 0xFFFFFF),
    ]
}

/// What the last enacted primitive produced, reported on the next `sense`.
#[derive(Debug, Clone, Copy, Default)]
struct Outcome {
    kinematic: u32,
    ate: bool,
    touched: Option<(i32, i32, u32)>,
}

pub struct GridWorld {
    cells: Vec<Vec<Cell>>,
    x: i32,
    y: i32,
    /// Quarter turns counter-clockwise from east.
    heading: i32,
    outcome: Outcome,
    eaten: u32,
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GridWorld {
    pub fn new() -> Self {
        // Rows are stored bottom-up so that y grows northward
        let cells = MAP
            .iter()
            .rev()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'x' => Cell::Wall,
                        'f' => Cell::Fish,
                        _ => Cell::Empty,
                    })
                    .collect()
            })
            .collect();
        Self {
            cells,
            x: 1,
            y: 1,
            heading: 0,
            outcome: Outcome::default(),
            eaten: 0,
        }
    }

    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn position(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.heading)
    }

    fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 {
            return Cell::Wall;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(Cell::Wall)
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(c) = self.cells.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            *c = cell;
        }
    }

    /// World offset of the cell at egocentric (`ahead`, `left`).
    fn offset(&self, ahead: i32, left: i32) -> (i32, i32) {
        match self.heading.rem_euclid(4) {
            0 => (ahead, left),
            1 => (-left, ahead),
            2 => (-ahead, -left),
            _ => (left, -ahead),
        }
    }

    /// Egocentric position of a world offset.
    fn egocentric(&self, dx: i32, dy: i32) -> Position {
        let angle = self.heading as f32 * FRAC_PI_2;
        yaw(-angle) * Position::new(dx as f32, dy as f32, 0.0)
    }

    fn forward(&mut self) -> bool {
        let (dx, dy) = self.offset(1, 0);
        let (nx, ny) = (self.x + dx, self.y + dy);
        match self.cell(nx, ny) {
            Cell::Wall => {
                self.outcome.kinematic = KINEMATIC_BUMP;
                self.outcome.touched = Some((dx, dy, TACTILE_HARD));
                false
            }
            cell => {
                self.x = nx;
                self.y = ny;
                self.outcome.kinematic = KINEMATIC_FORWARD;
                if cell == Cell::Fish {
                    self.outcome.ate = true;
                    self.eaten += 1;
                    self.set(nx, ny, Cell::Empty);
                    self.respawn_fish();
                }
                true
            }
        }
    }

    fn touch(&mut self, ahead: i32, left: i32) -> bool {
        let (dx, dy) = self.offset(ahead, left);
        let value = match self.cell(self.x + dx, self.y + dy) {
            Cell::Wall => TACTILE_HARD,
            Cell::Fish => TACTILE_FOOD,
            Cell::Empty => return false,
        };
        self.outcome.touched = Some((dx, dy, value));
        true
    }

    /// Put a new fish in the first empty cell farthest from the agent.
    fn respawn_fish(&mut self) {
        let mut best: Option<(i32, i32, i32)> = None;
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as i32, y as i32);
                if *cell != Cell::Empty || (x, y) == (self.x, self.y) {
                    continue;
                }
                let d = (x - self.x).abs() + (y - self.y).abs();
                if best.map_or(true, |(_, _, bd)| d > bd) {
                    best = Some((x, y, d));
                }
            }
        }
        if let Some((x, y, _)) = best {
            self.set(x, y, Cell::Fish);
        }
    }
}

impl Environment for GridWorld {
    fn enact_primitive(&mut self, act: &Act) -> bool {
        self.outcome = Outcome {
            kinematic: KINEMATIC_TURN,
            ..Outcome::default()
        };
        match act.tags.action.as_deref() {
            Some("forward") => self.forward(),
            Some("turn_left") => {
                self.heading = (self.heading + 1).rem_euclid(4);
                true
            }
            Some("turn_right") => {
                self.heading = (self.heading - 1).rem_euclid(4);
                true
            }
            Some("touch_ahead") => self.touch(1, 0),
            Some("touch_left") => self.touch(0, 1),
            Some("touch_right") => self.touch(0, -1),
            other => {
                tracing::warn!("Unknown action {:?} for {}", other, act.label());
                false
            }
        }
    }
}

impl SensorimotorDecoder for GridWorld {
    fn sense(&mut self) -> SensoryFrame {
        let mut frame = SensoryFrame {
            gustatory: Stimulation::gustatory(if self.outcome.ate { GUSTATORY_FOOD } else { GUSTATORY_NOTHING }),
            kinematic: Stimulation::kinematic(self.outcome.kinematic),
            ..SensoryFrame::default()
        };

        for ahead in 1..=SIGHT_RANGE {
            for left in -ahead..=ahead {
                let (dx, dy) = self.offset(ahead, left);
                let color = match self.cell(self.x + dx, self.y + dy) {
                    Cell::Wall => VISUAL_WALL,
                    Cell::Fish => VISUAL_FISH,
                    Cell::Empty => continue,
                };
                frame.visual.push(Salience::new(self.egocentric(dx, dy), 1.0, Stimulation::visual(color)));
            }
        }

        if let Some((dx, dy, value)) = self.outcome.touched {
            frame
                .tactile
                .push(Salience::new(self.egocentric(dx, dy), 1.0, Stimulation::tactile(value)));
        }
        frame
    }
}
