//! World data structures: bird, pipes and the world that owns them.

/// The player-controlled bird.
///
/// `x` is the lane the bird flies in and never changes after spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Fixed horizontal column.
    pub x: i32,
    /// Vertical position in rows (row 0 = ceiling, grows downward).
    pub y: f64,
    /// Vertical velocity in rows/tick (positive = downward).
    pub vy: f64,
}

impl Bird {
    pub fn new(x: i32, y: f64) -> Self {
        Self { x, y, vy: 0.0 }
    }

    /// Row the bird occupies for collision and drawing.
    pub fn cell_y(&self) -> i32 {
        self.y.floor() as i32
    }

    /// Pull the bird down by one tick of gravity.
    pub fn apply_gravity(&mut self, gravity: f64) {
        self.vy += gravity;
    }

    /// Overwrite the vertical velocity. Repeated flaps do not stack.
    pub fn flap(&mut self, flap_velocity: f64) {
        self.vy = flap_velocity;
    }

    /// Integrate velocity into position.
    pub fn step(&mut self) {
        self.y += self.vy;
    }
}

/// A vertical obstacle with a passable gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipe {
    /// Column; drops by one every tick and may go negative before removal.
    pub x: i32,
    /// First row of the gap.
    pub gap_y: i32,
    /// Number of open rows starting at `gap_y`.
    pub gap_h: i32,
    /// Set once the pipe has been scored.
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: i32, gap_y: i32, gap_h: i32) -> Self {
        Self {
            x,
            gap_y,
            gap_h,
            passed: false,
        }
    }

    /// True when row `y` is solid pipe rather than gap.
    pub fn blocks(&self, y: i32) -> bool {
        !(self.gap_y <= y && y < self.gap_y + self.gap_h)
    }
}

/// Full simulation state for one life.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub width: u16,
    pub height: u16,
    pub bird: Bird,
    /// Spawn order, which is also left-to-right order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
}

impl World {
    /// Create an empty world with the bird centered vertically in `bird_x`.
    pub fn new(width: u16, height: u16, bird_x: u16) -> Self {
        Self {
            width,
            height,
            bird: Bird::new(bird_x as i32, Self::center_row(height)),
            pipes: Vec::new(),
            score: 0,
        }
    }

    /// Starting row for the bird.
    pub fn center_row(height: u16) -> f64 {
        (height / 2) as f64
    }

    /// Column at which new pipes enter.
    pub fn spawn_column(&self) -> i32 {
        self.width as i32 - 1
    }

    pub fn add_pipe(&mut self, pipe: Pipe) {
        self.pipes.push(pipe);
    }

    /// Put the world back to the start of a life: bird centered with no
    /// velocity, no pipes, zero score. Dimensions and lane are kept.
    pub fn reset(&mut self) {
        self.bird.y = Self::center_row(self.height);
        self.bird.vy = 0.0;
        self.pipes.clear();
        self.score = 0;
    }
}
