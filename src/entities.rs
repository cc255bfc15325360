//! Game entity types and their per-entity geometry.
//!
//! Entities only know about themselves: the bird integrates its own motion
//! and a pipe answers questions about its own rectangles.  Sequencing across
//! entities lives in `compute`.

use rand::Rng;

use crate::config::Physics;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Alive,
    GameOver,
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    /// Horizontal position; never changes after creation.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity: f64,
    /// Jump impulse (negative = upward).
    pub lift: f64,
}

impl Bird {
    /// A bird at rest, vertically centred on the surface.
    pub fn new(physics: &Physics) -> Self {
        Self {
            x: physics.bird_x,
            y: (physics.surface_height - physics.bird_height) / 2.0,
            width: physics.bird_width,
            height: physics.bird_height,
            velocity: 0.0,
            lift: physics.jump_impulse,
        }
    }

    /// Integrate one frame of gravity, then clamp to the surface.
    ///
    /// Hitting the floor or the ceiling zeroes the velocity (no bounce).
    pub fn update(&mut self, gravity: f64, surface_height: f64) {
        self.velocity += gravity;
        self.y += self.velocity;
        if self.y + self.height > surface_height {
            self.y = surface_height - self.height;
            self.velocity = 0.0;
        } else if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
    }

    pub fn jump(&mut self) {
        self.velocity = self.lift;
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

// ── Pipes ─────────────────────────────────────────────────────────────────────

/// A gated obstacle: a top segment hanging from the ceiling and a bottom
/// segment standing on the floor, separated by a fixed gap.
#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub width: f64,
    pub top_height: f64,
    pub gap: f64,
    pub bottom_height: f64,
}

impl Pipe {
    /// Build a pipe with an explicit top segment height.  The bottom segment
    /// takes whatever is left of the surface below the gap.
    pub fn with_top_height(physics: &Physics, top_height: f64) -> Self {
        Self {
            x: physics.surface_width,
            width: physics.pipe_width,
            top_height,
            gap: physics.pipe_gap,
            bottom_height: physics.surface_height - top_height - physics.pipe_gap,
        }
    }

    /// A new pipe just beyond the right edge with a random opening.
    ///
    /// The top height is a whole number drawn uniformly from
    /// `[0, surface_height - gap)`.
    pub fn spawn(physics: &Physics, rng: &mut impl Rng) -> Self {
        let span = (physics.surface_height - physics.pipe_gap).max(0.0) as u32;
        let top_height = if span > 0 { rng.gen_range(0..span) } else { 0 };
        Self::with_top_height(physics, f64::from(top_height))
    }

    pub fn update(&mut self, speed: f64) {
        self.x -= speed;
    }

    /// Lower boundary of the opening, measured from the top of the surface.
    pub fn gap_bottom(&self) -> f64 {
        self.top_height + self.gap
    }

    /// True once the right edge has moved strictly past the left edge of the
    /// surface.  A pipe whose right edge sits exactly at 0 is still live.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Horizontal spans are half-open, so touching edges do not overlap.
    pub fn collides_with(&self, bird: &Bird) -> bool {
        let overlaps = bird.x + bird.width > self.x && bird.x < self.x + self.width;
        overlaps && (bird.y < self.top_height || bird.bottom() > self.gap_bottom())
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything one play-through owns.  A restart throws the whole value away
/// and builds a new one.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub bird: Bird,
    /// Live pipes in spawn order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub status: GameStatus,
    pub physics: Physics,
    pub frame: u64,
}
