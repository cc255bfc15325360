/// Gameplay constants, grouped so a session can carry them by value.
///
/// The defaults describe the classic 320×480 board.  Everything is in
/// logical surface units and per-frame rates.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    pub surface_width: f64,
    pub surface_height: f64,
    /// Added to the bird's velocity every frame.
    pub gravity: f64,
    /// Velocity assigned by a jump (negative = upward).
    pub jump_impulse: f64,
    pub bird_x: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub pipe_width: f64,
    /// Vertical opening between the top and bottom segments.
    pub pipe_gap: f64,
    /// Leftward scroll per frame.
    pub pipe_speed: f64,
    /// Probability that a new pipe appears on any given frame.
    pub spawn_chance: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            surface_width: 320.0,
            surface_height: 480.0,
            gravity: 1.1,
            jump_impulse: -10.0,
            bird_x: 50.0,
            bird_width: 30.0,
            bird_height: 10.0,
            pipe_width: 50.0,
            pipe_gap: 250.0,
            pipe_speed: 1.0,
            spawn_chance: 0.01,
        }
    }
}

impl Physics {
    pub fn with_spawn_chance(self, spawn_chance: f64) -> Self {
        Self { spawn_chance, ..self }
    }
}

/// Default frame rate of the repeating timer.
pub const DEFAULT_FPS: u32 = 60;
