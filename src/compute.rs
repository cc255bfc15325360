//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameSession` (and, where needed, an RNG handle) and returns a brand-new
//! `GameSession`.  Side effects are limited to the injected RNG.

use log::{debug, trace};
use rand::Rng;

use crate::config::Physics;
use crate::entities::{Bird, GameSession, GameStatus, Pipe};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state of a freshly started session.
pub fn init_session(physics: Physics) -> GameSession {
    GameSession {
        bird: Bird::new(&physics),
        pipes: Vec::new(),
        score: 0,
        status: GameStatus::Alive,
        physics,
        frame: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply a jump.  Ignored once the session is over.
pub fn jump(state: &GameSession) -> GameSession {
    if state.status != GameStatus::Alive {
        return state.clone();
    }
    let mut bird = state.bird.clone();
    bird.jump();
    GameSession {
        bird,
        ..state.clone()
    }
}

// ── Obstacle stream ─────────────────────────────────────────────────────────

/// One Bernoulli trial: append a new pipe with probability `spawn_chance`.
pub fn maybe_spawn(pipes: &mut Vec<Pipe>, physics: &Physics, rng: &mut impl Rng) {
    let chance = physics.spawn_chance.clamp(0.0, 1.0);
    if rng.gen_bool(chance) {
        let pipe = Pipe::spawn(physics, rng);
        debug!("spawned pipe with top height {}", pipe.top_height);
        pipes.push(pipe);
    }
}

/// What happened to the obstacle stream during one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamStep {
    /// Number of pipes overlapping the bird after they moved.
    pub collisions: usize,
    /// Number of pipes that left the surface and were dropped.
    pub pruned: u32,
}

/// Advance every pipe, count collisions against `bird`, then split the
/// stream into kept and pruned pipes in one pass.
pub fn update_and_prune(pipes: &[Pipe], bird: &Bird, speed: f64) -> (Vec<Pipe>, StreamStep) {
    let moved: Vec<Pipe> = pipes
        .iter()
        .map(|p| {
            let mut p = p.clone();
            p.update(speed);
            p
        })
        .collect();

    let collisions = moved.iter().filter(|p| p.collides_with(bird)).count();

    let (pruned, kept): (Vec<Pipe>, Vec<Pipe>) =
        moved.into_iter().partition(|p| p.is_off_screen());

    (
        kept,
        StreamStep {
            collisions,
            pruned: pruned.len() as u32,
        },
    )
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A session that is already over is returned unchanged.
pub fn tick(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    if state.status != GameStatus::Alive {
        return state.clone();
    }
    let physics = state.physics;
    let frame = state.frame + 1;

    // ── 1. Bird ─────────────────────────────────────────────────────────────
    let mut bird = state.bird.clone();
    bird.update(physics.gravity, physics.surface_height);

    // ── 2. Spawn ────────────────────────────────────────────────────────────
    // A pipe spawned this frame moves along with the rest below.
    let mut pipes = state.pipes.clone();
    maybe_spawn(&mut pipes, &physics, rng);

    // ── 3. Move, collide, prune ─────────────────────────────────────────────
    let (pipes, step) = update_and_prune(&pipes, &bird, physics.pipe_speed);
    if step.pruned > 0 {
        trace!("frame {}: pruned {} pipe(s)", frame, step.pruned);
    }

    let status = if step.collisions > 0 {
        GameStatus::GameOver
    } else {
        GameStatus::Alive
    };

    GameSession {
        bird,
        pipes,
        score: state.score + step.pruned,
        status,
        frame,
        ..state.clone()
    }
}
