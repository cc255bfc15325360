//! Game lifecycle
//!
//! Owns the current session and the repeating frame timer, and sequences a
//! single frame: clear, update, draw, publish score, stop on game over.

use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::compute::{init_session, jump, tick};
use crate::config::{Physics, DEFAULT_FPS};
use crate::entities::{GameSession, GameStatus};
use crate::surface::{draw_session, ScoreDisplay, Surface};
use crate::timer::FrameTimer;

/// Lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been played yet.
    Idle,
    Alive,
    GameOver,
}

/// Player-initiated actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play,
    Restart,
    Jump,
}

/// Result of a single call to [`Game::frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No session was running; nothing was drawn.
    Skipped,
    Continue,
    /// This frame ended the session and cancelled the timer.
    GameOver { score: u32 },
}

pub struct Game {
    physics: Physics,
    fps: u32,
    session: Option<GameSession>,
    timer: Option<FrameTimer>,
}

impl Game {
    pub fn new(physics: Physics) -> Self {
        Self::with_fps(physics, DEFAULT_FPS)
    }

    pub fn with_fps(physics: Physics, fps: u32) -> Self {
        Self {
            physics,
            fps,
            session: None,
            timer: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Idle,
            Some(s) if s.status == GameStatus::Alive => Phase::Alive,
            Some(_) => Phase::GameOver,
        }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn timer(&self) -> Option<&FrameTimer> {
        self.timer.as_ref()
    }

    /// Whether the play control should be offered.
    pub fn play_visible(&self) -> bool {
        self.phase() == Phase::Idle
    }

    /// Whether the restart control should be offered.
    pub fn restart_visible(&self) -> bool {
        self.phase() == Phase::GameOver
    }

    /// Apply an action.  Returns `false` when the action has no meaning in
    /// the current phase and was ignored.
    pub fn handle(&mut self, action: Action, now: Instant) -> bool {
        match (self.phase(), action) {
            (Phase::Idle, Action::Play) | (Phase::GameOver, Action::Restart) => {
                self.start_session(now);
                true
            }
            (Phase::Alive, Action::Jump) => {
                if let Some(session) = self.session.as_mut() {
                    *session = jump(session);
                }
                true
            }
            (phase, action) => {
                debug!("ignoring {:?} while {:?}", action, phase);
                false
            }
        }
    }

    /// Discard whatever came before and start over with a new session and a
    /// new timer.
    fn start_session(&mut self, now: Instant) {
        self.session = Some(init_session(self.physics));
        self.timer = Some(FrameTimer::start(self.fps, now));
        info!("session started at {} fps", self.fps);
    }

    /// Consume a due timer tick.  Always `false` when no timer is running.
    pub fn poll_timer(&mut self, now: Instant) -> bool {
        self.timer.as_mut().map_or(false, |t| t.poll(now))
    }

    /// Run one frame of an active session.
    pub fn frame<S, D, R>(&mut self, surface: &mut S, display: &mut D, rng: &mut R) -> FrameOutcome
    where
        S: Surface,
        D: ScoreDisplay,
        R: Rng,
    {
        let Some(session) = self.session.as_mut() else {
            return FrameOutcome::Skipped;
        };
        if session.status != GameStatus::Alive {
            return FrameOutcome::Skipped;
        }

        surface.clear();
        *session = tick(session, rng);
        draw_session(surface, session);
        display.set_value(session.score);

        if session.status == GameStatus::GameOver {
            let score = session.score;
            if let Some(timer) = self.timer.as_mut() {
                if timer.cancel() {
                    info!("game over after {} frames, score {}", session.frame, score);
                }
            }
            return FrameOutcome::GameOver { score };
        }
        FrameOutcome::Continue
    }
}
