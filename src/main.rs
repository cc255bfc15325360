mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use flappy_term::config::{Physics, DEFAULT_FPS};
use flappy_term::game::{Action, Game, Phase};
use flappy_term::surface::{draw_session, Raster, ScoreDisplay, Surface};

use display::{raster_size, HudScore};

/// How long to wait for input while no frame timer is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug, Clone)]
#[command(name = "flappy_term")]
#[command(about = "Flappy-style side-scroller in the terminal", long_about = None)]
struct Args {
    /// Frame rate of the game loop
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Seed for a reproducible pipe sequence (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Per-frame probability of a new pipe appearing
    #[arg(long, default_value_t = 0.01)]
    spawn_chance: f64,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn validate(&self) -> Result<()> {
        ensure!(
            (1..=240).contains(&self.fps),
            "--fps must be between 1 and 240, got {}",
            self.fps
        );
        ensure!(
            (0.0..=1.0).contains(&self.spawn_chance),
            "--spawn-chance must be between 0 and 1, got {}",
            self.spawn_chance
        );
        Ok(())
    }
}

/// The terminal is in the alternate screen while playing, so logs only go
/// to a file.  Without one no logger is installed.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    init_logging(args.log_file.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("could not enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &args);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("exiting after error: {:#}", e);
    }
    result
}

// ── Game loop ─────────────────────────────────────────────────────────────────

#[derive(PartialEq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    game: Game,
    raster: Raster,
    score: HudScore,
}

impl App {
    /// Translate one terminal event.  Every key press that is not a quit,
    /// play or restart request becomes a jump; `Game` ignores jumps outside
    /// a running session.
    fn on_event(&mut self, ev: Event, now: Instant) -> Flow {
        match ev {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) => {
                let phase = self.game.phase();
                let action = match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Flow::Quit;
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter
                        if phase == Phase::Idle =>
                    {
                        Action::Play
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') if phase == Phase::GameOver => {
                        Action::Restart
                    }
                    _ => Action::Jump,
                };
                if self.game.handle(action, now) && action != Action::Jump {
                    self.raster.clear();
                    self.score.set_value(0);
                }
            }
            Event::Resize(cols, rows) => {
                let (w, h) = raster_size(cols, rows);
                self.raster.resize(w, h);
                if let Some(session) = self.game.session() {
                    draw_session(&mut self.raster, session);
                }
            }
            _ => {}
        }
        Flow::Continue
    }
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, args: &Args) -> Result<()> {
    let physics = Physics::default().with_spawn_chance(args.spawn_chance);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (cols, rows) = terminal::size()?;
    let (w, h) = raster_size(cols, rows);
    let mut app = App {
        game: Game::with_fps(physics, args.fps),
        raster: Raster::new(physics.surface_width, physics.surface_height, w, h),
        score: HudScore::default(),
    };
    log::info!("terminal {}x{}, raster {}x{} px", cols, rows, w, h);

    display::render(out, &app.raster, &app.game, &app.score)?;

    loop {
        let wait = app
            .game
            .timer()
            .and_then(|t| t.time_until_next(Instant::now()))
            .unwrap_or(IDLE_POLL);

        // ── Input: block until the next tick, then drain what is pending ──────
        match rx.recv_timeout(wait) {
            Ok(ev) => {
                if app.on_event(ev, Instant::now()) == Flow::Quit {
                    return Ok(());
                }
                while let Ok(ev) = rx.try_recv() {
                    if app.on_event(ev, Instant::now()) == Flow::Quit {
                        return Ok(());
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        // ── Frame ─────────────────────────────────────────────────────────────
        if app.game.poll_timer(Instant::now()) {
            app.game.frame(&mut app.raster, &mut app.score, &mut rng);
        }

        display::render(out, &app.raster, &app.game, &app.score)?;
    }
}
