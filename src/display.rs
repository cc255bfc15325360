//! Rendering layer — all terminal I/O lives here.
//!
//! The board arrives as a `Raster` already painted by the game; this module
//! only turns it into half-block cells and lays the HUD, hints and overlays
//! on top.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use flappy_term::game::{Game, Phase};
use flappy_term::surface::{Raster, Rgb, ScoreDisplay};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_GAME_OVER: Color = Color::Red;

/// Rows reserved above (HUD) and below (hint line) the board.
pub const CHROME_ROWS: u16 = 2;

// ── Score display ─────────────────────────────────────────────────────────────

/// Score shown on the HUD row.
#[derive(Default)]
pub struct HudScore {
    value: u32,
}

impl HudScore {
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl ScoreDisplay for HudScore {
    fn set_value(&mut self, score: u32) {
        self.value = score;
    }
}

/// Pixel grid that fits a terminal of `cols`×`rows` below the HUD.
pub fn raster_size(cols: u16, rows: u16) -> (usize, usize) {
    (
        cols as usize,
        rows.saturating_sub(CHROME_ROWS) as usize * 2,
    )
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    raster: &Raster,
    game: &Game,
    score: &HudScore,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;

    draw_hud(out, score, width)?;
    draw_board(out, raster)?;
    draw_controls_hint(out, game.phase(), height)?;

    if game.play_visible() {
        draw_title(out, width, height)?;
    }
    if game.restart_visible() {
        draw_game_over(out, score.value(), width, height)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, score: &HudScore, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    let text = format!("Score: {}", score.value());
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(text.chars().count() as u16 / 2),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Board ─────────────────────────────────────────────────────────────────────

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

/// Two vertical pixels per cell: the upper one as the foreground of `▀`,
/// the lower one as the background.  Colours are only re-sent on change.
fn draw_board<W: Write>(out: &mut W, raster: &Raster) -> std::io::Result<()> {
    let rows = raster.height() / 2;
    let mut prev: Option<(Rgb, Rgb)> = None;

    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row as u16 + 1))?;
        for col in 0..raster.width() {
            let top = raster.get(col, row * 2);
            let bot = raster.get(col, row * 2 + 1);
            if prev != Some((top, bot)) {
                out.queue(style::SetForegroundColor(to_color(top)))?;
                out.queue(style::SetBackgroundColor(to_color(bot)))?;
                prev = Some((top, bot));
            }
            out.queue(Print('\u{2580}'))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, phase: Phase, height: u16) -> std::io::Result<()> {
    let hint = match phase {
        Phase::Idle => "P / Enter : Play   Q : Quit",
        Phase::Alive => "Any key : Jump   Q : Quit",
        Phase::GameOver => "R : Restart   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(style::SetBackgroundColor(Color::Black))?;
        out.queue(Print(msg))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines = [
        ("╔══════════════════╗".to_string(), C_TITLE),
        ("║      FLAPPY      ║".to_string(), C_TITLE),
        ("╚══════════════════╝".to_string(), C_TITLE),
        ("  P / Enter - Play  ".to_string(), Color::White),
    ];
    draw_centered(out, &lines, width, height)
}

fn draw_game_over<W: Write>(out: &mut W, score: u32, width: u16, height: u16) -> std::io::Result<()> {
    let lines = [
        ("╔════════════════════╗".to_string(), C_GAME_OVER),
        ("║    GAME  OVER      ║".to_string(), C_GAME_OVER),
        ("╚════════════════════╝".to_string(), C_GAME_OVER),
        (format!(" Final Score: {:>6} ", score), C_HUD_SCORE),
        ("R - Restart  Q - Quit".to_string(), Color::White),
    ];
    draw_centered(out, &lines, width, height)
}
