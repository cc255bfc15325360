//! Drawing collaborators and the pixel buffer the terminal presents.
//!
//! Game code only ever talks to the [`Surface`] and [`ScoreDisplay`]
//! traits, in logical units on a 320×480 board.  [`Raster`] is the concrete
//! surface: it scales logical rectangles onto a pixel grid sized from the
//! terminal and letterboxes the board to keep its aspect ratio.

use crate::entities::GameSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const SKY: Rgb = Rgb(112, 197, 206);
pub const BACKDROP: Rgb = Rgb(24, 24, 32);
pub const BIRD_YELLOW: Rgb = Rgb(245, 200, 66);
pub const PIPE_GREEN: Rgb = Rgb(84, 168, 55);

/// A fixed-size 2D raster target, addressed in logical units.
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb);
}

/// Receives the current score once per frame.
pub trait ScoreDisplay {
    fn set_value(&mut self, score: u32);
}

/// Paint the bird and every live pipe.
pub fn draw_session(surface: &mut impl Surface, session: &GameSession) {
    let bird = &session.bird;
    surface.fill_rect(bird.x, bird.y, bird.width, bird.height, BIRD_YELLOW);

    let surface_height = session.physics.surface_height;
    for pipe in &session.pipes {
        surface.fill_rect(pipe.x, 0.0, pipe.width, pipe.top_height, PIPE_GREEN);
        surface.fill_rect(
            pipe.x,
            surface_height - pipe.bottom_height,
            pipe.width,
            pipe.bottom_height,
            PIPE_GREEN,
        );
    }
}

// ── Raster ────────────────────────────────────────────────────────────────────

/// Pixel buffer holding a scaled, centred view of the logical board.
pub struct Raster {
    logical_w: f64,
    logical_h: f64,
    w: usize,
    h: usize,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    px: Vec<Rgb>,
}

impl Raster {
    pub fn new(logical_w: f64, logical_h: f64, w: usize, h: usize) -> Self {
        let mut raster = Self {
            logical_w,
            logical_h,
            w: 0,
            h: 0,
            scale: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            px: Vec::new(),
        };
        raster.resize(w, h);
        raster
    }

    /// Refit the board to a new pixel grid.  Contents are reset.
    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.scale = if self.logical_w > 0.0 && self.logical_h > 0.0 {
            (w as f64 / self.logical_w).min(h as f64 / self.logical_h)
        } else {
            0.0
        };
        self.offset_x = ((w as f64 - self.logical_w * self.scale) / 2.0).floor();
        self.offset_y = ((h as f64 - self.logical_h * self.scale) / 2.0).floor();
        self.px = vec![BACKDROP; w * h];
        self.clear();
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Pixel bounds `(x0, y0, x1, y1)` of the board, end-exclusive.
    pub fn board_bounds(&self) -> (usize, usize, usize, usize) {
        self.to_pixels(0.0, 0.0, self.logical_w, self.logical_h)
    }

    /// Map a logical rectangle to end-exclusive pixel bounds, clipped to the
    /// board.  Edges round outward so thin shapes stay visible.
    fn to_pixels(&self, x: f64, y: f64, w: f64, h: f64) -> (usize, usize, usize, usize) {
        let x0 = x.max(0.0);
        let y0 = y.max(0.0);
        let x1 = (x + w).min(self.logical_w);
        let y1 = (y + h).min(self.logical_h);
        if x1 <= x0 || y1 <= y0 {
            return (0, 0, 0, 0);
        }
        let px0 = (self.offset_x + x0 * self.scale).floor().max(0.0) as usize;
        let py0 = (self.offset_y + y0 * self.scale).floor().max(0.0) as usize;
        let px1 = ((self.offset_x + x1 * self.scale).ceil().max(0.0) as usize).min(self.w);
        let py1 = ((self.offset_y + y1 * self.scale).ceil().max(0.0) as usize).min(self.h);
        (px0, py0, px1, py1)
    }
}

impl Surface for Raster {
    fn clear(&mut self) {
        self.px.fill(BACKDROP);
        let (x0, y0, x1, y1) = self.board_bounds();
        for y in y0..y1 {
            for x in x0..x1 {
                self.px[y * self.w + x] = SKY;
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let (x0, y0, x1, y1) = self.to_pixels(x, y, w, h);
        for py in y0..y1 {
            for px in x0..x1 {
                self.px[py * self.w + px] = color;
            }
        }
    }
}
