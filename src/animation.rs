//! Sprite-sheet animation.
//!
//! A sheet is a grid of equally sized cells numbered row-major from the top
//! left. A cycle is a run of consecutive cells played over
//! `animation_length` milliseconds, so every frame of a cycle lasts
//! `animation_length / frames`. Elapsed time is accumulated from the
//! [`AnimTimer`] each time a frame is drawn, and the visible frame is derived
//! from that total rather than stepped, so a slow tick never makes the
//! animation run slow.

use std::rc::Rc;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::error::{GameError, Result};
use crate::timer::{AnimTimer, Clock};

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

pub const DEFAULT_ANIMATION_LENGTH_MS: f64 = 1000.0;
pub const MIN_ANIMATION_LENGTH_MS: f64 = 50.0;

/// What happens when a cycle reaches its last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Hold the last frame after one pass.
    PlayOnce = 1,
    #[default]
    PlayLoop = 2,
}

/// How [`Animation::generate_cycles`] slices the sheet into cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleLayout {
    /// One cycle per row of the sheet.
    EachRow,
    /// Every cell sits in a single row; each cycle is `n` frames long.
    SingleRow(u32),
    /// Every cell sits in a single column; each cycle is `n` frames long.
    SingleColumn(u32),
    /// Consecutive cycles of the listed lengths.
    VariableLength(Vec<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub name: String,
    pub starting_cell: u32,
    pub frames: u32,
    pub play_mode: PlayMode,
}

/// Source rectangle of a cell on the sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub struct Animation {
    sheet: Option<HtmlImageElement>,
    img_width: f64,
    img_height: f64,
    cell_width: f64,
    cell_height: f64,
    frames_per_row: u32,
    frames_per_column: u32,
    cycles: Vec<Cycle>,
    current: Option<usize>,
    animation_length: f64,
    timer: AnimTimer,
    total_cycle_time: f64,
    paused: bool,
}

impl Animation {
    pub fn new(
        sheet: Option<HtmlImageElement>,
        img_width: f64,
        img_height: f64,
        cell_width: f64,
        cell_height: f64,
        clock: Rc<dyn Clock>,
    ) -> Result<Self> {
        if cell_width <= 0.0 || cell_height <= 0.0 {
            return Err(GameError::InvalidAnimation(format!(
                "cell size {cell_width}x{cell_height} must be positive"
            )));
        }
        if img_width < cell_width || img_height < cell_height {
            return Err(GameError::InvalidAnimation(format!(
                "sheet {img_width}x{img_height} is smaller than one {cell_width}x{cell_height} cell"
            )));
        }

        let timer = AnimTimer::new(clock);

        Ok(Animation {
            sheet,
            img_width,
            img_height,
            cell_width,
            cell_height,
            frames_per_row: (img_width / cell_width).floor() as u32,
            frames_per_column: (img_height / cell_height).floor() as u32,
            cycles: Vec::new(),
            current: None,
            animation_length: DEFAULT_ANIMATION_LENGTH_MS,
            timer,
            total_cycle_time: 0.0,
            paused: false,
        })
    }

    pub fn frames_per_row(&self) -> u32 { self.frames_per_row }
    pub fn frames_per_column(&self) -> u32 { self.frames_per_column }
    pub fn cell_width(&self) -> f64 { self.cell_width }
    pub fn cell_height(&self) -> f64 { self.cell_height }
    pub fn image_size(&self) -> (f64, f64) { (self.img_width, self.img_height) }
    pub fn animation_length(&self) -> f64 { self.animation_length }
    pub fn is_paused(&self) -> bool { self.paused }
    pub fn cycles(&self) -> &[Cycle] { &self.cycles }
    pub fn elapsed(&self) -> f64 { self.total_cycle_time }

    pub fn current_cycle(&self) -> Option<&Cycle> {
        self.current.and_then(|i| self.cycles.get(i))
    }

    pub fn current_cycle_name(&self) -> Option<&str> {
        self.current_cycle().map(|c| c.name.as_str())
    }

    /// Add a cycle, replacing any existing cycle with the same name.
    pub fn add_cycle(&mut self, name: &str, starting_cell: u32, frames: u32) -> Result<()> {
        if frames == 0 {
            return Err(GameError::InvalidAnimation(format!("cycle `{name}` has no frames")));
        }
        let cycle = Cycle {
            name: name.to_string(),
            starting_cell,
            frames,
            play_mode: PlayMode::default(),
        };
        match self.cycles.iter().position(|c| c.name == name) {
            Some(i) => self.cycles[i] = cycle,
            None => self.cycles.push(cycle),
        }
        Ok(())
    }

    /// Replace all cycles with ones sliced from the sheet, named `cycle1`,
    /// `cycle2`, ... and select `cycle1`.
    pub fn generate_cycles(&mut self, layout: CycleLayout) -> Result<()> {
        let lengths: Vec<u32> = match layout {
            CycleLayout::EachRow => vec![self.frames_per_row; self.frames_per_column as usize],
            CycleLayout::SingleRow(n) => self.uniform_lengths(self.frames_per_row, n)?,
            CycleLayout::SingleColumn(n) => self.uniform_lengths(self.frames_per_column, n)?,
            CycleLayout::VariableLength(lengths) => lengths,
        };
        if lengths.is_empty() {
            return Err(GameError::InvalidAnimation("no cycles fit on the sheet".into()));
        }

        let mut cycles = Vec::with_capacity(lengths.len());
        let mut next_start: u32 = 0;
        for (i, frames) in lengths.into_iter().enumerate() {
            let name = format!("cycle{}", i + 1);
            if frames == 0 {
                return Err(GameError::InvalidAnimation(format!("cycle `{name}` has no frames")));
            }
            cycles.push(Cycle {
                name,
                starting_cell: next_start,
                frames,
                play_mode: PlayMode::default(),
            });
            next_start = next_start.checked_add(frames).ok_or_else(|| {
                GameError::InvalidAnimation("cycle lengths overflow the sheet".into())
            })?;
        }

        self.cycles = cycles;
        self.current = None;
        log::debug!("generated {} animation cycles", self.cycles.len());
        self.set_cycle("cycle1")
    }

    fn uniform_lengths(&self, cells: u32, frames: u32) -> Result<Vec<u32>> {
        if frames == 0 {
            return Err(GameError::InvalidAnimation("cycle length must be positive".into()));
        }
        Ok(vec![frames; (cells / frames) as usize])
    }

    /// Rename cycles in order: the first name goes to the first cycle and so
    /// on. Extra names are ignored. The current cycle stays selected.
    pub fn rename_cycles<S: AsRef<str>>(&mut self, names: &[S]) {
        for (cycle, name) in self.cycles.iter_mut().zip(names) {
            cycle.name = name.as_ref().to_string();
        }
    }

    pub fn set_cycle(&mut self, name: &str) -> Result<()> {
        let index = self
            .cycles
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| GameError::UnknownCycle(name.to_string()))?;
        self.current = Some(index);
        self.total_cycle_time = 0.0;
        Ok(())
    }

    pub fn set_cycle_play_mode(&mut self, name: &str, mode: PlayMode) -> Result<()> {
        let cycle = self
            .cycles
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| GameError::UnknownCycle(name.to_string()))?;
        cycle.play_mode = mode;
        Ok(())
    }

    pub fn play(&mut self) {
        self.paused = false;
        self.timer.reset();
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn reset(&mut self) {
        self.total_cycle_time = 0.0;
        self.timer.reset();
    }

    /// Milliseconds for one pass through a cycle. Clamped to 50.
    pub fn set_speed(&mut self, length_ms: f64) {
        self.animation_length = length_ms.max(MIN_ANIMATION_LENGTH_MS);
    }

    /// Pull elapsed time from the timer unless paused.
    pub fn advance(&mut self) {
        if !self.paused {
            self.total_cycle_time += self.timer.time_elapsed();
        }
    }

    /// Index of the visible frame within the current cycle.
    pub fn current_frame(&self) -> Option<u32> {
        let cycle = self.current_cycle()?;
        let frame_delta = self.animation_length / f64::from(cycle.frames);
        let last = cycle.frames - 1;
        let frame = match cycle.play_mode {
            PlayMode::PlayLoop => {
                let elapsed = self.total_cycle_time % self.animation_length;
                (elapsed / frame_delta).floor() as u32
            }
            PlayMode::PlayOnce if self.total_cycle_time >= self.animation_length => last,
            PlayMode::PlayOnce => (self.total_cycle_time / frame_delta).floor() as u32,
        };
        Some(frame.min(last))
    }

    pub fn source_rect(&self) -> Option<FrameRect> {
        let cycle = self.current_cycle()?;
        let cell = cycle.starting_cell + self.current_frame()?;
        let row = cell / self.frames_per_row;
        let col = cell % self.frames_per_row;
        Some(FrameRect {
            x: f64::from(col) * self.cell_width,
            y: f64::from(row) * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        })
    }

    /// Advance time and draw the current cell centered on the context origin.
    pub fn draw_frame(&mut self, context: &CanvasRenderingContext2d) -> Result<()> {
        self.blit(context, true)
    }

    /// Advance time and draw with the cell's top-left corner at the origin.
    /// Tiles are positioned by their corner rather than their center.
    pub fn draw_frame_at_origin(&mut self, context: &CanvasRenderingContext2d) -> Result<()> {
        self.blit(context, false)
    }

    fn blit(&mut self, context: &CanvasRenderingContext2d, centered: bool) -> Result<()> {
        self.advance();
        let (Some(sheet), Some(rect)) = (self.sheet.as_ref(), self.source_rect()) else {
            return Ok(());
        };
        let (dx, dy) = if centered {
            (-rect.width / 2.0, -rect.height / 2.0)
        } else {
            (0.0, 0.0)
        };
        context.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            sheet,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            dx,
            dy,
            rect.width,
            rect.height,
        )?;
        Ok(())
    }
}
