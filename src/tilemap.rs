//! Tile-based worlds.
//!
//! A tile sheet is cut into `tile_width` x `tile_height` cells, and each cell
//! is given a symbol. A map is a grid of symbols; every symbol becomes a
//! [`Tile`] whose `kind` is the index of its cell on the sheet. Tiles can
//! react to sprites touching them, to clicks, and can play an animation in
//! place of their sheet cell. The map is drawn through a [`Camera`] that can
//! scroll freely or follow a sprite.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::animation::Animation;
use crate::camera::{Camera, CameraHandle};
use crate::error::{GameError, Result};
use crate::math::Vector2;
use crate::scene::Scene;
use crate::sprite::Sprite;
use crate::timer::system_clock;

#[cfg(test)]
#[path = "tilemap_test.rs"]
mod tilemap_test;

pub type TileCallback = Rc<dyn Fn(&Tile)>;

/// `(row, col)` of a tile in the map.
pub type TileCoord = (usize, usize);

#[derive(Clone)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    /// Top-left corner in world pixels.
    pub x: f64,
    pub y: f64,
    pub kind: usize,
    pub animation_playing: bool,
    collision: Option<TileCallback>,
    click: Option<TileCallback>,
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("row", &self.row)
            .field("col", &self.col)
            .field("kind", &self.kind)
            .field("collidable", &self.is_collidable())
            .field("clickable", &self.is_clickable())
            .field("animation_playing", &self.animation_playing)
            .finish()
    }
}

impl Tile {
    pub fn new(row: usize, col: usize, x: f64, y: f64, kind: usize) -> Self {
        Tile {
            row,
            col,
            x,
            y,
            kind,
            animation_playing: false,
            collision: None,
            click: None,
        }
    }

    pub fn set_collision(&mut self, callback: TileCallback) {
        self.collision = Some(callback);
    }

    pub fn set_click(&mut self, callback: TileCallback) {
        self.click = Some(callback);
    }

    pub fn is_collidable(&self) -> bool {
        self.collision.is_some()
    }

    pub fn is_clickable(&self) -> bool {
        self.click.is_some()
    }

    /// Center-distance overlap between this `width` x `height` tile and a
    /// center-origin sprite. Touching edges do not count.
    pub fn overlaps(&self, sprite: &Sprite, width: f64, height: f64) -> bool {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let center_x = self.x + half_w;
        let center_y = self.y + half_h;
        (sprite.x - center_x).abs() < half_w + sprite.width / 2.0
            && (sprite.y - center_y).abs() < half_h + sprite.height / 2.0
    }
}

/// Which tiles [`TileMap::add_tile_collision`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSelector {
    Kind(usize),
    At(TileCoord),
}

#[derive(Debug, Clone, PartialEq)]
struct SheetCell {
    x: f64,
    y: f64,
    symbol: String,
}

pub struct TileMap {
    sheet: Option<HtmlImageElement>,
    tile_width: f64,
    tile_height: f64,
    cells: Vec<SheetCell>,
    tiles: Vec<Vec<Tile>>,
    kind_animations: HashMap<usize, Animation>,
    tile_animations: HashMap<TileCoord, Animation>,
    camera: CameraHandle,
}

impl TileMap {
    pub fn new(scene: &Scene) -> TileMap {
        Self::with_view(scene.width(), scene.height())
    }

    /// Map viewed through a `view_width` x `view_height` camera.
    pub fn with_view(view_width: f64, view_height: f64) -> TileMap {
        TileMap {
            sheet: None,
            tile_width: 0.0,
            tile_height: 0.0,
            cells: Vec::new(),
            tiles: Vec::new(),
            kind_animations: HashMap::new(),
            tile_animations: HashMap::new(),
            camera: Camera::new(view_width, view_height).into_handle(),
        }
    }

    pub fn tile_size(&self) -> (f64, f64) {
        (self.tile_width, self.tile_height)
    }

    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, (row, col): TileCoord) -> Option<&Tile> {
        self.tiles.get(row)?.get(col)
    }

    fn tile_mut(&mut self, (row, col): TileCoord) -> Result<&mut Tile> {
        self.tiles
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(GameError::TileOutOfRange { row, col })
    }

    fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut().flatten()
    }

    // --- loading ---

    /// Cut a `sheet_width` x `sheet_height` sheet into tiles and name them,
    /// row by row, with `symbols`.
    pub fn configure_sheet<S: AsRef<str>>(
        &mut self,
        tile_width: f64,
        tile_height: f64,
        sheet_width: f64,
        sheet_height: f64,
        symbols: &[S],
    ) -> Result<()> {
        if tile_width <= 0.0 || tile_height <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "tile size {tile_width}x{tile_height} must be positive"
            )));
        }
        let cols = (sheet_width / tile_width).floor() as usize;
        let rows = (sheet_height / tile_height).floor() as usize;
        if symbols.len() > rows * cols {
            log::warn!(
                "{} tile symbols given but the sheet only has {} cells",
                symbols.len(),
                rows * cols
            );
        }

        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self.cells = symbols
            .iter()
            .take(rows * cols)
            .enumerate()
            .map(|(i, symbol)| SheetCell {
                x: (i % cols) as f64 * tile_width,
                y: (i / cols) as f64 * tile_height,
                symbol: symbol.as_ref().to_string(),
            })
            .collect();
        Ok(())
    }

    pub fn load_tile_sheet<S: AsRef<str>>(
        &mut self,
        image_file: &str,
        tile_width: f64,
        tile_height: f64,
        sheet_width: f64,
        sheet_height: f64,
        symbols: &[S],
    ) -> Result<()> {
        self.configure_sheet(tile_width, tile_height, sheet_width, sheet_height, symbols)?;
        let image = HtmlImageElement::new()?;
        image.set_src(image_file);
        self.sheet = Some(image);
        Ok(())
    }

    /// Sheet index of `symbol`, which is also the `kind` of tiles using it.
    pub fn kind_of(&self, symbol: &str) -> Option<usize> {
        self.cells.iter().position(|c| c.symbol == symbol)
    }

    fn require_kind(&self, symbol: &str) -> Result<usize> {
        self.kind_of(symbol)
            .ok_or_else(|| GameError::UnknownTileSymbol(symbol.to_string()))
    }

    /// Build the map from rows of symbols. Replaces any previous map.
    pub fn load_map_data<R, S>(&mut self, rows: &[R]) -> Result<()>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut tiles = Vec::with_capacity(rows.len());
        for (row, symbols) in rows.iter().enumerate() {
            let mut line = Vec::with_capacity(symbols.as_ref().len());
            for (col, symbol) in symbols.as_ref().iter().enumerate() {
                let kind = self.require_kind(symbol.as_ref())?;
                line.push(Tile::new(
                    row,
                    col,
                    col as f64 * self.tile_width,
                    row as f64 * self.tile_height,
                    kind,
                ));
            }
            tiles.push(line);
        }
        self.tiles = tiles;
        self.tile_animations.clear();
        log::debug!("loaded {} map rows", self.tiles.len());
        Ok(())
    }

    /// Build the map from text, one character per tile and one line per
    /// row. Blank lines are skipped.
    pub fn load_map_text(&mut self, text: &str) -> Result<()> {
        let rows: Vec<Vec<String>> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(String::from).collect())
            .collect();
        self.load_map_data(&rows)
    }

    // --- drawing ---

    /// Move the camera (toward `target` when following) and draw every tile
    /// that is at least partly on screen.
    pub fn draw_map(
        &mut self,
        context: &CanvasRenderingContext2d,
        target: Option<&Sprite>,
    ) -> Result<()> {
        let (offset_x, offset_y, view_w, view_h) = {
            let mut camera = self.camera.borrow_mut();
            camera.update(target.map(Sprite::position));
            let (w, h) = camera.view_size();
            (camera.offset_x, camera.offset_y, w, h)
        };
        let (tw, th) = (self.tile_width, self.tile_height);

        for tile in self.tiles.iter().flatten() {
            let draw_x = tile.x - offset_x;
            let draw_y = tile.y - offset_y;
            if draw_x + tw <= 0.0 || draw_y + th <= 0.0 || draw_x >= view_w || draw_y >= view_h {
                continue;
            }

            context.save();
            let drawn = (|| -> Result<()> {
                context.translate(draw_x, draw_y)?;
                if tile.animation_playing {
                    let coord = (tile.row, tile.col);
                    let animation = match self.tile_animations.get_mut(&coord) {
                        Some(anim) => Some(anim),
                        None => self.kind_animations.get_mut(&tile.kind),
                    };
                    if let Some(animation) = animation {
                        return animation.draw_frame_at_origin(context);
                    }
                }
                if let (Some(sheet), Some(cell)) = (&self.sheet, self.cells.get(tile.kind)) {
                    context
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            sheet, cell.x, cell.y, tw, th, 0.0, 0.0, tw, th,
                        )?;
                }
                Ok(())
            })();
            context.restore();
            drawn?;
        }
        Ok(())
    }

    // --- collisions and clicks ---

    pub fn add_tile_collision(&mut self, selector: TileSelector, callback: TileCallback) -> Result<()> {
        match selector {
            TileSelector::Kind(kind) => {
                for tile in self.tiles_mut().filter(|t| t.kind == kind) {
                    tile.set_collision(Rc::clone(&callback));
                }
            }
            TileSelector::At(coord) => self.tile_mut(coord)?.set_collision(callback),
        }
        Ok(())
    }

    /// Give every tile drawn with each symbol that symbol's callback,
    /// replacing callbacks set earlier.
    pub fn load_collision_map<S: AsRef<str>>(&mut self, entries: &[(S, TileCallback)]) -> Result<()> {
        let resolved = entries
            .iter()
            .map(|(symbol, callback)| -> Result<(usize, TileCallback)> {
                Ok((self.require_kind(symbol.as_ref())?, Rc::clone(callback)))
            })
            .collect::<Result<Vec<_>>>()?;
        for (kind, callback) in resolved {
            self.add_tile_collision(TileSelector::Kind(kind), callback)?;
        }
        Ok(())
    }

    pub fn add_tile_click(&mut self, coord: TileCoord, callback: TileCallback) -> Result<()> {
        self.tile_mut(coord)?.set_click(callback);
        Ok(())
    }

    /// Tile under world point `(x, y)`, if the point is on the map.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<TileCoord> {
        if self.tile_width <= 0.0 || self.tile_height <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let coord = (
            (y / self.tile_height).floor() as usize,
            (x / self.tile_width).floor() as usize,
        );
        self.tile(coord).map(|_| coord)
    }

    /// Run the collision callback of every collidable tile around `sprite`
    /// that it overlaps, and return their coordinates.
    pub fn check_collisions(&self, sprite: &Sprite) -> Vec<TileCoord> {
        let Some((row, col)) = self.tile_at(sprite.x, sprite.y) else {
            return Vec::new();
        };

        let mut hits = Vec::new();
        for r in row.saturating_sub(1)..=row + 1 {
            for c in col.saturating_sub(1)..=col + 1 {
                let Some(tile) = self.tile((r, c)) else { continue };
                let Some(callback) = &tile.collision else { continue };
                if tile.overlaps(sprite, self.tile_width, self.tile_height) {
                    callback(tile);
                    hits.push((r, c));
                }
            }
        }
        hits
    }

    /// Run the click callback of the tile under screen point `(x, y)`.
    pub fn check_click(&self, x: f64, y: f64) -> Option<TileCoord> {
        let world = self.camera.borrow().screen_to_world(Vector2::new(x, y));
        let coord = self.tile_at(world.x, world.y)?;
        let tile = self.tile(coord)?;
        let callback = tile.click.as_ref()?;
        callback(tile);
        Some(coord)
    }

    // --- animation ---

    /// Animate every tile drawn with `symbol` using a sheet of frames. All
    /// cells of the sheet play in order.
    pub fn add_tile_animation(
        &mut self,
        symbol: &str,
        image_file: &str,
        img_width: f64,
        img_height: f64,
        cell_width: f64,
        cell_height: f64,
    ) -> Result<()> {
        let kind = self.require_kind(symbol)?;
        let animation = whole_sheet_animation(image_file, img_width, img_height, cell_width, cell_height)?;
        self.kind_animations.insert(kind, animation);
        Ok(())
    }

    /// Animate one tile. Takes precedence over an animation for its kind.
    pub fn add_specific_tile_animation(
        &mut self,
        coord: TileCoord,
        image_file: &str,
        img_width: f64,
        img_height: f64,
        cell_width: f64,
        cell_height: f64,
    ) -> Result<()> {
        self.tile_mut(coord)?;
        let animation = whole_sheet_animation(image_file, img_width, img_height, cell_width, cell_height)?;
        self.tile_animations.insert(coord, animation);
        Ok(())
    }

    pub fn insert_kind_animation(&mut self, kind: usize, animation: Animation) {
        self.kind_animations.insert(kind, animation);
    }

    pub fn insert_tile_animation(&mut self, coord: TileCoord, animation: Animation) -> Result<()> {
        self.tile_mut(coord)?;
        self.tile_animations.insert(coord, animation);
        Ok(())
    }

    /// The animation a tile would play: its own, else its kind's.
    pub fn animation_for(&self, coord: TileCoord) -> Option<&Animation> {
        let tile = self.tile(coord)?;
        self.tile_animations
            .get(&coord)
            .or_else(|| self.kind_animations.get(&tile.kind))
    }

    pub fn play_tile_animation(&mut self, coord: TileCoord) -> Result<()> {
        self.tile_mut(coord)?.animation_playing = true;
        Ok(())
    }

    pub fn stop_tile_animation(&mut self, coord: TileCoord) -> Result<()> {
        self.tile_mut(coord)?.animation_playing = false;
        Ok(())
    }

    // --- camera ---

    pub fn camera(&self) -> CameraHandle {
        Rc::clone(&self.camera)
    }

    pub fn map_scroll(&self, dx: f64, dy: f64) {
        self.camera.borrow_mut().move_camera(dx, dy);
    }

    /// Keep the sprite passed to [`TileMap::draw_map`] in view, letting it
    /// wander `wait_x`/`wait_y` pixels from the center first.
    pub fn camera_follow_sprite(&self, wait_x: f64, wait_y: f64) {
        self.camera.borrow_mut().follow(wait_x, wait_y);
    }

    /// Put `sprite` in map coordinates so it scrolls with the map.
    pub fn make_sprite_map_relative(&self, sprite: &mut Sprite) {
        sprite.set_camera_relative(self.camera());
    }
}

fn whole_sheet_animation(
    image_file: &str,
    img_width: f64,
    img_height: f64,
    cell_width: f64,
    cell_height: f64,
) -> Result<Animation> {
    let image = HtmlImageElement::new()?;
    image.set_src(image_file);
    let mut animation = Animation::new(
        Some(image),
        img_width,
        img_height,
        cell_width,
        cell_height,
        system_clock(),
    )?;
    let frames = animation.frames_per_row() * animation.frames_per_column();
    animation.add_cycle("tile", 0, frames)?;
    animation.set_cycle("tile")?;
    Ok(animation)
}
