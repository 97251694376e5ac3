#![allow(clippy::float_cmp)]

use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::test_support::ManualClock;

const SYMBOLS: [&str; 4] = [".", "#", "~", "*"];

const MAP: &str = "\
....
.#.#
..~.
";

/// 4x3 map of 32px tiles cut from a 64x64 sheet.
fn map() -> TileMap {
    let mut map = TileMap::with_view(800.0, 600.0);
    map.configure_sheet(32.0, 32.0, 64.0, 64.0, &SYMBOLS).unwrap();
    map.load_map_text(MAP).unwrap();
    map
}

fn counter() -> (Rc<Cell<usize>>, TileCallback) {
    let count = Rc::new(Cell::new(0));
    let hits = Rc::clone(&count);
    let callback: TileCallback = Rc::new(move |_: &Tile| hits.set(hits.get() + 1));
    (count, callback)
}

fn sprite_at(x: f64, y: f64) -> Sprite {
    let mut s = Sprite::detached(800.0, 600.0, 20.0, 20.0);
    s.set_position(x, y);
    s
}

// --- loading ---

#[test]
fn symbols_fill_the_sheet_row_by_row() {
    let map = map();
    assert_eq!(map.tile_size(), (32.0, 32.0));
    for (i, symbol) in SYMBOLS.iter().enumerate() {
        assert_eq!(map.kind_of(symbol), Some(i));
    }
    assert_eq!(map.kind_of("?"), None);
}

#[test]
fn symbols_beyond_the_sheet_are_dropped() {
    let mut map = TileMap::with_view(800.0, 600.0);
    map.configure_sheet(32.0, 32.0, 64.0, 64.0, &[".", "#", "~", "*", "!"])
        .unwrap();
    assert_eq!(map.kind_of("*"), Some(3));
    assert_eq!(map.kind_of("!"), None);
}

#[test]
fn zero_tile_size_is_rejected() {
    let mut map = TileMap::with_view(800.0, 600.0);
    let err = map.configure_sheet(0.0, 32.0, 64.0, 64.0, &SYMBOLS).err();
    assert!(matches!(err, Some(GameError::InvalidConfig(_))));
}

#[test]
fn text_map_places_tiles_on_the_grid() {
    let map = map();
    assert_eq!(map.rows(), 3);

    let wall = map.tile((1, 1)).unwrap();
    assert_eq!(wall.kind, 1);
    assert_eq!((wall.x, wall.y), (32.0, 32.0));

    let water = map.tile((2, 2)).unwrap();
    assert_eq!(water.kind, 2);
    assert_eq!((water.x, water.y), (64.0, 64.0));

    assert!(map.tile((3, 0)).is_none());
    assert!(map.tile((0, 4)).is_none());
}

#[test]
fn unknown_symbol_fails_the_load() {
    let mut map = map();
    let err = map.load_map_text("..x.").err();
    assert!(matches!(err, Some(GameError::UnknownTileSymbol(ref s)) if s == "x"));
    assert_eq!(map.rows(), 3, "failed load keeps the old map");
}

#[test]
fn map_data_replaces_the_previous_map() {
    let mut map = map();
    map.load_map_data(&[vec!["*", "*"]]).unwrap();
    assert_eq!(map.rows(), 1);
    assert_eq!(map.tile((0, 1)).unwrap().kind, 3);
    assert!(map.tile((1, 0)).is_none());
}

#[test]
fn tile_at_maps_world_points_to_tiles() {
    let map = map();
    assert_eq!(map.tile_at(0.0, 0.0), Some((0, 0)));
    assert_eq!(map.tile_at(40.0, 70.0), Some((2, 1)));
    assert_eq!(map.tile_at(-1.0, 10.0), None);
    assert_eq!(map.tile_at(200.0, 10.0), None);
}

// --- collisions ---

#[test]
fn collision_by_kind_marks_every_matching_tile() {
    let mut map = map();
    let (_, cb) = counter();
    map.add_tile_collision(TileSelector::Kind(1), cb).unwrap();
    assert!(map.tile((1, 1)).unwrap().is_collidable());
    assert!(map.tile((1, 3)).unwrap().is_collidable());
    assert!(!map.tile((0, 0)).unwrap().is_collidable());
}

#[test]
fn collision_at_out_of_range_tile_is_an_error() {
    let mut map = map();
    let (_, cb) = counter();
    let err = map.add_tile_collision(TileSelector::At((5, 0)), cb).err();
    assert!(matches!(err, Some(GameError::TileOutOfRange { row: 5, col: 0 })));
}

#[test]
fn sprite_on_a_wall_fires_its_callback() {
    let mut map = map();
    let (count, cb) = counter();
    map.add_tile_collision(TileSelector::Kind(1), cb).unwrap();

    let hits = map.check_collisions(&sprite_at(48.0, 48.0));
    assert_eq!(hits, vec![(1, 1)]);
    assert_eq!(count.get(), 1);
}

#[test]
fn touching_edges_do_not_collide() {
    let mut map = map();
    let (count, cb) = counter();
    map.add_tile_collision(TileSelector::At((1, 1)), cb).unwrap();

    // Wall center is x=48; half widths sum to 16 + 10.
    assert!(map.check_collisions(&sprite_at(74.0, 48.0)).is_empty());
    assert_eq!(map.check_collisions(&sprite_at(73.0, 48.0)), vec![(1, 1)]);
    assert_eq!(count.get(), 1);
}

#[test]
fn sprite_off_the_map_hits_nothing() {
    let mut map = map();
    let (count, cb) = counter();
    map.add_tile_collision(TileSelector::Kind(0), cb).unwrap();
    assert!(map.check_collisions(&sprite_at(500.0, 500.0)).is_empty());
    assert_eq!(count.get(), 0);
}

#[test]
fn corner_sprite_checks_only_tiles_that_exist() {
    let mut map = map();
    let (_, cb) = counter();
    map.add_tile_collision(TileSelector::Kind(0), cb).unwrap();
    assert_eq!(map.check_collisions(&sprite_at(5.0, 5.0)), vec![(0, 0)]);
}

#[test]
fn collision_map_assigns_callbacks_by_symbol() {
    let mut map = map();
    let (count, cb) = counter();
    map.load_collision_map(&[("~", cb)]).unwrap();
    assert!(map.tile((2, 2)).unwrap().is_collidable());
    assert!(!map.tile((1, 1)).unwrap().is_collidable());

    map.check_collisions(&sprite_at(80.0, 80.0));
    assert_eq!(count.get(), 1);
}

#[test]
fn collision_map_with_unknown_symbol_changes_nothing() {
    let mut map = map();
    let (_, water) = counter();
    let (_, lava) = counter();
    let err = map.load_collision_map(&[("~", water), ("x", lava)]).err();
    assert!(matches!(err, Some(GameError::UnknownTileSymbol(_))));
    assert!(!map.tile((2, 2)).unwrap().is_collidable());
}

// --- clicks ---

#[test]
fn click_goes_through_the_camera() {
    let mut map = map();
    let (count, cb) = counter();
    map.add_tile_click((1, 2), cb).unwrap();
    map.map_scroll(32.0, 0.0);

    // Screen (40, 40) is world (72, 40).
    assert_eq!(map.check_click(40.0, 40.0), Some((1, 2)));
    assert_eq!(count.get(), 1);

    assert_eq!(map.check_click(0.0, 0.0), None);
    assert_eq!(count.get(), 1);
}

// --- animation ---

fn anim(clock: &Rc<ManualClock>, cell: f64) -> Animation {
    Animation::new(None, 64.0, 64.0, cell, cell, clock.clone()).unwrap()
}

#[test]
fn specific_animation_wins_over_kind_animation() {
    let clock = ManualClock::new(0.0);
    let mut map = map();
    map.insert_kind_animation(1, anim(&clock, 16.0));
    map.insert_tile_animation((1, 1), anim(&clock, 32.0)).unwrap();

    assert_eq!(map.animation_for((1, 1)).unwrap().cell_width(), 32.0);
    assert_eq!(map.animation_for((1, 3)).unwrap().cell_width(), 16.0);
    assert!(map.animation_for((0, 0)).is_none());
}

#[test]
fn specific_animation_needs_a_real_tile() {
    let clock = ManualClock::new(0.0);
    let mut map = map();
    let err = map.insert_tile_animation((9, 9), anim(&clock, 32.0)).err();
    assert!(matches!(err, Some(GameError::TileOutOfRange { row: 9, col: 9 })));
}

#[test]
fn reloading_the_map_drops_specific_animations() {
    let clock = ManualClock::new(0.0);
    let mut map = map();
    map.insert_tile_animation((0, 0), anim(&clock, 32.0)).unwrap();
    map.load_map_text(MAP).unwrap();
    assert!(map.animation_for((0, 0)).is_none());
}

#[test]
fn play_and_stop_toggle_a_tile() {
    let mut map = map();
    assert!(!map.tile((2, 2)).unwrap().animation_playing);
    map.play_tile_animation((2, 2)).unwrap();
    assert!(map.tile((2, 2)).unwrap().animation_playing);
    map.stop_tile_animation((2, 2)).unwrap();
    assert!(!map.tile((2, 2)).unwrap().animation_playing);
    assert!(map.play_tile_animation((3, 3)).is_err());
}

// --- camera ---

#[test]
fn scrolling_moves_the_shared_camera() {
    let map = map();
    let camera = map.camera();
    map.map_scroll(10.0, -5.0);
    map.map_scroll(10.0, 0.0);
    assert_eq!((camera.borrow().offset_x, camera.borrow().offset_y), (20.0, -5.0));
}

#[test]
fn follow_is_set_on_the_map_camera() {
    let map = map();
    map.camera_follow_sprite(100.0, 80.0);
    assert!(map.camera().borrow().is_following());
}

#[test]
fn map_relative_sprite_shares_the_camera() {
    let map = map();
    let mut s = sprite_at(10.0, 10.0);
    map.make_sprite_map_relative(&mut s);
    assert_eq!(Rc::strong_count(&map.camera), 2);
}
