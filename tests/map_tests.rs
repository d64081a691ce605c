// tests/map_tests.rs

use std::sync::Arc;
use tilesmith::{Error, SpriteSheet, TileCatalog, TileId, TileMap, MAX_MAP_SIDE};

const GRASS: TileId = TileId(0);
const SAND: TileId = TileId(1);
const WALL: TileId = TileId(2);

fn catalog() -> Arc<TileCatalog> {
    let sheet = SpriteSheet::from_pixels(3, 1, vec![0x00AA00, 0xDDCC88, 0x808080], 1, 1, 0)
        .expect("sheet");
    let cat = TileCatalog::parse("grass-0-0-0\nsand-1-0-0\nwall-2-0-1\n", &sheet).expect("catalog");
    Arc::new(cat)
}

const SMALL_MAP: &str = "\
// width-height
3-2
// x-y-layer-tileId
0-0-0-0
1-0-0-1
2-1-0-0
1-0-1-2
";

#[test]
fn load_save_load_reproduces_the_grid() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    std::fs::write(&first, SMALL_MAP).unwrap();

    let map = TileMap::load(&first, 8, catalog()).expect("load");
    map.save_to(&second).expect("save");
    let again = TileMap::load(&second, 8, catalog()).expect("reload");

    assert_eq!(map, again);
    assert_eq!(again.tile_at(1, 0, 0).unwrap(), Some(SAND));
    assert_eq!(again.tile_at(1, 0, 1).unwrap(), Some(WALL));
}

#[test]
fn save_writes_layers_in_ascending_order() {
    let mut map = TileMap::new(2, 2, 8, catalog());
    map.set_tile(1, 1, WALL).unwrap();
    map.set_tile(1, 0, GRASS).unwrap();
    map.set_tile(0, 1, SAND).unwrap();

    let text = map.to_text();
    let records: Vec<&str> = text.lines().filter(|l| !l.starts_with("//")).collect();
    assert_eq!(records, ["2-2", "1-0-0-0", "0-1-0-1", "1-1-1-2"]);
}

#[test]
fn save_goes_back_to_the_source_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("map.txt");
    std::fs::write(&path, SMALL_MAP).unwrap();

    let mut map = TileMap::load(&path, 8, catalog()).unwrap();
    map.remove_tile(1, 0, 1);
    map.save().expect("save");

    let reloaded = TileMap::load(&path, 8, catalog()).unwrap();
    assert_eq!(reloaded.tile_at(1, 0, 1).unwrap(), None);
    assert_eq!(reloaded.tile_at(1, 0, 0).unwrap(), Some(SAND));
}

#[test]
fn unsaved_map_has_nowhere_to_save() {
    let map = TileMap::new(2, 2, 8, catalog());
    assert!(matches!(map.save(), Err(Error::NoSource)));
}

#[test]
fn huge_header_fails_the_load_instead_of_allocating() {
    let err = TileMap::parse("4294967295-4294967295\n0-0-0-0\n", 1, catalog()).unwrap_err();
    assert!(matches!(err, Error::MapFormat { line: 1, .. }));

    let err = TileMap::parse("40000000-1\n", 32, catalog()).unwrap_err();
    assert!(matches!(err, Error::MapFormat { line: 1, .. }));
}

#[test]
fn pixel_size_saturates_instead_of_wrapping() {
    let map = TileMap::new(MAX_MAP_SIDE, 1, 32, catalog());
    assert_eq!(map.pixel_size(2, 2), (MAX_MAP_SIDE as i32 * 64, 64));

    let (w, h) = map.pixel_size(8192, 1);
    assert_eq!((w, h), (i32::MAX, 32));
}

#[test]
fn unknown_tile_id_fails_the_load() {
    let err = TileMap::parse("2-2\n0-0-0-0\n1-1-0-7\n", 8, catalog()).unwrap_err();
    assert!(matches!(err, Error::MapFormat { line: 3, .. }));
}

#[test]
fn record_on_the_wrong_layer_fails_the_load() {
    // wall lives on layer 1
    let err = TileMap::parse("2-2\n0-0-0-2\n", 8, catalog()).unwrap_err();
    assert!(matches!(err, Error::MapFormat { line: 2, .. }));
}

#[test]
fn record_outside_the_map_fails_the_load() {
    let err = TileMap::parse("2-2\n2-0-0-0\n", 8, catalog()).unwrap_err();
    assert!(matches!(err, Error::MapFormat { line: 2, .. }));
}

#[test]
fn duplicate_record_fails_the_load() {
    let err = TileMap::parse("2-2\n0-0-0-0\n0-0-0-1\n", 8, catalog()).unwrap_err();
    assert!(matches!(err, Error::MapFormat { line: 3, .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = TileMap::load("no/such/map.txt", 8, catalog()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn bounds_policy_differs_between_reads_and_writes() {
    let mut map = TileMap::new(2, 2, 8, catalog());
    map.set_tile(5, -1, GRASS).expect("out of bounds writes are ignored");
    assert_eq!(map.tiles().count(), 0);

    assert!(matches!(map.tile_at(2, 0, 0), Err(Error::OutOfRange { .. })));
    assert!(matches!(map.tile_at(0, -1, 0), Err(Error::OutOfRange { .. })));
}

#[test]
fn removing_keeps_other_layers_of_the_cell() {
    let mut map = TileMap::new(2, 2, 8, catalog());
    map.set_tile(0, 0, GRASS).unwrap();
    map.set_tile(0, 0, WALL).unwrap();

    map.remove_tile(0, 0, 1);
    assert_eq!(map.tile_at(0, 0, 0).unwrap(), Some(GRASS));
    assert_eq!(map.tile_at(0, 0, 1).unwrap(), None);

    // the "no tile" layer is a no-op
    map.remove_tile(0, 0, tilesmith::NO_LAYER);
    assert_eq!(map.tile_at(0, 0, 0).unwrap(), Some(GRASS));
}

#[test]
fn placing_overwrites_the_same_layer_only() {
    let mut map = TileMap::new(1, 1, 8, catalog());
    map.set_tile(0, 0, GRASS).unwrap();
    map.set_tile(0, 0, WALL).unwrap();
    map.set_tile(0, 0, SAND).unwrap();
    assert_eq!(map.tile_at(0, 0, 0).unwrap(), Some(SAND));
    assert_eq!(map.tile_at(0, 0, 1).unwrap(), Some(WALL));
}

#[test]
fn unknown_id_is_rejected_on_mutation() {
    let mut map = TileMap::new(1, 1, 8, catalog());
    assert!(matches!(map.set_tile(0, 0, TileId(3)), Err(Error::OutOfRange { .. })));
}
