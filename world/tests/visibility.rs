use fermi_planet_core::{GridPosition, Rect, TileKind, TileSize};
use fermi_planet_world::{TileField, VisibleTile};

fn alternating(position: GridPosition) -> TileKind {
    TileKind::ALL[(position.row() as usize + position.column() as usize) % TileKind::ALL.len()]
}

fn chunk() -> TileField {
    let size = TileSize::square(32.0).expect("valid tile size");
    TileField::new(64, 64, size, &mut alternating).expect("valid field")
}

#[test]
fn viewport_at_origin_sees_exactly_the_overlapping_rows_and_columns() {
    let field = chunk();
    let visible: Vec<VisibleTile> = field
        .visible_tiles(Rect::new(0.0, 0.0, 1280.0, 720.0))
        .collect();

    assert_eq!(visible.len(), 23 * 40);
    assert!(visible
        .iter()
        .all(|tile| tile.position.row() <= 22 && tile.position.column() <= 39));

    let last = visible.last().expect("at least one visible tile");
    assert_eq!(last.position, GridPosition::new(22, 39));
    assert_eq!(last.world_rect, Rect::new(1248.0, 704.0, 32.0, 32.0));
}

#[test]
fn visible_tiles_preserve_row_major_order() {
    let field = chunk();
    let positions: Vec<GridPosition> = field
        .visible_tiles(Rect::new(40.0, 40.0, 100.0, 70.0))
        .map(|tile| tile.position)
        .collect();

    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
    assert_eq!(positions.first(), Some(&GridPosition::new(1, 1)));
    assert_eq!(positions.last(), Some(&GridPosition::new(3, 4)));
}

#[test]
fn culling_agrees_with_the_intersection_predicate_for_every_tile() {
    let field = chunk();
    let views = [
        Rect::new(0.0, 0.0, 1280.0, 720.0),
        Rect::new(-100.0, -100.0, 100.0, 100.0),
        Rect::new(-100.0, -100.0, 101.0, 101.0),
        Rect::new(1000.5, 333.25, 640.0, 360.0),
        Rect::new(2040.0, 2040.0, 1280.0, 720.0),
        Rect::new(4096.0, 0.0, 1280.0, 720.0),
    ];

    for view in views {
        let visible: Vec<GridPosition> = field
            .visible_tiles(view)
            .map(|tile| tile.position)
            .collect();
        let expected: Vec<GridPosition> = field
            .tiles()
            .iter()
            .filter(|tile| tile.world_rect().intersects(&view))
            .map(|tile| tile.position())
            .collect();

        assert_eq!(visible, expected, "mismatch for view {view:?}");
    }
}

#[test]
fn view_past_the_grid_sees_nothing() {
    let field = chunk();

    assert_eq!(
        field
            .visible_tiles(Rect::new(2048.0, 0.0, 1280.0, 720.0))
            .count(),
        0
    );
    assert_eq!(
        field
            .visible_tiles(Rect::new(-1280.0, -720.0, 1280.0, 720.0))
            .count(),
        0
    );
}

#[test]
fn rescaled_field_culls_against_new_rectangles() {
    let mut field = chunk();
    field.rescale(TileSize::square(64.0).expect("valid tile size"));

    let visible = field
        .visible_tiles(Rect::new(0.0, 0.0, 1280.0, 720.0))
        .count();

    // 720 / 64 = 11.25 -> 12 rows, 1280 / 64 = 20 columns exactly.
    assert_eq!(visible, 12 * 20);
    let tile = field
        .tile(GridPosition::new(2, 3))
        .expect("tile inside grid");
    assert_eq!(tile.world_rect(), Rect::new(192.0, 128.0, 64.0, 64.0));
}
