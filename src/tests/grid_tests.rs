#[cfg(test)]
mod tests {
    use crate::grid::{Coordinate, EMPTY, Grid, OUT_OF_BOUNDS};
    use crate::piece::Piece;
    use crate::tests::test_utils::{DOT, LINE, SQUARE, fill_cells, row_with_gap};

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(5, 5);
        for x in 0..5 {
            for y in 0..5 {
                assert_eq!(grid.get(x, y), EMPTY);
            }
        }
    }

    #[test]
    fn test_get_out_of_bounds_returns_sentinel() {
        let grid = Grid::new(5, 4);
        assert_eq!(grid.get(-1, 0), OUT_OF_BOUNDS);
        assert_eq!(grid.get(0, -1), OUT_OF_BOUNDS);
        assert_eq!(grid.get(5, 0), OUT_OF_BOUNDS);
        assert_eq!(grid.get(0, 4), OUT_OF_BOUNDS);
        assert_eq!(grid.get(4, 3), EMPTY);
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut grid = Grid::new(5, 5);
        let before = grid.clone();
        grid.set(7, 2, 3);
        grid.set(-1, -1, 3);
        assert_eq!(grid, before);

        grid.set(2, 3, 6);
        assert_eq!(grid.get(2, 3), 6);
    }

    #[test]
    fn test_dot_lands_on_anchor() {
        let mut grid = Grid::new(5, 5);
        let dot = Piece::create(DOT).unwrap();

        assert!(grid.place(&dot, 0, 0));
        assert_eq!(grid.get(0, 0), dot.value());
    }

    #[test]
    fn test_shape_is_centred_on_anchor() {
        let mut grid = Grid::new(5, 5);
        let square = Piece::create(SQUARE).unwrap();

        assert!(grid.place(&square, 2, 2));
        for (x, y) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert_eq!(grid.get(x, y), square.value(), "cell {x},{y}");
        }
        assert_eq!(grid.get(3, 3), EMPTY);
    }

    #[test]
    fn test_cannot_place_off_grid() {
        let grid = Grid::new(5, 5);
        let line = Piece::create(LINE).unwrap();

        // Vertical line reaching above the top edge
        assert!(!grid.can_place(&line, 0, 0));
        // Fully inside
        assert!(grid.can_place(&line, 0, 1));
        // Reaching below the bottom edge
        assert!(!grid.can_place(&line, 2, 4));
    }

    #[test]
    fn test_rejected_place_writes_nothing() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, 9);
        let before = grid.clone();
        let square = Piece::create(SQUARE).unwrap();

        // Three of the four cells are free, the fourth is taken
        assert!(!grid.can_place(&square, 3, 3));
        assert!(!grid.place(&square, 3, 3));
        assert_eq!(grid, before);

        // Partly off grid
        assert!(!grid.place(&square, 0, 0));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_full_row_detected() {
        let mut grid = Grid::new(5, 5);
        fill_cells(&mut grid, &row_with_gap(5, 2, 4), 1);
        assert!(!grid.is_row_full(2));

        grid.set(4, 2, 1);
        assert!(grid.is_row_full(2));
        assert!(!grid.is_column_full(4));

        let (lines, cells) = grid.full_lines();
        assert_eq!(lines, 1);
        assert_eq!(cells.len(), 5);
        assert!(cells.contains(&Coordinate::new(0, 2)));
    }

    #[test]
    fn test_row_and_column_share_one_cell() {
        let mut grid = Grid::new(5, 5);
        fill_cells(&mut grid, &row_with_gap(5, 0, -1), 2);
        fill_cells(&mut grid, &[(3, 1), (3, 2), (3, 3), (3, 4)], 2);

        let (lines, cells) = grid.full_lines();
        assert_eq!(lines, 2);
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn test_clear_cells() {
        let mut grid = Grid::new(5, 5);
        fill_cells(&mut grid, &row_with_gap(5, 1, -1), 5);
        let (_, cells) = grid.full_lines();

        grid.clear_cells(&cells);
        assert_eq!(grid, Grid::new(5, 5));
    }

    #[test]
    fn test_snapshot_is_row_major() {
        let mut grid = Grid::new(5, 5);
        grid.set(1, 0, 3);
        grid.set(0, 1, 7);

        let snapshot = grid.snapshot(5);
        assert_eq!(snapshot.len(), 25);
        assert_eq!(&snapshot[..10], "0300070000");
    }

    #[test]
    fn test_snapshot_pads_small_grid() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.snapshot(5), "0".repeat(25));
    }
}
