#[cfg(test)]
mod tests {
    use crate::piece::{PIECE_COUNT, Piece};
    use crate::tests::test_utils::{DOT, LINE};

    #[test]
    fn test_catalogue_covers_every_index() {
        for index in 0..PIECE_COUNT {
            let piece = Piece::create(index).unwrap();
            assert_eq!(piece.index(), index);
            assert_eq!(piece.value(), i32::try_from(index).unwrap() + 1);
            assert!(!piece.occupied().is_empty(), "{} has no blocks", piece.name());
        }
        assert!(Piece::create(PIECE_COUNT).is_none());
    }

    #[test]
    fn test_catalogue_names() {
        assert_eq!(Piece::create(0).unwrap().name(), "Line");
        assert_eq!(Piece::create(12).unwrap().name(), "Inverse Corner");
        assert_eq!(Piece::create(14).unwrap().name(), "Double");
    }

    #[test]
    fn test_rotate_line() {
        let line = Piece::create(LINE).unwrap();
        // Vertical through the centre column
        assert_eq!(line.occupied(), vec![(1, 0), (1, 1), (1, 2)]);

        // A quarter turn lays it across the middle row
        let turned = line.rotated(1);
        assert_eq!(turned.occupied(), vec![(0, 1), (1, 1), (2, 1)]);
        assert_eq!(turned.index(), line.index());
    }

    #[test]
    fn test_rotation_does_not_mutate_original() {
        let corner = Piece::create(11).unwrap();
        let before = *corner.blocks();
        let _ = corner.rotated(1);
        assert_eq!(*corner.blocks(), before);
    }

    #[test]
    fn test_four_turns_is_identity() {
        for index in 0..PIECE_COUNT {
            let piece = Piece::create(index).unwrap();
            assert_eq!(piece.rotated(4), piece);
            assert_eq!(piece.rotated(1).rotated(3), piece);
            assert_eq!(piece.rotated(2), piece.rotated(1).rotated(1));
        }
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // Inverse corner: blocks at (0,0), (1,0), (1,1)
        let corner = Piece::create(12).unwrap();
        assert_eq!(corner.occupied(), vec![(0, 0), (1, 0), (1, 1)]);

        // (x, y) -> (2 - y, x)
        let turned = corner.rotated(1);
        assert_eq!(turned.occupied(), vec![(1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_dot_is_symmetric() {
        let dot = Piece::create(DOT).unwrap();
        assert_eq!(dot.rotated(1), dot);
        assert_eq!(dot.to_string(), "Dot (3)");
    }
}
