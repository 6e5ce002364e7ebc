use quickcheck::{Arbitrary, Gen};

/// A small board and a list of moves for it.
///
/// Some moves land one row or column past the edge of the board, and moves
/// often repeat cells that are already taken.
#[derive(Clone, Debug)]
pub struct MoveSequence {
    // Both at least 1
    pub width: usize,
    pub height: usize,
    pub moves: Vec<(usize, usize)>,
}

impl Arbitrary for MoveSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        let width = usize::arbitrary(g) % 8 + 1;
        let height = usize::arbitrary(g) % 8 + 1;
        let num_moves = usize::arbitrary(g) % (width * height * 2 + 1);
        let moves = (0..num_moves)
            .map(|_| {
                let row = usize::arbitrary(g) % (height + 1);
                let col = usize::arbitrary(g) % (width + 1);
                (row, col)
            })
            .collect();
        MoveSequence {
            width,
            height,
            moves,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let (width, height) = (self.width, self.height);
        Box::new(self.moves.shrink().map(move |moves| MoveSequence {
            width,
            height,
            moves,
        }))
    }
}
