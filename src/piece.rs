use derive_new::new;

use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub force: Force,
}

// Lowercase for pawns, uppercase for kings.
pub fn piece_to_ascii(kind: PieceKind, force: Force) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, kind) {
        (White, Pawn) => 'w',
        (White, King) => 'W',
        (Black, Pawn) => 'b',
        (Black, King) => 'B',
    }
}

pub fn piece_from_ascii(ch: char) -> Option<(PieceKind, Force)> {
    use self::Force::*;
    use self::PieceKind::*;
    match ch {
        'w' => Some((Pawn, White)),
        'W' => Some((King, White)),
        'b' => Some((Pawn, Black)),
        'B' => Some((King, Black)),
        _ => None,
    }
}
