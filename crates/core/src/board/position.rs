//! The 8×8 grid of pieces

use super::{Color, Piece, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece storage. No rule checking happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    // [rank][file]
    cells: [[Option<Piece>; 8]; 8],
}

/// Everything a move does to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    pub from: Square,
    pub to: Square,
    /// Square of a pawn taken en passant.
    pub en_passant: Option<Square>,
    pub promotion: Option<PieceKind>,
    /// Rook relocation accompanying a castle.
    pub rook: Option<(Square, Square)>,
}

impl MoveEffect {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            en_passant: None,
            promotion: None,
            rook: None,
        }
    }

    pub fn with_en_passant(mut self, victim: Square) -> Self {
        self.en_passant = Some(victim);
        self
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    pub fn with_rook(mut self, from: Square, to: Square) -> Self {
        self.rook = Some((from, to));
        self
    }

    fn touched(&self) -> impl Iterator<Item = Square> + '_ {
        [Some(self.from), Some(self.to), self.en_passant]
            .into_iter()
            .chain(self.rook.into_iter().flat_map(|(a, b)| [Some(a), Some(b)]))
            .flatten()
    }
}

/// Prior contents of the cells a [`MoveEffect`] touched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping an Undo makes the move permanent"]
pub struct Undo {
    cells: Vec<(Square, Option<Piece>)>,
}

impl Position {
    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard starting array.
    pub fn standard() -> Self {
        let mut position = Self::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                if let Some(square) = Square::new(file as u8, color.home_rank()) {
                    position.place(square, Piece::new(*kind, color, square));
                }
                if let Some(square) = Square::new(file as u8, color.pawn_start_rank()) {
                    position.place(square, Piece::new(PieceKind::Pawn, color, square));
                }
            }
        }
        position
    }

    pub fn occupant(&self, square: Square) -> Option<Piece> {
        self.cells[square.rank() as usize][square.file() as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.occupant(square).is_none()
    }

    /// Puts `piece` on `square`, replacing any occupant.
    pub fn place(&mut self, square: Square, mut piece: Piece) {
        piece.square = square;
        self.cells[square.rank() as usize][square.file() as usize] = Some(piece);
    }

    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.rank() as usize][square.file() as usize].take()
    }

    /// Relocates the piece on `from` and marks it moved. Returns whatever stood on `to`.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.clear(from)?;
        piece.has_moved = true;
        let displaced = self.clear(to);
        self.place(to, piece);
        displaced
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.iter()
            .find(|piece| piece.is(PieceKind::King, color))
            .map(|piece| piece.square)
    }

    /// All pieces in a1..h8 order.
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.iter().filter(move |piece| piece.color == color)
    }

    pub fn piece_count(&self) -> usize {
        self.iter().count()
    }

    /// Applies a move effect and hands back what is needed to revert it.
    pub fn apply(&mut self, effect: &MoveEffect) -> Undo {
        let cells = effect
            .touched()
            .map(|square| (square, self.occupant(square)))
            .collect();
        self.play(effect);
        Undo { cells }
    }

    /// Applies a move effect for good.
    pub fn play(&mut self, effect: &MoveEffect) {
        if let Some(victim) = effect.en_passant {
            self.clear(victim);
        }
        self.move_piece(effect.from, effect.to);
        if let Some(kind) = effect.promotion {
            if let Some(pawn) = self.clear(effect.to) {
                let mut promoted = Piece::new(kind, pawn.color, effect.to);
                promoted.has_moved = true;
                self.place(effect.to, promoted);
            }
        }
        if let Some((rook_from, rook_to)) = effect.rook {
            self.move_piece(rook_from, rook_to);
        }
    }

    pub fn undo(&mut self, undo: Undo) {
        for (square, previous) in undo.cells.into_iter().rev() {
            self.cells[square.rank() as usize][square.file() as usize] = previous;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}
