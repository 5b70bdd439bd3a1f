//! A character's moves, addressed by index.

use crate::error::{ErrorSeverity, GameError};

use super::Move;

/// Errors from move-set lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveSetError {
    #[error("move index {index} out of range (move set has {len} moves)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl GameError for MoveSetError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IndexOutOfRange { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "MOVESET_INDEX_OUT_OF_RANGE",
        }
    }
}

/// Ordered moves of one character.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MoveSet {
    moves: Vec<Move>,
}

impl MoveSet {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    pub fn get(&self, index: usize) -> Result<&Move, MoveSetError> {
        let len = self.moves.len();
        self.moves
            .get(index)
            .ok_or(MoveSetError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Move, MoveSetError> {
        let len = self.moves.len();
        self.moves
            .get_mut(index)
            .ok_or(MoveSetError::IndexOutOfRange { index, len })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Indices of moves with uses left, ascending.
    pub fn usable_indices(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_usable())
            .map(|(i, _)| i)
            .collect()
    }
}
