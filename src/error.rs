use crate::Score;
use std::fmt;

/// Which of the two input sequences a symbol came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Reference,
    Query,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Reference => write!(f, "reference"),
            Side::Query => write!(f, "query"),
        }
    }
}

/// Errors returned by the aligner.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AlignError {
    /// The matrix is not `(k+1) x (k+1)` for an alphabet of `k` symbols.
    /// `alphabet_len` is `None` when the matrix is rejected on its own shape.
    #[error("scoring matrix is not square: {rows} rows, row {row} has {len} entries (alphabet size {alphabet_len:?})")]
    MatrixNotSquare {
        rows: usize,
        row: usize,
        len: usize,
        alphabet_len: Option<usize>,
    },
    #[error("scoring matrix has no rows; at least the gap row is required")]
    EmptyMatrix,
    #[error("symbol {:?} occurs twice in the alphabet", as_char(.symbol))]
    DuplicateSymbol { symbol: u8 },
    #[error("alphabet has {len} symbols; at most 255 are supported")]
    AlphabetTooLarge { len: usize },
    /// A symbol that the alphabet does not know. The whole alignment is rejected.
    #[error("unrecognized symbol {:?} at {sequence} position {position}", as_char(.symbol))]
    UnrecognizedSymbol {
        sequence: Side,
        position: usize,
        symbol: u8,
    },
    /// No predecessor reproduces the stored score of a cell during traceback.
    /// The grid and the traceback disagree; this is a bug or a misused
    /// matrix, never an expected outcome.
    #[error("internal error: no traceback path at row {row} col {col} (score {score})")]
    Inconsistent { row: usize, col: usize, score: Score },
}

fn as_char(symbol: &u8) -> char {
    *symbol as char
}

impl AlignError {
    /// True for internal invariant violations, which abort only the current
    /// alignment and should not be retried with the same inputs.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AlignError::Inconsistent { .. })
    }
}
