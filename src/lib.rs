//! Exact global pairwise alignment with a custom scoring matrix.
//!
//! The aligner fills the full Needleman-Wunsch table for two sequences and
//! walks back from the last cell to report the optimal alignment as a list of
//! [`Segment`]s: maximal runs of aligned pairs, reference-only gaps, or
//! query-only gaps, each with its own score.
//!
//! Scores are maximized. Ties between moves are always broken in the order
//! diagonal, up (reference symbol against a gap), left (query symbol against a
//! gap), so the reported alignment is deterministic.
//!
//! ```
//! use nw_segments::prelude::*;
//!
//! let dna = LetterIndex::dna();
//! let matrix = ScoringMatrix::match_mismatch(4, 1, 0, -1);
//! let aln = align(b"AC", b"A", &dna, &matrix).unwrap();
//! assert_eq!(aln.cigar(), "1M1D");
//! assert_eq!(aln.score(), 0);
//! ```
//!
//! Time and memory are both `O(|reference| * |query|)`. Each call is
//! independent; matrices and alphabets are immutable and can be shared
//! between threads aligning different pairs.

pub mod alignment;
pub mod alphabet;
pub mod config;
pub mod error;
pub mod grid;
pub mod scoring;
pub mod traceback;
pub mod visualizer;


/// Scores are exact integers; higher is better.
///
/// Cells of the grid sum up to `|reference| + |query|` matrix entries, so
/// they are twice as wide as a [`MatrixScore`] and cannot overflow.
pub type Score = i64;
/// A single entry of the [`ScoringMatrix`].
pub type MatrixScore = i32;
/// An owned sequence.
pub type Sequence = Vec<u8>;
/// A sequence slice.
pub type Seq<'a> = &'a [u8];

pub use alignment::{Alignment, Segment};
pub use alphabet::{Alphabet, LetterIndex};
pub use config::ScoringConfig;
pub use error::{AlignError, Side};
pub use grid::{AlignmentGrid, Direction};
pub use scoring::ScoringMatrix;
pub use visualizer::{NoVis, Visualizer};

pub mod prelude {
    pub use super::{
        align, align_with_visualizer, AlignError, Alignment, AlignmentGrid, Alphabet, Direction,
        LetterIndex, MatrixScore, NoVis, Score, ScoringConfig, ScoringMatrix, Segment, Seq, Sequence, Side,
        Visualizer, NW,
    };
}

/// Globally align `query` against `reference`.
///
/// Fails when the matrix does not fit the alphabet or when a sequence
/// contains a symbol the alphabet does not know; in both cases no work is
/// done. [`AlignError::Inconsistent`] signals an internal fault.
pub fn align(
    reference: Seq,
    query: Seq,
    alphabet: &impl Alphabet,
    matrix: &ScoringMatrix,
) -> Result<Alignment, AlignError> {
    align_with_visualizer(reference, query, alphabet, matrix, &mut NoVis)
}

/// Same as [`align`], reporting progress to `v`.
pub fn align_with_visualizer(
    reference: Seq,
    query: Seq,
    alphabet: &impl Alphabet,
    matrix: &ScoringMatrix,
    v: &mut (impl Visualizer + ?Sized),
) -> Result<Alignment, AlignError> {
    let grid = AlignmentGrid::new(reference, query, alphabet, matrix, v)?;
    let result = traceback::traceback(&grid);
    match &result {
        Ok(aln) => {
            log::debug!(
                "Aligned {}x{}: score {} in {} segments",
                reference.len(),
                query.len(),
                aln.score(),
                aln.len()
            );
            v.last_frame(&grid, Some(aln));
        }
        Err(e) => {
            log::error!("{e}");
            v.last_frame(&grid, None);
        }
    }
    result
}

/// Needleman-Wunsch aligner for a fixed alphabet and scoring matrix.
#[derive(Debug)]
pub struct NW<'a, A: Alphabet> {
    pub alphabet: &'a A,
    pub matrix: &'a ScoringMatrix,
}

// Only references are stored, so no bounds on `A` are needed.
impl<'a, A: Alphabet> Clone for NW<'a, A> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, A: Alphabet> Copy for NW<'a, A> {}

impl<'a, A: Alphabet> NW<'a, A> {
    /// Fails when the matrix does not fit the alphabet.
    pub fn new(alphabet: &'a A, matrix: &'a ScoringMatrix) -> Result<Self, AlignError> {
        matrix.check(alphabet.len())?;
        Ok(Self { alphabet, matrix })
    }

    pub fn align(&self, reference: Seq, query: Seq) -> Result<Alignment, AlignError> {
        align(reference, query, self.alphabet, self.matrix)
    }

    pub fn align_with_visualizer(
        &self,
        reference: Seq,
        query: Seq,
        v: &mut (impl Visualizer + ?Sized),
    ) -> Result<Alignment, AlignError> {
        align_with_visualizer(reference, query, self.alphabet, self.matrix, v)
    }

    /// Only the optimal score, without traceback.
    pub fn score(&self, reference: Seq, query: Seq) -> Result<Score, AlignError> {
        Ok(self.grid(reference, query)?.final_score())
    }

    /// The filled grid, for inspection.
    pub fn grid(&self, reference: Seq, query: Seq) -> Result<AlignmentGrid<'a>, AlignError> {
        AlignmentGrid::new(reference, query, self.alphabet, self.matrix, &mut NoVis)
    }
}
