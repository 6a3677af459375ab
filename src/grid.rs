//! The dynamic programming table of optimal prefix scores.
//!
//! Cell `(i, j)` holds the best score of aligning the first `i` reference
//! symbols against the first `j` query symbols. The reference indexes rows,
//! the query indexes columns.

use crate::alphabet::Alphabet;
use crate::error::{AlignError, Side};
use crate::scoring::ScoringMatrix;
use crate::visualizer::Visualizer;
use crate::{Score, Seq};
use serde::{Deserialize, Serialize};

/// The move that leads into a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// From `(i-1, j-1)`: a reference symbol aligned to a query symbol.
    Diag,
    /// From `(i-1, j)`: a reference symbol aligned to a gap.
    Up,
    /// From `(i, j-1)`: a query symbol aligned to a gap.
    Left,
}

use Direction::*;

impl Direction {
    /// Tie-break order: earlier directions win when candidates are equal.
    pub const ORDER: [Direction; 3] = [Diag, Up, Left];

    /// The best of the `[diag, up, left]` candidate scores. Ties go to the
    /// direction that comes first in [`ORDER`](Self::ORDER).
    #[inline]
    pub fn best(candidates: [Score; 3]) -> (Direction, Score) {
        let mut best = (Diag, candidates[0]);
        for (dir, s) in Self::ORDER.into_iter().zip(candidates).skip(1) {
            // Strict: an equal later candidate never replaces an earlier one.
            if s > best.1 {
                best = (dir, s);
            }
        }
        best
    }

    /// The first direction whose candidate equals `score`, in tie-break order.
    #[inline]
    pub fn matching(candidates: [Score; 3], score: Score) -> Option<Direction> {
        Self::ORDER
            .into_iter()
            .zip(candidates)
            .find_map(|(dir, s)| (s == score).then_some(dir))
    }

    /// The cell this move comes from.
    #[inline]
    pub fn predecessor(&self, i: usize, j: usize) -> (usize, usize) {
        match self {
            Diag => (i - 1, j - 1),
            Up => (i - 1, j),
            Left => (i, j - 1),
        }
    }
}

/// Map every symbol of `seq` to its matrix index. The first symbol the
/// alphabet does not know rejects the sequence, as does an index outside
/// `0..alphabet.len()`, which would otherwise be scored as a gap or fall
/// outside the matrix.
pub fn to_indices(seq: Seq, alphabet: &impl Alphabet, side: Side) -> Result<Vec<usize>, AlignError> {
    let len = alphabet.len();
    seq.iter()
        .enumerate()
        .map(|(position, &symbol)| {
            alphabet
                .index(symbol)
                .filter(|&i| i < len)
                .ok_or(AlignError::UnrecognizedSymbol {
                    sequence: side,
                    position,
                    symbol,
                })
        })
        .collect()
}

/// The score table for one pair of sequences.
///
/// Built in a single forward pass and only read afterwards.
#[derive(Clone, Debug)]
pub struct AlignmentGrid<'m> {
    matrix: &'m ScoringMatrix,
    reference: Vec<usize>,
    query: Vec<usize>,
    /// Row length: `query.len() + 1`.
    cols: usize,
    /// Row major, `(reference.len() + 1) * cols` cells.
    cells: Vec<Score>,
}

impl<'m> AlignmentGrid<'m> {
    /// Check the inputs and fill the grid.
    pub fn new(
        reference: Seq,
        query: Seq,
        alphabet: &impl Alphabet,
        matrix: &'m ScoringMatrix,
        v: &mut (impl Visualizer + ?Sized),
    ) -> Result<Self, AlignError> {
        matrix.check(alphabet.len())?;
        let reference = to_indices(reference, alphabet, Side::Reference)?;
        let query = to_indices(query, alphabet, Side::Query)?;
        Ok(Self::from_indices(matrix, reference, query, v))
    }

    /// Fill the grid from sequences mapped by [`to_indices`], so all indices
    /// are smaller than `matrix.gap()`.
    fn from_indices(
        matrix: &'m ScoringMatrix,
        reference: Vec<usize>,
        query: Vec<usize>,
        v: &mut (impl Visualizer + ?Sized),
    ) -> Self {
        let rows = reference.len() + 1;
        let cols = query.len() + 1;
        log::debug!("Filling {rows}x{cols} alignment grid");
        v.new_grid(rows, cols);

        let mut grid = Self {
            matrix,
            reference,
            query,
            cols,
            cells: vec![0; rows * cols],
        };

        v.expand(0, 0, 0);
        // Row 0: query symbols against gaps.
        for j in 1..cols {
            let s = grid.cells[j - 1] + matrix.ins(grid.query[j - 1]);
            grid.cells[j] = s;
            v.expand(0, j, s);
        }

        for i in 1..rows {
            // Column 0: reference symbols against gaps.
            let s = grid.cells[(i - 1) * cols] + matrix.del(grid.reference[i - 1]);
            grid.cells[i * cols] = s;
            v.expand(i, 0, s);

            for j in 1..cols {
                let (_, s) = Direction::best(grid.candidates(i, j));
                grid.cells[i * cols + j] = s;
                v.expand(i, j, s);
            }
        }
        grid
    }

    /// Number of rows, `reference.len() + 1`.
    pub fn rows(&self) -> usize {
        self.reference.len() + 1
    }

    /// Number of columns, `query.len() + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn score(&self, i: usize, j: usize) -> Score {
        self.cells[i * self.cols + j]
    }

    /// The optimal score of the full alignment, `G[r][c]`.
    pub fn final_score(&self) -> Score {
        self.score(self.rows() - 1, self.cols - 1)
    }

    pub fn matrix(&self) -> &ScoringMatrix {
        self.matrix
    }

    /// Matrix indices of the reference symbols.
    pub fn reference(&self) -> &[usize] {
        &self.reference
    }

    /// Matrix indices of the query symbols.
    pub fn query(&self) -> &[usize] {
        &self.query
    }

    /// The `[diag, up, left]` candidate scores for interior cell `(i, j)`.
    /// Requires `i > 0` and `j > 0`.
    #[inline]
    pub fn candidates(&self, i: usize, j: usize) -> [Score; 3] {
        let (a, b) = (self.reference[i - 1], self.query[j - 1]);
        [
            self.score(i - 1, j - 1) + self.matrix.score(a, b),
            self.score(i - 1, j) + self.matrix.del(a),
            self.score(i, j - 1) + self.matrix.ins(b),
        ]
    }

    /// The move the traceback takes out of `(i, j)`.
    ///
    /// `None` at the origin, and for a cell whose stored score none of its
    /// candidates reproduces.
    pub fn direction(&self, i: usize, j: usize) -> Option<Direction> {
        match (i, j) {
            (0, 0) => None,
            (0, _) => Some(Left),
            (_, 0) => Some(Up),
            _ => Direction::matching(self.candidates(i, j), self.score(i, j)),
        }
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, i: usize, j: usize, s: Score) {
        self.cells[i * self.cols + j] = s;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alphabet::LetterIndex;
    use crate::visualizer::NoVis;

    fn grid<'m>(a: &[u8], b: &[u8], m: &'m ScoringMatrix) -> AlignmentGrid<'m> {
        AlignmentGrid::new(a, b, &LetterIndex::dna(), m, &mut NoVis).unwrap()
    }

    #[test]
    fn best_prefers_earlier_on_ties() {
        assert_eq!(Direction::best([1, 1, 1]), (Diag, 1));
        assert_eq!(Direction::best([0, 1, 1]), (Up, 1));
        assert_eq!(Direction::best([0, 0, 1]), (Left, 1));
        assert_eq!(Direction::best([2, 1, 3]), (Left, 3));
        assert_eq!(Direction::matching([0, 1, 1], 1), Some(Up));
        assert_eq!(Direction::matching([0, 1, 1], 2), None);
    }

    #[test]
    fn borders_accumulate_gaps() {
        let m = ScoringMatrix::match_mismatch(4, 1, 0, -1);
        let g = grid(b"AC", b"A", &m);
        assert_eq!((g.rows(), g.cols()), (3, 2));
        assert_eq!(g.score(0, 0), 0);
        assert_eq!(g.score(0, 1), -1);
        assert_eq!(g.score(1, 0), -1);
        assert_eq!(g.score(2, 0), -2);
        assert_eq!(g.score(1, 1), 1);
        assert_eq!(g.score(2, 1), 0);
        assert_eq!(g.final_score(), 0);
    }

    #[test]
    fn asymmetric_gap_costs() {
        // Gaps in the query (Up) cost 2, gaps in the reference (Left) cost 5.
        let mut rows = ScoringMatrix::match_mismatch(4, 3, -1, 0).rows().to_vec();
        for a in 0..4 {
            rows[a][4] = -2;
            rows[4][a] = -5;
        }
        let m = ScoringMatrix::new(rows).unwrap();
        let g = grid(b"A", b"AA", &m);
        assert_eq!(g.score(0, 2), -10);
        assert_eq!(g.score(1, 0), -2);
        assert_eq!(g.final_score(), 3 - 5);
    }

    #[test]
    fn directions() {
        let m = ScoringMatrix::match_mismatch(4, 1, 0, -1);
        let g = grid(b"AC", b"A", &m);
        assert_eq!(g.direction(0, 0), None);
        assert_eq!(g.direction(0, 1), Some(Left));
        assert_eq!(g.direction(2, 0), Some(Up));
        assert_eq!(g.direction(1, 1), Some(Diag));
        assert_eq!(g.direction(2, 1), Some(Up));
    }

    #[test]
    fn every_interior_cell_is_the_max() {
        let m = ScoringMatrix::match_mismatch(4, 2, -1, -2);
        let g = grid(b"GATTACA", b"GCATGCT", &m);
        for i in 1..g.rows() {
            for j in 1..g.cols() {
                let c = g.candidates(i, j);
                assert_eq!(g.score(i, j), *c.iter().max().unwrap());
                assert!(g.direction(i, j).is_some());
            }
        }
    }

    #[test]
    fn unrecognized_symbols_are_rejected() {
        let m = ScoringMatrix::identity(4);
        let r = AlignmentGrid::new(b"ACGT", b"ACNT", &LetterIndex::dna(), &m, &mut NoVis);
        assert_eq!(
            r.unwrap_err(),
            AlignError::UnrecognizedSymbol {
                sequence: Side::Query,
                position: 2,
                symbol: b'N'
            }
        );
        let r = AlignmentGrid::new(b"-", b"A", &LetterIndex::dna(), &m, &mut NoVis);
        assert!(matches!(
            r.unwrap_err(),
            AlignError::UnrecognizedSymbol {
                sequence: Side::Reference,
                position: 0,
                ..
            }
        ));
    }

    /// Claims four symbols but hands out the gap index and beyond.
    struct Overreaching;

    impl Alphabet for Overreaching {
        fn len(&self) -> usize {
            4
        }
        fn index(&self, symbol: u8) -> Option<usize> {
            Some((symbol - b'0') as usize)
        }
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let m = ScoringMatrix::identity(4);
        let g = AlignmentGrid::new(b"0123", b"3210", &Overreaching, &m, &mut NoVis).unwrap();
        assert_eq!(g.final_score(), 1);
        for (query, symbol) in [(&b"014"[..], b'4'), (&b"019"[..], b'9')] {
            assert_eq!(
                AlignmentGrid::new(b"0", query, &Overreaching, &m, &mut NoVis).unwrap_err(),
                AlignError::UnrecognizedSymbol {
                    sequence: Side::Query,
                    position: 2,
                    symbol
                }
            );
        }
    }

    #[test]
    fn large_entries_do_not_overflow() {
        let m = ScoringMatrix::match_mismatch(4, 1_500_000_000, 0, -1);
        let g = grid(b"AA", b"AA", &m);
        assert_eq!(g.final_score(), 3_000_000_000);

        let m = ScoringMatrix::match_mismatch(4, i32::MAX, i32::MIN, i32::MIN);
        let g = grid(b"ACGTACGT", b"", &m);
        assert_eq!(g.final_score(), 8 * i32::MIN as Score);
        let g = grid(b"ACGTACGT", b"ACGTACGT", &m);
        assert_eq!(g.final_score(), 8 * i32::MAX as Score);
    }

    #[test]
    fn empty_sequences() {
        let m = ScoringMatrix::match_mismatch(4, 1, -1, -1);
        let g = grid(b"", b"", &m);
        assert_eq!((g.rows(), g.cols(), g.final_score()), (1, 1, 0));
        let g = grid(b"", b"ACG", &m);
        assert_eq!(g.final_score(), -3);
    }
}
