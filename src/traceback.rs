//! Reconstruct the optimal alignment from a filled grid.

use crate::alignment::{Alignment, Segment};
use crate::error::AlignError;
use crate::grid::{AlignmentGrid, Direction};
use crate::Score;

/// The segment that is currently being extended backwards.
struct OpenSegment {
    /// Exclusive end of the segment in the reference and query.
    end: (usize, usize),
    score: Score,
    op: Option<Direction>,
}

impl OpenSegment {
    /// Close the segment at `(i, j)` and push it, unless it is empty.
    fn close(&self, i: usize, j: usize, segments: &mut Vec<Segment>) {
        let (max_i, max_j) = self.end;
        if (i, j) == (max_i, max_j) {
            return;
        }
        let Some(op) = self.op else {
            unreachable!("A non-empty segment always has a move type.");
        };
        let segment = Segment {
            reference: i..max_i,
            query: j..max_j,
            score: self.score,
            op,
        };
        log::trace!("Segment {segment:?}");
        segments.push(segment);
    }
}

/// Walk back from the last cell to the first row or column, grouping equal
/// moves into segments.
///
/// The direction of each step is the first of diag, up, left (in that order)
/// that reproduces the stored score, the same order used to fill the grid.
/// The part of the grid left between the origin and the point where the walk
/// stops is reported as one leading block.
pub fn traceback(grid: &AlignmentGrid) -> Result<Alignment, AlignError> {
    let mut i = grid.rows() - 1;
    let mut j = grid.cols() - 1;
    let mut open = OpenSegment {
        end: (i, j),
        score: 0,
        op: None,
    };
    let mut segments = vec![];

    while i > 0 && j > 0 {
        let score = grid.score(i, j);
        let Some(dir) = Direction::matching(grid.candidates(i, j), score) else {
            return Err(AlignError::Inconsistent {
                row: i,
                col: j,
                score,
            });
        };

        if open.op != Some(dir) {
            open.close(i, j, &mut segments);
            open = OpenSegment {
                end: (i, j),
                score: 0,
                op: Some(dir),
            };
        }

        let (pi, pj) = dir.predecessor(i, j);
        open.score += score - grid.score(pi, pj);
        (i, j) = (pi, pj);
    }
    open.close(i, j, &mut segments);

    // Everything before the stopping point is a run of gaps.
    if i != j {
        segments.push(Segment {
            reference: 0..i,
            query: 0..j,
            score: grid.score(i, j),
            op: if i > 0 { Direction::Up } else { Direction::Left },
        });
    }

    segments.reverse();
    Ok(Alignment::new(segments))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alphabet::LetterIndex;
    use crate::scoring::ScoringMatrix;
    use crate::visualizer::NoVis;
    use Direction::*;

    fn seg(r: std::ops::Range<usize>, q: std::ops::Range<usize>, score: Score, op: Direction) -> Segment {
        Segment {
            reference: r,
            query: q,
            score,
            op,
        }
    }

    #[test]
    fn single_match_run() {
        let m = ScoringMatrix::identity(4);
        let g = AlignmentGrid::new(b"ACGT", b"ACGT", &LetterIndex::dna(), &m, &mut NoVis).unwrap();
        let aln = traceback(&g).unwrap();
        assert_eq!(aln.segments(), &[seg(0..4, 0..4, 4, Diag)]);
    }

    #[test]
    fn trailing_gap_in_query() {
        let m = ScoringMatrix::match_mismatch(4, 1, 0, -1);
        let g = AlignmentGrid::new(b"AC", b"A", &LetterIndex::dna(), &m, &mut NoVis).unwrap();
        let aln = traceback(&g).unwrap();
        assert_eq!(
            aln.segments(),
            &[seg(0..1, 0..1, 1, Diag), seg(1..2, 1..1, -1, Up)]
        );
        assert_eq!(aln.score(), g.final_score());
    }

    #[test]
    fn leading_block() {
        // Gaps are free and mismatches expensive: the T's are aligned at the
        // end and the rest is left as gaps.
        let m = ScoringMatrix::match_mismatch(4, 1, -5, 0);
        let g = AlignmentGrid::new(b"AAT", b"CT", &LetterIndex::dna(), &m, &mut NoVis).unwrap();
        let aln = traceback(&g).unwrap();
        assert_eq!(aln.score(), 1);
        let last = aln.segments().last().unwrap();
        assert_eq!(last, &seg(2..3, 1..2, 1, Diag));
        assert_eq!(aln.segments()[0].reference.start, 0);
        assert_eq!(aln.segments()[0].query.start, 0);
    }

    #[test]
    fn leading_block_score_is_the_stop_cell() {
        // Query is a suffix of the reference: the walk reaches column 0 at
        // row 2, leaving a block of two reference symbols against gaps.
        let m = ScoringMatrix::match_mismatch(4, 2, -3, -1);
        let g = AlignmentGrid::new(b"GGAC", b"AC", &LetterIndex::dna(), &m, &mut NoVis).unwrap();
        let aln = traceback(&g).unwrap();
        assert_eq!(
            aln.segments(),
            &[seg(0..2, 0..0, -2, Up), seg(2..4, 0..2, 4, Diag)]
        );
        assert_eq!(aln.cigar(), "2D2M");
    }

    #[test]
    fn empty_inputs() {
        let m = ScoringMatrix::match_mismatch(4, 1, -1, -2);
        let dna = LetterIndex::dna();
        let g = AlignmentGrid::new(b"", b"", &dna, &m, &mut NoVis).unwrap();
        assert!(traceback(&g).unwrap().is_empty());

        let g = AlignmentGrid::new(b"", b"ACG", &dna, &m, &mut NoVis).unwrap();
        assert_eq!(traceback(&g).unwrap().segments(), &[seg(0..0, 0..3, -6, Left)]);

        let g = AlignmentGrid::new(b"AC", b"", &dna, &m, &mut NoVis).unwrap();
        assert_eq!(traceback(&g).unwrap().segments(), &[seg(0..2, 0..0, -4, Up)]);
    }

    #[test]
    fn corrupted_grid_is_reported() {
        let m = ScoringMatrix::match_mismatch(4, 1, 0, -1);
        let mut g = AlignmentGrid::new(b"ACG", b"ACG", &LetterIndex::dna(), &m, &mut NoVis).unwrap();
        g.set_score(3, 3, 100);
        assert_eq!(g.direction(3, 3), None);
        assert_eq!(g.direction(2, 2), Some(Direction::Diag));
        let e = traceback(&g).unwrap_err();
        assert_eq!(
            e,
            AlignError::Inconsistent {
                row: 3,
                col: 3,
                score: 100
            }
        );
        assert!(e.is_fatal());
    }
}
