//! The output of an alignment: scored segments in ascending order.

use crate::grid::Direction;
use crate::Score;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A maximal run of one move type, or the leading block of unaligned symbols.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Half-open interval of reference positions.
    pub reference: Range<usize>,
    /// Half-open interval of query positions.
    pub query: Range<usize>,
    /// Sum of the scores of the moves in this segment.
    pub score: Score,
    /// The move type of this run.
    pub op: Direction,
}

impl Segment {
    pub fn reference_len(&self) -> usize {
        self.reference.len()
    }

    pub fn query_len(&self) -> usize {
        self.query.len()
    }

    /// Number of alignment columns this segment covers.
    pub fn len(&self) -> usize {
        match self.op {
            Direction::Diag | Direction::Up => self.reference_len(),
            Direction::Left => self.query_len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty() && self.query.is_empty()
    }
}

/// A global alignment, as segments covering both sequences from start to end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    segments: Vec<Segment>,
}

impl Alignment {
    /// `segments` must be in ascending order.
    pub fn new(segments: Vec<Segment>) -> Self {
        debug_assert!(
            segments
                .iter()
                .tuple_windows()
                .all(|(x, y)| x.reference.end == y.reference.start && x.query.end == y.query.start),
            "Segments are not contiguous: {segments:?}"
        );
        Self { segments }
    }

    /// The total score. Equals the final cell of the grid.
    pub fn score(&self) -> Score {
        self.segments.iter().map(|s| s.score).sum()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Run-length encoded moves: `M` for aligned pairs, `D` for reference
    /// symbols against gaps, `I` for query symbols against gaps.
    pub fn cigar(&self) -> String {
        self.segments
            .iter()
            .map(|s| {
                let op = match s.op {
                    Direction::Diag => 'M',
                    Direction::Up => 'D',
                    Direction::Left => 'I',
                };
                (op, s.len())
            })
            .coalesce(|(a, n), (b, m)| if a == b { Ok((a, n + m)) } else { Err(((a, n), (b, m))) })
            .map(|(op, n)| format!("{n}{op}"))
            .join("")
    }
}

impl<'a> IntoIterator for &'a Alignment {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;
    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for Alignment {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;
    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn seg(r: Range<usize>, q: Range<usize>, score: Score, op: Direction) -> Segment {
        Segment {
            reference: r,
            query: q,
            score,
            op,
        }
    }

    #[test]
    fn cigar_and_score() {
        let aln = Alignment::new(vec![
            seg(0..0, 0..2, -2, Direction::Left),
            seg(0..3, 2..5, 3, Direction::Diag),
            seg(3..4, 5..5, -1, Direction::Up),
        ]);
        assert_eq!(aln.cigar(), "2I3M1D");
        assert_eq!(aln.score(), 0);
        assert_eq!(aln.len(), 3);
    }

    #[test]
    fn empty() {
        let aln = Alignment::default();
        assert!(aln.is_empty());
        assert_eq!(aln.cigar(), "");
        assert_eq!(aln.score(), 0);
    }

    #[test]
    fn serializes_ranges() {
        let aln = Alignment::new(vec![seg(0..1, 0..1, 1, Direction::Diag)]);
        let json = serde_json::to_string(&aln).unwrap();
        let back: Alignment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, aln);
    }
}
