//! The scoring matrix: a square table of substitution and gap scores.

use crate::error::AlignError;
use crate::{MatrixScore, Score};
use serde::{Deserialize, Serialize};

/// A validated `(k+1) x (k+1)` matrix of scores for an alphabet of `k`
/// symbols. Row and column `k` hold the gap scores: `M[a][k]` is the score of
/// reference symbol `a` against a gap, `M[k][b]` of a gap against query symbol
/// `b`.
///
/// Higher scores are better.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<MatrixScore>>", into = "Vec<Vec<MatrixScore>>")]
pub struct ScoringMatrix {
    rows: Vec<Vec<MatrixScore>>,
}

impl ScoringMatrix {
    /// Fails when some row length differs from the number of rows.
    pub fn new(rows: Vec<Vec<MatrixScore>>) -> Result<Self, AlignError> {
        if rows.is_empty() {
            return Err(AlignError::EmptyMatrix);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != rows.len()) {
            return Err(AlignError::MatrixNotSquare {
                rows: rows.len(),
                row,
                len: r.len(),
                alphabet_len: None,
            });
        }
        Ok(Self { rows })
    }

    /// `match_score` on the diagonal, `mismatch` elsewhere and `gap` for the
    /// gap row and column. The gap-gap corner is `0` and never used.
    pub fn match_mismatch(
        alphabet_len: usize,
        match_score: MatrixScore,
        mismatch: MatrixScore,
        gap: MatrixScore,
    ) -> Self {
        let n = alphabet_len + 1;
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| match (i == alphabet_len, j == alphabet_len) {
                        (true, true) => 0,
                        (true, false) | (false, true) => gap,
                        (false, false) if i == j => match_score,
                        (false, false) => mismatch,
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Match 1, mismatch 0, gap 0: the score is the length of a longest
    /// common subsequence.
    pub fn identity(alphabet_len: usize) -> Self {
        Self::match_mismatch(alphabet_len, 1, 0, 0)
    }

    /// Check that this matrix fits an alphabet of `alphabet_len` symbols plus
    /// the gap.
    pub fn check(&self, alphabet_len: usize) -> Result<(), AlignError> {
        if self.rows.len() != alphabet_len + 1 {
            return Err(AlignError::MatrixNotSquare {
                rows: self.rows.len(),
                row: 0,
                len: self.rows[0].len(),
                alphabet_len: Some(alphabet_len),
            });
        }
        Ok(())
    }

    /// The index of the gap row and column.
    pub fn gap(&self) -> usize {
        self.rows.len() - 1
    }

    /// The number of non-gap symbols this matrix scores.
    pub fn alphabet_len(&self) -> usize {
        self.gap()
    }

    /// Score of aligning index `a` of the reference against index `b` of the
    /// query. Either may be [`gap`](Self::gap).
    #[inline]
    pub fn score(&self, a: usize, b: usize) -> Score {
        Score::from(self.rows[a][b])
    }

    /// Score of reference index `a` against a gap.
    #[inline]
    pub fn del(&self, a: usize) -> Score {
        Score::from(self.rows[a][self.gap()])
    }

    /// Score of a gap against query index `b`.
    #[inline]
    pub fn ins(&self, b: usize) -> Score {
        Score::from(self.rows[self.gap()][b])
    }

    pub fn rows(&self) -> &[Vec<MatrixScore>] {
        &self.rows
    }
}

impl TryFrom<Vec<Vec<MatrixScore>>> for ScoringMatrix {
    type Error = AlignError;
    fn try_from(rows: Vec<Vec<MatrixScore>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<ScoringMatrix> for Vec<Vec<MatrixScore>> {
    fn from(m: ScoringMatrix) -> Self {
        m.rows
    }
}
