//! A scoring scheme that can be stored as JSON: the alphabet together with
//! its matrix.

use crate::alphabet::{Alphabet, LetterIndex};
use crate::error::AlignError;
use crate::scoring::ScoringMatrix;
use crate::MatrixScore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// The symbols, in matrix row order.
    pub alphabet: String,
    /// Whether upper and lower case letters are the same symbol.
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
    /// `alphabet.len() + 1` rows; the last row and column are the gap scores.
    pub matrix: ScoringMatrix,
}

fn default_true() -> bool {
    true
}

impl ScoringConfig {
    /// DNA with a uniform match/mismatch/gap scheme.
    pub fn dna(match_score: MatrixScore, mismatch: MatrixScore, gap: MatrixScore) -> Self {
        Self {
            alphabet: "ACGT".into(),
            case_insensitive: true,
            matrix: ScoringMatrix::match_mismatch(4, match_score, mismatch, gap),
        }
    }

    /// Build the alphabet and check the matrix against it.
    pub fn build(&self) -> Result<(LetterIndex, &ScoringMatrix), AlignError> {
        let alphabet = LetterIndex::new(self.alphabet.as_bytes(), self.case_insensitive)?;
        self.matrix.check(alphabet.len())?;
        Ok((alphabet, &self.matrix))
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::dna(1, -1, -1)
    }
}
