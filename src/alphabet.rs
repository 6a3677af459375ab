//! Mapping from symbols to rows/columns of the scoring matrix.

use crate::error::AlignError;

/// An alphabet assigns each known symbol an index in `0..len()`.
///
/// Index `len()` itself is reserved for the gap row/column of the
/// [`ScoringMatrix`](crate::ScoringMatrix).
pub trait Alphabet {
    /// The number of defined symbols.
    fn len(&self) -> usize;

    /// The matrix index of `symbol`, or `None` when the symbol is not part of
    /// the alphabet.
    fn index(&self, symbol: u8) -> Option<usize>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: Alphabet + ?Sized> Alphabet for &A {
    fn len(&self) -> usize {
        (**self).len()
    }
    fn index(&self, symbol: u8) -> Option<usize> {
        (**self).index(symbol)
    }
}

/// Lookup table alphabet over bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterIndex {
    symbols: Vec<u8>,
    table: [Option<u8>; 256],
}

impl LetterIndex {
    /// Build an alphabet where `symbols[i]` gets index `i`.
    ///
    /// With `case_insensitive`, the other case of each ASCII letter maps to the
    /// same index.
    pub fn new(symbols: &[u8], case_insensitive: bool) -> Result<Self, AlignError> {
        // Indices are stored as u8.
        if symbols.len() > 255 {
            return Err(AlignError::AlphabetTooLarge { len: symbols.len() });
        }
        let mut table = [None; 256];
        for (i, &s) in symbols.iter().enumerate() {
            let variants = if case_insensitive {
                [s.to_ascii_uppercase(), s.to_ascii_lowercase()]
            } else {
                [s, s]
            };
            for v in variants {
                match table[v as usize] {
                    Some(j) if j as usize != i => {
                        return Err(AlignError::DuplicateSymbol { symbol: s })
                    }
                    _ => table[v as usize] = Some(i as u8),
                }
            }
        }
        Ok(Self {
            symbols: symbols.to_vec(),
            table,
        })
    }

    /// `ACGT`, case insensitive.
    pub fn dna() -> Self {
        Self::from_static(b"ACGT")
    }

    /// The 20 standard amino acids, case insensitive.
    pub fn protein() -> Self {
        Self::from_static(b"ARNDCQEGHILKMFPSTWYV")
    }

    fn from_static(symbols: &'static [u8]) -> Self {
        match Self::new(symbols, true) {
            Ok(alphabet) => alphabet,
            Err(e) => unreachable!("Built-in alphabet is invalid: {e}"),
        }
    }

    /// The symbols in index order, as given on construction.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }
}

impl Alphabet for LetterIndex {
    fn len(&self) -> usize {
        self.symbols.len()
    }

    fn index(&self, symbol: u8) -> Option<usize> {
        self.table[symbol as usize].map(|i| i as usize)
    }
}
