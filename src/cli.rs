use anyhow::{Context, Result};
use bio::io::fasta;
use clap::{value_parser, Args, Parser, ValueEnum};
use nw_segments::{LetterIndex, MatrixScore, ScoringConfig, ScoringMatrix, Sequence};
use std::{fs::File, io::BufReader, path::PathBuf};

#[derive(Parser, Debug)]
#[clap(author, about)]
pub struct Cli {
    /// The reference sequence, or a Fasta file with --fasta.
    pub reference: String,

    /// The query sequence, or a Fasta file with --fasta.
    pub query: String,

    /// Read the first record of each Fasta file instead of literal sequences.
    #[clap(long)]
    pub fasta: bool,

    #[clap(flatten)]
    pub scoring: ScoringArgs,

    /// Print the alignment as JSON.
    #[clap(long)]
    pub json: bool,

    /// Print the score grid, with the traceback direction of each cell.
    #[clap(long)]
    pub table: bool,

    /// Log more. Pass twice for trace output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// ACGT with --match, --mismatch and --gap.
    #[default]
    Dna,
    /// The 20 amino acids with --match, --mismatch and --gap.
    Protein,
    /// ACGT with match 1, mismatch 0, gap 0.
    Identity,
}

#[derive(Args, Debug)]
#[clap(next_help_heading = "Scoring")]
pub struct ScoringArgs {
    /// Built-in scoring scheme.
    #[clap(long, value_enum, default_value_t)]
    pub scheme: Scheme,

    /// Score of two equal symbols.
    #[clap(long = "match", default_value_t = 1, allow_hyphen_values = true)]
    pub match_score: MatrixScore,

    /// Score of two different symbols.
    #[clap(long, default_value_t = -1, allow_hyphen_values = true)]
    pub mismatch: MatrixScore,

    /// Score of a symbol against a gap.
    #[clap(long, default_value_t = -1, allow_hyphen_values = true)]
    pub gap: MatrixScore,

    /// JSON scoring scheme with an `alphabet` and a `matrix`.
    /// Takes precedence over --scheme.
    #[clap(long, value_parser = value_parser!(PathBuf))]
    pub config: Option<PathBuf>,
}

impl ScoringArgs {
    pub fn scoring_config(&self) -> Result<ScoringConfig> {
        if let Some(path) = &self.config {
            let f = File::open(path).with_context(|| format!("open scoring config {}", path.display()))?;
            return serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse scoring config {}", path.display()));
        }
        Ok(match self.scheme {
            Scheme::Dna => ScoringConfig::dna(self.match_score, self.mismatch, self.gap),
            Scheme::Protein => {
                let alphabet = LetterIndex::protein();
                ScoringConfig {
                    alphabet: String::from_utf8_lossy(alphabet.symbols()).into_owned(),
                    case_insensitive: true,
                    matrix: ScoringMatrix::match_mismatch(20, self.match_score, self.mismatch, self.gap),
                }
            }
            Scheme::Identity => ScoringConfig {
                matrix: ScoringMatrix::identity(4),
                ..ScoringConfig::default()
            },
        })
    }
}

impl Cli {
    /// The reference and query sequences.
    pub fn sequences(&self) -> Result<(Sequence, Sequence)> {
        if !self.fasta {
            return Ok((self.reference.as_bytes().to_vec(), self.query.as_bytes().to_vec()));
        }
        Ok((read_first_record(&self.reference)?, read_first_record(&self.query)?))
    }
}

fn read_first_record(path: &str) -> Result<Sequence> {
    let f = File::open(path).with_context(|| format!("open Fasta file {path}"))?;
    let record = fasta::Reader::new(BufReader::new(f))
        .records()
        .next()
        .with_context(|| format!("no Fasta records in {path}"))?
        .with_context(|| format!("read Fasta file {path}"))?;
    log::debug!("Read {} ({} bp) from {path}", record.id(), record.seq().len());
    Ok(record.seq().to_vec())
}
