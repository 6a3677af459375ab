//! Text rendering of a grid and an alignment, for the command line.

use itertools::Itertools;
use nw_segments::{Alignment, AlignmentGrid, Direction, Seq, Visualizer};

/// Draws the final grid as a table. Each cell shows the direction the
/// traceback would take from it, followed by its score.
pub struct Table<'s> {
    reference: Seq<'s>,
    query: Seq<'s>,
    pub out: String,
}

impl<'s> Table<'s> {
    pub fn new(reference: Seq<'s>, query: Seq<'s>) -> Self {
        Self {
            reference,
            query,
            out: String::new(),
        }
    }
}

fn arrow(d: Option<Direction>) -> &'static str {
    match d {
        Some(Direction::Diag) => "⬉",
        Some(Direction::Up) => "⬆",
        Some(Direction::Left) => "⬅",
        None => " ",
    }
}

impl Visualizer for Table<'_> {
    fn last_frame(&mut self, grid: &AlignmentGrid, _alignment: Option<&Alignment>) {
        let mut rows: Vec<Vec<String>> = vec![];
        rows.push(
            ["".to_string(), "".to_string()]
                .into_iter()
                .chain(self.query.iter().map(|&c| (c as char).to_string()))
                .collect(),
        );
        for i in 0..grid.rows() {
            let label = if i == 0 {
                String::new()
            } else {
                (self.reference[i - 1] as char).to_string()
            };
            rows.push(
                std::iter::once(label)
                    .chain((0..grid.cols()).map(|j| format!("{} {}", arrow(grid.direction(i, j)), grid.score(i, j))))
                    .collect(),
            );
        }
        let width = rows.iter().flatten().map(|s| s.chars().count()).max().unwrap_or(0);
        for row in rows {
            self.out += &row.iter().map(|s| format!("{s:>width$}")).join(" |");
            self.out.push('\n');
        }
    }
}

/// The alignment as three lines: the gapped reference, a match line, and the
/// gapped query.
pub fn render(reference: Seq, query: Seq, alignment: &Alignment) -> [String; 3] {
    let [mut r, mut m, mut q] = [String::new(), String::new(), String::new()];
    for s in alignment {
        match s.op {
            Direction::Diag => {
                for (&a, &b) in reference[s.reference.clone()].iter().zip(&query[s.query.clone()]) {
                    r.push(a as char);
                    q.push(b as char);
                    m.push(if a.eq_ignore_ascii_case(&b) { '|' } else { '.' });
                }
            }
            Direction::Up => {
                for &a in &reference[s.reference.clone()] {
                    r.push(a as char);
                    m.push(' ');
                    q.push('-');
                }
            }
            Direction::Left => {
                for &b in &query[s.query.clone()] {
                    r.push('-');
                    m.push(' ');
                    q.push(b as char);
                }
            }
        }
    }
    [r, m, q]
}
