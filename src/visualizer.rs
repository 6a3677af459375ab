//! Callbacks to observe an alignment while it is computed.
//!
//! A visualizer is passed per call. The aligner only reports what it does;
//! drawing or printing is up to the implementation.

use crate::alignment::Alignment;
use crate::grid::AlignmentGrid;
use crate::Score;

pub trait Visualizer {
    /// Called once a grid of `rows x cols` cells is about to be filled.
    fn new_grid(&mut self, _rows: usize, _cols: usize) {}

    /// Called after the score of cell `(i, j)` is computed.
    fn expand(&mut self, _i: usize, _j: usize, _score: Score) {}

    /// Called after the traceback with the complete grid.
    /// `alignment` is `None` when the traceback failed.
    fn last_frame(&mut self, _grid: &AlignmentGrid, _alignment: Option<&Alignment>) {}
}

/// Ignores all callbacks.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct NoVis;

impl Visualizer for NoVis {}

impl<V: Visualizer + ?Sized> Visualizer for &mut V {
    fn new_grid(&mut self, rows: usize, cols: usize) {
        (**self).new_grid(rows, cols)
    }
    fn expand(&mut self, i: usize, j: usize, score: Score) {
        (**self).expand(i, j, score)
    }
    fn last_frame(&mut self, grid: &AlignmentGrid, alignment: Option<&Alignment>) {
        (**self).last_frame(grid, alignment)
    }
}
