//! Algorithm X over the dancing-links torus: the recursive
//! callback-driven search and the lazy solution iterator.

use log::{debug, trace};

use crate::matrix::Matrix;

/// What the search should do after a solution has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Keep looking for further solutions.
    Continue,
    /// Stop the search, keeping this solution.
    Stop,
}

/// Receives candidate exact covers from [`Matrix::solve()`].
///
/// A cover is a list of rows, each row being the column indices it
/// occupies.  Rows appear in the order the search selected them;
/// columns within a row appear in the order given to
/// [`Matrix::add_row()`].  The slice is only valid for the duration of
/// the call.
pub trait Acceptor {
    fn accept_solution(&mut self, cover: &[Vec<usize>]) -> Decision;
}

impl<F> Acceptor for F
where
    F: FnMut(&[Vec<usize>]) -> Decision,
{
    fn accept_solution(&mut self, cover: &[Vec<usize>]) -> Decision {
        self(cover)
    }
}

/// Counters describing the work done by one search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Search frames entered, including leaves.
    pub nodes: u64,
    /// Complete exact covers reached.
    pub solutions: u64,
    /// Deepest the stack of chosen rows grew.
    pub max_depth: usize,
}

impl SearchStats {
    fn enter(&mut self, depth: usize) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

impl Matrix {
    /// Searches for exact covers, handing each one to `acceptor`.
    ///
    /// Returns `true` as soon as the acceptor answers
    /// [`Decision::Stop`], and `false` once the search space is
    /// exhausted without that happening (including when there is no
    /// solution at all).
    ///
    /// After a stop the accepted solution's covers are left in place;
    /// see [`Matrix::rewind()`].  Any such leftover state from an
    /// earlier call is rewound before searching.
    pub fn solve<A>(&mut self, mut acceptor: A) -> bool
    where
        A: Acceptor,
    {
        self.rewind();
        self.stats = SearchStats::default();
        debug!(
            "solving {} columns, {} rows, {} cells",
            self.columns(),
            self.row_count(),
            self.cell_count()
        );

        let mut answer = Vec::new();
        let stopped = self.search(&mut acceptor, &mut answer);
        if stopped {
            debug!("stopped on solution {} after {} nodes", self.stats.solutions, self.stats.nodes);
            // The torus still has these rows covered.
            self.retained = answer;
        } else {
            debug!(
                "search exhausted: {} solutions, {} nodes, depth {}",
                self.stats.solutions, self.stats.nodes, self.stats.max_depth
            );
        }
        stopped
    }

    fn search<A>(&mut self, acceptor: &mut A, answer: &mut Vec<usize>) -> bool
    where
        A: Acceptor,
    {
        self.stats.enter(answer.len());

        let Some(pivot) = self.choose_column() else {
            self.stats.solutions += 1;
            let cover = self.cover_of(answer);
            return acceptor.accept_solution(&cover) == Decision::Stop;
        };
        trace!(
            "depth {}: pivot column {} with {} rows",
            answer.len(),
            pivot,
            self.sizes[pivot]
        );

        // A pivot with no rows fails here with no work done: the loop
        // below never runs.
        self.cover(pivot);
        answer.push(pivot);
        let mut cell = self.down(pivot);
        while cell != pivot {
            if let Some(top) = answer.last_mut() {
                *top = cell;
            }
            self.cover_row(cell);
            if self.search(acceptor, answer) {
                // Leave everything covered; the caller owns the result.
                return true;
            }
            self.uncover_row(cell);
            cell = self.down(cell);
        }
        answer.pop();
        self.uncover(pivot);
        false
    }

    fn cover_of(&self, cells: &[usize]) -> Vec<Vec<usize>> {
        cells.iter().map(|&cell| self.row_columns(cell)).collect()
    }

    /// Returns an iterator over every exact cover of this matrix.
    ///
    /// The matrix is borrowed for as long as the iterator lives; when
    /// the iterator is dropped, the matrix is restored, whether or not
    /// it ran to completion.
    pub fn solutions(&mut self) -> Solutions<'_> {
        self.rewind();
        self.stats = SearchStats::default();
        debug!(
            "enumerating {} columns, {} rows, {} cells",
            self.columns(),
            self.row_count(),
            self.cell_count()
        );
        Solutions::new(self)
    }

    /// Collects every exact cover of this matrix.
    pub fn solve_all(&mut self) -> Vec<Vec<Vec<usize>>> {
        self.solutions().collect()
    }

    /// The first exact cover found, if any.  Unlike stopping
    /// [`Matrix::solve()`], this leaves the matrix fully restored.
    pub fn first_solution(&mut self) -> Option<Vec<Vec<usize>>> {
        self.solutions().next()
    }
}

/// A position in the explicit search stack: the pivot column being
/// branched on, and the cell of the row currently chosen from it.  The
/// cell equals the column before the first row has been tried.
struct Frame {
    column: usize,
    cell: usize,
}

/// An iterator yielding the exact covers of a [`Matrix`].  This is
/// created by [`Matrix::solutions()`].
///
/// It walks the same search tree as [`Matrix::solve()`], in the same
/// order, but keeps its position on an explicit stack so it can hand
/// back one solution at a time.
pub struct Solutions<'a> {
    matrix: &'a mut Matrix,
    frames: Vec<Frame>,
    /// Set when the matrix has no columns at all, which has exactly
    /// one (empty) cover.
    trivial: bool,
}

impl<'a> Solutions<'a> {
    fn new(matrix: &'a mut Matrix) -> Solutions<'a> {
        let mut it = Solutions {
            matrix,
            frames: Vec::new(),
            trivial: false,
        };
        it.matrix.stats.enter(0);
        match it.matrix.choose_column() {
            None => it.trivial = true,
            Some(column) => {
                it.matrix.cover(column);
                it.frames.push(Frame { column, cell: column });
            }
        }
        it
    }

    fn current_cover(&self) -> Vec<Vec<usize>> {
        self.frames
            .iter()
            .map(|frame| self.matrix.row_columns(frame.cell))
            .collect()
    }
}

impl Iterator for Solutions<'_> {
    type Item = Vec<Vec<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.trivial {
            self.trivial = false;
            self.matrix.stats.solutions += 1;
            return Some(Vec::new());
        }

        // Between calls, every frame on the stack has its pivot
        // covered, and every frame whose cell is not its column also
        // has that cell's row covered.
        'unwind: loop {
            let Some(mut frame) = self.frames.pop() else {
                return None;
            };

            loop {
                if frame.cell != frame.column {
                    self.matrix.uncover_row(frame.cell);
                }

                frame.cell = self.matrix.down(frame.cell);
                if frame.cell == frame.column {
                    // Every row of this pivot has been tried.
                    self.matrix.uncover(frame.column);
                    continue 'unwind;
                }

                self.matrix.cover_row(frame.cell);
                self.frames.push(frame);
                self.matrix.stats.enter(self.frames.len());

                let Some(column) = self.matrix.choose_column() else {
                    self.matrix.stats.solutions += 1;
                    return Some(self.current_cover());
                };

                if self.matrix.sizes[column] == 0 {
                    // Dead end: back out the row just chosen.
                    continue 'unwind;
                }

                trace!(
                    "depth {}: pivot column {} with {} rows",
                    self.frames.len(),
                    column,
                    self.matrix.sizes[column]
                );
                self.matrix.cover(column);
                frame = Frame { column, cell: column };
            }
        }
    }
}

impl Drop for Solutions<'_> {
    fn drop(&mut self) {
        while let Some(frame) = self.frames.pop() {
            if frame.cell != frame.column {
                self.matrix.uncover_row(frame.cell);
            }
            self.matrix.uncover(frame.column);
        }
        debug!(
            "enumeration finished: {} solutions, {} nodes",
            self.matrix.stats.solutions, self.matrix.stats.nodes
        );
    }
}
