//! The dancing-links torus: node arena, matrix builder and the
//! reversible cover/uncover primitives.

use log::trace;

use crate::error::{Error, Result};
use crate::search::SearchStats;

/// The arena index of the root sentinel anchoring the header ring.
pub(crate) const ROOT: usize = 0;

/// A node of the sparse matrix: the root sentinel, a column header, or
/// a cell meaning "row R occupies column C".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    /// Arena index of the column header; headers point at themselves.
    pub(crate) column: usize,
    /// Dense row id.  Meaningless for headers and the root.
    pub(crate) row: usize,
    pub(crate) up: usize,
    pub(crate) down: usize,
    pub(crate) left: usize,
    pub(crate) right: usize,
}

/// An exact cover instance over a fixed set of columns, stored as a
/// dancing-links torus.
///
/// Columns are numbered `1..=n` and fixed when the matrix is created
/// with [`Matrix::new()`].  Candidate rows are added with
/// [`Matrix::add_row()`], and the matrix is searched with
/// [`Matrix::solve()`] or [`Matrix::solutions()`].
#[derive(Debug, Clone)]
pub struct Matrix {
    // Links are indices into `nodes` rather than references, which
    // keeps cover/uncover O(1) per cell without any aliasing trouble.
    //
    // Layout: index 0 is the root, 1..=columns are the column
    // headers (so a header's index is also its external column
    // number), and every cell after that belongs to some row.
    pub(crate) nodes: Vec<Node>,

    /// Live count per column, indexed by column header.  Slot 0
    /// belongs to the root and stays zero.
    pub(crate) sizes: Vec<usize>,

    /// Arena index of the first cell of each row, by dense row id.
    rows: Vec<usize>,

    columns: usize,

    /// Cells chosen by a search that was told to stop.  Their covers
    /// are still in effect until [`Matrix::rewind()`] runs.
    pub(crate) retained: Vec<usize>,

    pub(crate) stats: SearchStats,
}

impl Matrix {
    /// Creates a matrix with `columns` columns, numbered `1..=columns`,
    /// and no rows.
    pub fn new(columns: usize) -> Matrix {
        Matrix::with_capacity(columns, 0)
    }

    /// Like [`Matrix::new()`], reserving room for `cells` row cells up
    /// front.
    pub fn with_capacity(columns: usize, cells: usize) -> Matrix {
        let ring = columns + 1;
        let mut nodes = Vec::with_capacity(ring + cells);
        for index in 0..ring {
            nodes.push(Node {
                column: index,
                row: 0,
                up: index,
                down: index,
                left: (index + columns) % ring,
                right: (index + 1) % ring,
            });
        }
        Matrix {
            nodes,
            sizes: vec![0; ring],
            rows: Vec::new(),
            columns,
            retained: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// The number of columns this matrix was created with.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The number of rows added so far.  Empty rows are not counted.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The number of row cells in the matrix.
    pub fn cell_count(&self) -> usize {
        self.nodes.len() - self.columns - 1
    }

    /// The live count of `column`: how many cells are currently linked
    /// into its ring.  `None` if the column does not exist.
    pub fn column_size(&self, column: usize) -> Option<usize> {
        if (1..=self.columns).contains(&column) {
            Some(self.sizes[column])
        } else {
            None
        }
    }

    /// The columns of row `row` (a zero-based id, in the order rows were
    /// added), in the order they were given to [`Matrix::add_row()`].
    pub fn row(&self, row: usize) -> Option<Vec<usize>> {
        self.rows.get(row).map(|&anchor| self.row_columns(anchor))
    }

    /// Whether a previous [`Matrix::solve()`] stopped on a solution and
    /// left that solution's covers in place.
    pub fn is_stopped(&self) -> bool {
        !self.retained.is_empty()
    }

    /// Statistics from the most recent search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Adds a candidate row covering `columns`.
    ///
    /// Every column must be in `1..=n` and appear at most once; a bad
    /// row is rejected and the matrix is left unchanged.  An empty row
    /// is accepted and ignored.  The order of the columns is kept, and
    /// is the order reported for this row in solutions.
    ///
    /// If a previous search stopped on a solution, the matrix is
    /// rewound first.
    pub fn add_row<I>(&mut self, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = usize>,
    {
        let columns: Vec<usize> = columns.into_iter().collect();
        if columns.is_empty() {
            return Ok(());
        }
        self.validate_row(&columns)?;
        self.rewind();

        let row = self.rows.len();
        let first = self.nodes.len();
        let count = columns.len();
        for (offset, &column) in columns.iter().enumerate() {
            let node = first + offset;
            // Splice the new cell in at the tail of its column ring,
            // i.e. just above the header.
            let up = self.up(column);
            self.nodes.push(Node {
                column,
                row,
                up,
                down: column,
                left: first + (offset + count - 1) % count,
                right: first + (offset + 1) % count,
            });
            self.set_down(up, node);
            self.set_up(column, node);
            self.sizes[column] += 1;
        }
        self.rows.push(first);
        Ok(())
    }

    fn validate_row(&self, columns: &[usize]) -> Result<()> {
        if let Some(&column) = columns.iter().find(|&&c| c == 0 || c > self.columns) {
            return Err(Error::ColumnOutOfRange {
                column,
                columns: self.columns,
            });
        }
        let mut sorted = columns.to_vec();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::DuplicateColumn { column: pair[0] });
        }
        Ok(())
    }

    /// Undoes the covers left behind by a search that stopped on a
    /// solution, restoring the full matrix.  Does nothing if there is
    /// nothing to undo.
    pub fn rewind(&mut self) {
        if self.retained.is_empty() {
            return;
        }
        trace!("rewinding {} retained rows", self.retained.len());
        while let Some(cell) = self.retained.pop() {
            self.uncover_row(cell);
            let column = self.column(cell);
            self.uncover(column);
        }
    }

    // Accessors, so the link manipulation below reads like the
    // textbook algorithm.

    pub(crate) fn column(&self, node: usize) -> usize {
        self.nodes[node].column
    }

    pub(crate) fn up(&self, node: usize) -> usize {
        self.nodes[node].up
    }

    fn set_up(&mut self, node: usize, val: usize) {
        self.nodes[node].up = val
    }

    pub(crate) fn down(&self, node: usize) -> usize {
        self.nodes[node].down
    }

    fn set_down(&mut self, node: usize, val: usize) {
        self.nodes[node].down = val
    }

    pub(crate) fn left(&self, node: usize) -> usize {
        self.nodes[node].left
    }

    fn set_left(&mut self, node: usize, val: usize) {
        self.nodes[node].left = val
    }

    pub(crate) fn right(&self, node: usize) -> usize {
        self.nodes[node].right
    }

    fn set_right(&mut self, node: usize, val: usize) {
        self.nodes[node].right = val
    }

    fn unlink_from_header_ring(&mut self, column: usize) {
        let left = self.left(column);
        let right = self.right(column);
        self.set_right(left, right);
        self.set_left(right, left);
    }

    fn relink_into_header_ring(&mut self, column: usize) {
        let left = self.left(column);
        let right = self.right(column);
        self.set_left(right, column);
        self.set_right(left, column);
    }

    fn unlink_from_column(&mut self, node: usize) {
        let up = self.up(node);
        let down = self.down(node);
        self.set_down(up, down);
        self.set_up(down, up);
    }

    fn relink_into_column(&mut self, node: usize) {
        let up = self.up(node);
        let down = self.down(node);
        self.set_up(down, node);
        self.set_down(up, node);
    }

    /// Removes `column` from the header ring, and removes every row
    /// crossing it from the other columns that row touches.
    ///
    /// The removed nodes keep their own links, which is what lets
    /// [`Matrix::uncover()`] put them back.
    pub(crate) fn cover(&mut self, column: usize) {
        self.unlink_from_header_ring(column);
        let mut covered = self.down(column);
        while covered != column {
            let mut sibling = self.right(covered);
            while sibling != covered {
                self.unlink_from_column(sibling);
                let owner = self.column(sibling);
                self.sizes[owner] -= 1;
                sibling = self.right(sibling);
            }
            covered = self.down(covered);
        }
    }

    /// The inverse of [`Matrix::cover()`].  Walks in exactly the
    /// reverse order, relying on the links the removed nodes kept.
    pub(crate) fn uncover(&mut self, column: usize) {
        let mut covered = self.up(column);
        while covered != column {
            let mut sibling = self.left(covered);
            while sibling != covered {
                let owner = self.column(sibling);
                self.sizes[owner] += 1;
                self.relink_into_column(sibling);
                sibling = self.left(sibling);
            }
            covered = self.up(covered);
        }
        self.relink_into_header_ring(column);
    }

    /// Covers every column of `cell`'s row other than `cell`'s own,
    /// in row order.
    pub(crate) fn cover_row(&mut self, cell: usize) {
        let mut sibling = self.right(cell);
        while sibling != cell {
            let column = self.column(sibling);
            self.cover(column);
            sibling = self.right(sibling);
        }
    }

    /// The inverse of [`Matrix::cover_row()`].
    pub(crate) fn uncover_row(&mut self, cell: usize) {
        let mut sibling = self.left(cell);
        while sibling != cell {
            let column = self.column(sibling);
            self.uncover(column);
            sibling = self.left(sibling);
        }
    }

    /// Picks the active column with the smallest live count, the first
    /// one found scanning from the root winning ties.  `None` when the
    /// header ring is empty, i.e. every column is covered.
    pub(crate) fn choose_column(&self) -> Option<usize> {
        let mut column = self.right(ROOT);
        if column == ROOT {
            return None;
        }
        let mut best = column;
        let mut best_size = self.sizes[column];
        while best_size > 0 {
            column = self.right(column);
            if column == ROOT {
                break;
            }
            if self.sizes[column] < best_size {
                best = column;
                best_size = self.sizes[column];
            }
        }
        Some(best)
    }

    /// The external column indices of the row containing `cell`, in
    /// insertion order.
    pub(crate) fn row_columns(&self, cell: usize) -> Vec<usize> {
        let anchor = self.rows[self.nodes[cell].row];
        let mut columns = vec![self.column(anchor)];
        let mut node = self.right(anchor);
        while node != anchor {
            columns.push(self.column(node));
            node = self.right(node);
        }
        columns
    }
}
