//! Naming columns with arbitrary keys.

use std::{collections, hash};

/// Maps arbitrary constraint keys onto the dense column indices
/// `1..=n` a [`Matrix`](crate::Matrix) works with, and back again.
///
/// Register every constraint first, create the matrix with
/// [`ColumnLabels::len()`] columns, then build rows by looking keys up
/// with [`ColumnLabels::index()`].  Solutions are decoded with
/// [`ColumnLabels::key()`].
#[derive(Debug, Clone)]
pub struct ColumnLabels<K>
where
    K: Clone + Eq + hash::Hash,
{
    key_to_column: collections::HashMap<K, usize>,
    // Slot 0 is unused so columns index directly.
    column_to_key: Vec<Option<K>>,
}

impl<K> ColumnLabels<K>
where
    K: Clone + Eq + hash::Hash,
{
    pub fn new() -> ColumnLabels<K> {
        ColumnLabels {
            key_to_column: collections::HashMap::new(),
            column_to_key: vec![None],
        }
    }

    /// The column for `key`, allocating the next free column the first
    /// time a key is seen.
    pub fn column(&mut self, key: K) -> usize {
        if let Some(&column) = self.key_to_column.get(&key) {
            return column;
        }
        let column = self.column_to_key.len();
        self.column_to_key.push(Some(key.clone()));
        self.key_to_column.insert(key, column);
        column
    }

    /// The column already allocated for `key`, if any.
    pub fn index(&self, key: &K) -> Option<usize> {
        self.key_to_column.get(key).copied()
    }

    /// The key a column was allocated for.
    pub fn key(&self, column: usize) -> Option<&K> {
        self.column_to_key.get(column).and_then(Option::as_ref)
    }

    /// The number of columns allocated so far.
    pub fn len(&self) -> usize {
        self.column_to_key.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> Default for ColumnLabels<K>
where
    K: Clone + Eq + hash::Hash,
{
    fn default() -> Self {
        ColumnLabels::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decision, Matrix};

    #[test]
    fn allocates_dense_columns() {
        let mut labels = ColumnLabels::new();
        assert!(labels.is_empty());

        assert_eq!(1, labels.column("a"));
        assert_eq!(2, labels.column("b"));
        assert_eq!(1, labels.column("a"));
        assert_eq!(2, labels.len());

        assert_eq!(Some(2), labels.index(&"b"));
        assert_eq!(None, labels.index(&"c"));
        assert_eq!(Some(&"a"), labels.key(1));
        assert_eq!(None, labels.key(0));
        assert_eq!(None, labels.key(3));
    }

    #[test]
    fn sudoku() {
        // Four families of constraints: each cell holds one value, and
        // each row, column and box holds each value once.  A candidate
        // "value v at (row, col)" covers one of each.
        #[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
        enum Constraint {
            Cell { row: usize, col: usize },
            Row { row: usize, val: usize },
            Col { col: usize, val: usize },
            Box { boxed: usize, val: usize },
        }

        fn candidate(row: usize, col: usize, val: usize) -> [Constraint; 4] {
            [
                Constraint::Cell { row, col },
                Constraint::Row { row, val },
                Constraint::Col { col, val },
                Constraint::Box {
                    boxed: (row / 3) * 3 + col / 3,
                    val,
                },
            ]
        }

        // A puzzle from the Project Euler sudoku set; '0' is blank.
        let puzzle = "\
            003020600\
            900305001\
            001806400\
            008102900\
            700000008\
            006708200\
            002609500\
            800203009\
            005010300";
        let givens: Vec<usize> = puzzle
            .bytes()
            .map(|b| usize::from(b - b'0'))
            .collect();

        let mut labels = ColumnLabels::new();
        for row in 0..9 {
            for col in 0..9 {
                for val in 1..=9 {
                    for constraint in candidate(row, col, val) {
                        labels.column(constraint);
                    }
                }
            }
        }
        assert_eq!(324, labels.len());

        let mut matrix = Matrix::with_capacity(labels.len(), 729 * 4);
        for row in 0..9 {
            for col in 0..9 {
                let given = givens[row * 9 + col];
                for val in 1..=9 {
                    if given != 0 && given != val {
                        continue;
                    }
                    matrix
                        .add_row(candidate(row, col, val).iter().filter_map(|c| labels.index(c)))
                        .unwrap();
                }
            }
        }

        let mut grid = [[0usize; 9]; 9];
        let mut count = 0;
        let stopped = matrix.solve(|cover: &[Vec<usize>]| {
            count += 1;
            for candidate_row in cover {
                let mut place = None;
                let mut value = None;
                for &column in candidate_row {
                    match labels.key(column) {
                        Some(Constraint::Cell { row, col }) => place = Some((*row, *col)),
                        Some(Constraint::Row { val, .. }) => value = Some(*val),
                        _ => {}
                    }
                }
                if let (Some((row, col)), Some(val)) = (place, value) {
                    grid[row][col] = val;
                }
            }
            Decision::Continue
        });

        assert!(!stopped);
        assert_eq!(1, count, "solution count: expected(left) != actual(right)");
        assert_eq!([4, 8, 3, 9, 2, 1, 6, 5, 7], grid[0]);
        for (index, &given) in givens.iter().enumerate() {
            if given != 0 {
                assert_eq!(given, grid[index / 9][index % 9], "given at {index} was changed");
            }
        }
        for line in grid {
            let mut sorted = line;
            sorted.sort_unstable();
            assert_eq!([1, 2, 3, 4, 5, 6, 7, 8, 9], sorted);
        }
    }
}
