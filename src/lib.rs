#![doc = include_str!("../README.md")]
//!
//!
//! To solve an exact cover problem with this implementation, create a
//! [`Matrix`] with [`Matrix::new()`], add candidate rows with
//! [`Matrix::add_row()`], and call [`Matrix::solve()`] with an
//! [`Acceptor`] that decides, for each exact cover found, whether the
//! search should go on.
//!
//! An example, based on Knuth's "Dancing Links" paper (also the
//! example in Wikipedia's [Algorithm
//! X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X) article):
//!
//! ```
//! use dlx::{Decision, Matrix};
//!
//! let mut matrix = Matrix::new(7);
//!
//! matrix.add_row([1, 4, 7])?;
//! matrix.add_row([1, 4])?;
//! matrix.add_row([4, 5, 7])?;
//! matrix.add_row([3, 5, 6])?;
//! matrix.add_row([2, 3, 6, 7])?;
//! matrix.add_row([2, 7])?;
//!
//! let mut solutions = Vec::new();
//! let stopped = matrix.solve(|cover: &[Vec<usize>]| {
//!     solutions.push(cover.to_vec());
//!     Decision::Continue
//! });
//!
//! assert!(!stopped);
//! assert_eq!(vec![vec![vec![1, 4], vec![3, 5, 6], vec![2, 7]]], solutions);
//! # Ok::<(), dlx::Error>(())
//! ```
//!
//! Solutions can also be pulled one at a time with
//! [`Matrix::solutions()`], and constraints can be given names with
//! [`ColumnLabels`].

mod error;
mod labels;
mod matrix;
mod search;

pub use error::{Error, Result};
pub use labels::ColumnLabels;
pub use matrix::Matrix;
pub use search::{Acceptor, Decision, SearchStats, Solutions};
