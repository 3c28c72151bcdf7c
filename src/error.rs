//! Errors surfaced by the conversion entry points.
//!
//! Only whole-grid problems are reported. A single pixel whose mapped
//! coordinate has no valid source is not an error; it is left at background.

use thiserror::Error;

/// Errors returned by [`to_square`](crate::to_square), [`to_disc`](crate::to_disc)
/// and [`Method::from_name`](crate::Method::from_name).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input grid is not square: some row has a different length than
    /// the number of rows.
    #[error(
        "the input image must be square shaped but row {row} is {row_len} pixels across, \
         while the other side of the image is {rows}"
    )]
    Shape {
        /// Index of the first offending row.
        row: usize,
        /// Length of that row.
        row_len: usize,
        /// Number of rows in the grid.
        rows: usize,
    },

    /// The requested mapping method is not registered.
    #[error("\"{name}\" is not a valid method. The choices are {}.", join_choices(.choices))]
    Method {
        /// The name that was asked for.
        name: String,
        /// Canonical names of every registered method.
        choices: Vec<&'static str>,
    },
}

/// Result alias used by the grid, mapping and resampling APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// `["a", "b", "c"]` -> `"a, b and c"`
fn join_choices(choices: &[&'static str]) -> String {
    match choices.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}
