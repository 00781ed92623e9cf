//! Signal Table Data Model
//!
//! A fixed-shape numeric matrix with named columns and explicit per-cell
//! missingness, decoupled from any particular file format.

mod table;

pub use table::{Table, TableError};
