//! Export sheets: summary, detailed scores and criteria.
//!
//! Row shaping is pure. `file` is the only part that touches the filesystem
//! and is used by the command line host, not by the row builders.

pub mod delimited;
pub mod file;
pub mod rows;

pub use delimited::{to_csv, to_tsv};
pub use file::write_export;
pub use rows::{
    criteria_rows, criteria_table, detailed_rows, detailed_table, summary_rows, summary_table,
    CriteriaRow, DetailedRow, SummaryRow, Table,
};
