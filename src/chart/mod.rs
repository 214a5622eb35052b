//! Row shapes for bar, radar and tornado charts.
//!
//! Everything here is a pure reshaping of a ranked score list. Rendering is
//! left to whoever consumes the rows.

pub mod rows;
pub mod tornado;

pub use rows::{bar_rows, radar_rows, radar_rows_for, BarRow, RadarRow, FULL_MARK};
pub use tornado::{tornado_rows, TornadoRow};
