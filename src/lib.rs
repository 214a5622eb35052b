//! Trade study engine: weighted scoring, ranking and weight-sensitivity
//! analysis of candidate components.
//!
//! The pipeline is `scoring::aggregate_all` -> `scoring::rank`, with
//! `scoring::analyze` for what-if re-rankings and `chart` / `export` for
//! reshaping ranked results.

pub mod chart;
pub mod config;
pub mod export;
pub mod output;
pub mod scoring;
pub mod study;
