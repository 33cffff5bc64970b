//! Output of aggregated runs.
//!
//! - [`json`]: writes the article records of a run to a timestamped JSON file

pub mod json;
