//! Natural language time parsing and range extraction.

pub mod parser;
pub mod range;

pub use parser::{ParseFailure, TimeParser};
pub use range::{ExtractionFailure, RangeExtractor, TimeWindow};
