//! Bracket evaluators composed by the tax kernel (§4.2–§4.5)

pub mod cantonal;
pub mod federal;
pub mod filing_status;
pub mod multiplier;

pub use cantonal::{bracket_containing, CantonalEvaluator};
pub use federal::FederalEvaluator;
