//! TaxGlide Core - Swiss Personal Income Tax Engine
//!
//! Computes federal, cantonal, and communal income tax under a
//! configuration-driven model and searches for the deduction amount that
//! maximises return on investment within a caller-supplied ceiling.
//!
//! Configuration loading, CLI parsing, and JSON/CSV rendering are external
//! collaborators' concerns. This crate exposes six typed operations:
//! [`engine::TaxCalculationEngine::calculate`] (`calc`),
//! [`optimise::Optimiser::optimise`] (`optimise`),
//! [`scan::ScanProducer::scan`] (`scan`), [`compare::compare_brackets`]
//! (`compare_brackets`), [`validate::validate`] (`validate`), and
//! [`version::version`] (`version`).

pub mod calculators;
pub mod compare;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod optimise;
pub mod rounding;
pub mod scan;
pub mod validate;
pub mod version;

pub use compare::{compare_brackets, BracketComparison};
pub use engine::TaxCalculationEngine;
pub use error::{Result, TaxGlideError};
pub use models::optimise::OptimisationReport;
pub use models::scan::ScanRow;
pub use models::tax::{FilingStatus, TaxBreakdown};
pub use optimise::Optimiser;
pub use scan::ScanProducer;
pub use validate::{validate, ValidationReport};
pub use version::{version, VersionInfo};

/// Library version, surfaced through [`version::version`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
