//! Reference tax configuration data.
//!
//! TaxGlide has exactly one configuration shape, loaded once per year by a
//! collaborator and handed to the core as `&Configuration` (§5 Concurrency &
//! Resource Model). Unlike the per-platform `TaxDataProvider` trait this
//! module's teacher used, there is nothing here to abstract over.

pub mod embedded;
