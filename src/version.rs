//! Version operation (§4.14, §6.2 `version`).
//!
//! Trivial relative to the rest of the crate; included because `spec.md`
//! §6.2 lists `version()` as one of the six callable core operations and it
//! has no other natural home.

use serde::{Deserialize, Serialize};

/// Schema version of the typed `Configuration`/result shapes this build
/// understands. Bumped whenever a breaking change is made to those shapes;
/// compared against a caller's expectation to raise
/// `TaxGlideError::SchemaMismatch` (§7).
pub const SCHEMA_VERSION: &str = "1";

/// `{version, schema_version, supported_years[]}` of §6.2 `version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub schema_version: String,
    pub supported_years: Vec<u32>,
}

/// Reports this build's crate version, schema version, and which tax years
/// the caller's loaded configurations cover.
///
/// The core has no configuration registry of its own. Years are loaded
/// externally, one `Configuration` per year (§5), so `supported_years` is
/// whatever the caller tells us it has loaded, not a hardcoded list; passing
/// an empty slice is valid and just means "report the build info only".
pub fn version(supported_years: &[u32]) -> VersionInfo {
    VersionInfo {
        version: crate::VERSION.to_string(),
        schema_version: SCHEMA_VERSION.to_string(),
        supported_years: supported_years.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_the_crate_version_and_schema() {
        let info = version(&[2024, 2025]);
        assert_eq!(info.version, crate::VERSION);
        assert_eq!(info.schema_version, SCHEMA_VERSION);
        assert_eq!(info.supported_years, vec![2024, 2025]);
    }

    #[test]
    fn empty_supported_years_is_valid() {
        let info = version(&[]);
        assert!(info.supported_years.is_empty());
    }
}
