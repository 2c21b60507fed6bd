//! Year-keyed configuration aggregate (§3, §6.1)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::canton::Canton;
use super::federal::FederalTable;
use super::tax::FilingStatus;
use crate::error::{Result, TaxGlideError};

/// Immutable, once-loaded configuration snapshot for a single tax year.
///
/// Evaluators take `&Configuration`; nothing in the core ever mutates one
/// after construction (§5 Concurrency & Resource Model).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub year: u32,
    pub cantons: std::collections::BTreeMap<String, Canton>,
    pub default_canton: String,
    pub federal: HashMap<FilingStatus, FederalTable>,
}

impl Configuration {
    pub fn canton(&self, key: &str) -> Result<&Canton> {
        self.cantons
            .get(key)
            .ok_or_else(|| TaxGlideError::invalid_input(format!("unknown canton '{key}'")))
    }

    pub fn federal_table(&self, status: FilingStatus) -> Result<&FederalTable> {
        self.federal.get(&status).ok_or_else(|| {
            TaxGlideError::calculation(format!(
                "no federal table configured for filing status {:?}",
                status
            ))
        })
    }
}
