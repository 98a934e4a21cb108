//! Configuration for the instrument mode under reduction.
//!
//! The grouping rules are fixed per instrument; the configuration carries
//! the detector geometry and the instrument identifier the eligibility
//! filter checks against.

use crate::constants::{INSTRUMENT_NAME, N_COLS, N_ROWS};
use crate::error::{GrouperError, Result};
use serde::{Deserialize, Serialize};

/// Instrument mode parameters for eligibility checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Expected detector columns (NAXIS1)
    pub n_cols: i64,

    /// Expected detector rows (NAXIS2)
    pub n_rows: i64,

    /// Substring that must appear in the lowercased filter name
    pub instrument_name: String,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            n_cols: N_COLS,
            n_rows: N_ROWS,
            instrument_name: INSTRUMENT_NAME.to_string(),
        }
    }
}

impl InstrumentConfig {
    /// Create configuration with custom detector dimensions
    pub fn with_dimensions(mut self, n_cols: i64, n_rows: i64) -> Self {
        self.n_cols = n_cols;
        self.n_rows = n_rows;
        self
    }

    /// Create configuration with a custom instrument name substring
    pub fn with_instrument_name(mut self, name: impl Into<String>) -> Self {
        self.instrument_name = name.into();
        self
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.n_cols <= 0 || self.n_rows <= 0 {
            return Err(GrouperError::configuration(
                "detector dimensions must be positive",
            ));
        }

        if self.instrument_name.trim().is_empty() {
            return Err(GrouperError::configuration(
                "instrument name cannot be empty",
            ));
        }

        Ok(())
    }
}
