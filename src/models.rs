//! Core data structures for exposure grouping.
//!
//! Defines the raw data set produced by the builder, the header store it
//! consumes, and run statistics reported by the CLI.

use crate::fits::FitsHeader;
use serde::Serialize;
use std::collections::BTreeMap;

/// Parsed headers indexed by file path, ordered by path.
///
/// Name ordering reproduces the sorted discovery order of the scan, so a
/// store built from the same directory is always iterated the same way.
pub type HeaderStore = BTreeMap<String, FitsHeader>;

/// One science exposure and the calibration frames associated with it
#[derive(Debug, Clone, Serialize)]
pub struct RawDataSet {
    /// Path of the object frame
    pub object_file: String,

    /// Parsed header of the object frame
    pub object_header: FitsHeader,

    /// Matching flat field frames, sorted by path
    pub flat_files: Vec<String>,

    /// Matching dark frames, sorted by path
    pub dark_files: Vec<String>,
}

impl RawDataSet {
    /// Create a data set for an object frame with no calibration yet
    pub fn new(object_file: impl Into<String>, object_header: FitsHeader) -> Self {
        Self {
            object_file: object_file.into(),
            object_header,
            flat_files: Vec::new(),
            dark_files: Vec::new(),
        }
    }
}

/// Statistics for one grouping run
#[derive(Debug, Default, Serialize)]
pub struct GroupingStats {
    /// FITS files scanned under the input directory
    pub files_scanned: usize,

    /// Object frames that passed the eligibility filter
    pub object_frames: usize,

    /// Object-type frames rejected by the eligibility filter
    pub rejected_objects: usize,

    /// Raw data sets in the final output
    pub data_sets: usize,

    /// Data sets dropped because no flat field matched
    pub dropped_no_flats: usize,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u128,
}
