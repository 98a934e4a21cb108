//! Raw data set assembly.
//!
//! Partitions parsed headers into object frames and calibration
//! candidates, associates every flat field and dark with the object
//! frames it is compatible with, and drops data sets that cannot be
//! reduced for lack of a flat.

pub mod eligibility;
pub mod matcher;

use crate::config::InstrumentConfig;
use crate::constants::{imagetype, keywords};
use crate::error::Result;
use crate::fits::FitsHeader;
use crate::models::{HeaderStore, RawDataSet};
use crate::report::{Diagnostic, ReportSink};
use tracing::{debug, info};

/// Builds raw data sets from a store of parsed headers
#[derive(Debug, Clone, Default)]
pub struct DataSetBuilder {
    config: InstrumentConfig,
}

impl DataSetBuilder {
    /// Create a builder for the given instrument mode
    pub fn new(config: InstrumentConfig) -> Self {
        Self { config }
    }

    /// Assemble raw data sets from the headers of one input directory.
    ///
    /// Coverage gaps (no input, no eligible frames, no matching flats) are
    /// reported through the sink and shrink the result; malformed metadata
    /// fails the whole run.
    pub fn build(
        &self,
        headers: &HeaderStore,
        sink: &mut dyn ReportSink,
    ) -> Result<Vec<RawDataSet>> {
        if headers.is_empty() {
            sink.report(Diagnostic::critical("no input data: no FITS files found"));
            return Ok(Vec::new());
        }

        info!("{} fits files found", headers.len());

        let mut data_sets = self.collect_object_frames(headers, sink)?;

        if data_sets.is_empty() {
            sink.report(Diagnostic::info("no eligible science exposures found"));
            return Ok(Vec::new());
        }

        info!("{} object frame(s) found", data_sets.len());

        self.associate_calibration(headers, &mut data_sets)?;

        for data_set in &mut data_sets {
            data_set.flat_files.sort();
            data_set.dark_files.sort();
        }

        // Filter into a new collection; never remove while iterating
        let mut kept = Vec::with_capacity(data_sets.len());
        for data_set in data_sets {
            if data_set.flat_files.is_empty() {
                sink.report(Diagnostic::info(format!(
                    "no matching flat field for {}",
                    base_name(&data_set.object_file)
                )));
            } else {
                kept.push(data_set);
            }
        }

        debug!("{} raw data set(s) assembled", kept.len());
        Ok(kept)
    }

    /// One data set per eligible object frame, in store order
    fn collect_object_frames(
        &self,
        headers: &HeaderStore,
        sink: &mut dyn ReportSink,
    ) -> Result<Vec<RawDataSet>> {
        let mut data_sets = Vec::new();

        for (file, header) in headers {
            if !is_object_frame(header)? {
                continue;
            }

            if eligibility::is_reducible_object(header, &self.config)? {
                data_sets.push(RawDataSet::new(file.clone(), header.clone()));
            } else {
                sink.report(Diagnostic::info(format!(
                    "{} is in wrong dispersion mode, not reduced",
                    base_name(file)
                )));
            }
        }

        Ok(data_sets)
    }

    /// Test every calibration candidate against every data set
    fn associate_calibration(
        &self,
        headers: &HeaderStore,
        data_sets: &mut [RawDataSet],
    ) -> Result<()> {
        for (file, header) in headers {
            match header.require_str(keywords::IMAGETYP)? {
                imagetype::FLAT => {
                    for data_set in data_sets.iter_mut() {
                        if matcher::flat_matches(&data_set.object_header, header)? {
                            data_set.flat_files.push(file.clone());
                        }
                    }
                }
                imagetype::DARK => {
                    for data_set in data_sets.iter_mut() {
                        if matcher::dark_matches(&data_set.object_header, header)? {
                            data_set.dark_files.push(file.clone());
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

fn is_object_frame(header: &FitsHeader) -> Result<bool> {
    Ok(header
        .require_str(keywords::IMAGETYP)?
        .eq_ignore_ascii_case(imagetype::OBJECT))
}

/// File name without its directory part, as shown in diagnostics
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
