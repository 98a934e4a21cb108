//! Application constants for the NIRSPEC grouper
//!
//! This module contains the instrument parameters, FITS keyword names,
//! and association criteria used throughout the grouping pipeline.

// =============================================================================
// Instrument Parameters
// =============================================================================

/// Detector columns (NAXIS1) of a reducible NIRSPEC frame
pub const N_COLS: i64 = 1024;

/// Detector rows (NAXIS2) of a reducible NIRSPEC frame
pub const N_ROWS: i64 = 1024;

/// Substring identifying the instrument in the lowercased filter name
pub const INSTRUMENT_NAME: &str = "nirspec";

/// Dispersion mode accepted for reduction
pub const HIGH_DISPERSION: &str = "high";

// =============================================================================
// FITS Header Keywords
// =============================================================================

/// Header keywords consulted by the eligibility and association rules
pub mod keywords {
    /// Image type of the exposure (object, flatlamp, dark, ...)
    pub const IMAGETYP: &str = "IMAGETYP";

    /// Dispersion mode (high or low)
    pub const DISPERS: &str = "DISPERS";

    /// First image dimension
    pub const NAXIS1: &str = "NAXIS1";

    /// Second image dimension
    pub const NAXIS2: &str = "NAXIS2";

    /// Filter name, also identifies the instrument
    pub const FILNAME: &str = "FILNAME";

    /// Cross-disperser position
    pub const DISPPOS: &str = "DISPPOS";

    /// Echelle grating position
    pub const ECHLPOS: &str = "ECHLPOS";

    /// Slit name
    pub const SLITNAME: &str = "SLITNAME";

    /// Elapsed exposure time in seconds
    pub const ELAPTIME: &str = "ELAPTIME";
}

/// IMAGETYP values recognized by the grouping pass
pub mod imagetype {
    /// Science exposure
    pub const OBJECT: &str = "object";

    /// Flat field exposure
    pub const FLAT: &str = "flatlamp";

    /// Dark frame
    pub const DARK: &str = "dark";
}

// =============================================================================
// Association Criteria
// =============================================================================

/// Keywords that must agree between an object frame and a flat field frame
pub const FLAT_MATCH_KEYWORDS: &[&str] = &[
    keywords::DISPPOS,
    keywords::ECHLPOS,
    keywords::FILNAME,
    keywords::SLITNAME,
    keywords::DISPERS,
];

/// Keywords that must agree between an object frame and a dark frame
pub const DARK_MATCH_KEYWORDS: &[&str] = &[keywords::ELAPTIME];

// =============================================================================
// File Discovery
// =============================================================================

/// Substring a file name must contain to be treated as a FITS file
pub const FITS_FILE_MARKER: &str = "fits";

/// Extension of compressed files that are decompressed before reading
pub const GZIP_EXTENSION: &str = "gz";
