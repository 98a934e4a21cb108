//! Eligibility rules for science exposures.

use crate::config::InstrumentConfig;
use crate::constants::{imagetype, keywords, HIGH_DISPERSION};
use crate::error::Result;
use crate::fits::FitsHeader;

/// Decide whether an exposure is an object frame the pipeline can reduce.
///
/// All five gates must hold: image type, dispersion mode, both detector
/// dimensions, and the filter name must identify the instrument. A missing
/// keyword is malformed metadata and fails the whole run rather than
/// silently disqualifying the frame.
pub fn is_reducible_object(header: &FitsHeader, config: &InstrumentConfig) -> Result<bool> {
    if !header
        .require_str(keywords::IMAGETYP)?
        .eq_ignore_ascii_case(imagetype::OBJECT)
    {
        return Ok(false);
    }

    if !header
        .require_str(keywords::DISPERS)?
        .eq_ignore_ascii_case(HIGH_DISPERSION)
    {
        return Ok(false);
    }

    if header.require_i64(keywords::NAXIS1)? != config.n_cols {
        return Ok(false);
    }

    if header.require_i64(keywords::NAXIS2)? != config.n_rows {
        return Ok(false);
    }

    if !header
        .require_str(keywords::FILNAME)?
        .to_lowercase()
        .contains(&config.instrument_name.to_lowercase())
    {
        return Ok(false);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fits::FitsValue;

    fn reducible_header() -> FitsHeader {
        let mut header = FitsHeader::new();
        header.insert("IMAGETYP", FitsValue::String("object".to_string()));
        header.insert("DISPERS", FitsValue::String("high".to_string()));
        header.insert("NAXIS1", FitsValue::Integer(1024));
        header.insert("NAXIS2", FitsValue::Integer(1024));
        header.insert("FILNAME", FitsValue::String("NIRSPEC-7".to_string()));
        header
    }

    #[test]
    fn test_reducible_object_passes() {
        let header = reducible_header();
        let config = InstrumentConfig::default();
        assert!(is_reducible_object(&header, &config).unwrap());
    }

    #[test]
    fn test_image_type_check_is_case_insensitive() {
        let mut header = reducible_header();
        header.insert("IMAGETYP", FitsValue::String("Object".to_string()));
        header.insert("DISPERS", FitsValue::String("HIGH".to_string()));

        let config = InstrumentConfig::default();
        assert!(is_reducible_object(&header, &config).unwrap());
    }

    #[test]
    fn test_non_object_frame_is_rejected() {
        for imagetyp in ["flatlamp", "dark", "arclamp"] {
            let mut header = reducible_header();
            header.insert("IMAGETYP", FitsValue::String(imagetyp.to_string()));

            let config = InstrumentConfig::default();
            assert!(!is_reducible_object(&header, &config).unwrap());
        }
    }

    #[test]
    fn test_low_dispersion_is_rejected() {
        let mut header = reducible_header();
        header.insert("DISPERS", FitsValue::String("low".to_string()));

        let config = InstrumentConfig::default();
        assert!(!is_reducible_object(&header, &config).unwrap());
    }

    #[test]
    fn test_wrong_dimensions_are_rejected() {
        let config = InstrumentConfig::default();

        let mut header = reducible_header();
        header.insert("NAXIS1", FitsValue::Integer(512));
        assert!(!is_reducible_object(&header, &config).unwrap());

        let mut header = reducible_header();
        header.insert("NAXIS2", FitsValue::Integer(512));
        assert!(!is_reducible_object(&header, &config).unwrap());
    }

    #[test]
    fn test_other_instrument_is_rejected() {
        let mut header = reducible_header();
        header.insert("FILNAME", FitsValue::String("NIRES-K".to_string()));

        let config = InstrumentConfig::default();
        assert!(!is_reducible_object(&header, &config).unwrap());
    }

    #[test]
    fn test_instrument_match_ignores_case() {
        let mut header = reducible_header();
        header.insert("FILNAME", FitsValue::String("nirspec-5-AO".to_string()));

        let config = InstrumentConfig::default();
        assert!(is_reducible_object(&header, &config).unwrap());
    }

    #[test]
    fn test_missing_keyword_is_a_hard_error() {
        let config = InstrumentConfig::default();

        for keyword in ["IMAGETYP", "DISPERS", "NAXIS1", "NAXIS2", "FILNAME"] {
            let mut header = FitsHeader::new();
            for (k, v) in reducible_header().iter() {
                if k != keyword {
                    header.insert(k, v.clone());
                }
            }
            assert!(is_reducible_object(&header, &config).is_err());
        }
    }
}
