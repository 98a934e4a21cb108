//! Association rules between object frames and calibration frames.
//!
//! A flat field is usable only if it was taken with the same optical
//! configuration as the object frame; a dark only if it shares the
//! exposure time. Agreement is exact value equality, never
//! case-normalized.

use crate::constants::{DARK_MATCH_KEYWORDS, FLAT_MATCH_KEYWORDS};
use crate::error::Result;
use crate::fits::FitsHeader;

/// True if the flat satisfies the criteria for association with the
/// object frame
pub fn flat_matches(object: &FitsHeader, flat: &FitsHeader) -> Result<bool> {
    headers_agree(object, flat, FLAT_MATCH_KEYWORDS)
}

/// True if the dark satisfies the criteria for association with the
/// object frame
pub fn dark_matches(object: &FitsHeader, dark: &FitsHeader) -> Result<bool> {
    headers_agree(object, dark, DARK_MATCH_KEYWORDS)
}

fn headers_agree(object: &FitsHeader, candidate: &FitsHeader, keywords: &[&str]) -> Result<bool> {
    for keyword in keywords {
        if object.require(keyword)? != candidate.require(keyword)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fits::FitsValue;

    fn optical_header() -> FitsHeader {
        let mut header = FitsHeader::new();
        header.insert("DISPPOS", FitsValue::Float(36.72));
        header.insert("ECHLPOS", FitsValue::Float(63.0));
        header.insert("FILNAME", FitsValue::String("NIRSPEC-7".to_string()));
        header.insert("SLITNAME", FitsValue::String("42x0.380".to_string()));
        header.insert("DISPERS", FitsValue::String("high".to_string()));
        header.insert("ELAPTIME", FitsValue::Integer(300));
        header
    }

    #[test]
    fn test_header_matches_itself() {
        let header = optical_header();
        assert!(flat_matches(&header, &header).unwrap());
        assert!(dark_matches(&header, &header).unwrap());
    }

    #[test]
    fn test_flat_rejected_if_any_field_differs() {
        let object = optical_header();

        let changed: &[(&str, FitsValue)] = &[
            ("DISPPOS", FitsValue::Float(35.53)),
            ("ECHLPOS", FitsValue::Float(62.65)),
            ("FILNAME", FitsValue::String("NIRSPEC-5".to_string())),
            ("SLITNAME", FitsValue::String("42x0.760".to_string())),
            ("DISPERS", FitsValue::String("low".to_string())),
        ];

        for (keyword, value) in changed {
            let mut flat = optical_header();
            flat.insert(keyword, value.clone());
            assert!(
                !flat_matches(&object, &flat).unwrap(),
                "flat with differing {} should not match",
                keyword
            );
        }
    }

    #[test]
    fn test_flat_match_is_case_sensitive() {
        let object = optical_header();
        let mut flat = optical_header();
        flat.insert("FILNAME", FitsValue::String("nirspec-7".to_string()));

        assert!(!flat_matches(&object, &flat).unwrap());
    }

    #[test]
    fn test_flat_match_ignores_exposure_time() {
        let object = optical_header();
        let mut flat = optical_header();
        flat.insert("ELAPTIME", FitsValue::Integer(2));

        assert!(flat_matches(&object, &flat).unwrap());
    }

    #[test]
    fn test_dark_rejected_on_different_exposure_time() {
        let object = optical_header();
        let mut dark = optical_header();
        dark.insert("ELAPTIME", FitsValue::Integer(600));

        assert!(!dark_matches(&object, &dark).unwrap());
    }

    #[test]
    fn test_dark_matches_across_numeric_variants() {
        let object = optical_header();
        let mut dark = optical_header();
        dark.insert("ELAPTIME", FitsValue::Float(300.0));

        assert!(dark_matches(&object, &dark).unwrap());
    }

    #[test]
    fn test_missing_keyword_in_either_header_is_an_error() {
        let object = optical_header();

        let mut bare = FitsHeader::new();
        bare.insert("DISPPOS", FitsValue::Float(36.72));

        assert!(flat_matches(&object, &bare).is_err());
        assert!(flat_matches(&bare, &object).is_err());
        assert!(dark_matches(&FitsHeader::new(), &object).is_err());
    }
}
