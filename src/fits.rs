//! FITS primary header reading.
//!
//! Reads the primary header of a FITS file without loading pixel data.
//! Headers are sequences of 2880-byte blocks holding 80-character keyword
//! records, terminated by an END card (NASA/Science Office of Standards
//! and Technology definition).

use crate::error::{GrouperError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;

/// Length of one header record
pub const CARD_LEN: usize = 80;

/// Length of one FITS block
pub const BLOCK_LEN: usize = 2880;

/// Scalar value of a header keyword
#[derive(Debug, Clone)]
pub enum FitsValue {
    String(String),
    Integer(i64),
    Float(f64),
    Logical(bool),
}

impl FitsValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FitsValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FitsValue::Integer(i) => Some(*i),
            FitsValue::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FitsValue::Float(f) => Some(*f),
            FitsValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FitsValue::Logical(b) => Some(*b),
            _ => None,
        }
    }
}

/// Value equality across numeric variants: an integer card and a float
/// card holding the same quantity compare equal, matching how downstream
/// association criteria treat exposure times.
impl PartialEq for FitsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FitsValue::String(a), FitsValue::String(b)) => a == b,
            (FitsValue::Logical(a), FitsValue::Logical(b)) => a == b,
            (FitsValue::Integer(a), FitsValue::Integer(b)) => a == b,
            (FitsValue::Float(a), FitsValue::Float(b)) => a == b,
            (FitsValue::Integer(a), FitsValue::Float(b))
            | (FitsValue::Float(b), FitsValue::Integer(a)) => *a as f64 == *b,
            _ => false,
        }
    }
}

impl fmt::Display for FitsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitsValue::String(s) => write!(f, "{}", s),
            FitsValue::Integer(i) => write!(f, "{}", i),
            FitsValue::Float(x) => write!(f, "{}", x),
            FitsValue::Logical(b) => write!(f, "{}", if *b { "T" } else { "F" }),
        }
    }
}

impl Serialize for FitsValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FitsValue::String(s) => serializer.serialize_str(s),
            FitsValue::Integer(i) => serializer.serialize_i64(*i),
            FitsValue::Float(x) => serializer.serialize_f64(*x),
            FitsValue::Logical(b) => serializer.serialize_bool(*b),
        }
    }
}

/// Parsed FITS header: keyword-value pairs of the primary HDU
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitsHeader {
    cards: BTreeMap<String, FitsValue>,
}

impl FitsHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyword-value pair; keywords are stored uppercase
    pub fn insert(&mut self, keyword: &str, value: FitsValue) {
        self.cards.insert(keyword.to_uppercase(), value);
    }

    /// Look up a keyword, case-insensitively
    pub fn get(&self, keyword: &str) -> Option<&FitsValue> {
        self.cards.get(&keyword.to_uppercase())
    }

    /// Look up a keyword the grouping rules cannot do without
    pub fn require(&self, keyword: &str) -> Result<&FitsValue> {
        self.get(keyword)
            .ok_or_else(|| GrouperError::missing_keyword(keyword))
    }

    /// Required keyword as a string
    pub fn require_str(&self, keyword: &str) -> Result<&str> {
        let value = self.require(keyword)?;
        value.as_str().ok_or(GrouperError::KeywordType {
            keyword: keyword.to_string(),
            expected: "a string",
        })
    }

    /// Required keyword as an integer
    pub fn require_i64(&self, keyword: &str) -> Result<i64> {
        let value = self.require(keyword)?;
        value.as_i64().ok_or(GrouperError::KeywordType {
            keyword: keyword.to_string(),
            expected: "an integer",
        })
    }

    /// Required keyword as a float
    pub fn require_f64(&self, keyword: &str) -> Result<f64> {
        let value = self.require(keyword)?;
        value.as_f64().ok_or(GrouperError::KeywordType {
            keyword: keyword.to_string(),
            expected: "a float",
        })
    }

    /// Iterate over keyword-value pairs in keyword order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FitsValue)> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Serialize for FitsHeader {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cards.len()))?;
        for (keyword, value) in &self.cards {
            map.serialize_entry(keyword, value)?;
        }
        map.end()
    }
}

/// Read the primary header of a FITS file on disk
pub fn read_header(path: &Path) -> Result<FitsHeader> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_header_from(&mut reader).map_err(|e| match e {
        GrouperError::InvalidFits { reason, .. } => GrouperError::invalid_fits(path, reason),
        other => other,
    })
}

/// Read a primary header from any byte source.
///
/// Consumes complete 2880-byte blocks so the reader is left positioned at
/// the start of the data section.
pub fn read_header_from<R: Read>(reader: &mut R) -> Result<FitsHeader> {
    let mut header = FitsHeader::new();
    let mut block = [0u8; BLOCK_LEN];
    let mut first_card = true;

    loop {
        reader.read_exact(&mut block).map_err(|_| {
            GrouperError::invalid_fits("", "header ended without an END card")
        })?;

        for card in block.chunks(CARD_LEN) {
            let keyword = String::from_utf8_lossy(&card[..8]);
            let keyword = keyword.trim();

            if first_card {
                if keyword != "SIMPLE" {
                    return Err(GrouperError::invalid_fits(
                        "",
                        "first header card is not SIMPLE",
                    ));
                }
                first_card = false;
            }

            if keyword == "END" {
                trace!("parsed {} header cards", header.len());
                return Ok(header);
            }

            if keyword.is_empty() || keyword == "COMMENT" || keyword == "HISTORY" {
                continue;
            }

            // Value cards carry "= " in bytes 8..10
            if &card[8..10] == b"= " {
                let field = String::from_utf8_lossy(&card[10..]);
                header.insert(keyword, parse_card_value(field.trim()));
            }
        }
    }
}

/// Parse the value field of a header card
fn parse_card_value(field: &str) -> FitsValue {
    // Quoted string; trailing blanks inside the quotes are insignificant
    if let Some(rest) = field.strip_prefix('\'') {
        if let Some(end) = rest.find('\'') {
            return FitsValue::String(rest[..end].trim_end().to_string());
        }
        return FitsValue::String(rest.trim_end().to_string());
    }

    // Strip an inline comment
    let value_part = match field.find('/') {
        Some(idx) => field[..idx].trim(),
        None => field,
    };

    match value_part {
        "T" => return FitsValue::Logical(true),
        "F" => return FitsValue::Logical(false),
        _ => {}
    }

    if let Ok(i) = value_part.parse::<i64>() {
        return FitsValue::Integer(i);
    }

    // FITS allows a D exponent marker for doubles
    if let Ok(f) = value_part.replace(['D', 'd'], "E").parse::<f64>() {
        return FitsValue::Float(f);
    }

    FitsValue::String(value_part.to_string())
}
