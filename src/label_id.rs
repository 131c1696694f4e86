//! Label identifier (PLID) parsing.
//!
//! Every ESL is addressed by four bytes printed in encoded form on its
//! barcode. Characters `2..7` and `7..12` of the barcode are two decimal
//! numbers; combined as `first + (second << 16)` they give the 32 bit
//! identifier value whose bytes are then scattered into the PLID.

use std::ops::Range;
use std::str::FromStr;

use crate::error::LabelIdError;

const FIRST_FIELD: Range<usize> = 2..7;
const SECOND_FIELD: Range<usize> = 7..12;
const MIN_BARCODE_LEN: usize = 12;

/// Byte of the identifier value stored at each PLID index.
///
/// `id[i] = value.to_le_bytes()[VALUE_BYTE[i]]`
const VALUE_BYTE: [usize; 4] = [1, 0, 3, 2];

/// PLID index emitted at each header position.
const HEADER_ORDER: [usize; 4] = [3, 2, 1, 0];

/// Four byte address of a single label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelId([u8; 4]);

impl LabelId {
    pub fn new(id: [u8; 4]) -> Self {
        LabelId(id)
    }

    /// Identifier used when the barcode can not be parsed.
    pub fn zeroed() -> Self {
        LabelId([0x00; 4])
    }

    /// Parse the identifier out of a label barcode.
    ///
    /// # Example
    ///
    /// ```
    /// use esl_encoder::LabelId;
    ///
    /// let id = LabelId::parse("A40000100001").unwrap();
    /// assert_eq!(id.bytes(), [0x00, 0x01, 0x00, 0x01]);
    /// ```
    pub fn parse(barcode: &str) -> Result<Self, LabelIdError> {
        let chars: Vec<char> = barcode.chars().collect();
        if chars.len() < MIN_BARCODE_LEN {
            return Err(LabelIdError::TooShort { len: chars.len() });
        }

        let first = parse_field(&chars, FIRST_FIELD)?;
        let second = parse_field(&chars, SECOND_FIELD)?;
        let value = (first + (second << 16)) as u32;

        Ok(Self::from_value(value))
    }

    /// Same as [`LabelId::parse`] but accepts an absent barcode.
    pub fn parse_opt(barcode: Option<&str>) -> Result<Self, LabelIdError> {
        match barcode {
            Some(barcode) => Self::parse(barcode),
            None => Err(LabelIdError::Missing),
        }
    }

    /// Scatter the bytes of a 32 bit identifier value into PLID order.
    pub fn from_value(value: u32) -> Self {
        let le = value.to_le_bytes();
        let mut id = [0x00; 4];
        for (i, byte) in id.iter_mut().enumerate() {
            *byte = le[VALUE_BYTE[i]];
        }
        LabelId(id)
    }

    pub fn bytes(&self) -> [u8; 4] {
        self.0
    }

    /// PLID bytes in the order they appear in a frame header.
    pub fn header_bytes(&self) -> [u8; 4] {
        let mut out = [0x00; 4];
        for (pos, byte) in out.iter_mut().enumerate() {
            *byte = self.0[HEADER_ORDER[pos]];
        }
        out
    }
}

impl FromStr for LabelId {
    type Err = LabelIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_field(chars: &[char], field: Range<usize>) -> Result<u64, LabelIdError> {
    let text: String = chars[field.clone()].iter().collect();
    match text.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n as u64),
        Ok(_) => Err(LabelIdError::InvalidNumber {
            field,
            source: None,
        }),
        Err(err) => Err(LabelIdError::InvalidNumber {
            field,
            source: Some(err),
        }),
    }
}
