//! Error types for ESL encoding.
//!
//! The encoder itself is infallible for every input the device can
//! display; these errors cover malformed barcodes (only surfaced when the
//! caller asks for strict parsing) and the size limits of the file and
//! frame formats.

use std::num::ParseIntError;
use std::ops::Range;
use thiserror::Error;

/// Main error type for encoding operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The barcode could not be turned into a label identifier.
    ///
    /// Only returned when `Config::strict_label_id` is enabled; otherwise
    /// the encoder falls back to a zeroed identifier.
    #[error(transparent)]
    LabelId(#[from] LabelIdError),

    /// A finalized frame does not fit the single length byte of its file record.
    #[error("Frame is {len} bytes long, a file record holds at most 255")]
    FrameTooLong { len: usize },

    /// The padded image data does not fit the 16 bit size field of the parameters frame.
    #[error("Image data is {bytes} bytes after padding, at most 65535 can be addressed")]
    PayloadTooLarge { bytes: usize },

    /// Width or height does not fit the 16 bit fields of the parameters frame.
    #[error("Image dimension {0} does not fit in 16 bits")]
    DimensionTooLarge(u32),
}

/// Reasons a barcode can not be parsed into a label identifier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabelIdError {
    #[error("No barcode supplied")]
    Missing,

    /// Barcodes carry the identifier in their first 12 characters.
    #[error("Barcode has {len} characters, at least 12 are required")]
    TooShort { len: usize },

    #[error("Barcode characters {field:?} are not a valid non-negative number")]
    InvalidNumber {
        field: Range<usize>,
        #[source]
        source: Option<ParseIntError>,
    },
}
