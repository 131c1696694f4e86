//! ESL Image Encoder
//!
//! This crate turns a raster image into an `.esl` file: the sequence of
//! infrared frames that updates the e-paper display of an electronic shelf
//! label. The file is consumed by a transmitter which sends each frame the
//! number of times recorded next to it.
//!
//! # Example
//!
//! ```rust
//! use esl_encoder::{encode, Config};
//!
//! let (width, height) = (16, 8);
//! let pixels = vec![0xFFFF_FFFF; width * height];
//! let config = Config::new(Some("A4108251199313541".to_string())).color(true);
//! let esl = encode(&pixels, width as u32, height as u32, &config).unwrap();
//! ```

pub mod bitonal;
pub mod compress;
mod crc;
mod encoder;
mod error;
mod file;
pub mod frame;
mod label_id;

pub use crate::{
    compress::Compression,
    crc::crc16,
    encoder::{encode, encode_raw, Config},
    error::{Error, LabelIdError},
    file::EslFile,
    frame::{Frame, Parameters, WireMode},
    label_id::LabelId,
};

/// Pixel bit plane or encoded stream, one `bool` per bit.
///
/// `false` is a 0 bit: black in the monochrome plane, colored in the color
/// mask plane.
pub type Bits = Vec<bool>;

/// Stream bits carried by one data frame (20 bytes).
///
/// The encoded stream is always padded to a multiple of this.
pub const BITS_PER_FRAME: usize = frame::DATA_BYTES_PER_FRAME * 8;

/// Number of times the wake-up frame is sent before the image.
pub const WAKE_REPEATS: u16 = 400;
