use log::{debug, warn};
use std::convert::TryFrom;

use crate::{
    bitonal,
    compress::{self, Compression},
    error::Error,
    file::EslFile,
    frame::{Frame, Parameters, WireMode},
    label_id::LabelId,
    BITS_PER_FRAME, WAKE_REPEATS,
};

/// Encoding options.
#[derive(Debug, Clone)]
pub struct Config {
    barcode: Option<String>,
    wire_mode: WireMode,
    color: bool,
    strict_label_id: bool,
}

impl Config {
    /// Initialize configuration with the label barcode and default values.
    ///
    /// Defaults to standard wire mode, monochrome only, and falling back to
    /// a zeroed label identifier when the barcode can not be parsed.
    ///
    /// # Example
    ///
    /// ```
    /// use esl_encoder::Config;
    ///
    /// let config = Config::new(Some("A4108251199313541".to_string()))
    ///     .pp16(true)
    ///     .color(false);
    /// ```
    pub fn new(barcode: Option<String>) -> Config {
        Config {
            barcode,
            wire_mode: WireMode::Standard,
            color: false,
            strict_label_id: false,
        }
    }

    pub fn wire_mode(self, wire_mode: WireMode) -> Self {
        Config { wire_mode, ..self }
    }

    pub fn pp16(self, flag: bool) -> Self {
        Config {
            wire_mode: WireMode::from_pp16(flag),
            ..self
        }
    }

    /// Also send the color mask plane.
    pub fn color(self, color: bool) -> Self {
        Config { color, ..self }
    }

    /// Return an error instead of using a zeroed identifier for bad barcodes.
    pub fn strict_label_id(self, strict: bool) -> Self {
        Config {
            strict_label_id: strict,
            ..self
        }
    }

    fn label_id(&self) -> Result<LabelId, Error> {
        match LabelId::parse_opt(self.barcode.as_deref()) {
            Ok(id) => Ok(id),
            Err(err) if self.strict_label_id => Err(Error::LabelId(err)),
            Err(err) => {
                warn!("{}, using a zeroed label id", err);
                Ok(LabelId::zeroed())
            }
        }
    }
}

/// Encode an image into the bytes of an `.esl` file.
///
/// `pixels` are packed `0xAARRGGBB` values in row-major order. `width` and
/// `height` are written to the parameters frame as given; checking that
/// they suit the target display is left to the caller.
///
/// # Example
///
/// ```
/// use esl_encoder::{encode, Config};
///
/// let pixels = vec![0xFFFF_FFFF; 16 * 8];
/// let config = Config::new(Some("A4108251199313541".to_string()));
/// let bytes = encode(&pixels, 16, 8, &config).unwrap();
/// assert_eq!(bytes[0], 0x00);
/// ```
pub fn encode(pixels: &[u32], width: u32, height: u32, config: &Config) -> Result<Vec<u8>, Error> {
    let id = config.label_id()?;
    let width = u16::try_from(width).map_err(|_| Error::DimensionTooLarge(width))?;
    let height = u16::try_from(height).map_err(|_| Error::DimensionTooLarge(height))?;

    let (compression, mut stream) = compress::select(bitonal::planes(pixels, config.color));
    compress::pad(&mut stream);

    let data_size = stream.len() / 8;
    let data_size =
        u16::try_from(data_size).map_err(|_| Error::PayloadTooLarge { bytes: data_size })?;

    debug!(
        "{}x{} image, {:?}, {} data frames",
        width,
        height,
        compression,
        stream.len() / BITS_PER_FRAME
    );

    build(id, &stream, data_size, compression, width, height, config.wire_mode).to_bytes()
}

/// Same as [`encode`] with the options passed as plain arguments.
pub fn encode_raw(
    pixels: &[u32],
    width: u32,
    height: u32,
    barcode: Option<&str>,
    pp16: bool,
    color: bool,
) -> Result<Vec<u8>, Error> {
    let config = Config::new(barcode.map(str::to_string))
        .pp16(pp16)
        .color(color);
    encode(pixels, width, height, &config)
}

fn build(
    id: LabelId,
    stream: &[bool],
    data_size: u16,
    compression: Compression,
    width: u16,
    height: u16,
    mode: WireMode,
) -> EslFile {
    let mut file = EslFile::new(mode);
    file.push(WAKE_REPEATS, Frame::wake(id, mode));

    let params = Parameters::new(data_size, compression, width, height);
    file.push(1, Frame::parameters(id, &params, mode));

    // data_size fits in 16 bits, so the frame count does too
    for (index, chunk) in stream.chunks(BITS_PER_FRAME).enumerate() {
        file.push(1, Frame::data(id, index as u16, chunk, mode));
    }

    file.push(1, Frame::refresh(id, mode));
    file
}
