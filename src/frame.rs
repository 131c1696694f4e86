//! Frames sent to the display controller.
//!
//! ```text
//! raw frame   85 | id3 id2 id1 id0 | 17              | payload | crc_lo crc_hi
//! mcu frame   85 | id3 id2 id1 id0 | 34 00 00 00 cmd | payload | crc_lo crc_hi
//! ```
//!
//! In PP16 wire mode every frame additionally starts with `00 00 00 40`.
//! The checksum never covers that prefix.

use bitflags::bitflags;

use crate::{compress::Compression, crc::crc16, label_id::LabelId, Bits};

const PROTOCOL: u8 = 0x85;
const WAKE_COMMAND: u8 = 0x17;
const MCU_MARKER: u8 = 0x34;
const PP16_PREFIX: [u8; 4] = [0x00, 0x00, 0x00, 0x40];

/// Image bytes carried by one data frame.
pub const DATA_BYTES_PER_FRAME: usize = 20;

/// Framing variant, also written as the first byte of an ESL file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireMode {
    Standard,
    Pp16,
}

impl WireMode {
    pub fn from_pp16(pp16: bool) -> Self {
        if pp16 {
            Self::Pp16
        } else {
            Self::Standard
        }
    }

    pub fn flag(self) -> u8 {
        match self {
            Self::Standard => 0x00,
            Self::Pp16 => 0x01,
        }
    }
}

/// MCU commands used during an image update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Parameters,
    Data,
}

impl Command {
    pub fn code(self) -> u8 {
        match self {
            Self::Refresh => 0x01,
            Self::Parameters => 0x05,
            Self::Data => 0x20,
        }
    }
}

bitflags! {
    /// Page control byte of the parameters frame.
    pub struct Control: u8 {
        const UPDATE = 0b1000_0000;
        const SET_BASE_PAGE = 0b0000_1000;
    }
}

/// Contents of the parameters (0x05) frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    /// Size of the padded image stream in bytes.
    pub data_size: u16,
    pub compression: Compression,
    pub page: u8,
    pub width: u16,
    pub height: u16,
    pub x: u16,
    pub y: u16,
    pub keycode: u16,
    pub control: Control,
    pub enabled_pages: u16,
}

impl Parameters {
    /// Full-screen update of page 0 at the origin.
    pub fn new(data_size: u16, compression: Compression, width: u16, height: u16) -> Self {
        Parameters {
            data_size,
            compression,
            page: 0,
            width,
            height,
            x: 0,
            y: 0,
            keycode: 0,
            control: Control::UPDATE | Control::SET_BASE_PAGE,
            enabled_pages: 0,
        }
    }

    fn payload(&self) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::with_capacity(22);
        buf.extend_from_slice(&self.data_size.to_be_bytes());
        buf.push(0x00);
        buf.push(self.compression.code());
        buf.push(self.page);
        buf.extend_from_slice(&self.width.to_be_bytes());
        buf.extend_from_slice(&self.height.to_be_bytes());
        buf.extend_from_slice(&self.x.to_be_bytes());
        buf.extend_from_slice(&self.y.to_be_bytes());
        buf.extend_from_slice(&self.keycode.to_be_bytes());
        buf.push(self.control.bits());
        buf.extend_from_slice(&self.enabled_pages.to_be_bytes());
        buf.extend_from_slice(&[0x00; 4]);
        buf
    }
}

/// A finalized frame, ready to be written to a file record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(pub(crate) Vec<u8>);

impl Frame {
    /// Wake-up ping. Sent many times so a sleeping label catches it.
    pub fn wake(id: LabelId, mode: WireMode) -> Self {
        let header = raw_header(id, WAKE_COMMAND);
        let mut payload = vec![0x00; 26];
        payload[0] = 0x01;
        Self::finalize(&header, &payload, mode)
    }

    pub fn parameters(id: LabelId, params: &Parameters, mode: WireMode) -> Self {
        let header = mcu_header(id, Command::Parameters);
        Self::finalize(&header, &params.payload(), mode)
    }

    /// Data frame `index` carrying up to 160 bits of the image stream.
    pub fn data(id: LabelId, index: u16, chunk: &[bool], mode: WireMode) -> Self {
        let header = mcu_header(id, Command::Data);
        let mut payload = index.to_be_bytes().to_vec();
        payload.extend_from_slice(&pack_chunk(chunk));
        Self::finalize(&header, &payload, mode)
    }

    pub fn refresh(id: LabelId, mode: WireMode) -> Self {
        let header = mcu_header(id, Command::Refresh);
        Self::finalize(&header, &[0x00; 22], mode)
    }

    fn finalize(header: &[u8], payload: &[u8], mode: WireMode) -> Self {
        let mut body = header.to_vec();
        body.extend_from_slice(payload);
        let crc = crc16(&body);

        let mut buf: Vec<u8> = Vec::with_capacity(body.len() + 6);
        if mode == WireMode::Pp16 {
            buf.extend_from_slice(&PP16_PREFIX);
        }
        buf.append(&mut body);
        buf.extend_from_slice(&crc.to_le_bytes());
        Frame(buf)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn raw_header(id: LabelId, command: u8) -> Vec<u8> {
    let mut buf = vec![PROTOCOL];
    buf.extend_from_slice(&id.header_bytes());
    buf.push(command);
    buf
}

fn mcu_header(id: LabelId, command: Command) -> Vec<u8> {
    let mut buf = raw_header(id, MCU_MARKER);
    buf.extend_from_slice(&[0x00, 0x00, 0x00, command.code()]);
    buf
}

/// Pack up to 160 stream bits into 20 bytes, most significant bit first.
///
/// Missing bits at the end of a short chunk are sent as 0.
pub fn pack_chunk(chunk: &[bool]) -> [u8; DATA_BYTES_PER_FRAME] {
    let mut out = [0x00; DATA_BYTES_PER_FRAME];
    for (byte, bits) in out.iter_mut().zip(chunk.chunks(8)) {
        *byte = bits
            .iter()
            .chain(std::iter::repeat(&false))
            .take(8)
            .fold(0u8, |acc, &b| (acc << 1) | b as u8);
    }
    out
}

/// Reverse of [`pack_chunk`].
pub fn unpack_chunk(bytes: &[u8]) -> Bits {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect()
}
