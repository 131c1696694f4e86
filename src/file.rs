//! `.esl` file container.
//!
//! ```text
//! u8 mode                      0 = standard, 1 = PP16
//! repeated {
//!     u16 (LE) repeats         times the transmitter sends the frame
//!     u8       len
//!     [u8; len] frame
//! }
//! ```

use log::debug;
use std::convert::TryFrom;

use crate::{
    error::Error,
    frame::{Frame, WireMode},
};

/// Ordered frame records of one transmission, with the wire mode they were built for.
#[derive(Debug, Clone)]
pub struct EslFile {
    mode: WireMode,
    records: Vec<(u16, Frame)>,
}

impl EslFile {
    pub fn new(mode: WireMode) -> Self {
        EslFile {
            mode,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, repeats: u16, frame: Frame) {
        self.records.push((repeats, frame));
    }

    pub fn mode(&self) -> WireMode {
        self.mode
    }

    pub fn records(&self) -> &[(u16, Frame)] {
        &self.records
    }

    /// Serialize the file.
    ///
    /// Fails when a frame is too long for the single length byte of its record.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let size: usize = self.records.iter().map(|(_, f)| f.len() + 3).sum();
        let mut buf: Vec<u8> = Vec::with_capacity(1 + size);
        buf.push(self.mode.flag());

        for (repeats, frame) in self.records.iter() {
            let len = u8::try_from(frame.len()).map_err(|_| Error::FrameTooLong { len: frame.len() })?;
            buf.extend_from_slice(&repeats.to_le_bytes());
            buf.push(len);
            buf.extend_from_slice(frame.as_bytes());
        }

        debug!("{} frame records, {} bytes", self.records.len(), buf.len());
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout() {
        let id = LabelId::zeroed();
        let mut file = EslFile::new(WireMode::Pp16);
        let wake = Frame::wake(id, WireMode::Pp16);
        let refresh = Frame::refresh(id, WireMode::Pp16);
        file.push(400, wake.clone());
        file.push(1, refresh.clone());

        assert_eq!(file.mode(), WireMode::Pp16);
        assert_eq!(file.records().len(), 2);

        let bytes = file.to_bytes().unwrap();
        assert_eq!(bytes[0], 0x01);
        assert_eq!(&bytes[1..4], &[0x90, 0x01, wake.len() as u8]);
        assert_eq!(&bytes[4..4 + wake.len()], wake.as_bytes());

        let next = 4 + wake.len();
        assert_eq!(&bytes[next..next + 3], &[0x01, 0x00, refresh.len() as u8]);
        assert_eq!(&bytes[next + 3..], refresh.as_bytes());
    }

    #[test]
    fn test_frame_too_long() {
        let mut file = EslFile::new(WireMode::Standard);
        file.push(1, Frame(vec![0x00; 255]));
        assert!(file.to_bytes().is_ok());

        file.push(1, Frame(vec![0x00; 256]));
        match file.to_bytes() {
            Err(Error::FrameTooLong { len }) => assert_eq!(len, 256),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty() {
        let file = EslFile::new(WireMode::Standard);
        assert_eq!(file.to_bytes().unwrap(), vec![0x00]);
    }
}
