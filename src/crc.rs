//! Frame checksum.
//!
//! Bit-reversed CRC-16 with polynomial `0x8408`. The accumulator is also
//! seeded with `0x8408`, which is what the display controllers expect.

const POLY: u16 = 0x8408;
const INIT: u16 = 0x8408;

pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = INIT;
    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}
