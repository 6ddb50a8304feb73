// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crc32fast::Hasher;
use ferrogram_crypto::HeadroomBuffer;

use super::{Error, Transport, UnpackedOffset};

/// The [full transport], which checksums every packet and counts them per
/// direction:
///
/// ```text
/// +----+----+----...----+----+
/// | len| seq|  payload  | crc|
/// +----+----+----...----+----+
///  ^^^^ 4 bytes
/// ```
///
/// [full transport]: https://core.telegram.org/mtproto/mtproto-transports#full
pub struct Full {
    send_seq: i32,
    recv_seq: i32,
}

#[allow(clippy::new_without_default)]
impl Full {
    pub fn new() -> Self {
        Self {
            send_seq: 0,
            recv_seq: 0,
        }
    }
}

impl Transport for Full {
    fn pack(&mut self, buffer: &mut HeadroomBuffer<u8>) {
        assert_eq!(buffer.len() % 4, 0);

        // length includes itself, the sequence number and the checksum
        let len = (buffer.len() as i32) + 4 + 4 + 4;

        let mut header = [0u8; 8];
        header[..4].copy_from_slice(&len.to_le_bytes());
        header[4..].copy_from_slice(&self.send_seq.to_le_bytes());
        buffer.extend_front(&header);

        let crc = {
            let mut hasher = Hasher::new();
            hasher.update(buffer.as_ref());
            hasher.finalize()
        };
        buffer.extend(crc.to_le_bytes());

        self.send_seq += 1;
    }

    fn unpack(&mut self, buffer: &mut [u8]) -> Result<UnpackedOffset, Error> {
        if buffer.len() < 4 {
            return Err(Error::MissingBytes);
        }

        let len = i32::from_le_bytes(buffer[0..4].try_into().unwrap());
        if len < 0 {
            return Err(Error::BadStatus {
                status: (-len) as u32,
            });
        }
        if len < 12 {
            return Err(Error::BadLen { got: len });
        }
        if (buffer.len() as i32) < len {
            return Err(Error::MissingBytes);
        }
        let len = len as usize;

        let seq = i32::from_le_bytes(buffer[4..8].try_into().unwrap());
        if seq != self.recv_seq {
            return Err(Error::BadSeq {
                expected: self.recv_seq,
                got: seq,
            });
        }

        let crc = u32::from_le_bytes(buffer[len - 4..len].try_into().unwrap());
        let valid_crc = {
            let mut hasher = Hasher::new();
            hasher.update(&buffer[0..len - 4]);
            hasher.finalize()
        };
        if crc != valid_crc {
            return Err(Error::BadCrc {
                expected: valid_crc,
                got: crc,
            });
        }

        self.recv_seq += 1;
        Ok(UnpackedOffset {
            data_start: 8,
            data_end: len - 4,
            next_offset: len,
        })
    }

    fn reset(&mut self) {
        log::info!("resetting full transport counters");
        self.send_seq = 0;
        self.recv_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_pack(n: usize) -> (Full, HeadroomBuffer<u8>) {
        let mut buffer = HeadroomBuffer::with_capacity(n, 8);
        buffer.extend((0..n).map(|x| (x & 0xff) as u8));
        (Full::new(), buffer)
    }

    #[test]
    fn pack_empty() {
        let (mut transport, mut buffer) = setup_pack(0);
        transport.pack(&mut buffer);
        assert_eq!(&buffer[..], &[12, 0, 0, 0, 0, 0, 0, 0, 38, 202, 141, 50]);
    }

    #[test]
    #[should_panic]
    fn pack_non_padded() {
        let (mut transport, mut buffer) = setup_pack(7);
        transport.pack(&mut buffer);
    }

    #[test]
    fn pack_normal() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        assert_eq!(&buffer[..4], &[140, 0, 0, 0]);
        assert_eq!(&buffer[4..8], &[0, 0, 0, 0]);
        assert_eq!(&buffer[8..8 + orig.len()], &orig[..]);
        assert_eq!(&buffer[8 + orig.len()..], &[134, 115, 149, 55]);
    }

    #[test]
    fn pack_seq_increases() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        buffer = orig;
        transport.pack(&mut buffer);
        assert_eq!(&buffer[4..8], &[1, 0, 0, 0]);
    }

    #[test]
    fn unpack_missing_bytes() {
        let mut transport = Full::new();
        assert_eq!(
            transport.unpack(&mut [0, 1, 3]),
            Err(Error::MissingBytes)
        );
    }

    #[test]
    fn unpack_normal() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        let mut data = buffer.as_ref().to_vec();
        let offset = transport.unpack(&mut data).unwrap();
        assert_eq!(&data[offset.data_start..offset.data_end], &orig[..]);
        assert_eq!(offset.next_offset, data.len());
    }

    #[test]
    fn unpack_bad_seq() {
        let (mut transport, mut buffer) = setup_pack(128);
        transport.pack(&mut buffer);
        let mut data = buffer.as_ref().to_vec();
        data[4] = 1;

        assert_eq!(
            transport.unpack(&mut data),
            Err(Error::BadSeq {
                expected: 0,
                got: 1,
            })
        );
    }

    #[test]
    fn unpack_bad_crc() {
        let (mut transport, mut buffer) = setup_pack(128);
        transport.pack(&mut buffer);
        let mut data = buffer.as_ref().to_vec();
        let last = data.len() - 1;
        data[last] ^= 0xff;

        assert_eq!(
            transport.unpack(&mut data),
            Err(Error::BadCrc {
                expected: 932541318,
                got: 3365237638,
            })
        );
    }

    #[test]
    fn unpack_bad_status() {
        let mut transport = Full::new();
        let mut data = (-404_i32).to_le_bytes().to_vec();
        assert_eq!(
            transport.unpack(&mut data),
            Err(Error::BadStatus { status: 404 })
        );
    }

    #[test]
    fn reset_restarts_counters() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);
        transport.reset();

        buffer = orig;
        transport.pack(&mut buffer);
        assert_eq!(&buffer[4..8], &[0, 0, 0, 0]);
    }
}
