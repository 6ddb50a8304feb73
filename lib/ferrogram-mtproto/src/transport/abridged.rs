// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use ferrogram_crypto::HeadroomBuffer;

use super::{Error, Tagged, Transport, UnpackedOffset};

/// The [abridged transport], with the lowest overhead of them all. Lengths
/// are counted in 4-byte words: one byte when below 127 words, otherwise a
/// `0x7f` marker followed by the 24-bit length:
///
/// ```text
/// +-+----...----+
/// |L|  payload  |
/// +-+----...----+
///  ^ 1 byte
/// ```
///
/// [abridged transport]: https://core.telegram.org/mtproto/mtproto-transports#abridged
pub struct Abridged {
    init: bool,
}

#[allow(clippy::new_without_default)]
impl Abridged {
    pub fn new() -> Self {
        Self { init: false }
    }
}

impl Transport for Abridged {
    fn pack(&mut self, buffer: &mut HeadroomBuffer<u8>) {
        let len = buffer.len();
        assert_eq!(len % 4, 0);

        let len = len / 4;
        if len < 127 {
            buffer.extend_front(&[len as u8]);
        } else {
            buffer.extend_front(&(0x7f | ((len as u32) << 8)).to_le_bytes());
        }

        if !self.init {
            buffer.extend_front(&[0xef]);
            self.init = true;
        }
    }

    fn unpack(&mut self, buffer: &mut [u8]) -> Result<UnpackedOffset, Error> {
        if buffer.is_empty() {
            return Err(Error::MissingBytes);
        }

        let header_len;
        let len = buffer[0];
        let len = if len < 127 {
            header_len = 1;
            len as i32
        } else {
            if buffer.len() < 4 {
                return Err(Error::MissingBytes);
            }
            header_len = 4;
            i32::from_le_bytes(buffer[0..4].try_into().unwrap()) >> 8
        };

        let len = len * 4;
        if (buffer.len() as i32) < header_len + len {
            return Err(Error::MissingBytes);
        }

        // A 4-byte packet with a negative value is a transport-level status.
        if header_len == 1 && len == 4 {
            let status = i32::from_le_bytes(buffer[1..5].try_into().unwrap());
            if status < 0 {
                return Err(Error::BadStatus {
                    status: (-status) as u32,
                });
            }
        }

        let header_len = header_len as usize;
        let len = len as usize;
        Ok(UnpackedOffset {
            data_start: header_len,
            data_end: header_len + len,
            next_offset: header_len + len,
        })
    }

    fn reset(&mut self) {
        log::info!("resetting sending of header in abridged transport");
        self.init = false;
    }
}

impl Tagged for Abridged {
    fn init_tag(&mut self) -> [u8; 4] {
        self.init = true;
        [0xef, 0xef, 0xef, 0xef]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_pack(n: usize) -> (Abridged, HeadroomBuffer<u8>) {
        let mut buffer = HeadroomBuffer::with_capacity(n, 8);
        buffer.extend((0..n).map(|x| (x & 0xff) as u8));
        (Abridged::new(), buffer)
    }

    #[test]
    fn pack_empty() {
        let (mut transport, mut buffer) = setup_pack(0);
        transport.pack(&mut buffer);
        assert_eq!(&buffer[..], &[0xef, 0]);
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
        assert_eq!(&buffer[..2], &[0xef, 32]);
        assert_eq!(&buffer[2..], &orig[..]);
    }

    #[test]
    fn pack_large() {
        let (mut transport, mut buffer) = setup_pack(1024);
        let orig = buffer.clone();
        transport.pack(&mut buffer);
        assert_eq!(&buffer[..5], &[0xef, 127, 0, 1, 0]);
        assert_eq!(&buffer[5..], &orig[..]);
    }

    #[test]
    fn unpack_missing_bytes() {
        let mut transport = Abridged::new();
        assert_eq!(transport.unpack(&mut [1]), Err(Error::MissingBytes));
    }

    #[test]
    fn unpack_normal() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        let mut data = buffer[1..].to_vec(); // skip the init byte
        let offset = transport.unpack(&mut data).unwrap();
        assert_eq!(&data[offset.data_start..offset.data_end], &orig[..]);
    }

    #[test]
    fn unpack_large() {
        let (mut transport, mut buffer) = setup_pack(1024);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        let mut data = buffer[1..].to_vec();
        let offset = transport.unpack(&mut data).unwrap();
        assert_eq!(&data[offset.data_start..offset.data_end], &orig[..]);
    }

    #[test]
    fn unpack_two_at_once() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        let mut data = buffer[1..].to_vec();
        let single_size = data.len();
        buffer = orig.clone();
        transport.pack(&mut buffer);
        data.extend(&buffer[..]);

        let offset = transport.unpack(&mut data).unwrap();
        assert_eq!(&data[offset.data_start..offset.data_end], &orig[..]);
        assert_eq!(offset.next_offset, single_size);

        let n = offset.next_offset;
        let offset = transport.unpack(&mut data[n..]).unwrap();
        assert_eq!(&data[n..][offset.data_start..offset.data_end], &orig[..]);
    }

    #[test]
    fn unpack_bad_status() {
        let mut transport = Abridged::new();
        let mut data = vec![1u8];
        data.extend((-404_i32).to_le_bytes());

        assert_eq!(
            transport.unpack(&mut data),
            Err(Error::BadStatus { status: 404 })
        );
    }
}
