// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use ferrogram_crypto::HeadroomBuffer;

use super::{Error, Tagged, Transport, UnpackedOffset};

/// The [intermediate transport], a plain 4-byte length prefix announced by
/// an initial `0xee 0xee 0xee 0xee` tag:
///
/// ```text
/// +----+----...----+
/// | len|  payload  |
/// +----+----...----+
///  ^^^^ 4 bytes
/// ```
///
/// [intermediate transport]: https://core.telegram.org/mtproto/mtproto-transports#intermediate
pub struct Intermediate {
    init: bool,
}

#[allow(clippy::new_without_default)]
impl Intermediate {
    const TAG: [u8; 4] = 0xee_ee_ee_ee_u32.to_le_bytes();

    pub fn new() -> Self {
        Self { init: false }
    }
}

impl Transport for Intermediate {
    fn pack(&mut self, buffer: &mut HeadroomBuffer<u8>) {
        let len = buffer.len();
        assert_eq!(len % 4, 0);

        buffer.extend_front(&(len as i32).to_le_bytes());

        if !self.init {
            buffer.extend_front(&Self::TAG);
            self.init = true;
        }
    }

    fn unpack(&mut self, buffer: &mut [u8]) -> Result<UnpackedOffset, Error> {
        if buffer.len() < 4 {
            return Err(Error::MissingBytes);
        }

        let len = i32::from_le_bytes(buffer[0..4].try_into().unwrap());
        if (buffer.len() as i32) < 4 + len {
            return Err(Error::MissingBytes);
        }

        if len <= 4 {
            if len == 4 {
                let status = i32::from_le_bytes(buffer[4..8].try_into().unwrap());
                return Err(Error::BadStatus {
                    status: (-status) as u32,
                });
            }
            return Err(Error::BadLen { got: len });
        }

        let len = len as usize;
        Ok(UnpackedOffset {
            data_start: 4,
            data_end: 4 + len,
            next_offset: 4 + len,
        })
    }

    fn reset(&mut self) {
        log::info!("resetting sending of header in intermediate transport");
        self.init = false;
    }
}

impl Tagged for Intermediate {
    fn init_tag(&mut self) -> [u8; 4] {
        self.init = true;
        Self::TAG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_pack(n: usize) -> (Intermediate, HeadroomBuffer<u8>) {
        let mut buffer = HeadroomBuffer::with_capacity(n, 8);
        buffer.extend((0..n).map(|x| (x & 0xff) as u8));
        (Intermediate::new(), buffer)
    }

    #[test]
    fn pack_empty() {
        let (mut transport, mut buffer) = setup_pack(0);
        transport.pack(&mut buffer);
        assert_eq!(&buffer[..], &[0xee, 0xee, 0xee, 0xee, 0, 0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn pack_non_padded() {
        let (mut transport, mut buffer) = setup_pack(7);
        transport.pack(&mut buffer);
    }

    #[test]
    fn pack_only_tags_once() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);
        assert_eq!(&buffer[..8], &[0xee, 0xee, 0xee, 0xee, 128, 0, 0, 0]);
        assert_eq!(&buffer[8..], &orig[..]);

        buffer = orig.clone();
        transport.pack(&mut buffer);
        assert_eq!(&buffer[..4], &[128, 0, 0, 0]);
        assert_eq!(&buffer[4..], &orig[..]);
    }

    #[test]
    fn unpack_normal() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        let mut data = buffer[4..].to_vec(); // skip the init tag
        let offset = transport.unpack(&mut data).unwrap();
        assert_eq!(&data[offset.data_start..offset.data_end], &orig[..]);
    }

    #[test]
    fn unpack_missing_bytes() {
        let mut transport = Intermediate::new();
        assert_eq!(transport.unpack(&mut [1]), Err(Error::MissingBytes));
    }

    #[test]
    fn unpack_two_at_once() {
        let (mut transport, mut buffer) = setup_pack(128);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        let mut data = buffer[4..].to_vec();
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
        let mut transport = Intermediate::new();
        let mut data = Vec::new();
        data.extend(4_i32.to_le_bytes());
        data.extend((-404_i32).to_le_bytes());

        assert_eq!(
            transport.unpack(&mut data),
            Err(Error::BadStatus { status: 404 })
        );
    }
}
