// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use ferrogram_crypto::{DuplexCipher, HeadroomBuffer};
use log::debug;

use super::{Error, Tagged, Transport, UnpackedOffset};

/// [Transport obfuscation], designed to defeat simple packet inspection:
/// the inner transport's traffic is AES-256-CTR encrypted with keys drawn
/// from a random 64-byte preamble that is sent first thing on the wire.
///
/// The preamble must not look like the start of any of the plain
/// transports or common plaintext protocols, so its first bytes are drawn
/// again while they collide with a known magic value.
///
/// [Transport obfuscation]: https://core.telegram.org/mtproto/mtproto-transports#transport-obfuscation
pub struct Obfuscated<T: Tagged> {
    inner: T,
    preamble: Option<[u8; 64]>,
    decrypted_until: usize,
    cipher: DuplexCipher,
}

const FORBIDDEN_FIRST_INTS: [[u8; 4]; 7] = [
    *b"HEAD",
    *b"POST",
    *b"GET ",
    *b"OPTI",
    [0x16, 0x03, 0x01, 0x02], // TLS handshake
    [0xdd, 0xdd, 0xdd, 0xdd], // padded intermediate
    [0xee, 0xee, 0xee, 0xee], // intermediate
];

impl<T: Tagged> Obfuscated<T> {
    pub fn new(mut inner: T) -> Self {
        let (preamble, cipher) = Self::generate_keys(&mut inner);
        Self {
            inner,
            preamble: Some(preamble),
            decrypted_until: 0,
            cipher,
        }
    }

    fn generate_keys(inner: &mut T) -> ([u8; 64], DuplexCipher) {
        let mut preamble = [0u8; 64];

        while preamble[4..8] == [0; 4] // full
            || preamble[0] == 0xef // abridged
            || FORBIDDEN_FIRST_INTS
                .iter()
                .any(|magic| magic == &preamble[..4])
        {
            getrandom::getrandom(&mut preamble).expect("failed to generate secure preamble");
        }

        preamble[56..60].copy_from_slice(&inner.init_tag());

        let mut cipher = DuplexCipher::new(&preamble);

        // Bytes 56..64 travel encrypted; the rest is sent as generated.
        let mut encrypted = preamble;
        cipher.encrypt(&mut encrypted);
        preamble[56..64].copy_from_slice(&encrypted[56..64]);

        (preamble, cipher)
    }
}

impl<T: Tagged> Transport for Obfuscated<T> {
    fn pack(&mut self, buffer: &mut HeadroomBuffer<u8>) {
        self.inner.pack(buffer);
        self.cipher.encrypt(buffer.as_mut());
        if let Some(preamble) = self.preamble.take() {
            buffer.extend_front(&preamble);
        }
    }

    fn unpack(&mut self, buffer: &mut [u8]) -> Result<UnpackedOffset, Error> {
        assert!(
            buffer.len() >= self.decrypted_until,
            "buffer shrank below the decrypted portion"
        );

        self.cipher.decrypt(&mut buffer[self.decrypted_until..]);
        self.decrypted_until = buffer.len();

        let offset = self.inner.unpack(buffer)?;
        self.decrypted_until -= offset.next_offset;
        Ok(offset)
    }

    fn reset(&mut self) {
        debug!("regenerating keys for obfuscated transport");
        self.inner.reset();

        let (preamble, cipher) = Self::generate_keys(&mut self.inner);
        self.preamble = Some(preamble);
        self.cipher = cipher;
        self.decrypted_until = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Intermediate;

    #[test]
    fn preamble_avoids_forbidden_magics() {
        for _ in 0..8 {
            let mut transport = Obfuscated::new(Intermediate::new());
            let mut buffer = HeadroomBuffer::with_capacity(16, 72);
            buffer.extend([0u8; 16]);
            transport.pack(&mut buffer);

            let head: [u8; 4] = buffer[..4].try_into().unwrap();
            assert_ne!(head[0], 0xef);
            assert_ne!(&buffer[4..8], &[0, 0, 0, 0]);
            assert!(!FORBIDDEN_FIRST_INTS.contains(&head));
        }
    }

    #[test]
    fn preamble_is_sent_only_once() {
        let mut transport = Obfuscated::new(Intermediate::new());

        let mut buffer = HeadroomBuffer::with_capacity(16, 72);
        buffer.extend([0u8; 16]);
        transport.pack(&mut buffer);
        // preamble (64) + len prefix (4) + payload; the intermediate tag
        // lives inside the preamble and is not sent separately.
        assert_eq!(buffer.len(), 64 + 4 + 16);

        let mut buffer = HeadroomBuffer::with_capacity(16, 72);
        buffer.extend([0u8; 16]);
        transport.pack(&mut buffer);
        assert_eq!(buffer.len(), 4 + 16);
    }

    #[test]
    fn payload_is_scrambled() {
        let mut transport = Obfuscated::new(Intermediate::new());
        let payload = [0x55u8; 16];

        let mut buffer = HeadroomBuffer::with_capacity(16, 72);
        buffer.extend(payload);
        transport.pack(&mut buffer);
        assert_ne!(&buffer[64 + 4..], &payload[..]);
    }
}
