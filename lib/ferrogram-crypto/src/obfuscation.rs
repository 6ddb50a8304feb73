// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{KeyIvInit, StreamCipher};

/// The AES-256-CTR cipher pair used by the obfuscated transport.
///
/// The sending direction takes its key and nonce straight out of the
/// 64-byte preamble, while the receiving direction uses the byte-reversed
/// preamble, so a single secret covers both directions.
pub struct DuplexCipher {
    tx: ctr::Ctr128BE<aes::Aes256>,
    rx: ctr::Ctr128BE<aes::Aes256>,
}

impl DuplexCipher {
    pub fn new(preamble: &[u8; 64]) -> Self {
        let reversed = preamble.iter().copied().rev().collect::<Vec<_>>();
        Self {
            tx: ctr::Ctr128BE::<aes::Aes256>::new(
                GenericArray::from_slice(&preamble[8..40]),
                GenericArray::from_slice(&preamble[40..56]),
            ),
            rx: ctr::Ctr128BE::<aes::Aes256>::new(
                GenericArray::from_slice(&reversed[8..40]),
                GenericArray::from_slice(&reversed[40..56]),
            ),
        }
    }

    pub fn encrypt(&mut self, buffer: &mut [u8]) {
        self.tx.apply_keystream(buffer);
    }

    pub fn decrypt(&mut self, buffer: &mut [u8]) {
        self.rx.apply_keystream(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preamble() -> [u8; 64] {
        let mut buffer = [0u8; 64];
        buffer.iter_mut().enumerate().for_each(|(i, x)| *x = i as u8);
        buffer
    }

    #[test]
    fn ctr_keystream_is_symmetric() {
        // Applying the same direction's keystream twice restores the data.
        let mut data = *b"0123456789abcdef";

        DuplexCipher::new(&preamble()).encrypt(&mut data);
        assert_ne!(&data, b"0123456789abcdef");

        DuplexCipher::new(&preamble()).encrypt(&mut data);
        assert_eq!(&data, b"0123456789abcdef");
    }

    #[test]
    fn directions_use_distinct_keys() {
        let mut tx_data = *b"0123456789abcdef";
        let mut rx_data = *b"0123456789abcdef";

        let mut cipher = DuplexCipher::new(&preamble());
        cipher.encrypt(&mut tx_data);
        cipher.decrypt(&mut rx_data);
        assert_ne!(tx_data, rx_data);
    }
}
