// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

/// Encrypt the input plaintext in-place using the AES-IGE mode.
///
/// Panics unless the buffer is padded to the block size of 16 bytes.
pub fn ige_encrypt(buffer: &mut [u8], key: &[u8; 32], iv: &[u8; 32]) {
    assert!(buffer.len() % 16 == 0);

    let cipher = aes::Aes256::new(GenericArray::from_slice(key));

    let mut prev_plain = [0u8; 16];
    let mut x = [0u8; 16];
    let mut y = [0u8; 16];
    x.copy_from_slice(&iv[..16]);
    y.copy_from_slice(&iv[16..]);

    for block in buffer.chunks_mut(16) {
        prev_plain.copy_from_slice(block);

        for (b, p) in block.iter_mut().zip(x) {
            *b ^= p;
        }
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
        for (b, p) in block.iter_mut().zip(y) {
            *b ^= p;
        }

        x.copy_from_slice(block);
        y = prev_plain;
    }
}

/// Decrypt the input ciphertext using the AES-IGE mode.
///
/// Panics unless the ciphertext is padded to the block size of 16 bytes.
pub fn ige_decrypt(ciphertext: &[u8], key: &[u8; 32], iv: &[u8; 32]) -> Vec<u8> {
    assert!(ciphertext.len() % 16 == 0);
    let mut plaintext = vec![0u8; ciphertext.len()];

    let cipher = aes::Aes256::new(GenericArray::from_slice(key));

    let mut x = [0u8; 16];
    let mut y = [0u8; 16];
    x.copy_from_slice(&iv[..16]);
    y.copy_from_slice(&iv[16..]);

    for (cipher_block, plain_block) in ciphertext.chunks(16).zip(plaintext.chunks_mut(16)) {
        for ((p, c), prev) in plain_block.iter_mut().zip(cipher_block).zip(y) {
            *p = c ^ prev;
        }
        cipher.decrypt_block(GenericArray::from_mut_slice(plain_block));
        for (p, prev) in plain_block.iter_mut().zip(x) {
            *p ^= prev;
        }

        x.copy_from_slice(cipher_block);
        y.copy_from_slice(plain_block);
    }

    plaintext
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(n: usize) -> Vec<u8> {
        (0..n).map(|x| (x & 0xff) as u8).collect()
    }

    #[test]
    fn ige_roundtrip() {
        let key = {
            let mut buffer = [0u8; 32];
            buffer.iter_mut().enumerate().for_each(|(i, x)| *x = i as u8);
            buffer
        };
        let iv = key;
        let plaintext = data(64);

        let mut ciphertext = plaintext.clone();
        ige_encrypt(&mut ciphertext, &key, &iv);
        assert_ne!(ciphertext, plaintext);
        assert_eq!(ige_decrypt(&ciphertext, &key, &iv), plaintext);
    }

    #[test]
    #[should_panic]
    fn ige_rejects_unpadded() {
        let mut buffer = data(15);
        ige_encrypt(&mut buffer, &[0; 32], &[0; 32]);
    }
}
