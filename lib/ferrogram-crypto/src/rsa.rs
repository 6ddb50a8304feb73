// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_bigint::BigUint;

use crate::aes::ige_encrypt;

/// A server RSA public key, identified during the key exchange by the low
/// 64 bits of the SHA-1 over its TL serialization.
pub struct PublicKey {
    n: BigUint,
    e: BigUint,
}

impl PublicKey {
    /// Parses the decimal representation of the modulus and exponent.
    pub fn new(n: &str, e: &str) -> Option<Self> {
        Some(Self {
            n: BigUint::parse_bytes(n.as_bytes(), 10)?,
            e: BigUint::parse_bytes(e.as_bytes(), 10)?,
        })
    }
}

/// Encrypt the given data with the [RSA_PAD] scheme used for the key
/// exchange. `random_bytes` provides the padding and the temporary keys;
/// providing it explicitly keeps this function deterministic for tests.
///
/// Panics if the data exceeds the 144 bytes the scheme allows, or in the
/// astronomically unlikely case that every temporary key in `random_bytes`
/// yields a value not below the modulus.
///
/// [RSA_PAD]: https://core.telegram.org/mtproto/auth_key#41-rsa-paddata-server-public-key-mentioned-above-is-implemented-as-follows
pub fn encrypt_hashed(data: &[u8], key: &PublicKey, random_bytes: &[u8]) -> Vec<u8> {
    assert!(data.len() <= 144);

    // data_with_padding is always exactly 192 bytes.
    let data_with_padding = {
        let mut buffer = Vec::with_capacity(192);
        buffer.extend(data);
        buffer.extend(&random_bytes[..192 - data.len()]);
        buffer
    };
    let data_pad_reversed = data_with_padding.iter().copied().rev().collect::<Vec<u8>>();

    let mut attempt = 0;
    let key_aes_encrypted = loop {
        let temp_key_offset = 192 + 32 * attempt;
        if temp_key_offset + 32 > random_bytes.len() {
            panic!("ran out of entropy");
        }
        let temp_key: &[u8; 32] = random_bytes[temp_key_offset..temp_key_offset + 32]
            .try_into()
            .unwrap();

        // data_with_hash is exactly 224 bytes long.
        let mut data_with_hash = Vec::with_capacity(224);
        data_with_hash.extend(&data_pad_reversed);
        data_with_hash.extend(sha256!(temp_key, &data_with_padding));

        ige_encrypt(&mut data_with_hash, temp_key, &[0u8; 32]);
        let aes_encrypted = data_with_hash;

        let temp_key_xor = {
            let mut xored = *temp_key;
            xored
                .iter_mut()
                .zip(sha256!(&aes_encrypted))
                .for_each(|(a, b)| *a ^= b);
            xored
        };

        // key_aes_encrypted is exactly 256 bytes (2048 bits) long.
        let mut buffer = Vec::with_capacity(256);
        buffer.extend(temp_key_xor);
        buffer.extend(aes_encrypted);

        // Values not below the modulus would not survive the modular
        // exponentiation, so a new temporary key must be drawn.
        if BigUint::from_bytes_be(&buffer) < key.n {
            break buffer;
        }
        attempt += 1;
    };

    let payload = BigUint::from_bytes_be(&key_aes_encrypted);
    let encrypted = payload.modpow(&key.e, &key.n);
    let mut block = encrypted.to_bytes_be();
    while block.len() < 256 {
        block.insert(0, 0);
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;

    #[test]
    fn rsa_pad_known_vector() {
        let key = PublicKey::new("25342889448840415564971689590713473206898847759084779052582026594546022463853940585885215951168491965708222649399180603818074200620463776135424884632162512403163793083921641631564740959529419359595852941166848940585952337613333022396096584117954892216031229237302943701877588456738335398602461675225081791820393153757504952636234951323237820036543581047826906120927972487366805292115792231423684261262330394324750785450942589751755390156647751460719351439969059949569615302809050721500330239005077889855323917509948255722081644689442127297605422579707142646660768825302832201908302295573257427896031830742328565032949", "65537").unwrap();
        let result = encrypt_hashed(
            &hex::from_hex("955ff5a9081a8e635f5743de9b00000004453dc27100000004622f1fcb000000f7a81627bbf511fa4afef71e94a0937474586c1add9198dda81a5df8393871c8293623c5fb968894af1be7dfe9c7be813f9307789242fd0cb0c16a5cb39a8d3e"),
            &key,
            &hex::from_hex("12270000635593b03fee033d0672f9afddf9124de9e77df6251806cba93482e4c9e6e06e7d44e4c4baae821aff91af44789689faaee9bdfc7b2df8c08709afe57396c4638ceaa0dc30114f82447e81d3b53edc423b32660c43a5b8ad057b64500000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000007dada0920c4973913229e0f881aec7b9db0c392d34f52fb0995ea493ecb4c09daaf68fe9554ec7a59c03e4035952b220b47a8d06aad71134110d8c44948901f8"),
        );
        assert_eq!(
            result,
            hex::from_hex("c6d211349fc10cda6983276250b09f4be9b39f533b5d314b732b51a6dd72234dab4224209992c894e0e4c9f30249f1dbbd1630a27b98f2f92a53c00baabbd46f380bd35f417e5ec2edb43f7644b5c81af011d736eb369265e848b553ae5e6350dd5695efc72bde0e35f3c3fc827b91eb97cf1efdbff12269b9c33f81645adebc89ed167edc19d285237a754bf629aa358ed08498863b2aec8b7139001627bbe8bdef239474a5a43e664d278f39e72d694a206d7b838fd40868a71c4bfbffa38b7679faa502b7795cbe5ae1bd05ca7eb01ff5b05107265fd39bd5b4e19d392b735a3b0b5b21473062981bff86ff9084a7b594775e3127c05fd454e19f794a4ab4")
        );
    }
}
