// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use ferrogram_crypto::HeadroomBuffer;
use ferrogram_tl::{Cursor, Deserializable, Serializable};

use super::{DeserializeError, Incoming, Mtp};
use crate::MsgId;

/// The [unencrypted message] layer, used for the requests that negotiate
/// the authorization key (there is nothing to encrypt with before that).
///
/// Keeping it separate from [`super::Encrypted`] means the encrypted layer
/// can require a key unconditionally, and the plain layer can skip all of
/// the session bookkeeping: one request in flight, no acknowledgements, no
/// salts.
///
/// [unencrypted message]: https://core.telegram.org/mtproto/description#unencrypted-message
#[non_exhaustive]
pub struct Plain;

#[allow(clippy::new_without_default)]
impl Plain {
    pub fn new() -> Self {
        Self
    }
}

impl Mtp for Plain {
    /// Only a single request fits in a plain payload; further pushes return
    /// `None` until the buffer is finalized and sent.
    fn push(&mut self, buffer: &mut HeadroomBuffer<u8>, request: &[u8]) -> Option<MsgId> {
        if !buffer.is_empty() {
            return None;
        }

        0i64.serialize(buffer); // auth_key_id = 0
        // A valid msg_id is not actually required before the key exchange
        // completes; zero is accepted.
        0i64.serialize(buffer); // msg_id
        (request.len() as i32).serialize(buffer);
        buffer.extend(request.iter().copied());

        Some(MsgId(0))
    }

    fn finalize(&mut self, buffer: &mut HeadroomBuffer<u8>) -> Option<MsgId> {
        if buffer.is_empty() {
            None
        } else {
            Some(MsgId(0))
        }
    }

    fn deserialize(&mut self, payload: &[u8]) -> Result<Vec<Incoming>, DeserializeError> {
        crate::check_message_buffer(payload)?;

        let mut buf = Cursor::from_slice(payload);
        let auth_key_id = i64::deserialize(&mut buf)?;
        if auth_key_id != 0 {
            return Err(DeserializeError::BadAuthKey {
                got: auth_key_id,
                expected: 0,
            });
        }

        // Our local clock cannot be validated against yet, but server
        // message identifiers are known to be `1 (mod 4)` for responses.
        let msg_id = i64::deserialize(&mut buf)?;
        if msg_id <= 0 || (msg_id % 4) != 1 {
            return Err(DeserializeError::BadMessageId { got: msg_id });
        }

        let len = i32::deserialize(&mut buf)?;
        if len <= 0 {
            return Err(DeserializeError::NegativeMessageLength { got: len });
        }
        if (20 + len) as usize > payload.len() {
            return Err(DeserializeError::TooLongMessageLength {
                got: len as usize,
                max_length: payload.len() - 20,
            });
        }

        Ok(vec![Incoming::RpcResult {
            msg_id: MsgId(0),
            body: payload[20..20 + len as usize].to_vec(),
        }])
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_writes_plain_header() {
        let mut mtp = Plain::new();
        let mut buffer = HeadroomBuffer::with_capacity(0, 0);

        assert_eq!(mtp.push(&mut buffer, b"Hey!"), Some(MsgId(0)));
        assert_eq!(buffer.len(), 24);
        assert_eq!(&buffer[..8], &[0; 8]); // auth_key_id
        assert_eq!(&buffer[8..16], &[0; 8]); // msg_id
        assert_eq!(&buffer[16..20], &[4, 0, 0, 0]);
        assert_eq!(&buffer[20..], b"Hey!");

        // A second request does not fit.
        assert_eq!(mtp.push(&mut buffer, b"Bye!"), None);
        assert_eq!(mtp.finalize(&mut buffer), Some(MsgId(0)));
    }

    #[test]
    fn deserialize_checks_header() {
        let mut mtp = Plain::new();

        let mut payload = Vec::new();
        0i64.serialize(&mut payload);
        5i64.serialize(&mut payload); // 5 % 4 == 1
        4i32.serialize(&mut payload);
        payload.extend(b"data");

        let result = mtp.deserialize(&payload).unwrap();
        assert!(matches!(
            &result[..],
            [Incoming::RpcResult { msg_id: MsgId(0), body }] if body == b"data"
        ));
    }

    #[test]
    fn deserialize_rejects_bad_auth_key_id() {
        let mut mtp = Plain::new();

        let mut payload = Vec::new();
        1i64.serialize(&mut payload);
        5i64.serialize(&mut payload);
        4i32.serialize(&mut payload);
        payload.extend(b"data");

        assert_eq!(
            mtp.deserialize(&payload).unwrap_err(),
            DeserializeError::BadAuthKey {
                got: 1,
                expected: 0
            }
        );
    }

    #[test]
    fn deserialize_rejects_bad_lengths() {
        let mut mtp = Plain::new();

        let mut payload = Vec::new();
        0i64.serialize(&mut payload);
        5i64.serialize(&mut payload);
        (-4i32).serialize(&mut payload);
        payload.extend(b"data");

        assert_eq!(
            mtp.deserialize(&payload).unwrap_err(),
            DeserializeError::NegativeMessageLength { got: -4 }
        );

        let mut payload = Vec::new();
        0i64.serialize(&mut payload);
        5i64.serialize(&mut payload);
        100i32.serialize(&mut payload);
        payload.extend(b"data");

        assert_eq!(
            mtp.deserialize(&payload).unwrap_err(),
            DeserializeError::TooLongMessageLength {
                got: 100,
                max_length: 4
            }
        );
    }
}
