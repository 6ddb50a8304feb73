// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The handful of service constructors that wrap other messages and thus
//! cannot come out of a schema catalogue: the bare `message` with its
//! identifier and sequence number, containers, wrapped RPC results, and
//! gzip-packed payloads.
use flate2::write::{GzDecoder, GzEncoder};
use flate2::Compression;
use std::io::Write;

use ferrogram_tl::{deserialize, Cursor, Deserializable, Identifiable, Serializable};

use crate::mtp::DeserializeError;

/// `message msg_id:long seqno:int bytes:int body:Object = Message;`
///
/// Everything that travels inside an encrypted envelope is one of these,
/// either alone or stacked inside a [`MessageContainer`].
pub(crate) struct Message {
    pub msg_id: i64,
    pub seq_no: i32,
    pub body: Vec<u8>,
}

impl Message {
    // msg_id (8 bytes) + seq_no (4 bytes) + bytes (4 bytes)
    pub const SIZE_OVERHEAD: usize = 16;

    /// Peek the constructor identifier of the body.
    pub fn constructor_id(&self) -> Result<u32, deserialize::Error> {
        u32::from_bytes(&self.body)
    }

    /// Content-related messages carry an odd sequence number and must be
    /// acknowledged.
    pub fn requires_ack(&self) -> bool {
        self.seq_no % 2 == 1
    }
}

impl Serializable for Message {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.msg_id.serialize(buf);
        self.seq_no.serialize(buf);
        (self.body.len() as i32).serialize(buf);
        buf.extend(self.body.iter().copied());
    }
}

impl Deserializable for Message {
    fn deserialize(buf: &mut Cursor) -> Result<Self, deserialize::Error> {
        let msg_id = i64::deserialize(buf)?;
        let seq_no = i32::deserialize(buf)?;

        let len = i32::deserialize(buf)?;
        if len < 0 || len as usize > MessageContainer::MAXIMUM_SIZE {
            return Err(deserialize::Error::UnexpectedEof);
        }
        let mut body = vec![0u8; len as usize];
        buf.read_exact(&mut body)?;

        Ok(Self {
            msg_id,
            seq_no,
            body,
        })
    }
}

/// `msg_container#73f1f8dc messages:vector<message> = MessageContainer;`
pub(crate) struct MessageContainer {
    pub messages: Vec<Message>,
}

impl MessageContainer {
    // constructor id (4 bytes) + bare vector length (4 bytes)
    pub const SIZE_OVERHEAD: usize = 8;

    /// Maximum size in bytes of the payload. The server closes the
    /// connection on larger ones.
    pub const MAXIMUM_SIZE: usize = 1_044_456 - Self::SIZE_OVERHEAD;

    /// Maximum amount of messages in a single container. The server
    /// responds with bad message code 64 (invalid container) past this.
    pub const MAXIMUM_LENGTH: usize = 100;
}

impl Identifiable for MessageContainer {
    #[allow(clippy::unreadable_literal)]
    const CONSTRUCTOR_ID: u32 = 0x73f1f8dc;
}

impl Deserializable for MessageContainer {
    fn deserialize(buf: &mut Cursor) -> Result<Self, deserialize::Error> {
        let constructor_id = u32::deserialize(buf)?;
        if constructor_id != Self::CONSTRUCTOR_ID {
            return Err(deserialize::Error::UnexpectedConstructor { id: constructor_id });
        }

        let len = i32::deserialize(buf)?.max(0) as usize;
        let mut messages = Vec::with_capacity(len.min(Self::MAXIMUM_LENGTH));
        for _ in 0..len {
            messages.push(Message::deserialize(buf)?);
        }

        Ok(Self { messages })
    }
}

/// `msg_copy#e06046b2 orig_message:Message = MessageCopy;`
///
/// Never produced nor consumed, but its identifier must be recognized so
/// it is not mistaken for an update.
pub(crate) const MSG_COPY_CONSTRUCTOR_ID: u32 = 0xe06046b2;

/// `rpc_result#f35c6d01 req_msg_id:long result:Object = RpcResult;`
pub(crate) struct RpcResult {
    pub req_msg_id: i64,
    pub result: Vec<u8>,
}

impl RpcResult {
    /// Peek the constructor identifier of the result.
    pub fn inner_constructor(&self) -> Result<u32, deserialize::Error> {
        u32::from_bytes(&self.result)
    }
}

impl Identifiable for RpcResult {
    #[allow(clippy::unreadable_literal)]
    const CONSTRUCTOR_ID: u32 = 0xf35c6d01;
}

impl Deserializable for RpcResult {
    fn deserialize(buf: &mut Cursor) -> Result<Self, deserialize::Error> {
        let constructor_id = u32::deserialize(buf)?;
        if constructor_id != Self::CONSTRUCTOR_ID {
            return Err(deserialize::Error::UnexpectedConstructor { id: constructor_id });
        }

        let req_msg_id = i64::deserialize(buf)?;
        let mut result = Vec::new();
        buf.read_to_end(&mut result);

        Ok(Self { req_msg_id, result })
    }
}

/// `gzip_packed#3072cfa1 packed_data:string = Object;`
pub(crate) struct GzipPacked {
    pub packed_data: Vec<u8>,
}

impl GzipPacked {
    pub fn new(unpacked_data: &[u8]) -> Self {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        // In-memory writes cannot fail.
        encoder.write_all(unpacked_data).unwrap();
        Self {
            packed_data: encoder.finish().unwrap(),
        }
    }

    pub fn decompress(&self) -> Result<Vec<u8>, DeserializeError> {
        let mut decoder = GzDecoder::new(Vec::new());
        decoder
            .write_all(&self.packed_data)
            .map_err(|_| DeserializeError::DecompressionFailed)?;
        decoder
            .finish()
            .map_err(|_| DeserializeError::DecompressionFailed)
    }
}

impl Identifiable for GzipPacked {
    #[allow(clippy::unreadable_literal)]
    const CONSTRUCTOR_ID: u32 = 0x3072cfa1;
}

impl Serializable for GzipPacked {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.packed_data.serialize(buf);
    }
}

impl Deserializable for GzipPacked {
    fn deserialize(buf: &mut Cursor) -> Result<Self, deserialize::Error> {
        let constructor_id = u32::deserialize(buf)?;
        if constructor_id != Self::CONSTRUCTOR_ID {
            return Err(deserialize::Error::UnexpectedConstructor { id: constructor_id });
        }

        Ok(Self {
            packed_data: Vec::<u8>::deserialize(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_roundtrip() {
        let message = Message {
            msg_id: 0x0102030405060708,
            seq_no: 3,
            body: b"data".to_vec(),
        };
        let bytes = message.to_bytes();
        assert_eq!(bytes.len(), Message::SIZE_OVERHEAD + 4);

        let back = Message::from_bytes(&bytes).unwrap();
        assert_eq!(back.msg_id, message.msg_id);
        assert_eq!(back.seq_no, message.seq_no);
        assert_eq!(back.body, message.body);
        assert!(back.requires_ack());
    }

    #[test]
    fn gzip_roundtrip() {
        let data = b"highly compressible ".repeat(64);
        let packed = GzipPacked::new(&data);
        assert!(packed.packed_data.len() < data.len());
        assert_eq!(packed.decompress().unwrap(), data);
    }

    #[test]
    fn gzip_rejects_garbage() {
        let packed = GzipPacked {
            packed_data: b"not actually gzip".to_vec(),
        };
        assert!(matches!(
            packed.decompress(),
            Err(DeserializeError::DecompressionFailed)
        ));
    }
}
