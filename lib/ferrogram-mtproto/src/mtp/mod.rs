// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The message layer of the protocol: turning zero or more outgoing
//! requests into a single payload for the transport, and breaking incoming
//! payloads into their individual consequences.
//!
//! Separate types exist for the [`Plain`] and [`Encrypted`] modes, since
//! plain messages are only used briefly during the key exchange and carry
//! almost no state.
mod encrypted;
mod plain;

use std::fmt;

pub use encrypted::{Builder, Encrypted};
use ferrogram_crypto as crypto;
use ferrogram_tl::{deserialize, types};
pub use plain::Plain;

use crate::MsgId;

/// Space to reserve in front of a packet for the largest transport header
/// (the obfuscation preamble followed by the inner transport's prefix).
pub const MAX_TRANSPORT_HEADER_LEN: usize = 64 + 8;

/// `auth_key_id` (8 bytes) plus `msg_key` (16 bytes).
pub const ENCRYPTED_ENVELOPE_LEN: usize = 8 + 16;

/// `salt` (8 bytes) plus `session_id` (8 bytes).
pub const SALT_SESSION_HEADER_LEN: usize = 8 + 8;

/// A message header (`msg_id`, `seq_no`, `bytes`) followed by the container
/// constructor and its vector length.
pub const MESSAGE_CONTAINER_HEADER_LEN: usize = (8 + 4 + 4) + (4 + 4);

/// `auth_key_id` (8 bytes), `msg_id` (8 bytes) and length (4 bytes).
pub const PLAIN_PACKET_HEADER_LEN: usize = 8 + 8 + 4;

/// A `bad_msg_notification` (or `bad_server_salt`) received for one of our
/// messages.
#[derive(Clone, Debug, PartialEq)]
pub struct BadMessage {
    /// Identifier of the outgoing message that caused the notification.
    pub msg_id: MsgId,
    /// Status code of the notification.
    pub code: i32,
}

impl BadMessage {
    /// Human-readable description of the status code, from the
    /// [service messages documentation].
    ///
    /// [service messages documentation]: https://core.telegram.org/mtproto/service_messages_about_messages
    pub fn description(&self) -> &'static str {
        match self.code {
            16 => "msg_id too low",
            17 => "msg_id too high",
            18 => "incorrect two lower order msg_id bits; this is a bug",
            19 => "container msg_id equals an earlier msg_id; this is a bug",
            20 => "message too old",
            32 => "msg_seqno too low",
            33 => "msg_seqno too high",
            34 => "even msg_seqno expected, odd received; this may be a bug",
            35 => "odd msg_seqno expected, even received; this may be a bug",
            48 => "incorrect server salt",
            64 => "invalid container; this is likely a bug",
            _ => "unknown explanation; please report this issue",
        }
    }

    /// Whether the offending message can simply be sent again.
    ///
    /// The protocol state was already adjusted (time offset or salt) by the
    /// time this notification is surfaced, so a retry should go through.
    pub fn retryable(&self) -> bool {
        [16, 17, 48].contains(&self.code)
    }

    /// Whether the connection itself should be considered broken.
    pub fn fatal(&self) -> bool {
        !self.retryable() && ![32, 33].contains(&self.code)
    }
}

/// One consequence of deserializing a payload received from the server.
#[derive(Debug)]
pub enum Incoming {
    /// Response body for a previously-sent RPC.
    RpcResult { msg_id: MsgId, body: Vec<u8> },

    /// Error in place of a response for a previously-sent RPC.
    RpcError {
        msg_id: MsgId,
        error: types::RpcError,
    },

    /// The server rejected one of our messages.
    BadMessage(BadMessage),

    /// An `Updates`-like body found inside the response to one of our own
    /// requests. These change the update state like any other update would.
    OwnUpdate { msg_id: MsgId, update: Vec<u8> },

    /// An `Updates` body pushed by the server on its own initiative.
    Update(Vec<u8>),

    /// The server opened a new session for us. Updates may have been
    /// dropped while it did, so the upper layer should fetch the
    /// difference.
    NewSession,

    /// The response referencing a message failed to be deserialized.
    Failure {
        msg_id: MsgId,
        error: DeserializeError,
    },
}

/// The error type for the deserialization of server payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum DeserializeError {
    /// The server's authorization key did not match our expectations.
    BadAuthKey { got: i64, expected: i64 },

    /// The server's message identifier did not match our expectations.
    BadMessageId { got: i64 },

    /// The server's message length was not strictly positive.
    NegativeMessageLength { got: i32 },

    /// The server's message length was past the end of the buffer.
    TooLongMessageLength { got: usize, max_length: usize },

    /// The received buffer is too small to contain a valid message.
    MessageBufferTooSmall,

    /// The envelope was addressed to a different session.
    SessionIdMismatch { got: i64, expected: i64 },

    /// The server sent compressed data that failed to decompress.
    DecompressionFailed,

    /// A constructor identifier did not match any known type.
    UnexpectedConstructor { id: u32 },

    /// Decrypting the envelope failed.
    DecryptionError(crypto::Error),
}

impl std::error::Error for DeserializeError {}

impl fmt::Display for DeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BadAuthKey { got, expected } => {
                write!(f, "bad server auth key (got {got}, expected {expected})")
            }
            Self::BadMessageId { got } => write!(f, "bad server message id (got {got})"),
            Self::NegativeMessageLength { got } => {
                write!(f, "bad server message length (got {got})")
            }
            Self::TooLongMessageLength { got, max_length } => write!(
                f,
                "bad server message length (got {got}, expected at most {max_length})"
            ),
            Self::MessageBufferTooSmall => {
                write!(f, "server payload too small to fit a valid message")
            }
            Self::SessionIdMismatch { got, expected } => {
                write!(f, "envelope for session {got}, but ours is {expected}")
            }
            Self::DecompressionFailed => write!(f, "failed to decompress server data"),
            Self::UnexpectedConstructor { id } => write!(f, "unexpected constructor: {id:08x}"),
            Self::DecryptionError(ref error) => write!(f, "failed to decrypt message: {error}"),
        }
    }
}

impl From<deserialize::Error> for DeserializeError {
    fn from(error: deserialize::Error) -> Self {
        match error {
            deserialize::Error::UnexpectedEof => Self::MessageBufferTooSmall,
            deserialize::Error::UnexpectedConstructor { id } => Self::UnexpectedConstructor { id },
        }
    }
}

impl From<crypto::Error> for DeserializeError {
    fn from(error: crypto::Error) -> Self {
        Self::DecryptionError(error)
    }
}

/// The interface shared by the plain and encrypted message layers.
pub trait Mtp {
    /// Serializes one request into the buffer, to be sent within the next
    /// payload. The same buffer must be reused until [`Mtp::finalize`].
    ///
    /// Returns the message identifier assigned to the request, or `None`
    /// if the buffer cannot hold more requests.
    ///
    /// # Panics
    ///
    /// Panics if the request length is not padded to 4 bytes, or if it is
    /// large enough to never fit in a packet (roughly 1MB).
    fn push(&mut self, buffer: &mut crypto::HeadroomBuffer<u8>, request: &[u8]) -> Option<MsgId>;

    /// Completes the payload, leaving in the buffer exactly the bytes the
    /// transport should frame. The buffer may be left empty when there is
    /// nothing to send.
    ///
    /// Returns the identifier of the outermost message when a payload was
    /// produced: the container's if one was used, the single message's
    /// otherwise.
    fn finalize(&mut self, buffer: &mut crypto::HeadroomBuffer<u8>) -> Option<MsgId>;

    /// Breaks one incoming payload into its consequences.
    fn deserialize(&mut self, payload: &[u8]) -> Result<Vec<Incoming>, DeserializeError>;

    /// Forgets connection-specific state (the session, not the key), so
    /// the instance can be reused over a fresh transport.
    fn reset(&mut self);
}
