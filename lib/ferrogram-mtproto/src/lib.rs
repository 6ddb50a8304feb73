// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Implementation of the [Mobile Transport Protocol]: the TCP framings that
//! carry packets, the plain and encrypted message layers with their message
//! identifiers and acknowledgements, and the authorization-key handshake.
//!
//! [Mobile Transport Protocol]: https://core.telegram.org/mtproto

pub mod handshake;
mod message;
pub mod mtp;
pub mod transport;

/// A Mobile Transport Protocol message identifier.
///
/// Clients produce even values anchored to the current time; responses from
/// the server refer back to these.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MsgId(pub i64);

/// The messages above the transport level always carry at least an
/// identifier of 8 bytes, followed by a 4-byte length or constructor,
/// plus the 8-byte key or salt prefix.
pub(crate) fn check_message_buffer(payload: &[u8]) -> Result<(), mtp::DeserializeError> {
    if payload.len() < 20 {
        Err(mtp::DeserializeError::MessageBufferTooSmall)
    } else {
        Ok(())
    }
}
