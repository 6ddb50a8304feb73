// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::{fmt, io};

use ferrogram_mtproto::{handshake, mtp, transport};
use ferrogram_tl as tl;

/// This error occurs when reading from the network fails.
#[derive(Debug)]
pub enum ReadError {
    /// Standard I/O error.
    Io(io::Error),
    /// Error propagated from the underlying [`transport`].
    Transport(transport::Error),
    /// The incoming payload failed to be deserialized.
    Deserialize(mtp::DeserializeError),
}

impl std::error::Error for ReadError {}

impl Clone for ReadError {
    fn clone(&self) -> Self {
        match self {
            Self::Io(e) => Self::Io(
                e.raw_os_error()
                    .map(io::Error::from_raw_os_error)
                    .unwrap_or_else(|| io::Error::new(e.kind(), e.to_string())),
            ),
            Self::Transport(e) => Self::Transport(e.clone()),
            Self::Deserialize(e) => Self::Deserialize(e.clone()),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "read error, IO failed: {err}"),
            Self::Transport(err) => write!(f, "read error, transport-level: {err}"),
            Self::Deserialize(err) => write!(f, "read error, bad response: {err}"),
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<transport::Error> for ReadError {
    fn from(error: transport::Error) -> Self {
        Self::Transport(error)
    }
}

impl From<mtp::DeserializeError> for ReadError {
    fn from(error: mtp::DeserializeError) -> Self {
        Self::Deserialize(error)
    }
}

/// The error type reported by the server when a request is misused.
#[derive(Clone, Debug, PartialEq)]
pub struct RpcError {
    /// A numerical value similar to HTTP status codes.
    pub code: i32,

    /// The ASCII error name, in screaming snake case, with any digit word
    /// moved out into [`RpcError::value`] (`FLOOD_WAIT_31` becomes
    /// `FLOOD_WAIT` with a value of 31).
    pub name: String,

    /// The integer value that was embedded in the name, if any.
    pub value: Option<u32>,

    /// The constructor identifier of the request that triggered this
    /// error. Absent on artificially-constructed errors.
    pub caused_by: Option<u32>,
}

impl std::error::Error for RpcError {}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc error {}: {}", self.code, self.name)?;
        if let Some(caused_by) = self.caused_by {
            write!(f, " caused by {}", tl::name_for_id(caused_by))?;
        }
        if let Some(value) = self.value {
            write!(f, " (value: {value})")?;
        }
        Ok(())
    }
}

impl From<tl::types::RpcError> for RpcError {
    fn from(error: tl::types::RpcError) -> Self {
        // Pull the first numeric word out of the message, if any.
        if let Some((value, parsed_value)) = error
            .error_message
            .split(|c: char| !c.is_ascii_digit())
            .flat_map(|word| word.parse::<u32>().map(|parsed| (word, parsed)))
            .next()
        {
            let mut to_remove = String::with_capacity(1 + value.len());
            to_remove.push('_');
            to_remove.push_str(value);
            Self {
                code: error.error_code,
                name: error.error_message.replace(&to_remove, ""),
                value: Some(parsed_value),
                caused_by: None,
            }
        } else {
            Self {
                code: error.error_code,
                name: error.error_message,
                value: None,
                caused_by: None,
            }
        }
    }
}

impl RpcError {
    /// Matches on the name of the RPC error (case-sensitive).
    ///
    /// A single leading or trailing asterisk is allowed, turning the match
    /// into an ends-with or starts-with check respectively.
    pub fn is(&self, rpc_error: &str) -> bool {
        if let Some(prefix) = rpc_error.strip_suffix('*') {
            self.name.starts_with(prefix)
        } else if let Some(suffix) = rpc_error.strip_prefix('*') {
            self.name.ends_with(suffix)
        } else {
            self.name == rpc_error
        }
    }

    /// Attach the constructor identifier of the request that caused this
    /// error.
    pub fn with_caused_by(mut self, constructor_id: u32) -> Self {
        self.caused_by = Some(constructor_id);
        self
    }
}

/// This error occurs when a remote procedure call was unsuccessful.
#[derive(Debug)]
pub enum InvocationError {
    /// The server could not process the request.
    Rpc(RpcError),

    /// Standard I/O error while the request was in flight. The connection
    /// is gone; a new one may simply succeed.
    Io(io::Error),

    /// The response failed to be deserialized.
    Deserialize(mtp::DeserializeError),

    /// Error propagated from the underlying [`transport`].
    ///
    /// [`transport::Error::BadStatus`] with 404 commonly means the server
    /// no longer knows our authorization key.
    Transport(transport::Error),

    /// The request was dropped before a response arrived, either because
    /// it was cancelled or because the connection runner is gone.
    Dropped,

    /// The request named a datacenter the session knows nothing about.
    InvalidDc,

    /// No response arrived within the configured time, even after the
    /// configured number of retries.
    Timeout,

    /// Connecting to a new datacenter on demand failed during the
    /// authorization key generation.
    Authentication(handshake::Error),
}

impl std::error::Error for InvocationError {}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rpc(err) => write!(f, "request error: {err}"),
            Self::Io(err) => write!(f, "request error: {err}"),
            Self::Deserialize(err) => write!(f, "request error: {err}"),
            Self::Transport(err) => write!(f, "request error: {err}"),
            Self::Dropped => write!(f, "request error: dropped (cancelled)"),
            Self::InvalidDc => write!(f, "request error: invalid dc"),
            Self::Timeout => write!(f, "request error: timed out"),
            Self::Authentication(err) => write!(f, "request error: {err}"),
        }
    }
}

impl From<ReadError> for InvocationError {
    fn from(error: ReadError) -> Self {
        match error {
            ReadError::Io(error) => Self::Io(error),
            ReadError::Transport(error) => Self::Transport(error),
            ReadError::Deserialize(error) => Self::Deserialize(error),
        }
    }
}

impl From<mtp::DeserializeError> for InvocationError {
    fn from(error: mtp::DeserializeError) -> Self {
        Self::Deserialize(error)
    }
}

impl From<tl::deserialize::Error> for InvocationError {
    fn from(error: tl::deserialize::Error) -> Self {
        Self::Deserialize(error.into())
    }
}

impl From<transport::Error> for InvocationError {
    fn from(error: transport::Error) -> Self {
        Self::Transport(error)
    }
}

impl From<io::Error> for InvocationError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<handshake::Error> for InvocationError {
    fn from(error: handshake::Error) -> Self {
        Self::Authentication(error)
    }
}

impl InvocationError {
    /// Matches on the name of the RPC error (case-sensitive), with the
    /// same wildcard rule as [`RpcError::is`]. Non-RPC errors never match.
    #[inline]
    pub fn is(&self, rpc_error: &str) -> bool {
        match self {
            Self::Rpc(rpc) => rpc.is(rpc_error),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_without_value() {
        assert_eq!(
            RpcError::from(tl::types::RpcError {
                error_code: 400,
                error_message: "CHAT_INVALID".into(),
            }),
            RpcError {
                code: 400,
                name: "CHAT_INVALID".into(),
                value: None,
                caused_by: None,
            }
        );
    }

    #[test]
    fn rpc_error_with_value() {
        let flood = RpcError::from(tl::types::RpcError {
            error_code: 420,
            error_message: "FLOOD_WAIT_31".into(),
        });
        assert_eq!(flood.name, "FLOOD_WAIT");
        assert_eq!(flood.value, Some(31));

        let interdc = RpcError::from(tl::types::RpcError {
            error_code: 500,
            error_message: "INTERDC_2_CALL_ERROR".into(),
        });
        assert_eq!(interdc.name, "INTERDC_CALL_ERROR");
        assert_eq!(interdc.value, Some(2));
    }

    #[test]
    fn rpc_error_matching() {
        let err = RpcError {
            code: 400,
            name: "PHONE_CODE_INVALID".into(),
            value: None,
            caused_by: None,
        };
        assert!(err.is("PHONE_CODE_INVALID"));
        assert!(err.is("PHONE_CODE_*"));
        assert!(err.is("*_INVALID"));
        assert!(!err.is("SESSION_PASSWORD_NEEDED"));
    }
}
