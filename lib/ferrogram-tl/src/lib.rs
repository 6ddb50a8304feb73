// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rust definitions for the Type Language constructors and functions that
//! the ferrogram core needs to speak with Telegram, in the form of `struct`
//! and `enum`. All of them implement [`Serializable`], and the types also
//! implement [`Deserializable`].
//!
//! The full api schema is maintained by a code generator that lives out of
//! tree. This crate is the hand-maintained subset the core consumes: the
//! complete `mtproto` service schema, the authorization-key handshake, and
//! the api constructors involved in connection setup, update handling and
//! datacenter migration. Api types only carry the fields the core reads;
//! the remaining fields are dropped by the generator configuration.
pub mod deserialize;
pub mod enums;
pub mod functions;
mod serialize;
pub mod types;

pub use deserialize::{Cursor, Deserializable};
pub use serialize::Serializable;

/// The schema layer the api subset of this catalogue was cut from.
pub const LAYER: i32 = 158;

/// This struct represents the concrete type of a vector, that is,
/// `vector` as opposed to the type `Vector`. This bare type is less
/// common, so instead of creating a enum for `Vector` wrapping `vector`
/// as Rust's `Vec`, a new-type for `vector` is used instead.
#[derive(Clone, Debug, PartialEq)]
pub struct RawVec<T>(pub Vec<T>);

/// This struct represents an unparsed blob, which should not be interpreted
/// as a byte string. Used by functions returning generic objects which pass
/// the underlying result through without any modification.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob(pub Vec<u8>);

impl From<Vec<u8>> for Blob {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

/// Anything implementing this trait is identifiable by both ends
/// (client-server) when performing Remote Procedure Calls (RPC) and
/// transmission of objects.
pub trait Identifiable {
    /// The unique identifier for the type.
    const CONSTRUCTOR_ID: u32;
}

/// Structures implementing this trait indicate that they are suitable for
/// use to perform Remote Procedure Calls (RPC), and know what the type of
/// the response will be.
pub trait RemoteCall: Serializable {
    /// The type of the "return" value coming from the other end of the
    /// connection.
    type Return: Deserializable;
}

/// Best-effort name for a given constructor identifier, for use in logs.
pub fn name_for_id(id: u32) -> &'static str {
    match id {
        0x00f49ca0 => "updates.difference",
        0x05162463 => "resPQ",
        0x27bcbbfc => "inputPeerChannel",
        0x0d91a548 => "users.getUsers",
        0x03173d78 => "updates.getChannelDifference",
        0x04deb57d => "msgs_state_info",
        0x0949d9dc => "future_salt",
        0x108d941f => "updateChannelTooLong",
        0x1cb5c415 => "vector",
        0x1b3f4df7 => "updateEditChannelMessage",
        0x1f2b0afd => "updateNewMessage",
        0x2064674e => "updates.channelDifference",
        0x2144ca19 => "rpc_error",
        0x25939651 => "updates.getDifference",
        0x276d3ec6 => "msg_detailed_info",
        0x29562865 => "chatEmpty",
        0x2b085862 => "messageService",
        0x2ea2c0d4 => "auth.authorization",
        0x2f2f21bf => "updateReadHistoryOutbox",
        0x313bc7f8 => "updateShortMessage",
        0x3072cfa1 => "gzip_packed",
        0x3354678f => "updatePtsChanged",
        0x347773c5 => "pong",
        0x35a95cb9 => "inputPeerChat",
        0x36c6019a => "peerChat",
        0x38116ee0 => "message",
        0x3bcbf734 => "dh_gen_ok",
        0x3e11affb => "updates.channelDifferenceEmpty",
        0x3e72ba19 => "auth.logOut",
        0x41cbf256 => "chat",
        0x46dc1fb9 => "dh_gen_retry",
        0x4afe8f6d => "updates.differenceTooLong",
        0x4d6deea5 => "updateShortChatMessage",
        0x58e4a740 => "rpc_drop_answer",
        0x59511722 => "peerUser",
        0x5d75a138 => "updates.differenceEmpty",
        0x5e2ad36e => "rpc_answer_unknown",
        0x62ba04d9 => "updateNewChannelMessage",
        0x62d350c9 => "destroy_session_none",
        0x62d6b459 => "msgs_ack",
        0x635b4c09 => "updateChannel",
        0x6592a1a7 => "chatForbidden",
        0x6643b654 => "client_DH_inner_data",
        0x725b04c3 => "updatesCombined",
        0x73f1f8dc => "msg_container",
        0x74ae4240 => "updates",
        0x78d4dec1 => "updateShort",
        0x79cb045d => "server_DH_params_fail",
        0x7abe77ec => "ping",
        0x7d861a08 => "msg_resend_req",
        0x7da07ec9 => "inputPeerSelf",
        0x7f077ad9 => "contacts.resolvedPeer",
        0x7f3b18ea => "inputPeerEmpty",
        0x809db6df => "msg_new_detailed_info",
        0x83c95aec => "p_q_inner_data",
        0x8cc0d131 => "msgs_all_info",
        0x8e5e9873 => "updateDcOptions",
        0x90a6ca84 => "messageEmpty",
        0x9015e101 => "updateShortSentMessage",
        0x922e6e10 => "updateReadChannelInbox",
        0x9299359f => "http_wait",
        0x94d42ee7 => "channelMessagesFilterEmpty",
        0x997275b5 => "boolTrue",
        0x9c974fdf => "updateReadHistoryInbox",
        0x9ec20908 => "new_session_created",
        0xa20db0e5 => "updateDeleteMessages",
        0xa2426b19 => "peerChannel",
        0xa43ad8b7 => "rpc_answer_dropped",
        0xa4bcc6fe => "updates.channelDifferenceTooLong",
        0xa56c2a3e => "updates.state",
        0xa57a7dad => "auth.importAuthorization",
        0xa69dae02 => "dh_gen_fail",
        0xa7eff811 => "bad_msg_notification",
        0xa8fb1981 => "updates.differenceSlice",
        0xaca9fd2e => "invokeWithTakeout",
        0xae500895 => "future_salts",
        0xb434e2b8 => "auth.exportedAuthorization",
        0xb5890dba => "server_DH_inner_data",
        0xb921bd04 => "get_future_salts",
        0xb98886cf => "inputUserEmpty",
        0xbc799737 => "boolFalse",
        0xbe7e8ef1 => "req_pq_multi",
        0xc1cd5ea9 => "initConnection",
        0xc32d5b12 => "updateDeleteChannelMessages",
        0xc3a2835f => "auth.loggedOut",
        0xc4870a49 => "updateBotStopped",
        0xc4f9186b => "help.getConfig",
        0xcc1a241e => "config",
        0xcd78e586 => "rpc_answer_dropped_running",
        0xd0e8075c => "server_DH_params_ok",
        0xd31a961e => "channel",
        0xd3bc4b7a => "userEmpty",
        0xd58a08c6 => "dialog",
        0xd712e4be => "req_DH_params",
        0xda69fb52 => "msgs_state_req",
        0xda9b0d0d => "invokeWithLayer",
        0xdde8a54c => "inputPeerUser",
        0xe22045fc => "destroy_session_ok",
        0xe317af7e => "updatesTooLong",
        0xe40370a3 => "updateEditMessage",
        0xe5bfffcd => "auth.exportAuthorization",
        0xe7512126 => "destroy_session",
        0xedab447b => "bad_server_salt",
        0xedd4882a => "updates.getState",
        0xee8c1e86 => "inputChannelEmpty",
        0xf21158c6 => "inputUser",
        0xf35aec28 => "inputChannel",
        0xf35c6d01 => "rpc_result",
        0xf3427b8c => "ping_delay_disconnect",
        0xf5045f1f => "set_client_DH_params",
        0xf7c1b13f => "inputUserSelf",
        0xf93ccba3 => "contacts.resolveUsername",
        0xedcdc05b => "user",
        0x17d493d5 => "channelForbidden",
        0x18b7a10d => "dcOption",
        0xe06046b2 => "msg_copy",
        _ => "(unknown)",
    }
}
