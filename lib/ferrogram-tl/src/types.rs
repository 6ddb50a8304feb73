// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! All of the "bare" types, each represented by a `struct`.
//!
//! Serialization writes the constructor identifier followed by the fields.
//! Deserialization reads the fields only; the identifier is consumed by the
//! "boxed" [`crate::enums`], which is where dispatch over ids happens.
#![allow(clippy::unreadable_literal)]

use crate::deserialize::Result;
use crate::{enums, Cursor, Deserializable, Identifiable, Serializable};

// ---------------------------------------------------------------------------
// mtproto service schema
// ---------------------------------------------------------------------------

/// `msgs_ack#62d6b459 msg_ids:Vector<long> = MsgsAck;`
#[derive(Clone, Debug, PartialEq)]
pub struct MsgsAck {
    pub msg_ids: Vec<i64>,
}

impl Identifiable for MsgsAck {
    const CONSTRUCTOR_ID: u32 = 0x62d6b459;
}

impl Serializable for MsgsAck {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.msg_ids.serialize(buf);
    }
}

impl Deserializable for MsgsAck {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            msg_ids: Vec::<i64>::deserialize(buf)?,
        })
    }
}

/// `bad_msg_notification#a7eff811 bad_msg_id:long bad_msg_seqno:int
/// error_code:int = BadMsgNotification;`
#[derive(Clone, Debug, PartialEq)]
pub struct BadMsgNotification {
    pub bad_msg_id: i64,
    pub bad_msg_seqno: i32,
    pub error_code: i32,
}

impl Identifiable for BadMsgNotification {
    const CONSTRUCTOR_ID: u32 = 0xa7eff811;
}

impl Serializable for BadMsgNotification {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.bad_msg_id.serialize(buf);
        self.bad_msg_seqno.serialize(buf);
        self.error_code.serialize(buf);
    }
}

impl Deserializable for BadMsgNotification {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            bad_msg_id: i64::deserialize(buf)?,
            bad_msg_seqno: i32::deserialize(buf)?,
            error_code: i32::deserialize(buf)?,
        })
    }
}

/// `bad_server_salt#edab447b bad_msg_id:long bad_msg_seqno:int error_code:int
/// new_server_salt:long = BadMsgNotification;`
#[derive(Clone, Debug, PartialEq)]
pub struct BadServerSalt {
    pub bad_msg_id: i64,
    pub bad_msg_seqno: i32,
    pub error_code: i32,
    pub new_server_salt: i64,
}

impl Identifiable for BadServerSalt {
    const CONSTRUCTOR_ID: u32 = 0xedab447b;
}

impl Serializable for BadServerSalt {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.bad_msg_id.serialize(buf);
        self.bad_msg_seqno.serialize(buf);
        self.error_code.serialize(buf);
        self.new_server_salt.serialize(buf);
    }
}

impl Deserializable for BadServerSalt {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            bad_msg_id: i64::deserialize(buf)?,
            bad_msg_seqno: i32::deserialize(buf)?,
            error_code: i32::deserialize(buf)?,
            new_server_salt: i64::deserialize(buf)?,
        })
    }
}

/// `msgs_state_req#da69fb52 msg_ids:Vector<long> = MsgsStateReq;`
#[derive(Clone, Debug, PartialEq)]
pub struct MsgsStateReq {
    pub msg_ids: Vec<i64>,
}

impl Identifiable for MsgsStateReq {
    const CONSTRUCTOR_ID: u32 = 0xda69fb52;
}

impl Serializable for MsgsStateReq {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.msg_ids.serialize(buf);
    }
}

impl Deserializable for MsgsStateReq {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            msg_ids: Vec::<i64>::deserialize(buf)?,
        })
    }
}

/// `msgs_state_info#04deb57d req_msg_id:long info:bytes = MsgsStateInfo;`
#[derive(Clone, Debug, PartialEq)]
pub struct MsgsStateInfo {
    pub req_msg_id: i64,
    pub info: Vec<u8>,
}

impl Identifiable for MsgsStateInfo {
    const CONSTRUCTOR_ID: u32 = 0x04deb57d;
}

impl Serializable for MsgsStateInfo {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.req_msg_id.serialize(buf);
        self.info.serialize(buf);
    }
}

impl Deserializable for MsgsStateInfo {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            req_msg_id: i64::deserialize(buf)?,
            info: Vec::<u8>::deserialize(buf)?,
        })
    }
}

/// `msgs_all_info#8cc0d131 msg_ids:Vector<long> info:bytes = MsgsAllInfo;`
#[derive(Clone, Debug, PartialEq)]
pub struct MsgsAllInfo {
    pub msg_ids: Vec<i64>,
    pub info: Vec<u8>,
}

impl Identifiable for MsgsAllInfo {
    const CONSTRUCTOR_ID: u32 = 0x8cc0d131;
}

impl Serializable for MsgsAllInfo {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.msg_ids.serialize(buf);
        self.info.serialize(buf);
    }
}

impl Deserializable for MsgsAllInfo {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            msg_ids: Vec::<i64>::deserialize(buf)?,
            info: Vec::<u8>::deserialize(buf)?,
        })
    }
}

/// `msg_detailed_info#276d3ec6 msg_id:long answer_msg_id:long bytes:int
/// status:int = MsgDetailedInfo;`
#[derive(Clone, Debug, PartialEq)]
pub struct MsgDetailedInfo {
    pub msg_id: i64,
    pub answer_msg_id: i64,
    pub bytes: i32,
    pub status: i32,
}

impl Identifiable for MsgDetailedInfo {
    const CONSTRUCTOR_ID: u32 = 0x276d3ec6;
}

impl Serializable for MsgDetailedInfo {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.msg_id.serialize(buf);
        self.answer_msg_id.serialize(buf);
        self.bytes.serialize(buf);
        self.status.serialize(buf);
    }
}

impl Deserializable for MsgDetailedInfo {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            msg_id: i64::deserialize(buf)?,
            answer_msg_id: i64::deserialize(buf)?,
            bytes: i32::deserialize(buf)?,
            status: i32::deserialize(buf)?,
        })
    }
}

/// `msg_new_detailed_info#809db6df answer_msg_id:long bytes:int status:int
/// = MsgDetailedInfo;`
#[derive(Clone, Debug, PartialEq)]
pub struct MsgNewDetailedInfo {
    pub answer_msg_id: i64,
    pub bytes: i32,
    pub status: i32,
}

impl Identifiable for MsgNewDetailedInfo {
    const CONSTRUCTOR_ID: u32 = 0x809db6df;
}

impl Serializable for MsgNewDetailedInfo {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.answer_msg_id.serialize(buf);
        self.bytes.serialize(buf);
        self.status.serialize(buf);
    }
}

impl Deserializable for MsgNewDetailedInfo {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            answer_msg_id: i64::deserialize(buf)?,
            bytes: i32::deserialize(buf)?,
            status: i32::deserialize(buf)?,
        })
    }
}

/// `msg_resend_req#7d861a08 msg_ids:Vector<long> = MsgResendReq;`
#[derive(Clone, Debug, PartialEq)]
pub struct MsgResendReq {
    pub msg_ids: Vec<i64>,
}

impl Identifiable for MsgResendReq {
    const CONSTRUCTOR_ID: u32 = 0x7d861a08;
}

impl Serializable for MsgResendReq {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.msg_ids.serialize(buf);
    }
}

impl Deserializable for MsgResendReq {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            msg_ids: Vec::<i64>::deserialize(buf)?,
        })
    }
}

/// `pong#347773c5 msg_id:long ping_id:long = Pong;`
#[derive(Clone, Debug, PartialEq)]
pub struct Pong {
    pub msg_id: i64,
    pub ping_id: i64,
}

impl Identifiable for Pong {
    const CONSTRUCTOR_ID: u32 = 0x347773c5;
}

impl Serializable for Pong {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.msg_id.serialize(buf);
        self.ping_id.serialize(buf);
    }
}

impl Deserializable for Pong {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            msg_id: i64::deserialize(buf)?,
            ping_id: i64::deserialize(buf)?,
        })
    }
}

/// `future_salt#0949d9dc valid_since:int valid_until:int salt:long
/// = FutureSalt;`
#[derive(Clone, Debug, PartialEq)]
pub struct FutureSalt {
    pub valid_since: i32,
    pub valid_until: i32,
    pub salt: i64,
}

impl Identifiable for FutureSalt {
    const CONSTRUCTOR_ID: u32 = 0x0949d9dc;
}

impl Serializable for FutureSalt {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.valid_since.serialize(buf);
        self.valid_until.serialize(buf);
        self.salt.serialize(buf);
    }
}

impl Deserializable for FutureSalt {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            valid_since: i32::deserialize(buf)?,
            valid_until: i32::deserialize(buf)?,
            salt: i64::deserialize(buf)?,
        })
    }
}

/// `future_salts#ae500895 req_msg_id:long now:int salts:vector<future_salt>
/// = FutureSalts;`
#[derive(Clone, Debug, PartialEq)]
pub struct FutureSalts {
    pub req_msg_id: i64,
    pub now: i32,
    pub salts: Vec<FutureSalt>,
}

impl Identifiable for FutureSalts {
    const CONSTRUCTOR_ID: u32 = 0xae500895;
}

impl Serializable for FutureSalts {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.req_msg_id.serialize(buf);
        self.now.serialize(buf);
        // n.b.: a bare vector of bare salts.
        (self.salts.len() as i32).serialize(buf);
        for salt in self.salts.iter() {
            salt.valid_since.serialize(buf);
            salt.valid_until.serialize(buf);
            salt.salt.serialize(buf);
        }
    }
}

impl Deserializable for FutureSalts {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let req_msg_id = i64::deserialize(buf)?;
        let now = i32::deserialize(buf)?;
        let len = i32::deserialize(buf)?;
        let salts = (0..len)
            .map(|_| FutureSalt::deserialize(buf))
            .collect::<Result<_>>()?;
        Ok(Self {
            req_msg_id,
            now,
            salts,
        })
    }
}

/// `new_session_created#9ec20908 first_msg_id:long unique_id:long
/// server_salt:long = NewSession;`
#[derive(Clone, Debug, PartialEq)]
pub struct NewSessionCreated {
    pub first_msg_id: i64,
    pub unique_id: i64,
    pub server_salt: i64,
}

impl Identifiable for NewSessionCreated {
    const CONSTRUCTOR_ID: u32 = 0x9ec20908;
}

impl Serializable for NewSessionCreated {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.first_msg_id.serialize(buf);
        self.unique_id.serialize(buf);
        self.server_salt.serialize(buf);
    }
}

impl Deserializable for NewSessionCreated {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            first_msg_id: i64::deserialize(buf)?,
            unique_id: i64::deserialize(buf)?,
            server_salt: i64::deserialize(buf)?,
        })
    }
}

/// `destroy_session_ok#e22045fc session_id:long = DestroySessionRes;`
#[derive(Clone, Debug, PartialEq)]
pub struct DestroySessionOk {
    pub session_id: i64,
}

impl Identifiable for DestroySessionOk {
    const CONSTRUCTOR_ID: u32 = 0xe22045fc;
}

impl Serializable for DestroySessionOk {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.session_id.serialize(buf);
    }
}

impl Deserializable for DestroySessionOk {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            session_id: i64::deserialize(buf)?,
        })
    }
}

/// `destroy_session_none#62d350c9 session_id:long = DestroySessionRes;`
#[derive(Clone, Debug, PartialEq)]
pub struct DestroySessionNone {
    pub session_id: i64,
}

impl Identifiable for DestroySessionNone {
    const CONSTRUCTOR_ID: u32 = 0x62d350c9;
}

impl Serializable for DestroySessionNone {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.session_id.serialize(buf);
    }
}

impl Deserializable for DestroySessionNone {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            session_id: i64::deserialize(buf)?,
        })
    }
}

/// `http_wait#9299359f max_delay:int wait_after:int max_wait:int = HttpWait;`
#[derive(Clone, Debug, PartialEq)]
pub struct HttpWait {
    pub max_delay: i32,
    pub wait_after: i32,
    pub max_wait: i32,
}

impl Identifiable for HttpWait {
    const CONSTRUCTOR_ID: u32 = 0x9299359f;
}

impl Serializable for HttpWait {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.max_delay.serialize(buf);
        self.wait_after.serialize(buf);
        self.max_wait.serialize(buf);
    }
}

impl Deserializable for HttpWait {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            max_delay: i32::deserialize(buf)?,
            wait_after: i32::deserialize(buf)?,
            max_wait: i32::deserialize(buf)?,
        })
    }
}

/// `rpc_error#2144ca19 error_code:int error_message:string = RpcError;`
#[derive(Clone, Debug, PartialEq)]
pub struct RpcError {
    pub error_code: i32,
    pub error_message: String,
}

impl Identifiable for RpcError {
    const CONSTRUCTOR_ID: u32 = 0x2144ca19;
}

impl Serializable for RpcError {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.error_code.serialize(buf);
        self.error_message.serialize(buf);
    }
}

impl Deserializable for RpcError {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            error_code: i32::deserialize(buf)?,
            error_message: String::deserialize(buf)?,
        })
    }
}

/// `rpc_answer_unknown#5e2ad36e = RpcDropAnswer;`
#[derive(Clone, Debug, PartialEq)]
pub struct RpcAnswerUnknown;

impl Identifiable for RpcAnswerUnknown {
    const CONSTRUCTOR_ID: u32 = 0x5e2ad36e;
}

impl Serializable for RpcAnswerUnknown {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for RpcAnswerUnknown {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

/// `rpc_answer_dropped_running#cd78e586 = RpcDropAnswer;`
#[derive(Clone, Debug, PartialEq)]
pub struct RpcAnswerDroppedRunning;

impl Identifiable for RpcAnswerDroppedRunning {
    const CONSTRUCTOR_ID: u32 = 0xcd78e586;
}

impl Serializable for RpcAnswerDroppedRunning {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for RpcAnswerDroppedRunning {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

/// `rpc_answer_dropped#a43ad8b7 msg_id:long seq_no:int bytes:int
/// = RpcDropAnswer;`
#[derive(Clone, Debug, PartialEq)]
pub struct RpcAnswerDropped {
    pub msg_id: i64,
    pub seq_no: i32,
    pub bytes: i32,
}

impl Identifiable for RpcAnswerDropped {
    const CONSTRUCTOR_ID: u32 = 0xa43ad8b7;
}

impl Serializable for RpcAnswerDropped {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.msg_id.serialize(buf);
        self.seq_no.serialize(buf);
        self.bytes.serialize(buf);
    }
}

impl Deserializable for RpcAnswerDropped {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            msg_id: i64::deserialize(buf)?,
            seq_no: i32::deserialize(buf)?,
            bytes: i32::deserialize(buf)?,
        })
    }
}

// ---------------------------------------------------------------------------
// authorization key handshake
// ---------------------------------------------------------------------------

/// `resPQ#05162463 nonce:int128 server_nonce:int128 pq:bytes
/// server_public_key_fingerprints:Vector<long> = ResPQ;`
#[derive(Clone, Debug, PartialEq)]
pub struct ResPq {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub pq: Vec<u8>,
    pub server_public_key_fingerprints: Vec<i64>,
}

impl Identifiable for ResPq {
    const CONSTRUCTOR_ID: u32 = 0x05162463;
}

impl Serializable for ResPq {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.pq.serialize(buf);
        self.server_public_key_fingerprints.serialize(buf);
    }
}

impl Deserializable for ResPq {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            pq: Vec::<u8>::deserialize(buf)?,
            server_public_key_fingerprints: Vec::<i64>::deserialize(buf)?,
        })
    }
}

/// `p_q_inner_data#83c95aec pq:bytes p:bytes q:bytes nonce:int128
/// server_nonce:int128 new_nonce:int256 = P_Q_inner_data;`
#[derive(Clone, Debug, PartialEq)]
pub struct PqInnerData {
    pub pq: Vec<u8>,
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce: [u8; 32],
}

impl Identifiable for PqInnerData {
    const CONSTRUCTOR_ID: u32 = 0x83c95aec;
}

impl Serializable for PqInnerData {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.pq.serialize(buf);
        self.p.serialize(buf);
        self.q.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.new_nonce.serialize(buf);
    }
}

impl Deserializable for PqInnerData {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            pq: Vec::<u8>::deserialize(buf)?,
            p: Vec::<u8>::deserialize(buf)?,
            q: Vec::<u8>::deserialize(buf)?,
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            new_nonce: <[u8; 32]>::deserialize(buf)?,
        })
    }
}

/// `server_DH_params_ok#d0e8075c nonce:int128 server_nonce:int128
/// encrypted_answer:bytes = Server_DH_Params;`
#[derive(Clone, Debug, PartialEq)]
pub struct ServerDhParamsOk {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub encrypted_answer: Vec<u8>,
}

impl Identifiable for ServerDhParamsOk {
    const CONSTRUCTOR_ID: u32 = 0xd0e8075c;
}

impl Serializable for ServerDhParamsOk {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.encrypted_answer.serialize(buf);
    }
}

impl Deserializable for ServerDhParamsOk {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            encrypted_answer: Vec::<u8>::deserialize(buf)?,
        })
    }
}

/// `server_DH_params_fail#79cb045d nonce:int128 server_nonce:int128
/// new_nonce_hash:int128 = Server_DH_Params;`
#[derive(Clone, Debug, PartialEq)]
pub struct ServerDhParamsFail {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce_hash: [u8; 16],
}

impl Identifiable for ServerDhParamsFail {
    const CONSTRUCTOR_ID: u32 = 0x79cb045d;
}

impl Serializable for ServerDhParamsFail {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.new_nonce_hash.serialize(buf);
    }
}

impl Deserializable for ServerDhParamsFail {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            new_nonce_hash: <[u8; 16]>::deserialize(buf)?,
        })
    }
}

/// `server_DH_inner_data#b5890dba nonce:int128 server_nonce:int128 g:int
/// dh_prime:bytes g_a:bytes server_time:int = Server_DH_inner_data;`
#[derive(Clone, Debug, PartialEq)]
pub struct ServerDhInnerData {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub g: i32,
    pub dh_prime: Vec<u8>,
    pub g_a: Vec<u8>,
    pub server_time: i32,
}

impl Identifiable for ServerDhInnerData {
    const CONSTRUCTOR_ID: u32 = 0xb5890dba;
}

impl Serializable for ServerDhInnerData {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.g.serialize(buf);
        self.dh_prime.serialize(buf);
        self.g_a.serialize(buf);
        self.server_time.serialize(buf);
    }
}

impl Deserializable for ServerDhInnerData {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            g: i32::deserialize(buf)?,
            dh_prime: Vec::<u8>::deserialize(buf)?,
            g_a: Vec::<u8>::deserialize(buf)?,
            server_time: i32::deserialize(buf)?,
        })
    }
}

/// `client_DH_inner_data#6643b654 nonce:int128 server_nonce:int128
/// retry_id:long g_b:bytes = Client_DH_Inner_Data;`
#[derive(Clone, Debug, PartialEq)]
pub struct ClientDhInnerData {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub retry_id: i64,
    pub g_b: Vec<u8>,
}

impl Identifiable for ClientDhInnerData {
    const CONSTRUCTOR_ID: u32 = 0x6643b654;
}

impl Serializable for ClientDhInnerData {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.retry_id.serialize(buf);
        self.g_b.serialize(buf);
    }
}

impl Deserializable for ClientDhInnerData {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            retry_id: i64::deserialize(buf)?,
            g_b: Vec::<u8>::deserialize(buf)?,
        })
    }
}

/// `dh_gen_ok#3bcbf734 nonce:int128 server_nonce:int128
/// new_nonce_hash1:int128 = Set_client_DH_params_answer;`
#[derive(Clone, Debug, PartialEq)]
pub struct DhGenOk {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce_hash1: [u8; 16],
}

impl Identifiable for DhGenOk {
    const CONSTRUCTOR_ID: u32 = 0x3bcbf734;
}

impl Serializable for DhGenOk {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.new_nonce_hash1.serialize(buf);
    }
}

impl Deserializable for DhGenOk {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            new_nonce_hash1: <[u8; 16]>::deserialize(buf)?,
        })
    }
}

/// `dh_gen_retry#46dc1fb9 nonce:int128 server_nonce:int128
/// new_nonce_hash2:int128 = Set_client_DH_params_answer;`
#[derive(Clone, Debug, PartialEq)]
pub struct DhGenRetry {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce_hash2: [u8; 16],
}

impl Identifiable for DhGenRetry {
    const CONSTRUCTOR_ID: u32 = 0x46dc1fb9;
}

impl Serializable for DhGenRetry {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.new_nonce_hash2.serialize(buf);
    }
}

impl Deserializable for DhGenRetry {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            new_nonce_hash2: <[u8; 16]>::deserialize(buf)?,
        })
    }
}

/// `dh_gen_fail#a69dae02 nonce:int128 server_nonce:int128
/// new_nonce_hash3:int128 = Set_client_DH_params_answer;`
#[derive(Clone, Debug, PartialEq)]
pub struct DhGenFail {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce_hash3: [u8; 16],
}

impl Identifiable for DhGenFail {
    const CONSTRUCTOR_ID: u32 = 0xa69dae02;
}

impl Serializable for DhGenFail {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.new_nonce_hash3.serialize(buf);
    }
}

impl Deserializable for DhGenFail {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            nonce: <[u8; 16]>::deserialize(buf)?,
            server_nonce: <[u8; 16]>::deserialize(buf)?,
            new_nonce_hash3: <[u8; 16]>::deserialize(buf)?,
        })
    }
}

// ---------------------------------------------------------------------------
// api: peers
// ---------------------------------------------------------------------------

/// `peerUser#59511722 user_id:long = Peer;`
#[derive(Clone, Debug, PartialEq)]
pub struct PeerUser {
    pub user_id: i64,
}

impl Identifiable for PeerUser {
    const CONSTRUCTOR_ID: u32 = 0x59511722;
}

impl Serializable for PeerUser {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.user_id.serialize(buf);
    }
}

impl Deserializable for PeerUser {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            user_id: i64::deserialize(buf)?,
        })
    }
}

/// `peerChat#36c6019a chat_id:long = Peer;`
#[derive(Clone, Debug, PartialEq)]
pub struct PeerChat {
    pub chat_id: i64,
}

impl Identifiable for PeerChat {
    const CONSTRUCTOR_ID: u32 = 0x36c6019a;
}

impl Serializable for PeerChat {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.chat_id.serialize(buf);
    }
}

impl Deserializable for PeerChat {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            chat_id: i64::deserialize(buf)?,
        })
    }
}

/// `peerChannel#a2426b19 channel_id:long = Peer;`
#[derive(Clone, Debug, PartialEq)]
pub struct PeerChannel {
    pub channel_id: i64,
}

impl Identifiable for PeerChannel {
    const CONSTRUCTOR_ID: u32 = 0xa2426b19;
}

impl Serializable for PeerChannel {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.channel_id.serialize(buf);
    }
}

impl Deserializable for PeerChannel {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            channel_id: i64::deserialize(buf)?,
        })
    }
}

/// `inputPeerEmpty#7f3b18ea = InputPeer;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputPeerEmpty;

impl Identifiable for InputPeerEmpty {
    const CONSTRUCTOR_ID: u32 = 0x7f3b18ea;
}

impl Serializable for InputPeerEmpty {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for InputPeerEmpty {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

/// `inputPeerSelf#7da07ec9 = InputPeer;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputPeerSelf;

impl Identifiable for InputPeerSelf {
    const CONSTRUCTOR_ID: u32 = 0x7da07ec9;
}

impl Serializable for InputPeerSelf {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for InputPeerSelf {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

/// `inputPeerChat#35a95cb9 chat_id:long = InputPeer;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputPeerChat {
    pub chat_id: i64,
}

impl Identifiable for InputPeerChat {
    const CONSTRUCTOR_ID: u32 = 0x35a95cb9;
}

impl Serializable for InputPeerChat {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.chat_id.serialize(buf);
    }
}

impl Deserializable for InputPeerChat {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            chat_id: i64::deserialize(buf)?,
        })
    }
}

/// `inputPeerUser#dde8a54c user_id:long access_hash:long = InputPeer;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputPeerUser {
    pub user_id: i64,
    pub access_hash: i64,
}

impl Identifiable for InputPeerUser {
    const CONSTRUCTOR_ID: u32 = 0xdde8a54c;
}

impl Serializable for InputPeerUser {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.user_id.serialize(buf);
        self.access_hash.serialize(buf);
    }
}

impl Deserializable for InputPeerUser {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            user_id: i64::deserialize(buf)?,
            access_hash: i64::deserialize(buf)?,
        })
    }
}

/// `inputPeerChannel#27bcbbfc channel_id:long access_hash:long = InputPeer;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputPeerChannel {
    pub channel_id: i64,
    pub access_hash: i64,
}

impl Identifiable for InputPeerChannel {
    const CONSTRUCTOR_ID: u32 = 0x27bcbbfc;
}

impl Serializable for InputPeerChannel {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.channel_id.serialize(buf);
        self.access_hash.serialize(buf);
    }
}

impl Deserializable for InputPeerChannel {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            channel_id: i64::deserialize(buf)?,
            access_hash: i64::deserialize(buf)?,
        })
    }
}

/// `inputUserEmpty#b98886cf = InputUser;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputUserEmpty;

impl Identifiable for InputUserEmpty {
    const CONSTRUCTOR_ID: u32 = 0xb98886cf;
}

impl Serializable for InputUserEmpty {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for InputUserEmpty {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

/// `inputUserSelf#f7c1b13f = InputUser;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputUserSelf;

impl Identifiable for InputUserSelf {
    const CONSTRUCTOR_ID: u32 = 0xf7c1b13f;
}

impl Serializable for InputUserSelf {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for InputUserSelf {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

/// `inputUser#f21158c6 user_id:long access_hash:long = InputUser;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputUser {
    pub user_id: i64,
    pub access_hash: i64,
}

impl Identifiable for InputUser {
    const CONSTRUCTOR_ID: u32 = 0xf21158c6;
}

impl Serializable for InputUser {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.user_id.serialize(buf);
        self.access_hash.serialize(buf);
    }
}

impl Deserializable for InputUser {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            user_id: i64::deserialize(buf)?,
            access_hash: i64::deserialize(buf)?,
        })
    }
}

/// `inputChannelEmpty#ee8c1e86 = InputChannel;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputChannelEmpty;

impl Identifiable for InputChannelEmpty {
    const CONSTRUCTOR_ID: u32 = 0xee8c1e86;
}

impl Serializable for InputChannelEmpty {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for InputChannelEmpty {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

/// `inputChannel#f35aec28 channel_id:long access_hash:long = InputChannel;`
#[derive(Clone, Debug, PartialEq)]
pub struct InputChannel {
    pub channel_id: i64,
    pub access_hash: i64,
}

impl Identifiable for InputChannel {
    const CONSTRUCTOR_ID: u32 = 0xf35aec28;
}

impl Serializable for InputChannel {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.channel_id.serialize(buf);
        self.access_hash.serialize(buf);
    }
}

impl Deserializable for InputChannel {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            channel_id: i64::deserialize(buf)?,
            access_hash: i64::deserialize(buf)?,
        })
    }
}

// ---------------------------------------------------------------------------
// api: users, chats and messages (trimmed to what the core reads)
// ---------------------------------------------------------------------------

/// `userEmpty#d3bc4b7a id:long = User;`
#[derive(Clone, Debug, PartialEq)]
pub struct UserEmpty {
    pub id: i64,
}

impl Identifiable for UserEmpty {
    const CONSTRUCTOR_ID: u32 = 0xd3bc4b7a;
}

impl Serializable for UserEmpty {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.id.serialize(buf);
    }
}

impl Deserializable for UserEmpty {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            id: i64::deserialize(buf)?,
        })
    }
}

/// `user#edcdc05b flags:# self:flags.10?true bot:flags.14?true
/// min:flags.20?true id:long access_hash:flags.0?long
/// first_name:flags.1?string username:flags.3?string phone:flags.4?string
/// = User;`
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub is_self: bool,
    pub bot: bool,
    pub min: bool,
    pub id: i64,
    pub access_hash: Option<i64>,
    pub first_name: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
}

impl Identifiable for User {
    const CONSTRUCTOR_ID: u32 = 0xedcdc05b;
}

impl Serializable for User {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.is_self { 1 << 10 } else { 0 };
        flags |= if self.bot { 1 << 14 } else { 0 };
        flags |= if self.min { 1 << 20 } else { 0 };
        flags |= if self.access_hash.is_some() { 1 << 0 } else { 0 };
        flags |= if self.first_name.is_some() { 1 << 1 } else { 0 };
        flags |= if self.username.is_some() { 1 << 3 } else { 0 };
        flags |= if self.phone.is_some() { 1 << 4 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        if let Some(ref x) = self.access_hash {
            x.serialize(buf);
        }
        if let Some(ref x) = self.first_name {
            x.serialize(buf);
        }
        if let Some(ref x) = self.username {
            x.serialize(buf);
        }
        if let Some(ref x) = self.phone {
            x.serialize(buf);
        }
    }
}

impl Deserializable for User {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            is_self: (flags & (1 << 10)) != 0,
            bot: (flags & (1 << 14)) != 0,
            min: (flags & (1 << 20)) != 0,
            id: i64::deserialize(buf)?,
            access_hash: if (flags & (1 << 0)) != 0 {
                Some(i64::deserialize(buf)?)
            } else {
                None
            },
            first_name: if (flags & (1 << 1)) != 0 {
                Some(String::deserialize(buf)?)
            } else {
                None
            },
            username: if (flags & (1 << 3)) != 0 {
                Some(String::deserialize(buf)?)
            } else {
                None
            },
            phone: if (flags & (1 << 4)) != 0 {
                Some(String::deserialize(buf)?)
            } else {
                None
            },
        })
    }
}

/// `chatEmpty#29562865 id:long = Chat;`
#[derive(Clone, Debug, PartialEq)]
pub struct ChatEmpty {
    pub id: i64,
}

impl Identifiable for ChatEmpty {
    const CONSTRUCTOR_ID: u32 = 0x29562865;
}

impl Serializable for ChatEmpty {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.id.serialize(buf);
    }
}

impl Deserializable for ChatEmpty {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            id: i64::deserialize(buf)?,
        })
    }
}

/// `chat#41cbf256 id:long title:string = Chat;`
#[derive(Clone, Debug, PartialEq)]
pub struct Chat {
    pub id: i64,
    pub title: String,
}

impl Identifiable for Chat {
    const CONSTRUCTOR_ID: u32 = 0x41cbf256;
}

impl Serializable for Chat {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.id.serialize(buf);
        self.title.serialize(buf);
    }
}

impl Deserializable for Chat {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            id: i64::deserialize(buf)?,
            title: String::deserialize(buf)?,
        })
    }
}

/// `chatForbidden#6592a1a7 id:long title:string = Chat;`
#[derive(Clone, Debug, PartialEq)]
pub struct ChatForbidden {
    pub id: i64,
    pub title: String,
}

impl Identifiable for ChatForbidden {
    const CONSTRUCTOR_ID: u32 = 0x6592a1a7;
}

impl Serializable for ChatForbidden {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.id.serialize(buf);
        self.title.serialize(buf);
    }
}

impl Deserializable for ChatForbidden {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            id: i64::deserialize(buf)?,
            title: String::deserialize(buf)?,
        })
    }
}

/// `channel#d31a961e flags:# broadcast:flags.5?true megagroup:flags.8?true
/// min:flags.12?true id:long access_hash:flags.13?long title:string
/// username:flags.6?string = Chat;`
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    pub broadcast: bool,
    pub megagroup: bool,
    pub min: bool,
    pub id: i64,
    pub access_hash: Option<i64>,
    pub title: String,
    pub username: Option<String>,
}

impl Identifiable for Channel {
    const CONSTRUCTOR_ID: u32 = 0xd31a961e;
}

impl Serializable for Channel {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.broadcast { 1 << 5 } else { 0 };
        flags |= if self.megagroup { 1 << 8 } else { 0 };
        flags |= if self.min { 1 << 12 } else { 0 };
        flags |= if self.access_hash.is_some() { 1 << 13 } else { 0 };
        flags |= if self.username.is_some() { 1 << 6 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        if let Some(ref x) = self.access_hash {
            x.serialize(buf);
        }
        self.title.serialize(buf);
        if let Some(ref x) = self.username {
            x.serialize(buf);
        }
    }
}

impl Deserializable for Channel {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            broadcast: (flags & (1 << 5)) != 0,
            megagroup: (flags & (1 << 8)) != 0,
            min: (flags & (1 << 12)) != 0,
            id: i64::deserialize(buf)?,
            access_hash: if (flags & (1 << 13)) != 0 {
                Some(i64::deserialize(buf)?)
            } else {
                None
            },
            title: String::deserialize(buf)?,
            username: if (flags & (1 << 6)) != 0 {
                Some(String::deserialize(buf)?)
            } else {
                None
            },
        })
    }
}

/// `channelForbidden#17d493d5 flags:# broadcast:flags.5?true
/// megagroup:flags.8?true id:long access_hash:long title:string = Chat;`
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelForbidden {
    pub broadcast: bool,
    pub megagroup: bool,
    pub id: i64,
    pub access_hash: i64,
    pub title: String,
}

impl Identifiable for ChannelForbidden {
    const CONSTRUCTOR_ID: u32 = 0x17d493d5;
}

impl Serializable for ChannelForbidden {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.broadcast { 1 << 5 } else { 0 };
        flags |= if self.megagroup { 1 << 8 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        self.access_hash.serialize(buf);
        self.title.serialize(buf);
    }
}

impl Deserializable for ChannelForbidden {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            broadcast: (flags & (1 << 5)) != 0,
            megagroup: (flags & (1 << 8)) != 0,
            id: i64::deserialize(buf)?,
            access_hash: i64::deserialize(buf)?,
            title: String::deserialize(buf)?,
        })
    }
}

/// `messageEmpty#90a6ca84 flags:# id:int peer_id:flags.0?Peer = Message;`
#[derive(Clone, Debug, PartialEq)]
pub struct MessageEmpty {
    pub id: i32,
    pub peer_id: Option<enums::Peer>,
}

impl Identifiable for MessageEmpty {
    const CONSTRUCTOR_ID: u32 = 0x90a6ca84;
}

impl Serializable for MessageEmpty {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.peer_id.is_some() { 1 << 0 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        if let Some(ref x) = self.peer_id {
            x.serialize(buf);
        }
    }
}

impl Deserializable for MessageEmpty {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            id: i32::deserialize(buf)?,
            peer_id: if (flags & (1 << 0)) != 0 {
                Some(enums::Peer::deserialize(buf)?)
            } else {
                None
            },
        })
    }
}

/// `message#38116ee0 flags:# out:flags.1?true id:int from_id:flags.8?Peer
/// peer_id:Peer date:int message:string = Message;`
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub out: bool,
    pub id: i32,
    pub from_id: Option<enums::Peer>,
    pub peer_id: enums::Peer,
    pub date: i32,
    pub message: String,
}

impl Identifiable for Message {
    const CONSTRUCTOR_ID: u32 = 0x38116ee0;
}

impl Serializable for Message {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.out { 1 << 1 } else { 0 };
        flags |= if self.from_id.is_some() { 1 << 8 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        if let Some(ref x) = self.from_id {
            x.serialize(buf);
        }
        self.peer_id.serialize(buf);
        self.date.serialize(buf);
        self.message.serialize(buf);
    }
}

impl Deserializable for Message {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            out: (flags & (1 << 1)) != 0,
            id: i32::deserialize(buf)?,
            from_id: if (flags & (1 << 8)) != 0 {
                Some(enums::Peer::deserialize(buf)?)
            } else {
                None
            },
            peer_id: enums::Peer::deserialize(buf)?,
            date: i32::deserialize(buf)?,
            message: String::deserialize(buf)?,
        })
    }
}

/// `messageService#2b085862 flags:# out:flags.1?true id:int
/// from_id:flags.8?Peer peer_id:Peer date:int = Message;`
#[derive(Clone, Debug, PartialEq)]
pub struct MessageService {
    pub out: bool,
    pub id: i32,
    pub from_id: Option<enums::Peer>,
    pub peer_id: enums::Peer,
    pub date: i32,
}

impl Identifiable for MessageService {
    const CONSTRUCTOR_ID: u32 = 0x2b085862;
}

impl Serializable for MessageService {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.out { 1 << 1 } else { 0 };
        flags |= if self.from_id.is_some() { 1 << 8 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        if let Some(ref x) = self.from_id {
            x.serialize(buf);
        }
        self.peer_id.serialize(buf);
        self.date.serialize(buf);
    }
}

impl Deserializable for MessageService {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            out: (flags & (1 << 1)) != 0,
            id: i32::deserialize(buf)?,
            from_id: if (flags & (1 << 8)) != 0 {
                Some(enums::Peer::deserialize(buf)?)
            } else {
                None
            },
            peer_id: enums::Peer::deserialize(buf)?,
            date: i32::deserialize(buf)?,
        })
    }
}

/// `dialog#d58a08c6 flags:# peer:Peer top_message:int pts:flags.0?int
/// = Dialog;`
#[derive(Clone, Debug, PartialEq)]
pub struct Dialog {
    pub peer: enums::Peer,
    pub top_message: i32,
    pub pts: Option<i32>,
}

impl Identifiable for Dialog {
    const CONSTRUCTOR_ID: u32 = 0xd58a08c6;
}

impl Serializable for Dialog {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.pts.is_some() { 1 << 0 } else { 0 };
        flags.serialize(buf);
        self.peer.serialize(buf);
        self.top_message.serialize(buf);
        if let Some(ref x) = self.pts {
            x.serialize(buf);
        }
    }
}

impl Deserializable for Dialog {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            peer: enums::Peer::deserialize(buf)?,
            top_message: i32::deserialize(buf)?,
            pts: if (flags & (1 << 0)) != 0 {
                Some(i32::deserialize(buf)?)
            } else {
                None
            },
        })
    }
}

// ---------------------------------------------------------------------------
// api: datacenters and configuration
// ---------------------------------------------------------------------------

/// `dcOption#18b7a10d flags:# ipv6:flags.0?true media_only:flags.1?true
/// tcpo_only:flags.2?true cdn:flags.3?true static:flags.4?true id:int
/// ip_address:string port:int = DcOption;`
#[derive(Clone, Debug, PartialEq)]
pub struct DcOption {
    pub ipv6: bool,
    pub media_only: bool,
    pub tcpo_only: bool,
    pub cdn: bool,
    pub r#static: bool,
    pub id: i32,
    pub ip_address: String,
    pub port: i32,
}

impl Identifiable for DcOption {
    const CONSTRUCTOR_ID: u32 = 0x18b7a10d;
}

impl Serializable for DcOption {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.ipv6 { 1 << 0 } else { 0 };
        flags |= if self.media_only { 1 << 1 } else { 0 };
        flags |= if self.tcpo_only { 1 << 2 } else { 0 };
        flags |= if self.cdn { 1 << 3 } else { 0 };
        flags |= if self.r#static { 1 << 4 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        self.ip_address.serialize(buf);
        self.port.serialize(buf);
    }
}

impl Deserializable for DcOption {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            ipv6: (flags & (1 << 0)) != 0,
            media_only: (flags & (1 << 1)) != 0,
            tcpo_only: (flags & (1 << 2)) != 0,
            cdn: (flags & (1 << 3)) != 0,
            r#static: (flags & (1 << 4)) != 0,
            id: i32::deserialize(buf)?,
            ip_address: String::deserialize(buf)?,
            port: i32::deserialize(buf)?,
        })
    }
}

/// `config#cc1a241e flags:# test_mode:flags.0?true date:int expires:int
/// this_dc:int dc_options:Vector<DcOption> = Config;`
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub test_mode: bool,
    pub date: i32,
    pub expires: i32,
    pub this_dc: i32,
    pub dc_options: Vec<enums::DcOption>,
}

impl Identifiable for Config {
    const CONSTRUCTOR_ID: u32 = 0xcc1a241e;
}

impl Serializable for Config {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.test_mode { 1 << 0 } else { 0 };
        flags.serialize(buf);
        self.date.serialize(buf);
        self.expires.serialize(buf);
        self.this_dc.serialize(buf);
        self.dc_options.serialize(buf);
    }
}

impl Deserializable for Config {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            test_mode: (flags & (1 << 0)) != 0,
            date: i32::deserialize(buf)?,
            expires: i32::deserialize(buf)?,
            this_dc: i32::deserialize(buf)?,
            dc_options: Vec::<enums::DcOption>::deserialize(buf)?,
        })
    }
}

// ---------------------------------------------------------------------------
// api: updates
// ---------------------------------------------------------------------------

/// `updateNewMessage#1f2b0afd message:Message pts:int pts_count:int
/// = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateNewMessage {
    pub message: enums::Message,
    pub pts: i32,
    pub pts_count: i32,
}

impl Identifiable for UpdateNewMessage {
    const CONSTRUCTOR_ID: u32 = 0x1f2b0afd;
}

impl Serializable for UpdateNewMessage {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.message.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
    }
}

impl Deserializable for UpdateNewMessage {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            message: enums::Message::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
        })
    }
}

/// `updateDeleteMessages#a20db0e5 messages:Vector<int> pts:int pts_count:int
/// = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateDeleteMessages {
    pub messages: Vec<i32>,
    pub pts: i32,
    pub pts_count: i32,
}

impl Identifiable for UpdateDeleteMessages {
    const CONSTRUCTOR_ID: u32 = 0xa20db0e5;
}

impl Serializable for UpdateDeleteMessages {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.messages.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
    }
}

impl Deserializable for UpdateDeleteMessages {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            messages: Vec::<i32>::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
        })
    }
}

/// `updateEditMessage#e40370a3 message:Message pts:int pts_count:int
/// = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateEditMessage {
    pub message: enums::Message,
    pub pts: i32,
    pub pts_count: i32,
}

impl Identifiable for UpdateEditMessage {
    const CONSTRUCTOR_ID: u32 = 0xe40370a3;
}

impl Serializable for UpdateEditMessage {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.message.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
    }
}

impl Deserializable for UpdateEditMessage {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            message: enums::Message::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
        })
    }
}

/// `updateReadHistoryInbox#9c974fdf flags:# folder_id:flags.0?int peer:Peer
/// max_id:int still_unread_count:int pts:int pts_count:int = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateReadHistoryInbox {
    pub folder_id: Option<i32>,
    pub peer: enums::Peer,
    pub max_id: i32,
    pub still_unread_count: i32,
    pub pts: i32,
    pub pts_count: i32,
}

impl Identifiable for UpdateReadHistoryInbox {
    const CONSTRUCTOR_ID: u32 = 0x9c974fdf;
}

impl Serializable for UpdateReadHistoryInbox {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.folder_id.is_some() { 1 << 0 } else { 0 };
        flags.serialize(buf);
        if let Some(ref x) = self.folder_id {
            x.serialize(buf);
        }
        self.peer.serialize(buf);
        self.max_id.serialize(buf);
        self.still_unread_count.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
    }
}

impl Deserializable for UpdateReadHistoryInbox {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            folder_id: if (flags & (1 << 0)) != 0 {
                Some(i32::deserialize(buf)?)
            } else {
                None
            },
            peer: enums::Peer::deserialize(buf)?,
            max_id: i32::deserialize(buf)?,
            still_unread_count: i32::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
        })
    }
}

/// `updateReadHistoryOutbox#2f2f21bf peer:Peer max_id:int pts:int
/// pts_count:int = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateReadHistoryOutbox {
    pub peer: enums::Peer,
    pub max_id: i32,
    pub pts: i32,
    pub pts_count: i32,
}

impl Identifiable for UpdateReadHistoryOutbox {
    const CONSTRUCTOR_ID: u32 = 0x2f2f21bf;
}

impl Serializable for UpdateReadHistoryOutbox {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.peer.serialize(buf);
        self.max_id.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
    }
}

impl Deserializable for UpdateReadHistoryOutbox {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            peer: enums::Peer::deserialize(buf)?,
            max_id: i32::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
        })
    }
}

/// `updateNewChannelMessage#62ba04d9 message:Message pts:int pts_count:int
/// = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateNewChannelMessage {
    pub message: enums::Message,
    pub pts: i32,
    pub pts_count: i32,
}

impl Identifiable for UpdateNewChannelMessage {
    const CONSTRUCTOR_ID: u32 = 0x62ba04d9;
}

impl Serializable for UpdateNewChannelMessage {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.message.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
    }
}

impl Deserializable for UpdateNewChannelMessage {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            message: enums::Message::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
        })
    }
}

/// `updateEditChannelMessage#1b3f4df7 message:Message pts:int pts_count:int
/// = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateEditChannelMessage {
    pub message: enums::Message,
    pub pts: i32,
    pub pts_count: i32,
}

impl Identifiable for UpdateEditChannelMessage {
    const CONSTRUCTOR_ID: u32 = 0x1b3f4df7;
}

impl Serializable for UpdateEditChannelMessage {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.message.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
    }
}

impl Deserializable for UpdateEditChannelMessage {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            message: enums::Message::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
        })
    }
}

/// `updateDeleteChannelMessages#c32d5b12 channel_id:long messages:Vector<int>
/// pts:int pts_count:int = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateDeleteChannelMessages {
    pub channel_id: i64,
    pub messages: Vec<i32>,
    pub pts: i32,
    pub pts_count: i32,
}

impl Identifiable for UpdateDeleteChannelMessages {
    const CONSTRUCTOR_ID: u32 = 0xc32d5b12;
}

impl Serializable for UpdateDeleteChannelMessages {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.channel_id.serialize(buf);
        self.messages.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
    }
}

impl Deserializable for UpdateDeleteChannelMessages {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            channel_id: i64::deserialize(buf)?,
            messages: Vec::<i32>::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
        })
    }
}

/// `updateReadChannelInbox#922e6e10 flags:# folder_id:flags.0?int
/// channel_id:long max_id:int still_unread_count:int pts:int = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateReadChannelInbox {
    pub folder_id: Option<i32>,
    pub channel_id: i64,
    pub max_id: i32,
    pub still_unread_count: i32,
    pub pts: i32,
}

impl Identifiable for UpdateReadChannelInbox {
    const CONSTRUCTOR_ID: u32 = 0x922e6e10;
}

impl Serializable for UpdateReadChannelInbox {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.folder_id.is_some() { 1 << 0 } else { 0 };
        flags.serialize(buf);
        if let Some(ref x) = self.folder_id {
            x.serialize(buf);
        }
        self.channel_id.serialize(buf);
        self.max_id.serialize(buf);
        self.still_unread_count.serialize(buf);
        self.pts.serialize(buf);
    }
}

impl Deserializable for UpdateReadChannelInbox {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            folder_id: if (flags & (1 << 0)) != 0 {
                Some(i32::deserialize(buf)?)
            } else {
                None
            },
            channel_id: i64::deserialize(buf)?,
            max_id: i32::deserialize(buf)?,
            still_unread_count: i32::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
        })
    }
}

/// `updateChannelTooLong#108d941f flags:# channel_id:long pts:flags.0?int
/// = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateChannelTooLong {
    pub channel_id: i64,
    pub pts: Option<i32>,
}

impl Identifiable for UpdateChannelTooLong {
    const CONSTRUCTOR_ID: u32 = 0x108d941f;
}

impl Serializable for UpdateChannelTooLong {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.pts.is_some() { 1 << 0 } else { 0 };
        flags.serialize(buf);
        self.channel_id.serialize(buf);
        if let Some(ref x) = self.pts {
            x.serialize(buf);
        }
    }
}

impl Deserializable for UpdateChannelTooLong {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            channel_id: i64::deserialize(buf)?,
            pts: if (flags & (1 << 0)) != 0 {
                Some(i32::deserialize(buf)?)
            } else {
                None
            },
        })
    }
}

/// `updateChannel#635b4c09 channel_id:long = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateChannel {
    pub channel_id: i64,
}

impl Identifiable for UpdateChannel {
    const CONSTRUCTOR_ID: u32 = 0x635b4c09;
}

impl Serializable for UpdateChannel {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.channel_id.serialize(buf);
    }
}

impl Deserializable for UpdateChannel {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            channel_id: i64::deserialize(buf)?,
        })
    }
}

/// `updateBotStopped#c4870a49 user_id:long date:int stopped:Bool qts:int
/// = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateBotStopped {
    pub user_id: i64,
    pub date: i32,
    pub stopped: bool,
    pub qts: i32,
}

impl Identifiable for UpdateBotStopped {
    const CONSTRUCTOR_ID: u32 = 0xc4870a49;
}

impl Serializable for UpdateBotStopped {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.user_id.serialize(buf);
        self.date.serialize(buf);
        self.stopped.serialize(buf);
        self.qts.serialize(buf);
    }
}

impl Deserializable for UpdateBotStopped {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            user_id: i64::deserialize(buf)?,
            date: i32::deserialize(buf)?,
            stopped: bool::deserialize(buf)?,
            qts: i32::deserialize(buf)?,
        })
    }
}

/// `updatePtsChanged#3354678f = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdatePtsChanged;

impl Identifiable for UpdatePtsChanged {
    const CONSTRUCTOR_ID: u32 = 0x3354678f;
}

impl Serializable for UpdatePtsChanged {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for UpdatePtsChanged {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

/// `updateDcOptions#8e5e9873 dc_options:Vector<DcOption> = Update;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateDcOptions {
    pub dc_options: Vec<enums::DcOption>,
}

impl Identifiable for UpdateDcOptions {
    const CONSTRUCTOR_ID: u32 = 0x8e5e9873;
}

impl Serializable for UpdateDcOptions {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.dc_options.serialize(buf);
    }
}

impl Deserializable for UpdateDcOptions {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            dc_options: Vec::<enums::DcOption>::deserialize(buf)?,
        })
    }
}

/// `updatesTooLong#e317af7e = Updates;` has no fields and is represented
/// directly as a variant of [`enums::Updates`].
///
/// `updateShortMessage#313bc7f8 flags:# out:flags.1?true id:int user_id:long
/// message:string pts:int pts_count:int date:int = Updates;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateShortMessage {
    pub out: bool,
    pub id: i32,
    pub user_id: i64,
    pub message: String,
    pub pts: i32,
    pub pts_count: i32,
    pub date: i32,
}

impl Identifiable for UpdateShortMessage {
    const CONSTRUCTOR_ID: u32 = 0x313bc7f8;
}

impl Serializable for UpdateShortMessage {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.out { 1 << 1 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        self.user_id.serialize(buf);
        self.message.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
        self.date.serialize(buf);
    }
}

impl Deserializable for UpdateShortMessage {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            out: (flags & (1 << 1)) != 0,
            id: i32::deserialize(buf)?,
            user_id: i64::deserialize(buf)?,
            message: String::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
            date: i32::deserialize(buf)?,
        })
    }
}

/// `updateShortChatMessage#4d6deea5 flags:# out:flags.1?true id:int
/// from_id:long chat_id:long message:string pts:int pts_count:int date:int
/// = Updates;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateShortChatMessage {
    pub out: bool,
    pub id: i32,
    pub from_id: i64,
    pub chat_id: i64,
    pub message: String,
    pub pts: i32,
    pub pts_count: i32,
    pub date: i32,
}

impl Identifiable for UpdateShortChatMessage {
    const CONSTRUCTOR_ID: u32 = 0x4d6deea5;
}

impl Serializable for UpdateShortChatMessage {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.out { 1 << 1 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        self.from_id.serialize(buf);
        self.chat_id.serialize(buf);
        self.message.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
        self.date.serialize(buf);
    }
}

impl Deserializable for UpdateShortChatMessage {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            out: (flags & (1 << 1)) != 0,
            id: i32::deserialize(buf)?,
            from_id: i64::deserialize(buf)?,
            chat_id: i64::deserialize(buf)?,
            message: String::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
            date: i32::deserialize(buf)?,
        })
    }
}

/// `updateShort#78d4dec1 update:Update date:int = Updates;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateShort {
    pub update: enums::Update,
    pub date: i32,
}

impl Identifiable for UpdateShort {
    const CONSTRUCTOR_ID: u32 = 0x78d4dec1;
}

impl Serializable for UpdateShort {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.update.serialize(buf);
        self.date.serialize(buf);
    }
}

impl Deserializable for UpdateShort {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            update: enums::Update::deserialize(buf)?,
            date: i32::deserialize(buf)?,
        })
    }
}

/// `updatesCombined#725b04c3 updates:Vector<Update> users:Vector<User>
/// chats:Vector<Chat> date:int seq_start:int seq:int = Updates;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdatesCombined {
    pub updates: Vec<enums::Update>,
    pub users: Vec<enums::User>,
    pub chats: Vec<enums::Chat>,
    pub date: i32,
    pub seq_start: i32,
    pub seq: i32,
}

impl Identifiable for UpdatesCombined {
    const CONSTRUCTOR_ID: u32 = 0x725b04c3;
}

impl Serializable for UpdatesCombined {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.updates.serialize(buf);
        self.users.serialize(buf);
        self.chats.serialize(buf);
        self.date.serialize(buf);
        self.seq_start.serialize(buf);
        self.seq.serialize(buf);
    }
}

impl Deserializable for UpdatesCombined {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            updates: Vec::<enums::Update>::deserialize(buf)?,
            users: Vec::<enums::User>::deserialize(buf)?,
            chats: Vec::<enums::Chat>::deserialize(buf)?,
            date: i32::deserialize(buf)?,
            seq_start: i32::deserialize(buf)?,
            seq: i32::deserialize(buf)?,
        })
    }
}

/// `updates#74ae4240 updates:Vector<Update> users:Vector<User>
/// chats:Vector<Chat> date:int seq:int = Updates;`
#[derive(Clone, Debug, PartialEq)]
pub struct Updates {
    pub updates: Vec<enums::Update>,
    pub users: Vec<enums::User>,
    pub chats: Vec<enums::Chat>,
    pub date: i32,
    pub seq: i32,
}

impl Identifiable for Updates {
    const CONSTRUCTOR_ID: u32 = 0x74ae4240;
}

impl Serializable for Updates {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.updates.serialize(buf);
        self.users.serialize(buf);
        self.chats.serialize(buf);
        self.date.serialize(buf);
        self.seq.serialize(buf);
    }
}

impl Deserializable for Updates {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        Ok(Self {
            updates: Vec::<enums::Update>::deserialize(buf)?,
            users: Vec::<enums::User>::deserialize(buf)?,
            chats: Vec::<enums::Chat>::deserialize(buf)?,
            date: i32::deserialize(buf)?,
            seq: i32::deserialize(buf)?,
        })
    }
}

/// `updateShortSentMessage#9015e101 flags:# out:flags.1?true id:int pts:int
/// pts_count:int date:int = Updates;`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateShortSentMessage {
    pub out: bool,
    pub id: i32,
    pub pts: i32,
    pub pts_count: i32,
    pub date: i32,
}

impl Identifiable for UpdateShortSentMessage {
    const CONSTRUCTOR_ID: u32 = 0x9015e101;
}

impl Serializable for UpdateShortSentMessage {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        let mut flags = 0u32;
        flags |= if self.out { 1 << 1 } else { 0 };
        flags.serialize(buf);
        self.id.serialize(buf);
        self.pts.serialize(buf);
        self.pts_count.serialize(buf);
        self.date.serialize(buf);
    }
}

impl Deserializable for UpdateShortSentMessage {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            out: (flags & (1 << 1)) != 0,
            id: i32::deserialize(buf)?,
            pts: i32::deserialize(buf)?,
            pts_count: i32::deserialize(buf)?,
            date: i32::deserialize(buf)?,
        })
    }
}

/// `channelMessagesFilterEmpty#94d42ee7 = ChannelMessagesFilter;`
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelMessagesFilterEmpty;

impl Identifiable for ChannelMessagesFilterEmpty {
    const CONSTRUCTOR_ID: u32 = 0x94d42ee7;
}

impl Serializable for ChannelMessagesFilterEmpty {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
    }
}

impl Deserializable for ChannelMessagesFilterEmpty {
    fn deserialize(_buf: &mut Cursor) -> Result<Self> {
        Ok(Self)
    }
}

// ---------------------------------------------------------------------------
// api: namespaced types
// ---------------------------------------------------------------------------

pub mod updates {
    use super::*;

    /// `updates.state#a56c2a3e pts:int qts:int date:int seq:int
    /// unread_count:int = updates.State;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct State {
        pub pts: i32,
        pub qts: i32,
        pub date: i32,
        pub seq: i32,
        pub unread_count: i32,
    }

    impl Identifiable for State {
        const CONSTRUCTOR_ID: u32 = 0xa56c2a3e;
    }

    impl Serializable for State {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.pts.serialize(buf);
            self.qts.serialize(buf);
            self.date.serialize(buf);
            self.seq.serialize(buf);
            self.unread_count.serialize(buf);
        }
    }

    impl Deserializable for State {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            Ok(Self {
                pts: i32::deserialize(buf)?,
                qts: i32::deserialize(buf)?,
                date: i32::deserialize(buf)?,
                seq: i32::deserialize(buf)?,
                unread_count: i32::deserialize(buf)?,
            })
        }
    }

    /// `updates.differenceEmpty#5d75a138 date:int seq:int
    /// = updates.Difference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct DifferenceEmpty {
        pub date: i32,
        pub seq: i32,
    }

    impl Identifiable for DifferenceEmpty {
        const CONSTRUCTOR_ID: u32 = 0x5d75a138;
    }

    impl Serializable for DifferenceEmpty {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.date.serialize(buf);
            self.seq.serialize(buf);
        }
    }

    impl Deserializable for DifferenceEmpty {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            Ok(Self {
                date: i32::deserialize(buf)?,
                seq: i32::deserialize(buf)?,
            })
        }
    }

    /// `updates.difference#00f49ca0 new_messages:Vector<Message>
    /// other_updates:Vector<Update> chats:Vector<Chat> users:Vector<User>
    /// state:updates.State = updates.Difference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct Difference {
        pub new_messages: Vec<enums::Message>,
        pub other_updates: Vec<enums::Update>,
        pub chats: Vec<enums::Chat>,
        pub users: Vec<enums::User>,
        pub state: enums::updates::State,
    }

    impl Identifiable for Difference {
        const CONSTRUCTOR_ID: u32 = 0x00f49ca0;
    }

    impl Serializable for Difference {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.new_messages.serialize(buf);
            self.other_updates.serialize(buf);
            self.chats.serialize(buf);
            self.users.serialize(buf);
            self.state.serialize(buf);
        }
    }

    impl Deserializable for Difference {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            Ok(Self {
                new_messages: Vec::<enums::Message>::deserialize(buf)?,
                other_updates: Vec::<enums::Update>::deserialize(buf)?,
                chats: Vec::<enums::Chat>::deserialize(buf)?,
                users: Vec::<enums::User>::deserialize(buf)?,
                state: enums::updates::State::deserialize(buf)?,
            })
        }
    }

    /// `updates.differenceSlice#a8fb1981 new_messages:Vector<Message>
    /// other_updates:Vector<Update> chats:Vector<Chat> users:Vector<User>
    /// intermediate_state:updates.State = updates.Difference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct DifferenceSlice {
        pub new_messages: Vec<enums::Message>,
        pub other_updates: Vec<enums::Update>,
        pub chats: Vec<enums::Chat>,
        pub users: Vec<enums::User>,
        pub intermediate_state: enums::updates::State,
    }

    impl Identifiable for DifferenceSlice {
        const CONSTRUCTOR_ID: u32 = 0xa8fb1981;
    }

    impl Serializable for DifferenceSlice {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.new_messages.serialize(buf);
            self.other_updates.serialize(buf);
            self.chats.serialize(buf);
            self.users.serialize(buf);
            self.intermediate_state.serialize(buf);
        }
    }

    impl Deserializable for DifferenceSlice {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            Ok(Self {
                new_messages: Vec::<enums::Message>::deserialize(buf)?,
                other_updates: Vec::<enums::Update>::deserialize(buf)?,
                chats: Vec::<enums::Chat>::deserialize(buf)?,
                users: Vec::<enums::User>::deserialize(buf)?,
                intermediate_state: enums::updates::State::deserialize(buf)?,
            })
        }
    }

    /// `updates.differenceTooLong#4afe8f6d pts:int = updates.Difference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct DifferenceTooLong {
        pub pts: i32,
    }

    impl Identifiable for DifferenceTooLong {
        const CONSTRUCTOR_ID: u32 = 0x4afe8f6d;
    }

    impl Serializable for DifferenceTooLong {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.pts.serialize(buf);
        }
    }

    impl Deserializable for DifferenceTooLong {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            Ok(Self {
                pts: i32::deserialize(buf)?,
            })
        }
    }

    /// `updates.channelDifferenceEmpty#3e11affb flags:# final:flags.0?true
    /// pts:int timeout:flags.1?int = updates.ChannelDifference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct ChannelDifferenceEmpty {
        pub r#final: bool,
        pub pts: i32,
        pub timeout: Option<i32>,
    }

    impl Identifiable for ChannelDifferenceEmpty {
        const CONSTRUCTOR_ID: u32 = 0x3e11affb;
    }

    impl Serializable for ChannelDifferenceEmpty {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            let mut flags = 0u32;
            flags |= if self.r#final { 1 << 0 } else { 0 };
            flags |= if self.timeout.is_some() { 1 << 1 } else { 0 };
            flags.serialize(buf);
            self.pts.serialize(buf);
            if let Some(ref x) = self.timeout {
                x.serialize(buf);
            }
        }
    }

    impl Deserializable for ChannelDifferenceEmpty {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let flags = u32::deserialize(buf)?;
            Ok(Self {
                r#final: (flags & (1 << 0)) != 0,
                pts: i32::deserialize(buf)?,
                timeout: if (flags & (1 << 1)) != 0 {
                    Some(i32::deserialize(buf)?)
                } else {
                    None
                },
            })
        }
    }

    /// `updates.channelDifferenceTooLong#a4bcc6fe flags:# final:flags.0?true
    /// timeout:flags.1?int dialog:Dialog messages:Vector<Message>
    /// chats:Vector<Chat> users:Vector<User> = updates.ChannelDifference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct ChannelDifferenceTooLong {
        pub r#final: bool,
        pub timeout: Option<i32>,
        pub dialog: enums::Dialog,
        pub messages: Vec<enums::Message>,
        pub chats: Vec<enums::Chat>,
        pub users: Vec<enums::User>,
    }

    impl Identifiable for ChannelDifferenceTooLong {
        const CONSTRUCTOR_ID: u32 = 0xa4bcc6fe;
    }

    impl Serializable for ChannelDifferenceTooLong {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            let mut flags = 0u32;
            flags |= if self.r#final { 1 << 0 } else { 0 };
            flags |= if self.timeout.is_some() { 1 << 1 } else { 0 };
            flags.serialize(buf);
            if let Some(ref x) = self.timeout {
                x.serialize(buf);
            }
            self.dialog.serialize(buf);
            self.messages.serialize(buf);
            self.chats.serialize(buf);
            self.users.serialize(buf);
        }
    }

    impl Deserializable for ChannelDifferenceTooLong {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let flags = u32::deserialize(buf)?;
            Ok(Self {
                r#final: (flags & (1 << 0)) != 0,
                timeout: if (flags & (1 << 1)) != 0 {
                    Some(i32::deserialize(buf)?)
                } else {
                    None
                },
                dialog: enums::Dialog::deserialize(buf)?,
                messages: Vec::<enums::Message>::deserialize(buf)?,
                chats: Vec::<enums::Chat>::deserialize(buf)?,
                users: Vec::<enums::User>::deserialize(buf)?,
            })
        }
    }

    /// `updates.channelDifference#2064674e flags:# final:flags.0?true pts:int
    /// timeout:flags.1?int new_messages:Vector<Message>
    /// other_updates:Vector<Update> chats:Vector<Chat> users:Vector<User>
    /// = updates.ChannelDifference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct ChannelDifference {
        pub r#final: bool,
        pub pts: i32,
        pub timeout: Option<i32>,
        pub new_messages: Vec<enums::Message>,
        pub other_updates: Vec<enums::Update>,
        pub chats: Vec<enums::Chat>,
        pub users: Vec<enums::User>,
    }

    impl Identifiable for ChannelDifference {
        const CONSTRUCTOR_ID: u32 = 0x2064674e;
    }

    impl Serializable for ChannelDifference {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            let mut flags = 0u32;
            flags |= if self.r#final { 1 << 0 } else { 0 };
            flags |= if self.timeout.is_some() { 1 << 1 } else { 0 };
            flags.serialize(buf);
            self.pts.serialize(buf);
            if let Some(ref x) = self.timeout {
                x.serialize(buf);
            }
            self.new_messages.serialize(buf);
            self.other_updates.serialize(buf);
            self.chats.serialize(buf);
            self.users.serialize(buf);
        }
    }

    impl Deserializable for ChannelDifference {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let flags = u32::deserialize(buf)?;
            Ok(Self {
                r#final: (flags & (1 << 0)) != 0,
                pts: i32::deserialize(buf)?,
                timeout: if (flags & (1 << 1)) != 0 {
                    Some(i32::deserialize(buf)?)
                } else {
                    None
                },
                new_messages: Vec::<enums::Message>::deserialize(buf)?,
                other_updates: Vec::<enums::Update>::deserialize(buf)?,
                chats: Vec::<enums::Chat>::deserialize(buf)?,
                users: Vec::<enums::User>::deserialize(buf)?,
            })
        }
    }
}

pub mod auth {
    use super::*;

    /// `auth.exportedAuthorization#b434e2b8 id:long bytes:bytes
    /// = auth.ExportedAuthorization;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct ExportedAuthorization {
        pub id: i64,
        pub bytes: Vec<u8>,
    }

    impl Identifiable for ExportedAuthorization {
        const CONSTRUCTOR_ID: u32 = 0xb434e2b8;
    }

    impl Serializable for ExportedAuthorization {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.id.serialize(buf);
            self.bytes.serialize(buf);
        }
    }

    impl Deserializable for ExportedAuthorization {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            Ok(Self {
                id: i64::deserialize(buf)?,
                bytes: Vec::<u8>::deserialize(buf)?,
            })
        }
    }

    /// `auth.authorization#2ea2c0d4 flags:# user:User = auth.Authorization;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct Authorization {
        pub user: enums::User,
    }

    impl Identifiable for Authorization {
        const CONSTRUCTOR_ID: u32 = 0x2ea2c0d4;
    }

    impl Serializable for Authorization {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            0u32.serialize(buf);
            self.user.serialize(buf);
        }
    }

    impl Deserializable for Authorization {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let _flags = u32::deserialize(buf)?;
            Ok(Self {
                user: enums::User::deserialize(buf)?,
            })
        }
    }

    /// `auth.loggedOut#c3a2835f flags:# = auth.LoggedOut;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct LoggedOut;

    impl Identifiable for LoggedOut {
        const CONSTRUCTOR_ID: u32 = 0xc3a2835f;
    }

    impl Serializable for LoggedOut {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            0u32.serialize(buf);
        }
    }

    impl Deserializable for LoggedOut {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let _flags = u32::deserialize(buf)?;
            Ok(Self)
        }
    }
}

pub mod contacts {
    use super::*;

    /// `contacts.resolvedPeer#7f077ad9 peer:Peer chats:Vector<Chat>
    /// users:Vector<User> = contacts.ResolvedPeer;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct ResolvedPeer {
        pub peer: enums::Peer,
        pub chats: Vec<enums::Chat>,
        pub users: Vec<enums::User>,
    }

    impl Identifiable for ResolvedPeer {
        const CONSTRUCTOR_ID: u32 = 0x7f077ad9;
    }

    impl Serializable for ResolvedPeer {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.peer.serialize(buf);
            self.chats.serialize(buf);
            self.users.serialize(buf);
        }
    }

    impl Deserializable for ResolvedPeer {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            Ok(Self {
                peer: enums::Peer::deserialize(buf)?,
                chats: Vec::<enums::Chat>::deserialize(buf)?,
                users: Vec::<enums::User>::deserialize(buf)?,
            })
        }
    }
}
