// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! All of the functions, each represented by a `struct`.
//!
//! All of them implement [`crate::Identifiable`], [`crate::Serializable`]
//! and [`crate::RemoteCall`], whose associated type tells what the other
//! end will reply with.
#![allow(clippy::unreadable_literal)]

use crate::{enums, Blob, Identifiable, RemoteCall, Serializable};

/// `req_pq_multi#be7e8ef1 nonce:int128 = ResPQ;`
#[derive(Clone, Debug, PartialEq)]
pub struct ReqPqMulti {
    pub nonce: [u8; 16],
}

impl Identifiable for ReqPqMulti {
    const CONSTRUCTOR_ID: u32 = 0xbe7e8ef1;
}

impl Serializable for ReqPqMulti {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
    }
}

impl RemoteCall for ReqPqMulti {
    type Return = enums::ResPq;
}

/// `req_DH_params#d712e4be nonce:int128 server_nonce:int128 p:bytes q:bytes
/// public_key_fingerprint:long encrypted_data:bytes = Server_DH_Params;`
#[derive(Clone, Debug, PartialEq)]
pub struct ReqDhParams {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub public_key_fingerprint: i64,
    pub encrypted_data: Vec<u8>,
}

impl Identifiable for ReqDhParams {
    const CONSTRUCTOR_ID: u32 = 0xd712e4be;
}

impl Serializable for ReqDhParams {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.p.serialize(buf);
        self.q.serialize(buf);
        self.public_key_fingerprint.serialize(buf);
        self.encrypted_data.serialize(buf);
    }
}

impl RemoteCall for ReqDhParams {
    type Return = enums::ServerDhParams;
}

/// `set_client_DH_params#f5045f1f nonce:int128 server_nonce:int128
/// encrypted_data:bytes = Set_client_DH_params_answer;`
#[derive(Clone, Debug, PartialEq)]
pub struct SetClientDhParams {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub encrypted_data: Vec<u8>,
}

impl Identifiable for SetClientDhParams {
    const CONSTRUCTOR_ID: u32 = 0xf5045f1f;
}

impl Serializable for SetClientDhParams {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.nonce.serialize(buf);
        self.server_nonce.serialize(buf);
        self.encrypted_data.serialize(buf);
    }
}

impl RemoteCall for SetClientDhParams {
    type Return = enums::SetClientDhParamsAnswer;
}

/// `ping#7abe77ec ping_id:long = Pong;`
#[derive(Clone, Debug, PartialEq)]
pub struct Ping {
    pub ping_id: i64,
}

impl Identifiable for Ping {
    const CONSTRUCTOR_ID: u32 = 0x7abe77ec;
}

impl Serializable for Ping {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.ping_id.serialize(buf);
    }
}

impl RemoteCall for Ping {
    type Return = enums::Pong;
}

/// `ping_delay_disconnect#f3427b8c ping_id:long disconnect_delay:int = Pong;`
#[derive(Clone, Debug, PartialEq)]
pub struct PingDelayDisconnect {
    pub ping_id: i64,
    pub disconnect_delay: i32,
}

impl Identifiable for PingDelayDisconnect {
    const CONSTRUCTOR_ID: u32 = 0xf3427b8c;
}

impl Serializable for PingDelayDisconnect {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.ping_id.serialize(buf);
        self.disconnect_delay.serialize(buf);
    }
}

impl RemoteCall for PingDelayDisconnect {
    type Return = enums::Pong;
}

/// `get_future_salts#b921bd04 num:int = FutureSalts;`
#[derive(Clone, Debug, PartialEq)]
pub struct GetFutureSalts {
    pub num: i32,
}

impl Identifiable for GetFutureSalts {
    const CONSTRUCTOR_ID: u32 = 0xb921bd04;
}

impl Serializable for GetFutureSalts {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.num.serialize(buf);
    }
}

impl RemoteCall for GetFutureSalts {
    type Return = enums::FutureSalts;
}

/// `rpc_drop_answer#58e4a740 req_msg_id:long = RpcDropAnswer;`
#[derive(Clone, Debug, PartialEq)]
pub struct RpcDropAnswer {
    pub req_msg_id: i64,
}

impl Identifiable for RpcDropAnswer {
    const CONSTRUCTOR_ID: u32 = 0x58e4a740;
}

impl Serializable for RpcDropAnswer {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.req_msg_id.serialize(buf);
    }
}

impl RemoteCall for RpcDropAnswer {
    type Return = enums::RpcDropAnswer;
}

/// `destroy_session#e7512126 session_id:long = DestroySessionRes;`
#[derive(Clone, Debug, PartialEq)]
pub struct DestroySession {
    pub session_id: i64,
}

impl Identifiable for DestroySession {
    const CONSTRUCTOR_ID: u32 = 0xe7512126;
}

impl Serializable for DestroySession {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.session_id.serialize(buf);
    }
}

impl RemoteCall for DestroySession {
    type Return = enums::DestroySessionRes;
}

/// `invokeWithLayer#da9b0d0d {X:Type} layer:int query:!X = X;`
#[derive(Clone, Debug, PartialEq)]
pub struct InvokeWithLayer<X: RemoteCall> {
    pub layer: i32,
    pub query: X,
}

impl<X: RemoteCall> Identifiable for InvokeWithLayer<X> {
    const CONSTRUCTOR_ID: u32 = 0xda9b0d0d;
}

impl<X: RemoteCall> Serializable for InvokeWithLayer<X> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.layer.serialize(buf);
        self.query.serialize(buf);
    }
}

impl<X: RemoteCall> RemoteCall for InvokeWithLayer<X> {
    type Return = X::Return;
}

/// `invokeWithTakeout#aca9fd2e {X:Type} takeout_id:long query:!X = X;`
#[derive(Clone, Debug, PartialEq)]
pub struct InvokeWithTakeout<X: RemoteCall> {
    pub takeout_id: i64,
    pub query: X,
}

impl<X: RemoteCall> Identifiable for InvokeWithTakeout<X> {
    const CONSTRUCTOR_ID: u32 = 0xaca9fd2e;
}

impl<X: RemoteCall> Serializable for InvokeWithTakeout<X> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        self.takeout_id.serialize(buf);
        self.query.serialize(buf);
    }
}

impl<X: RemoteCall> RemoteCall for InvokeWithTakeout<X> {
    type Return = X::Return;
}

/// `initConnection#c1cd5ea9 flags:# api_id:int device_model:string
/// system_version:string app_version:string system_lang_code:string
/// lang_pack:string lang_code:string query:!X = X;`
///
/// The `proxy` and `params` conditional fields are never sent by this
/// library and are not part of the trimmed catalogue.
#[derive(Clone, Debug, PartialEq)]
pub struct InitConnection<X: RemoteCall> {
    pub api_id: i32,
    pub device_model: String,
    pub system_version: String,
    pub app_version: String,
    pub system_lang_code: String,
    pub lang_pack: String,
    pub lang_code: String,
    pub query: X,
}

impl<X: RemoteCall> Identifiable for InitConnection<X> {
    const CONSTRUCTOR_ID: u32 = 0xc1cd5ea9;
}

impl<X: RemoteCall> Serializable for InitConnection<X> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        Self::CONSTRUCTOR_ID.serialize(buf);
        0u32.serialize(buf);
        self.api_id.serialize(buf);
        self.device_model.serialize(buf);
        self.system_version.serialize(buf);
        self.app_version.serialize(buf);
        self.system_lang_code.serialize(buf);
        self.lang_pack.serialize(buf);
        self.lang_code.serialize(buf);
        self.query.serialize(buf);
    }
}

impl<X: RemoteCall> RemoteCall for InitConnection<X> {
    type Return = X::Return;
}

pub mod help {
    use super::*;

    /// `help.getConfig#c4f9186b = Config;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct GetConfig;

    impl Identifiable for GetConfig {
        const CONSTRUCTOR_ID: u32 = 0xc4f9186b;
    }

    impl Serializable for GetConfig {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
        }
    }

    impl RemoteCall for GetConfig {
        type Return = enums::Config;
    }
}

pub mod auth {
    use super::*;

    /// `auth.exportAuthorization#e5bfffcd dc_id:int
    /// = auth.ExportedAuthorization;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct ExportAuthorization {
        pub dc_id: i32,
    }

    impl Identifiable for ExportAuthorization {
        const CONSTRUCTOR_ID: u32 = 0xe5bfffcd;
    }

    impl Serializable for ExportAuthorization {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.dc_id.serialize(buf);
        }
    }

    impl RemoteCall for ExportAuthorization {
        type Return = enums::auth::ExportedAuthorization;
    }

    /// `auth.importAuthorization#a57a7dad id:long bytes:bytes
    /// = auth.Authorization;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct ImportAuthorization {
        pub id: i64,
        pub bytes: Vec<u8>,
    }

    impl Identifiable for ImportAuthorization {
        const CONSTRUCTOR_ID: u32 = 0xa57a7dad;
    }

    impl Serializable for ImportAuthorization {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.id.serialize(buf);
            self.bytes.serialize(buf);
        }
    }

    impl RemoteCall for ImportAuthorization {
        type Return = enums::auth::Authorization;
    }

    /// `auth.logOut#3e72ba19 = auth.LoggedOut;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct LogOut;

    impl Identifiable for LogOut {
        const CONSTRUCTOR_ID: u32 = 0x3e72ba19;
    }

    impl Serializable for LogOut {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
        }
    }

    impl RemoteCall for LogOut {
        type Return = enums::auth::LoggedOut;
    }
}

pub mod updates {
    use super::*;

    /// `updates.getState#edd4882a = updates.State;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct GetState;

    impl Identifiable for GetState {
        const CONSTRUCTOR_ID: u32 = 0xedd4882a;
    }

    impl Serializable for GetState {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
        }
    }

    impl RemoteCall for GetState {
        type Return = enums::updates::State;
    }

    /// `updates.getDifference#25939651 pts:int date:int qts:int
    /// = updates.Difference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct GetDifference {
        pub pts: i32,
        pub date: i32,
        pub qts: i32,
    }

    impl Identifiable for GetDifference {
        const CONSTRUCTOR_ID: u32 = 0x25939651;
    }

    impl Serializable for GetDifference {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.pts.serialize(buf);
            self.date.serialize(buf);
            self.qts.serialize(buf);
        }
    }

    impl RemoteCall for GetDifference {
        type Return = enums::updates::Difference;
    }

    /// `updates.getChannelDifference#03173d78 flags:# force:flags.0?true
    /// channel:InputChannel filter:ChannelMessagesFilter pts:int limit:int
    /// = updates.ChannelDifference;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct GetChannelDifference {
        pub force: bool,
        pub channel: enums::InputChannel,
        pub filter: enums::ChannelMessagesFilter,
        pub pts: i32,
        pub limit: i32,
    }

    impl Identifiable for GetChannelDifference {
        const CONSTRUCTOR_ID: u32 = 0x03173d78;
    }

    impl Serializable for GetChannelDifference {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            let mut flags = 0u32;
            flags |= if self.force { 1 << 0 } else { 0 };
            flags.serialize(buf);
            self.channel.serialize(buf);
            self.filter.serialize(buf);
            self.pts.serialize(buf);
            self.limit.serialize(buf);
        }
    }

    impl RemoteCall for GetChannelDifference {
        type Return = enums::updates::ChannelDifference;
    }
}

pub mod contacts {
    use super::*;

    /// `contacts.resolveUsername#f93ccba3 username:string
    /// = contacts.ResolvedPeer;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct ResolveUsername {
        pub username: String,
    }

    impl Identifiable for ResolveUsername {
        const CONSTRUCTOR_ID: u32 = 0xf93ccba3;
    }

    impl Serializable for ResolveUsername {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.username.serialize(buf);
        }
    }

    impl RemoteCall for ResolveUsername {
        type Return = enums::contacts::ResolvedPeer;
    }
}

pub mod users {
    use super::*;

    /// `users.getUsers#0d91a548 id:Vector<InputUser> = Vector<User>;`
    #[derive(Clone, Debug, PartialEq)]
    pub struct GetUsers {
        pub id: Vec<enums::InputUser>,
    }

    impl Identifiable for GetUsers {
        const CONSTRUCTOR_ID: u32 = 0x0d91a548;
    }

    impl Serializable for GetUsers {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            Self::CONSTRUCTOR_ID.serialize(buf);
            self.id.serialize(buf);
        }
    }

    impl RemoteCall for GetUsers {
        type Return = Vec<enums::User>;
    }
}

/// Requests whose response the caller wants verbatim can use [`Blob`] as
/// the return type by wrapping them in this request.
#[derive(Clone, Debug, PartialEq)]
pub struct Raw {
    pub body: Vec<u8>,
}

impl Serializable for Raw {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.body.iter().copied());
    }
}

impl RemoteCall for Raw {
    type Return = Blob;
}
