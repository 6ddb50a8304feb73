// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! All of the "boxed" types, each represented by an `enum` over the bare
//! [`crate::types`] sharing the same result type. Deserialization reads the
//! constructor identifier and dispatches on it.
#![allow(clippy::large_enum_variant)]

use crate::deserialize::{Error, Result};
use crate::{types, Cursor, Deserializable, Identifiable, Serializable};

macro_rules! impl_from {
    ($ty:path, $enm:ty, $variant:ident) => {
        impl From<$ty> for $enm {
            fn from(x: $ty) -> Self {
                Self::$variant(x)
            }
        }
    };
}

#[derive(Clone, Debug, PartialEq)]
pub enum MsgsAck {
    Ack(types::MsgsAck),
}

impl Serializable for MsgsAck {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Ack(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for MsgsAck {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::MsgsAck::CONSTRUCTOR_ID => Self::Ack(types::MsgsAck::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::MsgsAck, MsgsAck, Ack);

#[derive(Clone, Debug, PartialEq)]
pub enum BadMsgNotification {
    Notification(types::BadMsgNotification),
    ServerSalt(types::BadServerSalt),
}

impl Serializable for BadMsgNotification {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Notification(x) => x.serialize(buf),
            Self::ServerSalt(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for BadMsgNotification {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::BadMsgNotification::CONSTRUCTOR_ID => {
                Self::Notification(types::BadMsgNotification::deserialize(buf)?)
            }
            types::BadServerSalt::CONSTRUCTOR_ID => {
                Self::ServerSalt(types::BadServerSalt::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::BadMsgNotification, BadMsgNotification, Notification);
impl_from!(types::BadServerSalt, BadMsgNotification, ServerSalt);

#[derive(Clone, Debug, PartialEq)]
pub enum MsgDetailedInfo {
    Info(types::MsgDetailedInfo),
    New(types::MsgNewDetailedInfo),
}

impl Serializable for MsgDetailedInfo {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Info(x) => x.serialize(buf),
            Self::New(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for MsgDetailedInfo {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::MsgDetailedInfo::CONSTRUCTOR_ID => {
                Self::Info(types::MsgDetailedInfo::deserialize(buf)?)
            }
            types::MsgNewDetailedInfo::CONSTRUCTOR_ID => {
                Self::New(types::MsgNewDetailedInfo::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pong {
    Pong(types::Pong),
}

impl Serializable for Pong {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Pong(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for Pong {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::Pong::CONSTRUCTOR_ID => Self::Pong(types::Pong::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::Pong, Pong, Pong);

#[derive(Clone, Debug, PartialEq)]
pub enum FutureSalts {
    Salts(types::FutureSalts),
}

impl Serializable for FutureSalts {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Salts(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for FutureSalts {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::FutureSalts::CONSTRUCTOR_ID => {
                Self::Salts(types::FutureSalts::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::FutureSalts, FutureSalts, Salts);

#[derive(Clone, Debug, PartialEq)]
pub enum NewSession {
    Created(types::NewSessionCreated),
}

impl Serializable for NewSession {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Created(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for NewSession {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::NewSessionCreated::CONSTRUCTOR_ID => {
                Self::Created(types::NewSessionCreated::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::NewSessionCreated, NewSession, Created);

#[derive(Clone, Debug, PartialEq)]
pub enum DestroySessionRes {
    Ok(types::DestroySessionOk),
    None(types::DestroySessionNone),
}

impl Serializable for DestroySessionRes {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Ok(x) => x.serialize(buf),
            Self::None(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for DestroySessionRes {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::DestroySessionOk::CONSTRUCTOR_ID => {
                Self::Ok(types::DestroySessionOk::deserialize(buf)?)
            }
            types::DestroySessionNone::CONSTRUCTOR_ID => {
                Self::None(types::DestroySessionNone::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RpcDropAnswer {
    Unknown(types::RpcAnswerUnknown),
    DroppedRunning(types::RpcAnswerDroppedRunning),
    Dropped(types::RpcAnswerDropped),
}

impl Serializable for RpcDropAnswer {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Unknown(x) => x.serialize(buf),
            Self::DroppedRunning(x) => x.serialize(buf),
            Self::Dropped(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for RpcDropAnswer {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::RpcAnswerUnknown::CONSTRUCTOR_ID => {
                Self::Unknown(types::RpcAnswerUnknown::deserialize(buf)?)
            }
            types::RpcAnswerDroppedRunning::CONSTRUCTOR_ID => {
                Self::DroppedRunning(types::RpcAnswerDroppedRunning::deserialize(buf)?)
            }
            types::RpcAnswerDropped::CONSTRUCTOR_ID => {
                Self::Dropped(types::RpcAnswerDropped::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RpcError {
    Error(types::RpcError),
}

impl Serializable for RpcError {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Error(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for RpcError {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::RpcError::CONSTRUCTOR_ID => Self::Error(types::RpcError::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::RpcError, RpcError, Error);

#[derive(Clone, Debug, PartialEq)]
pub enum ResPq {
    Pq(types::ResPq),
}

impl Serializable for ResPq {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Pq(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for ResPq {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::ResPq::CONSTRUCTOR_ID => Self::Pq(types::ResPq::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::ResPq, ResPq, Pq);

#[derive(Clone, Debug, PartialEq)]
pub enum PqInnerData {
    Data(types::PqInnerData),
}

impl Serializable for PqInnerData {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Data(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for PqInnerData {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::PqInnerData::CONSTRUCTOR_ID => {
                Self::Data(types::PqInnerData::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::PqInnerData, PqInnerData, Data);

#[derive(Clone, Debug, PartialEq)]
pub enum ServerDhParams {
    Ok(types::ServerDhParamsOk),
    Fail(types::ServerDhParamsFail),
}

impl Serializable for ServerDhParams {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Ok(x) => x.serialize(buf),
            Self::Fail(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for ServerDhParams {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::ServerDhParamsOk::CONSTRUCTOR_ID => {
                Self::Ok(types::ServerDhParamsOk::deserialize(buf)?)
            }
            types::ServerDhParamsFail::CONSTRUCTOR_ID => {
                Self::Fail(types::ServerDhParamsFail::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ServerDhInnerData {
    Data(types::ServerDhInnerData),
}

impl Serializable for ServerDhInnerData {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Data(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for ServerDhInnerData {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::ServerDhInnerData::CONSTRUCTOR_ID => {
                Self::Data(types::ServerDhInnerData::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::ServerDhInnerData, ServerDhInnerData, Data);

#[derive(Clone, Debug, PartialEq)]
pub enum ClientDhInnerData {
    Data(types::ClientDhInnerData),
}

impl Serializable for ClientDhInnerData {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Data(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for ClientDhInnerData {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::ClientDhInnerData::CONSTRUCTOR_ID => {
                Self::Data(types::ClientDhInnerData::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::ClientDhInnerData, ClientDhInnerData, Data);

#[derive(Clone, Debug, PartialEq)]
pub enum SetClientDhParamsAnswer {
    DhGenOk(types::DhGenOk),
    DhGenRetry(types::DhGenRetry),
    DhGenFail(types::DhGenFail),
}

impl Serializable for SetClientDhParamsAnswer {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::DhGenOk(x) => x.serialize(buf),
            Self::DhGenRetry(x) => x.serialize(buf),
            Self::DhGenFail(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for SetClientDhParamsAnswer {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::DhGenOk::CONSTRUCTOR_ID => Self::DhGenOk(types::DhGenOk::deserialize(buf)?),
            types::DhGenRetry::CONSTRUCTOR_ID => {
                Self::DhGenRetry(types::DhGenRetry::deserialize(buf)?)
            }
            types::DhGenFail::CONSTRUCTOR_ID => {
                Self::DhGenFail(types::DhGenFail::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Peer {
    User(types::PeerUser),
    Chat(types::PeerChat),
    Channel(types::PeerChannel),
}

impl Serializable for Peer {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::User(x) => x.serialize(buf),
            Self::Chat(x) => x.serialize(buf),
            Self::Channel(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for Peer {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::PeerUser::CONSTRUCTOR_ID => Self::User(types::PeerUser::deserialize(buf)?),
            types::PeerChat::CONSTRUCTOR_ID => Self::Chat(types::PeerChat::deserialize(buf)?),
            types::PeerChannel::CONSTRUCTOR_ID => {
                Self::Channel(types::PeerChannel::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::PeerUser, Peer, User);
impl_from!(types::PeerChat, Peer, Chat);
impl_from!(types::PeerChannel, Peer, Channel);

#[derive(Clone, Debug, PartialEq)]
pub enum InputPeer {
    Empty(types::InputPeerEmpty),
    PeerSelf(types::InputPeerSelf),
    Chat(types::InputPeerChat),
    User(types::InputPeerUser),
    Channel(types::InputPeerChannel),
}

impl Serializable for InputPeer {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Empty(x) => x.serialize(buf),
            Self::PeerSelf(x) => x.serialize(buf),
            Self::Chat(x) => x.serialize(buf),
            Self::User(x) => x.serialize(buf),
            Self::Channel(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for InputPeer {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::InputPeerEmpty::CONSTRUCTOR_ID => {
                Self::Empty(types::InputPeerEmpty::deserialize(buf)?)
            }
            types::InputPeerSelf::CONSTRUCTOR_ID => {
                Self::PeerSelf(types::InputPeerSelf::deserialize(buf)?)
            }
            types::InputPeerChat::CONSTRUCTOR_ID => {
                Self::Chat(types::InputPeerChat::deserialize(buf)?)
            }
            types::InputPeerUser::CONSTRUCTOR_ID => {
                Self::User(types::InputPeerUser::deserialize(buf)?)
            }
            types::InputPeerChannel::CONSTRUCTOR_ID => {
                Self::Channel(types::InputPeerChannel::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::InputPeerUser, InputPeer, User);
impl_from!(types::InputPeerChat, InputPeer, Chat);
impl_from!(types::InputPeerChannel, InputPeer, Channel);

#[derive(Clone, Debug, PartialEq)]
pub enum InputUser {
    Empty(types::InputUserEmpty),
    UserSelf(types::InputUserSelf),
    User(types::InputUser),
}

impl Serializable for InputUser {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Empty(x) => x.serialize(buf),
            Self::UserSelf(x) => x.serialize(buf),
            Self::User(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for InputUser {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::InputUserEmpty::CONSTRUCTOR_ID => {
                Self::Empty(types::InputUserEmpty::deserialize(buf)?)
            }
            types::InputUserSelf::CONSTRUCTOR_ID => {
                Self::UserSelf(types::InputUserSelf::deserialize(buf)?)
            }
            types::InputUser::CONSTRUCTOR_ID => Self::User(types::InputUser::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::InputUser, InputUser, User);

#[derive(Clone, Debug, PartialEq)]
pub enum InputChannel {
    Empty(types::InputChannelEmpty),
    Channel(types::InputChannel),
}

impl Serializable for InputChannel {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Empty(x) => x.serialize(buf),
            Self::Channel(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for InputChannel {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::InputChannelEmpty::CONSTRUCTOR_ID => {
                Self::Empty(types::InputChannelEmpty::deserialize(buf)?)
            }
            types::InputChannel::CONSTRUCTOR_ID => {
                Self::Channel(types::InputChannel::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::InputChannel, InputChannel, Channel);

#[derive(Clone, Debug, PartialEq)]
pub enum User {
    Empty(types::UserEmpty),
    User(types::User),
}

impl Serializable for User {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Empty(x) => x.serialize(buf),
            Self::User(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for User {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::UserEmpty::CONSTRUCTOR_ID => Self::Empty(types::UserEmpty::deserialize(buf)?),
            types::User::CONSTRUCTOR_ID => Self::User(types::User::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::User, User, User);

#[derive(Clone, Debug, PartialEq)]
pub enum Chat {
    Empty(types::ChatEmpty),
    Chat(types::Chat),
    Forbidden(types::ChatForbidden),
    Channel(types::Channel),
    ChannelForbidden(types::ChannelForbidden),
}

impl Serializable for Chat {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Empty(x) => x.serialize(buf),
            Self::Chat(x) => x.serialize(buf),
            Self::Forbidden(x) => x.serialize(buf),
            Self::Channel(x) => x.serialize(buf),
            Self::ChannelForbidden(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for Chat {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::ChatEmpty::CONSTRUCTOR_ID => Self::Empty(types::ChatEmpty::deserialize(buf)?),
            types::Chat::CONSTRUCTOR_ID => Self::Chat(types::Chat::deserialize(buf)?),
            types::ChatForbidden::CONSTRUCTOR_ID => {
                Self::Forbidden(types::ChatForbidden::deserialize(buf)?)
            }
            types::Channel::CONSTRUCTOR_ID => Self::Channel(types::Channel::deserialize(buf)?),
            types::ChannelForbidden::CONSTRUCTOR_ID => {
                Self::ChannelForbidden(types::ChannelForbidden::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::Chat, Chat, Chat);
impl_from!(types::Channel, Chat, Channel);

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Empty(types::MessageEmpty),
    Message(types::Message),
    Service(types::MessageService),
}

impl Serializable for Message {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Empty(x) => x.serialize(buf),
            Self::Message(x) => x.serialize(buf),
            Self::Service(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for Message {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::MessageEmpty::CONSTRUCTOR_ID => {
                Self::Empty(types::MessageEmpty::deserialize(buf)?)
            }
            types::Message::CONSTRUCTOR_ID => Self::Message(types::Message::deserialize(buf)?),
            types::MessageService::CONSTRUCTOR_ID => {
                Self::Service(types::MessageService::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::MessageEmpty, Message, Empty);
impl_from!(types::Message, Message, Message);

#[derive(Clone, Debug, PartialEq)]
pub enum Dialog {
    Dialog(types::Dialog),
}

impl Serializable for Dialog {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Dialog(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for Dialog {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::Dialog::CONSTRUCTOR_ID => Self::Dialog(types::Dialog::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::Dialog, Dialog, Dialog);

#[derive(Clone, Debug, PartialEq)]
pub enum DcOption {
    Option(types::DcOption),
}

impl Serializable for DcOption {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Option(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for DcOption {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::DcOption::CONSTRUCTOR_ID => Self::Option(types::DcOption::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::DcOption, DcOption, Option);

#[derive(Clone, Debug, PartialEq)]
pub enum Config {
    Config(types::Config),
}

impl Serializable for Config {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Config(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for Config {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::Config::CONSTRUCTOR_ID => Self::Config(types::Config::deserialize(buf)?),
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::Config, Config, Config);

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelMessagesFilter {
    Empty(types::ChannelMessagesFilterEmpty),
}

impl Serializable for ChannelMessagesFilter {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Empty(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for ChannelMessagesFilter {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::ChannelMessagesFilterEmpty::CONSTRUCTOR_ID => {
                Self::Empty(types::ChannelMessagesFilterEmpty::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    NewMessage(types::UpdateNewMessage),
    DeleteMessages(types::UpdateDeleteMessages),
    EditMessage(types::UpdateEditMessage),
    ReadHistoryInbox(types::UpdateReadHistoryInbox),
    ReadHistoryOutbox(types::UpdateReadHistoryOutbox),
    NewChannelMessage(types::UpdateNewChannelMessage),
    EditChannelMessage(types::UpdateEditChannelMessage),
    DeleteChannelMessages(types::UpdateDeleteChannelMessages),
    ReadChannelInbox(types::UpdateReadChannelInbox),
    ChannelTooLong(types::UpdateChannelTooLong),
    Channel(types::UpdateChannel),
    BotStopped(types::UpdateBotStopped),
    PtsChanged(types::UpdatePtsChanged),
    DcOptions(types::UpdateDcOptions),
}

impl Serializable for Update {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::NewMessage(x) => x.serialize(buf),
            Self::DeleteMessages(x) => x.serialize(buf),
            Self::EditMessage(x) => x.serialize(buf),
            Self::ReadHistoryInbox(x) => x.serialize(buf),
            Self::ReadHistoryOutbox(x) => x.serialize(buf),
            Self::NewChannelMessage(x) => x.serialize(buf),
            Self::EditChannelMessage(x) => x.serialize(buf),
            Self::DeleteChannelMessages(x) => x.serialize(buf),
            Self::ReadChannelInbox(x) => x.serialize(buf),
            Self::ChannelTooLong(x) => x.serialize(buf),
            Self::Channel(x) => x.serialize(buf),
            Self::BotStopped(x) => x.serialize(buf),
            Self::PtsChanged(x) => x.serialize(buf),
            Self::DcOptions(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for Update {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            types::UpdateNewMessage::CONSTRUCTOR_ID => {
                Self::NewMessage(types::UpdateNewMessage::deserialize(buf)?)
            }
            types::UpdateDeleteMessages::CONSTRUCTOR_ID => {
                Self::DeleteMessages(types::UpdateDeleteMessages::deserialize(buf)?)
            }
            types::UpdateEditMessage::CONSTRUCTOR_ID => {
                Self::EditMessage(types::UpdateEditMessage::deserialize(buf)?)
            }
            types::UpdateReadHistoryInbox::CONSTRUCTOR_ID => {
                Self::ReadHistoryInbox(types::UpdateReadHistoryInbox::deserialize(buf)?)
            }
            types::UpdateReadHistoryOutbox::CONSTRUCTOR_ID => {
                Self::ReadHistoryOutbox(types::UpdateReadHistoryOutbox::deserialize(buf)?)
            }
            types::UpdateNewChannelMessage::CONSTRUCTOR_ID => {
                Self::NewChannelMessage(types::UpdateNewChannelMessage::deserialize(buf)?)
            }
            types::UpdateEditChannelMessage::CONSTRUCTOR_ID => {
                Self::EditChannelMessage(types::UpdateEditChannelMessage::deserialize(buf)?)
            }
            types::UpdateDeleteChannelMessages::CONSTRUCTOR_ID => {
                Self::DeleteChannelMessages(types::UpdateDeleteChannelMessages::deserialize(buf)?)
            }
            types::UpdateReadChannelInbox::CONSTRUCTOR_ID => {
                Self::ReadChannelInbox(types::UpdateReadChannelInbox::deserialize(buf)?)
            }
            types::UpdateChannelTooLong::CONSTRUCTOR_ID => {
                Self::ChannelTooLong(types::UpdateChannelTooLong::deserialize(buf)?)
            }
            types::UpdateChannel::CONSTRUCTOR_ID => {
                Self::Channel(types::UpdateChannel::deserialize(buf)?)
            }
            types::UpdateBotStopped::CONSTRUCTOR_ID => {
                Self::BotStopped(types::UpdateBotStopped::deserialize(buf)?)
            }
            types::UpdatePtsChanged::CONSTRUCTOR_ID => {
                Self::PtsChanged(types::UpdatePtsChanged::deserialize(buf)?)
            }
            types::UpdateDcOptions::CONSTRUCTOR_ID => {
                Self::DcOptions(types::UpdateDcOptions::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::UpdateNewMessage, Update, NewMessage);
impl_from!(types::UpdateDeleteMessages, Update, DeleteMessages);
impl_from!(types::UpdateEditMessage, Update, EditMessage);
impl_from!(types::UpdateReadHistoryInbox, Update, ReadHistoryInbox);
impl_from!(types::UpdateReadHistoryOutbox, Update, ReadHistoryOutbox);
impl_from!(types::UpdateNewChannelMessage, Update, NewChannelMessage);
impl_from!(types::UpdateEditChannelMessage, Update, EditChannelMessage);
impl_from!(types::UpdateDeleteChannelMessages, Update, DeleteChannelMessages);
impl_from!(types::UpdateReadChannelInbox, Update, ReadChannelInbox);
impl_from!(types::UpdateChannelTooLong, Update, ChannelTooLong);
impl_from!(types::UpdateChannel, Update, Channel);
impl_from!(types::UpdateBotStopped, Update, BotStopped);
impl_from!(types::UpdateDcOptions, Update, DcOptions);

/// The `Updates` boxed type. `updatesTooLong` carries no fields, so it is
/// represented as a field-less variant directly.
#[derive(Clone, Debug, PartialEq)]
pub enum Updates {
    TooLong,
    UpdateShortMessage(types::UpdateShortMessage),
    UpdateShortChatMessage(types::UpdateShortChatMessage),
    UpdateShort(types::UpdateShort),
    Combined(types::UpdatesCombined),
    Updates(types::Updates),
    UpdateShortSentMessage(types::UpdateShortSentMessage),
}

impl Updates {
    /// `updatesTooLong#e317af7e = Updates;`
    pub const TOO_LONG_CONSTRUCTOR_ID: u32 = 0xe317af7e;
}

impl Serializable for Updates {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::TooLong => Self::TOO_LONG_CONSTRUCTOR_ID.serialize(buf),
            Self::UpdateShortMessage(x) => x.serialize(buf),
            Self::UpdateShortChatMessage(x) => x.serialize(buf),
            Self::UpdateShort(x) => x.serialize(buf),
            Self::Combined(x) => x.serialize(buf),
            Self::Updates(x) => x.serialize(buf),
            Self::UpdateShortSentMessage(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for Updates {
    fn deserialize(buf: &mut Cursor) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        Ok(match id {
            Self::TOO_LONG_CONSTRUCTOR_ID => Self::TooLong,
            types::UpdateShortMessage::CONSTRUCTOR_ID => {
                Self::UpdateShortMessage(types::UpdateShortMessage::deserialize(buf)?)
            }
            types::UpdateShortChatMessage::CONSTRUCTOR_ID => {
                Self::UpdateShortChatMessage(types::UpdateShortChatMessage::deserialize(buf)?)
            }
            types::UpdateShort::CONSTRUCTOR_ID => {
                Self::UpdateShort(types::UpdateShort::deserialize(buf)?)
            }
            types::UpdatesCombined::CONSTRUCTOR_ID => {
                Self::Combined(types::UpdatesCombined::deserialize(buf)?)
            }
            types::Updates::CONSTRUCTOR_ID => Self::Updates(types::Updates::deserialize(buf)?),
            types::UpdateShortSentMessage::CONSTRUCTOR_ID => {
                Self::UpdateShortSentMessage(types::UpdateShortSentMessage::deserialize(buf)?)
            }
            _ => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

impl_from!(types::UpdateShort, Updates, UpdateShort);
impl_from!(types::UpdatesCombined, Updates, Combined);
impl_from!(types::Updates, Updates, Updates);

pub mod updates {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum State {
        State(types::updates::State),
    }

    impl Serializable for State {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            match self {
                Self::State(x) => x.serialize(buf),
            }
        }
    }

    impl Deserializable for State {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let id = u32::deserialize(buf)?;
            Ok(match id {
                types::updates::State::CONSTRUCTOR_ID => {
                    Self::State(types::updates::State::deserialize(buf)?)
                }
                _ => return Err(Error::UnexpectedConstructor { id }),
            })
        }
    }

    impl From<types::updates::State> for State {
        fn from(x: types::updates::State) -> Self {
            Self::State(x)
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    pub enum Difference {
        Empty(types::updates::DifferenceEmpty),
        Difference(types::updates::Difference),
        Slice(types::updates::DifferenceSlice),
        TooLong(types::updates::DifferenceTooLong),
    }

    impl Serializable for Difference {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            match self {
                Self::Empty(x) => x.serialize(buf),
                Self::Difference(x) => x.serialize(buf),
                Self::Slice(x) => x.serialize(buf),
                Self::TooLong(x) => x.serialize(buf),
            }
        }
    }

    impl Deserializable for Difference {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let id = u32::deserialize(buf)?;
            Ok(match id {
                types::updates::DifferenceEmpty::CONSTRUCTOR_ID => {
                    Self::Empty(types::updates::DifferenceEmpty::deserialize(buf)?)
                }
                types::updates::Difference::CONSTRUCTOR_ID => {
                    Self::Difference(types::updates::Difference::deserialize(buf)?)
                }
                types::updates::DifferenceSlice::CONSTRUCTOR_ID => {
                    Self::Slice(types::updates::DifferenceSlice::deserialize(buf)?)
                }
                types::updates::DifferenceTooLong::CONSTRUCTOR_ID => {
                    Self::TooLong(types::updates::DifferenceTooLong::deserialize(buf)?)
                }
                _ => return Err(Error::UnexpectedConstructor { id }),
            })
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    pub enum ChannelDifference {
        Empty(types::updates::ChannelDifferenceEmpty),
        TooLong(types::updates::ChannelDifferenceTooLong),
        Difference(types::updates::ChannelDifference),
    }

    impl Serializable for ChannelDifference {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            match self {
                Self::Empty(x) => x.serialize(buf),
                Self::TooLong(x) => x.serialize(buf),
                Self::Difference(x) => x.serialize(buf),
            }
        }
    }

    impl Deserializable for ChannelDifference {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let id = u32::deserialize(buf)?;
            Ok(match id {
                types::updates::ChannelDifferenceEmpty::CONSTRUCTOR_ID => {
                    Self::Empty(types::updates::ChannelDifferenceEmpty::deserialize(buf)?)
                }
                types::updates::ChannelDifferenceTooLong::CONSTRUCTOR_ID => {
                    Self::TooLong(types::updates::ChannelDifferenceTooLong::deserialize(buf)?)
                }
                types::updates::ChannelDifference::CONSTRUCTOR_ID => {
                    Self::Difference(types::updates::ChannelDifference::deserialize(buf)?)
                }
                _ => return Err(Error::UnexpectedConstructor { id }),
            })
        }
    }
}

pub mod auth {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum ExportedAuthorization {
        Authorization(types::auth::ExportedAuthorization),
    }

    impl Serializable for ExportedAuthorization {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            match self {
                Self::Authorization(x) => x.serialize(buf),
            }
        }
    }

    impl Deserializable for ExportedAuthorization {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let id = u32::deserialize(buf)?;
            Ok(match id {
                types::auth::ExportedAuthorization::CONSTRUCTOR_ID => {
                    Self::Authorization(types::auth::ExportedAuthorization::deserialize(buf)?)
                }
                _ => return Err(Error::UnexpectedConstructor { id }),
            })
        }
    }

    impl From<types::auth::ExportedAuthorization> for ExportedAuthorization {
        fn from(x: types::auth::ExportedAuthorization) -> Self {
            Self::Authorization(x)
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    pub enum Authorization {
        Authorization(types::auth::Authorization),
    }

    impl Serializable for Authorization {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            match self {
                Self::Authorization(x) => x.serialize(buf),
            }
        }
    }

    impl Deserializable for Authorization {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let id = u32::deserialize(buf)?;
            Ok(match id {
                types::auth::Authorization::CONSTRUCTOR_ID => {
                    Self::Authorization(types::auth::Authorization::deserialize(buf)?)
                }
                _ => return Err(Error::UnexpectedConstructor { id }),
            })
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    pub enum LoggedOut {
        LoggedOut(types::auth::LoggedOut),
    }

    impl Serializable for LoggedOut {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            match self {
                Self::LoggedOut(x) => x.serialize(buf),
            }
        }
    }

    impl Deserializable for LoggedOut {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let id = u32::deserialize(buf)?;
            Ok(match id {
                types::auth::LoggedOut::CONSTRUCTOR_ID => {
                    Self::LoggedOut(types::auth::LoggedOut::deserialize(buf)?)
                }
                _ => return Err(Error::UnexpectedConstructor { id }),
            })
        }
    }
}

pub mod contacts {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum ResolvedPeer {
        Peer(types::contacts::ResolvedPeer),
    }

    impl Serializable for ResolvedPeer {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            match self {
                Self::Peer(x) => x.serialize(buf),
            }
        }
    }

    impl Deserializable for ResolvedPeer {
        fn deserialize(buf: &mut Cursor) -> Result<Self> {
            let id = u32::deserialize(buf)?;
            Ok(match id {
                types::contacts::ResolvedPeer::CONSTRUCTOR_ID => {
                    Self::Peer(types::contacts::ResolvedPeer::deserialize(buf)?)
                }
                _ => return Err(Error::UnexpectedConstructor { id }),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_roundtrip() {
        let pong = Pong::Pong(types::Pong {
            msg_id: 123,
            ping_id: -456,
        });
        assert_eq!(Pong::from_bytes(&pong.to_bytes()).unwrap(), pong);

        let salt = BadMsgNotification::ServerSalt(types::BadServerSalt {
            bad_msg_id: 1,
            bad_msg_seqno: 3,
            error_code: 48,
            new_server_salt: 0x1234,
        });
        assert_eq!(
            BadMsgNotification::from_bytes(&salt.to_bytes()).unwrap(),
            salt
        );
    }

    #[test]
    fn flagged_roundtrip() {
        let user = User::User(types::User {
            is_self: false,
            bot: true,
            min: false,
            id: 7,
            access_hash: Some(0x0123456789abcdef),
            first_name: Some("bot".to_string()),
            username: None,
            phone: None,
        });
        assert_eq!(User::from_bytes(&user.to_bytes()).unwrap(), user);

        let too_long = Update::ChannelTooLong(types::UpdateChannelTooLong {
            channel_id: 44,
            pts: None,
        });
        assert_eq!(Update::from_bytes(&too_long.to_bytes()).unwrap(), too_long);
    }

    #[test]
    fn updates_roundtrip() {
        let updates = Updates::Combined(types::UpdatesCombined {
            updates: vec![Update::PtsChanged(types::UpdatePtsChanged)],
            users: vec![User::Empty(types::UserEmpty { id: 1 })],
            chats: vec![],
            date: 10,
            seq_start: 2,
            seq: 3,
        });
        assert_eq!(Updates::from_bytes(&updates.to_bytes()).unwrap(), updates);

        assert_eq!(
            Updates::from_bytes(&Updates::TooLong.to_bytes()).unwrap(),
            Updates::TooLong
        );
    }

    #[test]
    fn unknown_constructor_is_reported() {
        assert_eq!(
            Updates::from_bytes(&[1, 2, 3, 4]),
            Err(Error::UnexpectedConstructor { id: 0x04030201 })
        );
    }
}
