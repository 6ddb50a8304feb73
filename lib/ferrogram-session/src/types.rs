// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The data a session knows how to persist.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use ferrogram_tl as tl;

/// Datacenter the library connects to before anything better is known.
pub const DEFAULT_DC: i32 = 2;

/// A datacenter: its identifier, network addresses, and role flags.
///
/// Addresses may be updated from the server-provided configuration, but a
/// datacenter's identity never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Datacenter {
    pub id: i32,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
    pub port: u16,
    /// Whether this datacenter only serves media.
    pub is_media: bool,
    /// Whether this is the home datacenter of the logged-in account.
    pub is_home: bool,
}

impl Datacenter {
    /// The address to dial, preferring IPv4.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.ipv4
            .map(IpAddr::from)
            .or_else(|| self.ipv6.map(IpAddr::from))
            .map(|ip| SocketAddr::new(ip, self.port))
    }
}

/// The statically-known addresses of the primary datacenters, used until a
/// server-provided configuration replaces them.
pub fn known_datacenters() -> Vec<Datacenter> {
    [
        (1, Ipv4Addr::new(149, 154, 175, 53)),
        (2, Ipv4Addr::new(149, 154, 167, 51)),
        (3, Ipv4Addr::new(149, 154, 175, 100)),
        (4, Ipv4Addr::new(149, 154, 167, 92)),
        (5, Ipv4Addr::new(91, 108, 56, 190)),
    ]
    .into_iter()
    .map(|(id, ipv4)| Datacenter {
        id,
        ipv4: Some(ipv4),
        ipv6: None,
        port: 443,
        is_media: false,
        is_home: id == DEFAULT_DC,
    })
    .collect()
}

/// Account-wide update state. Always persisted only after the updates it
/// accounts for have been handed over to the application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdatesState {
    pub pts: i32,
    pub qts: i32,
    pub date: i32,
    pub seq: i32,
}

/// Update state of a single channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelState {
    pub channel_id: i64,
    pub pts: i32,
}

/// The kind of a peer. Users and channels need an access hash to be
/// referenced in requests; small group chats do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeerKind {
    User,
    Chat,
    Channel,
}

impl PeerKind {
    pub fn to_code(self) -> i32 {
        match self {
            PeerKind::User => 0,
            PeerKind::Chat => 1,
            PeerKind::Channel => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => PeerKind::User,
            1 => PeerKind::Chat,
            2 => PeerKind::Channel,
            _ => return None,
        })
    }
}

/// A reference to a peer: enough information to put it in a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeerRef {
    pub kind: PeerKind,
    pub id: i64,
    /// Access hash, when the kind requires one and it is known.
    pub hash: Option<i64>,
}

impl PeerRef {
    pub fn user(id: i64, hash: i64) -> Self {
        Self {
            kind: PeerKind::User,
            id,
            hash: Some(hash),
        }
    }

    pub fn chat(id: i64) -> Self {
        Self {
            kind: PeerKind::Chat,
            id,
            hash: None,
        }
    }

    pub fn channel(id: i64, hash: i64) -> Self {
        Self {
            kind: PeerKind::Channel,
            id,
            hash: Some(hash),
        }
    }

    /// Whether enough is known to build an input peer out of this.
    pub fn usable(&self) -> bool {
        self.kind == PeerKind::Chat || self.hash.is_some()
    }

    pub fn to_input_peer(&self) -> Option<tl::enums::InputPeer> {
        Some(match self.kind {
            PeerKind::User => tl::types::InputPeerUser {
                user_id: self.id,
                access_hash: self.hash?,
            }
            .into(),
            PeerKind::Chat => tl::types::InputPeerChat { chat_id: self.id }.into(),
            PeerKind::Channel => tl::types::InputPeerChannel {
                channel_id: self.id,
                access_hash: self.hash?,
            }
            .into(),
        })
    }

    pub fn to_input_channel(&self) -> Option<tl::enums::InputChannel> {
        match self.kind {
            PeerKind::Channel => Some(
                tl::types::InputChannel {
                    channel_id: self.id,
                    access_hash: self.hash?,
                }
                .into(),
            ),
            _ => None,
        }
    }

    pub fn to_input_user(&self) -> Option<tl::enums::InputUser> {
        match self.kind {
            PeerKind::User => Some(
                tl::types::InputUser {
                    user_id: self.id,
                    access_hash: self.hash?,
                }
                .into(),
            ),
            _ => None,
        }
    }
}

/// The identifier (and hash-less kind) behind a `Peer` sent by the server.
pub fn peer_id(peer: &tl::enums::Peer) -> (PeerKind, i64) {
    match peer {
        tl::enums::Peer::User(x) => (PeerKind::User, x.user_id),
        tl::enums::Peer::Chat(x) => (PeerKind::Chat, x.chat_id),
        tl::enums::Peer::Channel(x) => (PeerKind::Channel, x.channel_id),
    }
}

/// A cached entity: everything the library remembers about a peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityEntry {
    pub id: i64,
    pub kind: PeerKind,
    pub hash: Option<i64>,
    pub username: Option<String>,
    pub phone: Option<String>,
}

impl EntityEntry {
    pub fn to_ref(&self) -> PeerRef {
        PeerRef {
            kind: self.kind,
            id: self.id,
            hash: self.hash,
        }
    }
}

/// The user this session is logged in as, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: i64,
    pub is_bot: bool,
}

/// Anything the network layer produces that the update machinery must see.
#[derive(Debug)]
pub enum UpdatesLike {
    /// An actual `Updates` body received from the server.
    Updates(tl::enums::Updates),
    /// Not sent by the server: the connection was re-established (or the
    /// server opened a new session), and any update in between may have
    /// been lost. The difference should be fetched.
    Reconnection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_datacenters_cover_primary_ids() {
        let dcs = known_datacenters();
        assert_eq!(dcs.len(), 5);
        (1..=5).for_each(|id| assert!(dcs.iter().any(|dc| dc.id == id)));
        assert!(dcs.iter().all(|dc| dc.socket_addr().is_some()));
    }

    #[test]
    fn peer_refs_build_input_peers() {
        assert!(matches!(
            PeerRef::user(7, 42).to_input_peer(),
            Some(tl::enums::InputPeer::User(x)) if x.user_id == 7 && x.access_hash == 42
        ));
        assert!(matches!(
            PeerRef::chat(7).to_input_peer(),
            Some(tl::enums::InputPeer::Chat(x)) if x.chat_id == 7
        ));
        assert!(PeerRef::chat(7).usable());
        assert!(!PeerRef {
            kind: PeerKind::Channel,
            id: 7,
            hash: None
        }
        .usable());
        assert!(PeerRef::channel(7, 42).to_input_channel().is_some());
        assert!(PeerRef::user(7, 42).to_input_channel().is_none());
    }

    #[test]
    fn peer_kind_codes_roundtrip() {
        for kind in [PeerKind::User, PeerKind::Chat, PeerKind::Channel] {
            assert_eq!(PeerKind::from_code(kind.to_code()), Some(kind));
        }
        assert_eq!(PeerKind::from_code(9), None);
    }
}
