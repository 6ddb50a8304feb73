// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::HashMap;
use std::sync::Arc;

use ferrogram_tl as tl;
use log::debug;

use crate::storage::Storage;
use crate::types::{EntityEntry, PeerKind, PeerRef, UserIdentity};

/// The entity cache: peer identifier to access hash (and the occasional
/// username or phone), fed opportunistically from every payload that
/// carries peer descriptions, and persisted through the session storage.
///
/// User and channel identifiers never collide, so a single map keyed by
/// the bare identifier suffices.
pub struct PeerCache {
    storage: Arc<dyn Storage>,
    hashes: HashMap<i64, (PeerKind, i64)>,
    self_user: Option<UserIdentity>,
}

impl PeerCache {
    /// Create the cache over a storage, picking up the logged-in user if
    /// the storage knows one.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let self_user = storage.load_identity();
        Self {
            storage,
            hashes: HashMap::new(),
            self_user,
        }
    }

    /// The logged-in user's identifier.
    ///
    /// Panics when sign-in never completed; the update machinery has no
    /// business running before that.
    pub fn self_id(&self) -> i64 {
        self.self_user
            .expect("tried to query self_id before sign in")
            .id
    }

    pub fn is_self_bot(&self) -> bool {
        self.self_user.map(|user| user.is_bot).unwrap_or(false)
    }

    pub fn self_user(&self) -> Option<UserIdentity> {
        self.self_user
    }

    /// Remember (and persist) who this session is logged in as.
    pub fn set_self_user(&mut self, user: UserIdentity) {
        self.self_user = Some(user);
        self.storage.save_identity(&user);
    }

    /// Look a peer up, falling back to the persistent storage.
    pub fn get(&mut self, id: i64) -> Option<PeerRef> {
        if let Some(&(kind, hash)) = self.hashes.get(&id) {
            return Some(PeerRef {
                kind,
                id,
                hash: Some(hash),
            });
        }

        let entry = self.storage.get_entity(id)?;
        if let Some(hash) = entry.hash {
            self.hashes.insert(id, (entry.kind, hash));
        }
        Some(entry.to_ref())
    }

    /// Whether a usable reference to the peer is known. Chats never need
    /// an access hash, so they are always known.
    fn has(&mut self, id: i64) -> bool {
        self.hashes.contains_key(&id)
            || self
                .storage
                .get_entity(id)
                .map(|entry| entry.hash.is_some())
                .unwrap_or(false)
    }

    fn has_peer(&mut self, peer: &tl::enums::Peer) -> bool {
        match peer {
            tl::enums::Peer::User(user) => self.has(user.user_id),
            tl::enums::Peer::Chat(_) => true,
            tl::enums::Peer::Channel(channel) => self.has(channel.channel_id),
        }
    }

    fn has_message(&mut self, message: &tl::enums::Message) -> bool {
        match message {
            tl::enums::Message::Empty(_) => true,
            tl::enums::Message::Message(m) => {
                self.has_peer(&m.peer_id)
                    && m.from_id.as_ref().map(|p| self.has_peer(p)).unwrap_or(true)
            }
            tl::enums::Message::Service(m) => {
                self.has_peer(&m.peer_id)
                    && m.from_id.as_ref().map(|p| self.has_peer(p)).unwrap_or(true)
            }
        }
    }

    fn insert(&mut self, entry: EntityEntry) {
        if let Some(hash) = entry.hash {
            self.hashes.insert(entry.id, (entry.kind, hash));
        }
        self.storage.put_entity(&entry);
    }

    /// Walk the users and chats of a payload, upserting every peer whose
    /// access hash is usable.
    ///
    /// Returns `false` when some peer came as a [min constructor] without
    /// a previously-known hash, in which case references to it cannot be
    /// built and the caller should treat the situation as a gap.
    ///
    /// [min constructor]: https://core.telegram.org/api/min
    #[must_use]
    pub fn extend(&mut self, users: &[tl::enums::User], chats: &[tl::enums::Chat]) -> bool {
        let mut success = true;

        for user in users {
            match user {
                tl::enums::User::Empty(_) => {}
                tl::enums::User::User(u) => match (u.min, u.access_hash) {
                    (false, Some(hash)) => self.insert(EntityEntry {
                        id: u.id,
                        kind: PeerKind::User,
                        hash: Some(hash),
                        username: u.username.clone(),
                        phone: u.phone.clone(),
                    }),
                    _ => success &= self.has(u.id),
                },
            }
        }

        for chat in chats {
            match chat {
                tl::enums::Chat::Empty(_) => {}
                tl::enums::Chat::Chat(c) => self.insert(EntityEntry {
                    id: c.id,
                    kind: PeerKind::Chat,
                    hash: None,
                    username: None,
                    phone: None,
                }),
                tl::enums::Chat::Forbidden(c) => self.insert(EntityEntry {
                    id: c.id,
                    kind: PeerKind::Chat,
                    hash: None,
                    username: None,
                    phone: None,
                }),
                tl::enums::Chat::Channel(c) => match (c.min, c.access_hash) {
                    (false, Some(hash)) => self.insert(EntityEntry {
                        id: c.id,
                        kind: PeerKind::Channel,
                        hash: Some(hash),
                        username: c.username.clone(),
                        phone: None,
                    }),
                    _ => success &= self.has(c.id),
                },
                tl::enums::Chat::ChannelForbidden(c) => self.insert(EntityEntry {
                    id: c.id,
                    kind: PeerKind::Channel,
                    hash: Some(c.access_hash),
                    username: None,
                    phone: None,
                }),
            }
        }

        if !success {
            debug!("payload referenced peers with no known access hash");
        }
        success
    }

    /// Like [`PeerCache::extend`], but for socket updates, which may
    /// reference peers without carrying their descriptions.
    #[must_use]
    pub fn extend_from_updates(&mut self, updates: &tl::enums::Updates) -> bool {
        use tl::enums::Update as U;

        match updates {
            tl::enums::Updates::TooLong => true,
            // Short private messages need the other party's hash to be
            // useful; anything else can ride on what the update carries.
            tl::enums::Updates::UpdateShortMessage(short) => self.has(short.user_id),
            tl::enums::Updates::UpdateShortChatMessage(short) => self.has(short.from_id),
            tl::enums::Updates::UpdateShort(short) => match &short.update {
                U::NewMessage(u) => self.has_message(&u.message),
                U::DeleteMessages(_) => true,
                U::EditMessage(u) => self.has_message(&u.message),
                U::ReadHistoryInbox(u) => self.has_peer(&u.peer),
                U::ReadHistoryOutbox(u) => self.has_peer(&u.peer),
                U::NewChannelMessage(u) => self.has_message(&u.message),
                U::EditChannelMessage(u) => self.has_message(&u.message),
                U::DeleteChannelMessages(u) => self.has(u.channel_id),
                U::ReadChannelInbox(u) => self.has(u.channel_id),
                U::ChannelTooLong(u) => self.has(u.channel_id),
                U::Channel(u) => self.has(u.channel_id),
                U::BotStopped(u) => self.has(u.user_id),
                U::PtsChanged(_) => true,
                U::DcOptions(_) => true,
            },
            // The peers referenced by these are expected to come along in
            // `users` and `chats`.
            tl::enums::Updates::Combined(combined) => {
                self.extend(&combined.users, &combined.chats)
            }
            tl::enums::Updates::Updates(updates) => self.extend(&updates.users, &updates.chats),
            tl::enums::Updates::UpdateShortSentMessage(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storages::MemoryStorage;

    fn cache() -> PeerCache {
        PeerCache::new(Arc::new(MemoryStorage::new()))
    }

    fn full_user(id: i64, hash: i64) -> tl::enums::User {
        tl::enums::User::User(tl::types::User {
            is_self: false,
            bot: false,
            min: false,
            id,
            access_hash: Some(hash),
            first_name: Some("x".into()),
            username: None,
            phone: None,
        })
    }

    fn min_user(id: i64) -> tl::enums::User {
        tl::enums::User::User(tl::types::User {
            is_self: false,
            bot: false,
            min: true,
            id,
            access_hash: None,
            first_name: Some("x".into()),
            username: None,
            phone: None,
        })
    }

    #[test]
    fn extend_remembers_hashes() {
        let mut cache = cache();
        assert!(cache.extend(&[full_user(7, 42)], &[]));
        assert_eq!(cache.get(7), Some(PeerRef::user(7, 42)));
    }

    #[test]
    fn min_peers_require_prior_knowledge() {
        let mut cache = cache();
        assert!(!cache.extend(&[min_user(7)], &[]));

        assert!(cache.extend(&[full_user(7, 42)], &[]));
        assert!(cache.extend(&[min_user(7)], &[]));
        // The min constructor must not clobber the known hash.
        assert_eq!(cache.get(7), Some(PeerRef::user(7, 42)));
    }

    #[test]
    fn entries_survive_via_storage() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut cache = PeerCache::new(Arc::clone(&storage) as Arc<dyn Storage>);
            assert!(cache.extend(&[full_user(7, 42)], &[]));
        }
        let mut cache = PeerCache::new(storage);
        assert_eq!(cache.get(7), Some(PeerRef::user(7, 42)));
    }

    #[test]
    fn chats_never_need_hashes() {
        let mut cache = cache();
        assert!(cache.extend(
            &[],
            &[tl::enums::Chat::Chat(tl::types::Chat {
                id: 10,
                title: "group".into(),
            })]
        ));
        assert_eq!(cache.get(10), Some(PeerRef::chat(10)));
    }

    #[test]
    fn short_messages_from_strangers_are_flagged() {
        let mut cache = cache();
        let updates = tl::enums::Updates::UpdateShortMessage(tl::types::UpdateShortMessage {
            out: false,
            id: 1,
            user_id: 7,
            message: "hi".into(),
            pts: 2,
            pts_count: 1,
            date: 3,
        });
        assert!(!cache.extend_from_updates(&updates));

        assert!(cache.extend(&[full_user(7, 42)], &[]));
        assert!(cache.extend_from_updates(&updates));
    }
}
