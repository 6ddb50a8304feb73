// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::HashMap;
use std::sync::Mutex;

use crate::storage::Storage;
use crate::types::{
    known_datacenters, ChannelState, Datacenter, EntityEntry, UpdatesState, UserIdentity,
};

#[derive(Clone)]
struct Data {
    datacenters: HashMap<i32, Datacenter>,
    auth_keys: HashMap<i32, [u8; 256]>,
    identity: Option<UserIdentity>,
    update_state: Option<UpdatesState>,
    channels: HashMap<i64, i32>,
    entities: HashMap<i64, EntityEntry>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            datacenters: known_datacenters()
                .into_iter()
                .map(|dc| (dc.id, dc))
                .collect(),
            auth_keys: HashMap::new(),
            identity: None,
            update_state: None,
            channels: HashMap::new(),
            entities: HashMap::new(),
        }
    }
}

/// In-memory session storage. Nothing survives the process, so it is only
/// suitable for tests and one-shot bots (signing in repeatedly is a quick
/// way to run into flood errors).
///
/// Transactions are implemented with a snapshot of the whole state, which
/// is cheap at the sizes a single account reaches.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<Data>,
    snapshot: Mutex<Option<Data>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load_datacenter(&self, id: i32) -> Option<Datacenter> {
        self.data.lock().unwrap().datacenters.get(&id).cloned()
    }

    fn save_datacenter(&self, dc: &Datacenter) {
        self.data
            .lock()
            .unwrap()
            .datacenters
            .insert(dc.id, dc.clone());
    }

    fn home_datacenter(&self) -> Option<i32> {
        self.data
            .lock()
            .unwrap()
            .datacenters
            .values()
            .find(|dc| dc.is_home)
            .map(|dc| dc.id)
    }

    fn set_home_datacenter(&self, id: i32) {
        let mut data = self.data.lock().unwrap();
        data.datacenters
            .values_mut()
            .for_each(|dc| dc.is_home = dc.id == id);
    }

    fn load_auth_key(&self, dc_id: i32) -> Option<[u8; 256]> {
        self.data.lock().unwrap().auth_keys.get(&dc_id).copied()
    }

    fn save_auth_key(&self, dc_id: i32, key: &[u8; 256]) {
        self.data.lock().unwrap().auth_keys.insert(dc_id, *key);
    }

    fn clear_auth_key(&self, dc_id: i32) {
        self.data.lock().unwrap().auth_keys.remove(&dc_id);
    }

    fn auth_key_datacenters(&self) -> Vec<i32> {
        let mut ids = self
            .data
            .lock()
            .unwrap()
            .auth_keys
            .keys()
            .copied()
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    fn load_identity(&self) -> Option<UserIdentity> {
        self.data.lock().unwrap().identity
    }

    fn save_identity(&self, identity: &UserIdentity) {
        self.data.lock().unwrap().identity = Some(*identity);
    }

    fn load_update_state(&self) -> Option<UpdatesState> {
        self.data.lock().unwrap().update_state
    }

    fn save_update_state(&self, state: &UpdatesState) {
        self.data.lock().unwrap().update_state = Some(*state);
    }

    fn load_channel_state(&self, channel_id: i64) -> Option<i32> {
        self.data.lock().unwrap().channels.get(&channel_id).copied()
    }

    fn save_channel_state(&self, channel_id: i64, pts: i32) {
        self.data.lock().unwrap().channels.insert(channel_id, pts);
    }

    fn load_channel_states(&self) -> Vec<ChannelState> {
        let mut channels = self
            .data
            .lock()
            .unwrap()
            .channels
            .iter()
            .map(|(&channel_id, &pts)| ChannelState { channel_id, pts })
            .collect::<Vec<_>>();
        channels.sort_unstable_by_key(|c| c.channel_id);
        channels
    }

    fn get_entity(&self, id: i64) -> Option<EntityEntry> {
        self.data.lock().unwrap().entities.get(&id).cloned()
    }

    fn put_entity(&self, entity: &EntityEntry) {
        self.data
            .lock()
            .unwrap()
            .entities
            .insert(entity.id, entity.clone());
    }

    fn begin_transaction(&self) {
        let data = self.data.lock().unwrap().clone();
        *self.snapshot.lock().unwrap() = Some(data);
    }

    fn commit(&self) {
        *self.snapshot.lock().unwrap() = None;
    }

    fn rollback(&self) {
        if let Some(snapshot) = self.snapshot.lock().unwrap().take() {
            *self.data.lock().unwrap() = snapshot;
        }
    }

    fn wipe(&self) {
        *self.data.lock().unwrap() = Data::default();
        *self.snapshot.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PeerKind, DEFAULT_DC};

    #[test]
    fn fresh_storage_knows_primary_datacenters() {
        let storage = MemoryStorage::new();
        assert!(storage.load_datacenter(DEFAULT_DC).is_some());
        assert_eq!(storage.home_datacenter(), Some(DEFAULT_DC));
        assert_eq!(storage.load_auth_key(DEFAULT_DC), None);
        assert_eq!(storage.load_update_state(), None);
    }

    #[test]
    fn state_roundtrips() {
        let storage = MemoryStorage::new();

        storage.set_home_datacenter(4);
        assert_eq!(storage.home_datacenter(), Some(4));

        storage.save_auth_key(4, &[1; 256]);
        storage.save_auth_key(5, &[2; 256]);
        assert_eq!(storage.load_auth_key(4), Some([1; 256]));
        assert_eq!(storage.auth_key_datacenters(), vec![4, 5]);

        let state = UpdatesState {
            pts: 1,
            qts: 2,
            date: 3,
            seq: 4,
        };
        storage.save_update_state(&state);
        assert_eq!(storage.load_update_state(), Some(state));

        storage.save_channel_state(7, 100);
        storage.save_channel_state(7, 103);
        assert_eq!(storage.load_channel_state(7), Some(103));

        let entity = EntityEntry {
            id: 10,
            kind: PeerKind::User,
            hash: Some(0xdead),
            username: Some("someone".into()),
            phone: None,
        };
        storage.put_entity(&entity);
        assert_eq!(storage.get_entity(10), Some(entity));

        storage.wipe();
        assert_eq!(storage.load_auth_key(4), None);
        assert_eq!(storage.get_entity(10), None);
        assert_eq!(storage.home_datacenter(), Some(DEFAULT_DC));
    }

    #[test]
    fn rollback_restores_the_snapshot() {
        let storage = MemoryStorage::new();

        storage.begin_transaction();
        storage.save_auth_key(1, &[1; 256]);
        storage.save_identity(&UserIdentity {
            id: 99,
            is_bot: false,
        });
        storage.rollback();

        assert_eq!(storage.load_auth_key(1), None);
        assert_eq!(storage.load_identity(), None);

        storage.begin_transaction();
        storage.save_auth_key(1, &[1; 256]);
        storage.commit();
        storage.rollback(); // no-op without an open transaction
        assert_eq!(storage.load_auth_key(1), Some([1; 256]));
    }
}
