// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::types::{ChannelState, Datacenter, EntityEntry, UpdatesState, UserIdentity};

/// The interface a session storage backend must provide.
///
/// All methods are synchronous and infallible, because the layers above are
/// in no position to recover from arbitrary backend errors mid-protocol;
/// backends log and panic on their own failures instead.
///
/// A freshly-created storage returns the statically-known datacenters, no
/// authorization keys, no identity and no update state.
pub trait Storage: Send + Sync {
    /// Query a datacenter by its identifier.
    ///
    /// Called on every request, so it should be cheap.
    fn load_datacenter(&self, id: i32) -> Option<Datacenter>;

    /// Save or update a datacenter. Address updates pushed by the server
    /// come through here.
    fn save_datacenter(&self, dc: &Datacenter);

    /// The home datacenter of this account, if one was ever recorded.
    fn home_datacenter(&self) -> Option<i32>;

    /// Mark the given datacenter as home, clearing the flag from others.
    fn set_home_datacenter(&self, id: i32);

    /// Load the authorization key bound to a datacenter.
    fn load_auth_key(&self, dc_id: i32) -> Option<[u8; 256]>;

    /// Persist the authorization key bound to a datacenter.
    fn save_auth_key(&self, dc_id: i32, key: &[u8; 256]);

    /// Forget the authorization key bound to a datacenter, for example
    /// after the server reported it unregistered.
    fn clear_auth_key(&self, dc_id: i32);

    /// All datacenters that currently hold an authorization key.
    fn auth_key_datacenters(&self) -> Vec<i32>;

    /// The logged-in user, if signing in ever completed.
    fn load_identity(&self) -> Option<UserIdentity>;

    /// Remember the logged-in user.
    fn save_identity(&self, identity: &UserIdentity);

    /// Load the account-wide update state.
    fn load_update_state(&self) -> Option<UpdatesState>;

    /// Persist the account-wide update state. Must only be called after
    /// the corresponding updates were delivered to the application.
    fn save_update_state(&self, state: &UpdatesState);

    /// Load a single channel's update state.
    fn load_channel_state(&self, channel_id: i64) -> Option<i32>;

    /// Persist a single channel's update state.
    fn save_channel_state(&self, channel_id: i64, pts: i32);

    /// Load the update state of every known channel.
    fn load_channel_states(&self) -> Vec<ChannelState>;

    /// Query a cached entity by its identifier.
    fn get_entity(&self, id: i64) -> Option<EntityEntry>;

    /// Insert or update a cached entity.
    fn put_entity(&self, entity: &EntityEntry);

    /// Begin a transaction covering subsequent writes, used to persist the
    /// authorization key and the identity atomically at sign-in.
    fn begin_transaction(&self);

    /// Commit the transaction opened by [`Storage::begin_transaction`].
    fn commit(&self);

    /// Roll back the transaction opened by [`Storage::begin_transaction`].
    fn rollback(&self);

    /// Erase everything. Used by logout; possession of the stored keys
    /// grants full access to the account, so they must not outlive it.
    fn wipe(&self);
}
