// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
mod auth;
mod net;
mod peers;
mod updates;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use ferrogram_mtsender::{ConnectionParams, SenderPoolHandle};
use ferrogram_session::{
    ChannelState, PeerCache, Storage, UpdateLedger, UpdatesLike, UpdatesState,
};
use ferrogram_tl as tl;
use tokio::sync::mpsc;

/// What to do when the server reports `AUTH_KEY_DUPLICATED`: the same
/// authorization key was used from two different IP addresses at once,
/// usually because a session file was copied to another machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthKeyDuplicatedPolicy {
    /// Drop the key and generate a fresh one, then retry. Transparent,
    /// but the *other* machine using the copied session stops working,
    /// which can cascade if it is configured the same way.
    Rekey,
    /// Fail the request, leaving the decision to the caller.
    Surface,
}

/// Configuration for a [`Client`].
pub struct Config {
    /// Session storage to use. Must not be shared with another client.
    pub storage: Arc<dyn Storage>,
    /// Developer's [api identifier](https://core.telegram.org/myapp).
    pub api_id: i32,
    /// Remaining tunables, fine to leave at their defaults.
    pub params: InitParams,
}

/// Knobs controlling the client's behavior.
pub struct InitParams {
    /// Parameters for `initConnection` plus proxy and connector hooks.
    pub connection: ConnectionParams,
    /// Fetch updates missed while the client was offline on connect.
    pub catch_up: bool,
    /// `FLOOD_WAIT`s up to this many seconds are slept through and the
    /// request retried; longer ones fail the caller.
    pub flood_sleep_threshold: u32,
    /// How long to wait for the response to any single request. A request
    /// timing out is retried once and then fails with `Timeout`.
    pub request_timeout: Duration,
    /// How many times server errors (500-class) are retried, with a
    /// growing pause in between, before giving up.
    pub server_error_retries: usize,
    /// Updates beyond this many queued are dropped, protecting the
    /// process from unbounded growth when the consumer cannot keep up.
    /// `getDifference` recovers dropped ones later. `None` removes the
    /// limit.
    pub update_queue_limit: Option<usize>,
    /// See [`AuthKeyDuplicatedPolicy`].
    pub auth_key_duplicated: AuthKeyDuplicatedPolicy,
}

impl Default for InitParams {
    fn default() -> Self {
        Self {
            connection: ConnectionParams::default(),
            catch_up: false,
            flood_sleep_threshold: 60,
            request_timeout: Duration::from_secs(10),
            server_error_retries: 3,
            update_queue_limit: Some(100),
            auth_key_duplicated: AuthKeyDuplicatedPolicy::Rekey,
        }
    }
}

/// An update ready for delivery, alongside the ledger state that becomes
/// durable once the application has seen it.
pub(crate) struct PendingUpdate {
    pub(crate) update: tl::enums::Update,
    pub(crate) state: (UpdatesState, Vec<ChannelState>),
}

pub(crate) struct ClientInner {
    pub(crate) handle: SenderPoolHandle,
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) params: InitParams,
    pub(crate) ledger: Mutex<UpdateLedger>,
    pub(crate) peers: Mutex<PeerCache>,
    pub(crate) updates_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<UpdatesLike>>,
    pub(crate) update_queue: Mutex<VecDeque<PendingUpdate>>,
    pub(crate) last_saved_state: Mutex<Option<(UpdatesState, Vec<ChannelState>)>>,
    pub(crate) last_queue_limit_warn: Mutex<Option<Instant>>,
    pub(crate) takeout_id: Mutex<Option<i64>>,
    pub(crate) diff_failures: Mutex<usize>,
}

/// A client connected to Telegram.
///
/// Cheap to clone; all clones drive the same connections and observe the
/// same session.
#[derive(Clone)]
pub struct Client(pub(crate) Arc<ClientInner>);

impl Client {
    /// Start a takeout session: every subsequent request goes out wrapped
    /// in `invokeWithTakeout` with the given identifier. `None` stops.
    ///
    /// The identifier itself comes from the server (requesting it is out
    /// of this crate's scope).
    pub fn set_takeout_session(&self, takeout_id: Option<i64>) {
        *self.0.takeout_id.lock().unwrap() = takeout_id;
    }

    /// Access the underlying session storage.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.0.storage
    }
}
