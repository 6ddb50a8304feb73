// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ordered delivery of updates to the application.
use std::time::{Duration, Instant};

use ferrogram_mtsender::InvocationError;
use ferrogram_session::{PrematureEndReason, UpdatesAndPeers, UpdatesLike};
use ferrogram_tl as tl;
use log::{info, warn};
use tokio::time::sleep_until;

use super::{Client, PendingUpdate};

/// How long to stay quiet after warning that the update queue overflowed.
const QUEUE_LIMIT_WARN_COOLDOWN: Duration = Duration::from_secs(300);

/// After this many consecutive difference failures the stored state is
/// abandoned and a full resync is started from the server's current state.
const DIFF_FAILURES_UNTIL_RESYNC: usize = 3;

impl Client {
    /// Return the next update, in server order (per account and per
    /// channel; ordering between channels is not defined).
    ///
    /// Drives the network while waiting: socket updates are run through
    /// the gap detection machinery, differences are fetched when needed,
    /// and the session state is persisted only once the preceding update
    /// has been handed out.
    pub async fn next_update(&self) -> Result<tl::enums::Update, InvocationError> {
        loop {
            if let Some(pending) = self.0.update_queue.lock().unwrap().pop_front() {
                // Everything up to (and including) this update is now
                // observed; the state may become durable.
                self.persist_state(pending.state);
                return Ok(pending.update);
            }

            // Without any state there is nothing to diff against; seed it
            // from the server.
            if self.0.ledger.lock().unwrap().is_empty() {
                let state = self.invoke(&tl::functions::updates::GetState).await?;
                let tl::enums::updates::State::State(state) = state;
                info!("seeded update state from the server");
                self.0.ledger.lock().unwrap().set_state(state);
            }

            let get_diff = self.0.ledger.lock().unwrap().get_difference();
            if let Some(request) = get_diff {
                match self.invoke(&request).await {
                    Ok(diff) => {
                        let result = {
                            let mut ledger = self.0.ledger.lock().unwrap();
                            let mut peers = self.0.peers.lock().unwrap();
                            ledger.apply_difference(diff, &mut peers)
                        };
                        *self.0.diff_failures.lock().unwrap() = 0;
                        self.enqueue_updates(result);
                    }
                    Err(err) => self.on_difference_failure(err)?,
                }
                continue;
            }

            let get_channel_diff = {
                let mut ledger = self.0.ledger.lock().unwrap();
                let mut peers = self.0.peers.lock().unwrap();
                ledger.get_channel_difference(&mut peers)
            };
            if let Some(request) = get_channel_diff {
                match self.invoke(&request).await {
                    Ok(diff) => {
                        let result = {
                            let mut ledger = self.0.ledger.lock().unwrap();
                            let mut peers = self.0.peers.lock().unwrap();
                            ledger.apply_channel_difference(&request, diff, &mut peers)
                        };
                        self.enqueue_updates(result);
                    }
                    Err(err) => {
                        let reason = match &err {
                            InvocationError::Rpc(rpc)
                                if rpc.is("CHANNEL_PRIVATE") || rpc.is("CHANNEL_INVALID") =>
                            {
                                PrematureEndReason::Banned
                            }
                            InvocationError::Rpc(_) => PrematureEndReason::TemporaryServerIssues,
                            _ => return Err(err),
                        };
                        warn!("getting channel difference failed: {err}");
                        self.0
                            .ledger
                            .lock()
                            .unwrap()
                            .end_channel_difference(&request, reason);
                    }
                }
                continue;
            }

            let deadline = self.0.ledger.lock().unwrap().check_deadlines();
            let mut updates_rx = self.0.updates_rx.lock().await;
            tokio::select! {
                received = updates_rx.recv() => {
                    drop(updates_rx);
                    match received {
                        Some(UpdatesLike::Updates(updates)) => self.process_socket_updates(updates),
                        Some(UpdatesLike::Reconnection) => {
                            info!("connection or session renewed; catching up");
                            self.0.ledger.lock().unwrap().catch_up();
                        }
                        None => return Err(InvocationError::Dropped),
                    }
                }
                _ = sleep_until(deadline.into()) => {}
            }
        }
    }

    /// Run one socket `Updates` through the ledger, queueing whatever can
    /// be delivered. Gaps are not an error: the difference request they
    /// schedule is picked up by the next [`Client::next_update`] pass.
    pub(crate) fn process_socket_updates(&self, updates: tl::enums::Updates) {
        let result = {
            let mut ledger = self.0.ledger.lock().unwrap();
            let mut peers = self.0.peers.lock().unwrap();

            if ledger.ensure_known_peer_hashes(&updates, &mut peers).is_err() {
                return;
            }
            match ledger.process_updates(updates, &peers) {
                Ok(result) => result,
                Err(_gap) => return,
            }
        };

        self.enqueue_updates(result);
    }

    fn enqueue_updates(&self, (updates, users, chats): UpdatesAndPeers) {
        if updates.is_empty() {
            return;
        }

        // Peers always reach the cache before their updates reach the
        // application, so references resolve synchronously on delivery.
        {
            let mut peers = self.0.peers.lock().unwrap();
            let _ = peers.extend(&users, &chats);
        }

        let state = self.0.ledger.lock().unwrap().session_state();
        let mut queue = self.0.update_queue.lock().unwrap();

        let mut updates = updates;
        if let Some(limit) = self.0.params.update_queue_limit {
            if let Some(exceeds) = (queue.len() + updates.len()).checked_sub(limit + 1) {
                let exceeds = exceeds + 1;
                updates.truncate(updates.len() - exceeds);

                let now = Instant::now();
                let mut last_warn = self.0.last_queue_limit_warn.lock().unwrap();
                let notify = match *last_warn {
                    None => true,
                    Some(instant) => now - instant > QUEUE_LIMIT_WARN_COOLDOWN,
                };
                if notify {
                    warn!("{exceeds} updates dropped because the queue limit was exceeded");
                    *last_warn = Some(now);
                }
            }
        }

        queue.extend(updates.into_iter().map(|update| PendingUpdate {
            update,
            state: state.clone(),
        }));
    }

    /// Persist the ledger state that became true with the update that was
    /// just delivered. A crash before this point is recovered by fetching
    /// the difference from the previous state on the next start.
    fn persist_state(&self, state: (ferrogram_session::UpdatesState, Vec<ferrogram_session::ChannelState>)) {
        let mut last_saved = self.0.last_saved_state.lock().unwrap();
        if last_saved.as_ref() == Some(&state) {
            return;
        }

        let (account, channels) = &state;
        self.0.storage.save_update_state(account);
        for channel in channels {
            self.0
                .storage
                .save_channel_state(channel.channel_id, channel.pts);
        }
        *last_saved = Some(state);
    }

    fn on_difference_failure(&self, err: InvocationError) -> Result<(), InvocationError> {
        match err {
            InvocationError::Rpc(ref rpc) if rpc.code == 401 => Err(err),
            err => {
                let mut failures = self.0.diff_failures.lock().unwrap();
                *failures += 1;
                warn!("getting difference failed ({} in a row): {err}", *failures);
                if *failures >= DIFF_FAILURES_UNTIL_RESYNC {
                    *failures = 0;
                    // Start over from the server's current state.
                    self.0.ledger.lock().unwrap().reset();
                }
                Ok(())
            }
        }
    }
}
