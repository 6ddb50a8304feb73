// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ordered application of updates.
//!
//! The [`UpdateLedger`] tracks, per [`Entry`] (the account, the secondary
//! `qts` sequence, and each channel), the last persistent timestamp whose
//! updates were fully applied. Incoming updates either follow directly and
//! are applied, are discarded as already seen, or reveal a gap: they are
//! buffered briefly in case the missing ones are simply late, after which
//! the difference is fetched from the server and applied in order.
mod adapt;
mod defs;

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::mem;
use std::time::Instant;

use ferrogram_tl::{self as tl, functions};
use log::{debug, info, trace, warn};

pub(crate) use defs::Entry;
use defs::{
    EntryState, PossibleGap, PtsInfo, BOT_CHANNEL_DIFF_LIMIT, NO_DATE, NO_PTS, NO_SEQ,
    NO_UPDATES_TIMEOUT, POSSIBLE_GAP_TIMEOUT, USER_CHANNEL_DIFF_LIMIT,
};
pub use defs::{Gap, PrematureEndReason};

use crate::peer_cache::PeerCache;
use crate::types::{ChannelState, UpdatesState};

/// Updates paired with the peers that were sent along with them.
pub type UpdatesAndPeers = (
    Vec<tl::enums::Update>,
    Vec<tl::enums::User>,
    Vec<tl::enums::Chat>,
);

fn next_updates_deadline() -> Instant {
    Instant::now() + NO_UPDATES_TIMEOUT
}

fn update_sort_key(update: &tl::enums::Update) -> i32 {
    // The server can emit updates out of order (same pts, different
    // count); sorting by "the pts each one starts at" fixes that up.
    match PtsInfo::from_update(update) {
        Some(info) => info.pts - info.count,
        None => NO_PTS,
    }
}

/// Per-account bookkeeping for the ordered delivery of updates.
pub struct UpdateLedger {
    map: HashMap<Entry, EntryState>,
    date: i32,
    seq: i32,
    possible_gaps: HashMap<Entry, PossibleGap>,
    getting_diff_for: HashSet<Entry>,
}

#[allow(clippy::new_without_default)]
impl UpdateLedger {
    /// A ledger with no state at all. Updates cannot be processed until
    /// [`UpdateLedger::set_state`] seeds it.
    pub fn new() -> Self {
        trace!("created new update ledger with no previous state");
        Self {
            map: HashMap::new(),
            date: 1, // zero would make the first getDifference fail
            seq: NO_SEQ,
            possible_gaps: HashMap::new(),
            getting_diff_for: HashSet::new(),
        }
    }

    /// A ledger resuming from previously-persisted state.
    pub fn load(state: UpdatesState, channels: &[ChannelState]) -> Self {
        trace!("created update ledger from state {state:?}");
        let deadline = next_updates_deadline();
        let mut map = HashMap::with_capacity(2 + channels.len());
        map.insert(
            Entry::Account,
            EntryState {
                pts: state.pts,
                deadline,
            },
        );
        map.insert(
            Entry::Secret,
            EntryState {
                pts: state.qts,
                deadline,
            },
        );
        map.extend(channels.iter().map(|c| {
            (
                Entry::Channel(c.channel_id),
                EntryState {
                    pts: c.pts,
                    deadline,
                },
            )
        }));

        Self {
            map,
            date: state.date,
            seq: state.seq,
            possible_gaps: HashMap::new(),
            getting_diff_for: HashSet::new(),
        }
    }

    /// The current state, in the form the session storage persists.
    pub fn session_state(&self) -> (UpdatesState, Vec<ChannelState>) {
        let pts_of = |entry| self.map.get(&entry).map(|s| s.pts).unwrap_or(NO_PTS);
        let mut channels = self
            .map
            .iter()
            .filter_map(|(entry, state)| match entry {
                Entry::Channel(channel_id) => Some(ChannelState {
                    channel_id: *channel_id,
                    pts: state.pts,
                }),
                _ => None,
            })
            .collect::<Vec<_>>();
        channels.sort_unstable_by_key(|c| c.channel_id);

        (
            UpdatesState {
                pts: pts_of(Entry::Account),
                qts: pts_of(Entry::Secret),
                date: self.date,
                seq: self.seq,
            },
            channels,
        )
    }

    /// Whether no state is known yet (in which case the caller should get
    /// the server's current state and [`UpdateLedger::set_state`] it).
    pub fn is_empty(&self) -> bool {
        self.map
            .get(&Entry::Account)
            .map(|s| s.pts)
            .unwrap_or(NO_PTS)
            == NO_PTS
    }

    /// Seed the state, e.g. from `updates.getState` right after login or
    /// during a full resync.
    pub fn set_state(&mut self, state: tl::types::updates::State) {
        trace!("setting ledger state {state:?}");
        let deadline = next_updates_deadline();
        self.map.insert(
            Entry::Account,
            EntryState {
                pts: state.pts,
                deadline,
            },
        );
        self.map.insert(
            Entry::Secret,
            EntryState {
                pts: state.qts,
                deadline,
            },
        );
        self.date = state.date;
        self.seq = state.seq;
        self.possible_gaps.clear();
        self.getting_diff_for.clear();
    }

    /// Seed a channel's state unless it is already being tracked.
    pub fn try_set_channel_state(&mut self, channel_id: i64, pts: i32) {
        self.map
            .entry(Entry::Channel(channel_id))
            .or_insert_with(|| EntryState {
                pts,
                deadline: next_updates_deadline(),
            });
    }

    /// Fetch everything that happened since the stored state: marks the
    /// account-wide entries as needing their difference, exactly as if a
    /// gap had been detected. Used after (re)connecting.
    pub fn catch_up(&mut self) {
        self.try_begin_get_diff(Entry::Account);
        self.try_begin_get_diff(Entry::Secret);
    }

    /// Forget everything. The next [`UpdateLedger::set_state`] starts
    /// over from the server's view; used when gaps refuse to close.
    pub fn reset(&mut self) {
        warn!("resetting the update ledger; a full resync will follow");
        self.map.clear();
        self.date = 1;
        self.seq = NO_SEQ;
        self.possible_gaps.clear();
        self.getting_diff_for.clear();
    }

    /// The next instant at which waiting for updates should time out.
    ///
    /// Expired entries (unresolved gaps and long-silent entries) are moved
    /// to the "fetch difference" set; while that set is non-empty this
    /// returns "now".
    pub fn check_deadlines(&mut self) -> Instant {
        let now = Instant::now();

        if !self.getting_diff_for.is_empty() {
            return now;
        }

        let deadline = self
            .possible_gaps
            .values()
            .map(|gap| gap.deadline)
            .chain(self.map.values().map(|state| state.deadline))
            .min()
            .map_or_else(next_updates_deadline, |d| d.min(next_updates_deadline()));

        if now >= deadline {
            let expired_gaps = self
                .possible_gaps
                .iter()
                .filter(|(_, gap)| now >= gap.deadline)
                .map(|(&entry, _)| entry)
                .collect::<Vec<_>>();
            for entry in expired_gaps {
                info!("gap was not resolved by waiting for {entry:?}");
                self.try_begin_get_diff(entry);
            }

            let silent = self
                .map
                .iter()
                .filter(|(_, state)| now >= state.deadline)
                .map(|(&entry, _)| entry)
                .collect::<Vec<_>>();
            for entry in silent {
                debug!("too much time has passed without updates for {entry:?}");
                self.try_begin_get_diff(entry);
            }
        }

        deadline
    }

    fn reset_deadline(&mut self, entry: Entry, deadline: Instant) {
        if let Some(state) = self.map.get_mut(&entry) {
            state.deadline = deadline;
        }
    }

    fn reset_channel_deadline(&mut self, channel_id: i64, timeout: Option<i32>) {
        let deadline = Instant::now()
            + timeout
                .map(|t| std::time::Duration::from_secs(t as u64))
                .unwrap_or(NO_UPDATES_TIMEOUT);
        self.reset_deadline(Entry::Channel(channel_id), deadline);
    }

    /// Begin fetching the difference for an entry, if its state is known
    /// (there is nothing to diff against otherwise). Buffered gap updates
    /// are dropped; the difference will contain them.
    fn try_begin_get_diff(&mut self, entry: Entry) {
        if !self.map.contains_key(&entry) {
            return;
        }
        self.getting_diff_for.insert(entry);
        self.possible_gaps.remove(&entry);
    }

    fn end_get_diff(&mut self, entry: Entry) {
        if !self.getting_diff_for.remove(&entry) {
            panic!("ended get diff for {entry:?}, which was not getting diff");
        }
        self.reset_deadline(entry, next_updates_deadline());
    }

    /// Make sure every peer referenced by the updates has a known access
    /// hash, feeding the cache from the payload itself where possible.
    ///
    /// References to peers we know nothing about are treated as a gap:
    /// fetching the difference is the only way to learn their hashes.
    pub fn ensure_known_peer_hashes(
        &mut self,
        updates: &tl::enums::Updates,
        peers: &mut PeerCache,
    ) -> Result<(), Gap> {
        if peers.extend_from_updates(updates) {
            return Ok(());
        }

        // Updates without any pts produce an empty difference; asking for
        // one would be wasteful, and the hash cannot be learnt anyway.
        let can_recover = match updates {
            tl::enums::Updates::UpdateShort(u) => PtsInfo::from_update(&u.update).is_some(),
            _ => true,
        };

        if can_recover {
            info!("received an update referencing an unknown peer, treating as gap");
            self.try_begin_get_diff(Entry::Account);
            Err(Gap)
        } else {
            info!("received an update referencing an unknown peer, but cannot recover");
            Ok(())
        }
    }

    /// Process one `Updates` payload from the server.
    ///
    /// On success, returns the updates that may be handed over to the
    /// application (in order, per entry), and the peers that came with
    /// them. On [`Gap`], the difference must be fetched and applied first.
    ///
    /// Updates for entries whose difference is currently being fetched are
    /// dropped: the difference itself will contain them.
    pub fn process_updates(
        &mut self,
        updates: tl::enums::Updates,
        peers: &PeerCache,
    ) -> Result<UpdatesAndPeers, Gap> {
        let tl::types::UpdatesCombined {
            date,
            seq_start,
            seq,
            updates: mut list,
            users,
            chats,
        } = match adapt::adapt(updates, peers) {
            Ok(combined) => combined,
            Err(Gap) => {
                self.try_begin_get_diff(Entry::Account);
                return Err(Gap);
            }
        };

        // > there is no need to check `seq` [...] for the other constructors
        if seq_start != NO_SEQ {
            match (self.seq + 1).cmp(&seq_start) {
                Ordering::Equal => {}
                Ordering::Greater => {
                    debug!("skipping updates already seen at seq {}", self.seq);
                    return Ok((Vec::new(), users, chats));
                }
                Ordering::Less => {
                    info!(
                        "gap in seq detected (local {}, remote start {seq_start})",
                        self.seq
                    );
                    self.try_begin_get_diff(Entry::Account);
                    return Err(Gap);
                }
            }
        }

        list.sort_by_key(update_sort_key);

        let mut result = Vec::with_capacity(list.len());
        let mut any_applied = false;
        for update in list {
            let (entry, applied) = self.apply_pts_info(update);
            if let Some(entry) = entry {
                self.reset_deadline(entry, next_updates_deadline());
            }
            if let Some(update) = applied {
                any_applied |= entry.is_some();
                result.push(update);
            }
        }

        // > If the updates were applied, local Updates state must be
        // > updated with `seq` (unless it's 0) and `date`.
        if any_applied {
            if date != NO_DATE {
                self.date = date;
            }
            if seq != NO_SEQ {
                self.seq = seq;
            }
        }

        // A late arrival may have just filled some gap; retry whatever is
        // buffered.
        if !self.possible_gaps.is_empty() {
            let entries = self.possible_gaps.keys().copied().collect::<Vec<_>>();
            for entry in entries {
                let mut pending = mem::take(&mut self.possible_gaps.get_mut(&entry).unwrap().updates);
                pending.sort_by_key(update_sort_key);

                for update in pending {
                    // Whatever still does not apply is buffered again.
                    if let (_, Some(update)) = self.apply_pts_info(update) {
                        result.push(update);
                    }
                }
            }

            self.possible_gaps.retain(|_, gap| !gap.updates.is_empty());
            if self.possible_gaps.is_empty() {
                debug!("all gaps resolved by waiting");
            }
        }

        Ok((result, users, chats))
    }

    /// Apply a single update if its ordering information allows it.
    ///
    /// Returns the affected entry (when the update has one) and the update
    /// itself when it was applied. Out-of-order updates are buffered in a
    /// possible gap and `None` is returned for them.
    fn apply_pts_info(
        &mut self,
        update: tl::enums::Update,
    ) -> (Option<Entry>, Option<tl::enums::Update>) {
        if let tl::enums::Update::ChannelTooLong(ref u) = update {
            // There is no way to know how much was missed; fetch it all.
            self.try_begin_get_diff(Entry::Channel(u.channel_id));
            return (None, None);
        }

        let info = match PtsInfo::from_update(&update) {
            Some(info) => info,
            // Updates without ordering information apply in any order.
            None => return (None, Some(update)),
        };

        if self.getting_diff_for.contains(&info.entry) {
            debug!(
                "skipping update for {:?} (getting difference, count {}, remote {})",
                info.entry, info.count, info.pts
            );
            return (Some(info.entry), None);
        }

        if let Some(state) = self.map.get(&info.entry) {
            let local = state.pts;
            match (local + info.count).cmp(&info.pts) {
                Ordering::Equal => {}
                Ordering::Greater => {
                    debug!(
                        "discarding already-seen update for {:?} (local {}, count {}, remote {})",
                        info.entry, local, info.count, info.pts
                    );
                    return (Some(info.entry), None);
                }
                Ordering::Less => {
                    info!(
                        "gap on update for {:?} (local {}, count {}, remote {})",
                        info.entry, local, info.count, info.pts
                    );
                    self.possible_gaps
                        .entry(info.entry)
                        .or_insert_with(|| PossibleGap {
                            deadline: Instant::now() + POSSIBLE_GAP_TIMEOUT,
                            updates: Vec::new(),
                        })
                        .updates
                        .push(update);
                    return (Some(info.entry), None);
                }
            }
        }
        // With no previous state for the entry this update must be the
        // first one, making our local pts `pts - count`.

        self.map
            .entry(info.entry)
            .or_insert_with(|| EntryState {
                pts: NO_PTS,
                deadline: next_updates_deadline(),
            })
            .pts = info.pts;

        (Some(info.entry), Some(update))
    }
}

/// Account-wide difference.
impl UpdateLedger {
    /// The request to fetch the pending account-wide difference, if any.
    pub fn get_difference(&mut self) -> Option<functions::updates::GetDifference> {
        for entry in [Entry::Account, Entry::Secret] {
            if self.getting_diff_for.contains(&entry) {
                let request = functions::updates::GetDifference {
                    pts: self.map[&Entry::Account].pts,
                    date: self.date,
                    qts: self
                        .map
                        .get(&Entry::Secret)
                        .map(|s| s.pts)
                        .unwrap_or(NO_PTS),
                };
                trace!("requesting {request:?}");
                return Some(request);
            }
        }
        None
    }

    /// Apply the result of [`UpdateLedger::get_difference`].
    pub fn apply_difference(
        &mut self,
        difference: tl::enums::updates::Difference,
        peers: &mut PeerCache,
    ) -> UpdatesAndPeers {
        trace!("applying account difference");
        let finish: bool;
        let result = match difference {
            tl::enums::updates::Difference::Empty(diff) => {
                debug!(
                    "handling empty difference (date = {}, seq = {})",
                    diff.date, diff.seq
                );
                finish = true;
                self.date = diff.date;
                self.seq = diff.seq;
                (Vec::new(), Vec::new(), Vec::new())
            }
            tl::enums::updates::Difference::Difference(diff) => {
                debug!("handling full difference; no longer getting diff");
                finish = true;
                let _ = peers.extend(&diff.users, &diff.chats);
                self.apply_difference_type(diff, peers)
            }
            tl::enums::updates::Difference::Slice(tl::types::updates::DifferenceSlice {
                new_messages,
                other_updates,
                chats,
                users,
                intermediate_state: state,
            }) => {
                debug!("handling partial difference");
                finish = false;
                let _ = peers.extend(&users, &chats);
                self.apply_difference_type(
                    tl::types::updates::Difference {
                        new_messages,
                        other_updates,
                        chats,
                        users,
                        state,
                    },
                    peers,
                )
            }
            tl::enums::updates::Difference::TooLong(diff) => {
                debug!("handling too-long difference (pts = {})", diff.pts);
                finish = true;
                // The deadline reset happens on end_get_diff below.
                self.map.get_mut(&Entry::Account).unwrap().pts = diff.pts;
                (Vec::new(), Vec::new(), Vec::new())
            }
        };

        if finish {
            if self.getting_diff_for.contains(&Entry::Account) {
                self.end_get_diff(Entry::Account);
            }
            if self.getting_diff_for.contains(&Entry::Secret) {
                self.end_get_diff(Entry::Secret);
            }
        }

        result
    }

    fn apply_difference_type(
        &mut self,
        diff: tl::types::updates::Difference,
        peers: &mut PeerCache,
    ) -> UpdatesAndPeers {
        let tl::enums::updates::State::State(state) = diff.state;
        self.map.get_mut(&Entry::Account).unwrap().pts = state.pts;
        self.map.get_mut(&Entry::Secret).unwrap().pts = state.qts;
        self.date = state.date;
        self.seq = state.seq;

        // other_updates may include things such as updateChannelTooLong;
        // running them through the usual processing discards anything we
        // have already handled.
        let synthetic = tl::enums::Updates::Updates(tl::types::Updates {
            updates: diff.other_updates,
            users: diff.users,
            chats: diff.chats,
            date: NO_DATE,
            seq: NO_SEQ,
        });

        let (mut updates, users, chats) = self
            .process_updates(synthetic, peers)
            .expect("gap detected while applying difference");

        updates.extend(diff.new_messages.into_iter().map(|message| {
            tl::types::UpdateNewMessage {
                message,
                pts: NO_PTS,
                pts_count: 0,
            }
            .into()
        }));

        (updates, users, chats)
    }
}

/// Per-channel difference.
impl UpdateLedger {
    /// The request to fetch some channel's pending difference, if any.
    ///
    /// Channels whose access hash is unknown cannot be asked about; their
    /// entry is dropped so a later update can re-seed it.
    pub fn get_channel_difference(
        &mut self,
        peers: &mut PeerCache,
    ) -> Option<functions::updates::GetChannelDifference> {
        let (entry, channel_id) = self.getting_diff_for.iter().find_map(|&entry| match entry {
            Entry::Channel(id) => Some((entry, id)),
            _ => None,
        })?;

        let channel = match peers.get(channel_id).and_then(|p| p.to_input_channel()) {
            Some(channel) => channel,
            None => {
                warn!("cannot get difference for {channel_id} as we're missing its hash");
                self.end_get_diff(entry);
                self.map.remove(&entry);
                return None;
            }
        };

        let state = self
            .map
            .get(&entry)
            .expect("getting difference for an entry with no known state");

        let request = functions::updates::GetChannelDifference {
            force: false,
            channel,
            filter: tl::enums::ChannelMessagesFilter::Empty(
                tl::types::ChannelMessagesFilterEmpty,
            ),
            pts: state.pts,
            limit: if peers.is_self_bot() {
                BOT_CHANNEL_DIFF_LIMIT
            } else {
                USER_CHANNEL_DIFF_LIMIT
            },
        };
        trace!("requesting {request:?}");
        Some(request)
    }

    /// Apply the result of [`UpdateLedger::get_channel_difference`].
    pub fn apply_channel_difference(
        &mut self,
        request: &functions::updates::GetChannelDifference,
        difference: tl::enums::updates::ChannelDifference,
        peers: &mut PeerCache,
    ) -> UpdatesAndPeers {
        let channel_id = channel_id_of(request).expect("request had an empty input channel");
        let entry = Entry::Channel(channel_id);
        trace!("applying channel difference for {channel_id}");

        self.possible_gaps.remove(&entry);

        match difference {
            tl::enums::updates::ChannelDifference::Empty(diff) => {
                debug!(
                    "handling empty channel {channel_id} difference (pts = {})",
                    diff.pts
                );
                self.end_get_diff(entry);
                self.map.get_mut(&entry).unwrap().pts = diff.pts;
                (Vec::new(), Vec::new(), Vec::new())
            }
            tl::enums::updates::ChannelDifference::TooLong(diff) => {
                info!("handling too-long channel {channel_id} difference");
                let _ = peers.extend(&diff.users, &diff.chats);
                let tl::enums::Dialog::Dialog(dialog) = diff.dialog;
                self.map.get_mut(&entry).unwrap().pts = dialog
                    .pts
                    .expect("channelDifferenceTooLong dialog without pts");
                self.end_get_diff(entry);
                self.reset_channel_deadline(channel_id, diff.timeout);
                // The few latest messages it carries would be a partial
                // view; the caller is expected to re-fetch what it needs.
                (Vec::new(), Vec::new(), Vec::new())
            }
            tl::enums::updates::ChannelDifference::Difference(
                tl::types::updates::ChannelDifference {
                    r#final,
                    pts,
                    timeout,
                    new_messages,
                    other_updates,
                    chats,
                    users,
                },
            ) => {
                if r#final {
                    debug!("handling final channel {channel_id} difference");
                    self.end_get_diff(entry);
                } else {
                    debug!("handling channel {channel_id} difference");
                }

                let _ = peers.extend(&users, &chats);
                self.map.get_mut(&entry).unwrap().pts = pts;

                let synthetic = tl::enums::Updates::Updates(tl::types::Updates {
                    updates: other_updates,
                    users,
                    chats,
                    date: NO_DATE,
                    seq: NO_SEQ,
                });
                let (mut updates, users, chats) = self
                    .process_updates(synthetic, peers)
                    .expect("gap detected while applying channel difference");

                updates.extend(new_messages.into_iter().map(|message| {
                    tl::types::UpdateNewChannelMessage {
                        message,
                        pts: NO_PTS,
                        pts_count: 0,
                    }
                    .into()
                }));
                self.reset_channel_deadline(channel_id, timeout);

                (updates, users, chats)
            }
        }
    }

    /// Abandon fetching a channel's difference early.
    pub fn end_channel_difference(
        &mut self,
        request: &functions::updates::GetChannelDifference,
        reason: PrematureEndReason,
    ) {
        if let Some(channel_id) = channel_id_of(request) {
            trace!("ending channel difference for {channel_id} because {reason:?}");
            let entry = Entry::Channel(channel_id);
            match reason {
                PrematureEndReason::TemporaryServerIssues => {
                    self.possible_gaps.remove(&entry);
                    self.end_get_diff(entry);
                }
                PrematureEndReason::Banned => {
                    self.possible_gaps.remove(&entry);
                    self.end_get_diff(entry);
                    self.map.remove(&entry);
                }
            }
        }
    }
}

fn channel_id_of(request: &functions::updates::GetChannelDifference) -> Option<i64> {
    match request.channel {
        tl::enums::InputChannel::Channel(ref c) => Some(c.channel_id),
        tl::enums::InputChannel::Empty(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::storages::MemoryStorage;
    use crate::types::UserIdentity;
    use std::sync::Arc;

    fn peers() -> PeerCache {
        let storage = Arc::new(MemoryStorage::new());
        storage.save_identity(&UserIdentity {
            id: 1000,
            is_bot: false,
        });
        let mut peers = PeerCache::new(storage);
        // A channel the tests can reference.
        assert!(peers.extend(
            &[],
            &[tl::enums::Chat::Channel(tl::types::Channel {
                broadcast: true,
                megagroup: false,
                min: false,
                id: 77,
                access_hash: Some(0x7777),
                title: "chan".into(),
                username: None,
            })]
        ));
        peers
    }

    fn ledger_with_channel(channel_pts: i32) -> UpdateLedger {
        let mut ledger = UpdateLedger::load(
            UpdatesState {
                pts: 10,
                qts: 0,
                date: 1000,
                seq: 5,
            },
            &[ChannelState {
                channel_id: 77,
                pts: channel_pts,
            }],
        );
        // Pretend qts was seeded as well.
        ledger.map.insert(
            Entry::Secret,
            EntryState {
                pts: 0,
                deadline: next_updates_deadline(),
            },
        );
        ledger
    }

    fn channel_message(id: i32, pts: i32, pts_count: i32) -> tl::enums::Update {
        tl::types::UpdateNewChannelMessage {
            message: tl::types::Message {
                out: false,
                id,
                from_id: None,
                peer_id: tl::types::PeerChannel { channel_id: 77 }.into(),
                date: 1,
                message: format!("msg {id}"),
            }
            .into(),
            pts,
            pts_count,
        }
        .into()
    }

    fn wrap(update: tl::enums::Update) -> tl::enums::Updates {
        tl::types::UpdateShort { update, date: 1 }.into()
    }

    fn message_ids(updates: &[tl::enums::Update]) -> Vec<i32> {
        updates
            .iter()
            .map(|u| match u {
                tl::enums::Update::NewChannelMessage(x) => match &x.message {
                    tl::enums::Message::Message(m) => m.id,
                    _ => panic!("expected full message"),
                },
                other => panic!("expected channel message, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn sequential_updates_apply_directly() {
        let mut ledger = ledger_with_channel(100);
        let peers = peers();

        let (updates, _, _) = ledger
            .process_updates(wrap(channel_message(1, 101, 1)), &peers)
            .unwrap();
        assert_eq!(message_ids(&updates), vec![1]);
        assert_eq!(ledger.map[&Entry::Channel(77)].pts, 101);
        assert!(ledger.get_difference().is_none());
        assert!(ledger.possible_gaps.is_empty());
    }

    #[test]
    fn already_seen_updates_are_discarded() {
        let mut ledger = ledger_with_channel(100);
        let peers = peers();

        let (updates, _, _) = ledger
            .process_updates(wrap(channel_message(1, 100, 1)), &peers)
            .unwrap();
        assert!(updates.is_empty());
        assert_eq!(ledger.map[&Entry::Channel(77)].pts, 100);
    }

    #[test]
    fn skipped_pts_buffers_and_waiting_resolves() {
        let mut ledger = ledger_with_channel(100);
        let peers = peers();

        // 103 arrives before 101-102: buffered, nothing delivered.
        let (updates, _, _) = ledger
            .process_updates(wrap(channel_message(3, 103, 1)), &peers)
            .unwrap();
        assert!(updates.is_empty());
        assert_eq!(ledger.possible_gaps.len(), 1);

        // The missing 101-102 arrive as one update with count 2; both it
        // and the buffered 103 are delivered, in order.
        let (updates, _, _) = ledger
            .process_updates(wrap(channel_message(2, 102, 2)), &peers)
            .unwrap();
        assert_eq!(message_ids(&updates), vec![2, 3]);
        assert_eq!(ledger.map[&Entry::Channel(77)].pts, 103);
        assert!(ledger.possible_gaps.is_empty());
    }

    #[test]
    fn unresolved_gap_escalates_to_channel_difference() {
        let mut ledger = ledger_with_channel(100);
        let mut peers = peers();

        let (updates, _, _) = ledger
            .process_updates(wrap(channel_message(3, 103, 1)), &peers)
            .unwrap();
        assert!(updates.is_empty());

        // Not resolved within the gap window.
        std::thread::sleep(POSSIBLE_GAP_TIMEOUT + std::time::Duration::from_millis(50));
        let deadline = ledger.check_deadlines();
        assert!(deadline <= Instant::now());

        // The difference is requested from the stored pts, not the gap's.
        let request = ledger.get_channel_difference(&mut peers).unwrap();
        assert_eq!(request.pts, 100);
        assert_eq!(request.limit, USER_CHANNEL_DIFF_LIMIT);
        assert!(matches!(
            request.channel,
            tl::enums::InputChannel::Channel(ref c) if c.channel_id == 77 && c.access_hash == 0x7777
        ));

        // While fetching, live updates for that channel are dropped (the
        // difference will carry them).
        let (updates, _, _) = ledger
            .process_updates(wrap(channel_message(4, 104, 1)), &peers)
            .unwrap();
        assert!(updates.is_empty());

        // The server replies with everything from 101 to 104.
        let difference = tl::enums::updates::ChannelDifference::Difference(
            tl::types::updates::ChannelDifference {
                r#final: true,
                pts: 104,
                timeout: None,
                new_messages: (1..=4)
                    .map(|id| {
                        tl::enums::Message::Message(tl::types::Message {
                            out: false,
                            id,
                            from_id: None,
                            peer_id: tl::types::PeerChannel { channel_id: 77 }.into(),
                            date: 1,
                            message: format!("msg {id}"),
                        })
                    })
                    .collect(),
                other_updates: vec![],
                chats: vec![],
                users: vec![],
            },
        );

        let (updates, _, _) = ledger.apply_channel_difference(&request, difference, &mut peers);
        assert_eq!(message_ids(&updates), vec![1, 2, 3, 4]);

        // Only now does the persisted state reach 104.
        let (_, channels) = ledger.session_state();
        assert_eq!(
            channels,
            vec![ChannelState {
                channel_id: 77,
                pts: 104
            }]
        );
        assert!(ledger.get_channel_difference(&mut peers).is_none());
    }

    #[test]
    fn seq_gap_requests_account_difference() {
        let mut ledger = ledger_with_channel(100);
        let peers = peers();

        // seq jumps from 5 to 8: a gap.
        let updates = tl::enums::Updates::Combined(tl::types::UpdatesCombined {
            updates: vec![],
            users: vec![],
            chats: vec![],
            date: 1010,
            seq_start: 8,
            seq: 8,
        });
        assert_eq!(ledger.process_updates(updates, &peers), Err(Gap));

        let request = ledger.get_difference().unwrap();
        assert_eq!(request.pts, 10);
        assert_eq!(request.date, 1000);

        // An empty difference closes the gap.
        let difference = tl::enums::updates::Difference::Empty(types_difference_empty(1010, 8));
        let mut peers = self::peers();
        let (updates, _, _) = ledger.apply_difference(difference, &mut peers);
        assert!(updates.is_empty());
        assert!(ledger.get_difference().is_none());
        assert_eq!(ledger.seq, 8);
    }

    fn types_difference_empty(date: i32, seq: i32) -> tl::types::updates::DifferenceEmpty {
        tl::types::updates::DifferenceEmpty { date, seq }
    }

    #[test]
    fn updates_too_long_is_a_gap() {
        let mut ledger = ledger_with_channel(100);
        let peers = peers();
        assert_eq!(
            ledger.process_updates(tl::enums::Updates::TooLong, &peers),
            Err(Gap)
        );
        assert!(ledger.get_difference().is_some());
    }

    #[test]
    fn unknown_short_message_peer_is_a_gap() {
        let mut ledger = ledger_with_channel(100);
        let mut peers = peers();

        let updates = tl::enums::Updates::UpdateShortMessage(tl::types::UpdateShortMessage {
            out: false,
            id: 1,
            user_id: 999, // never seen before
            message: "hello".into(),
            pts: 11,
            pts_count: 1,
            date: 1,
        });

        assert_eq!(
            ledger.ensure_known_peer_hashes(&updates, &mut peers),
            Err(Gap)
        );
        assert!(ledger.get_difference().is_some());
    }

    #[test]
    fn session_state_roundtrip() {
        let ledger = ledger_with_channel(100);
        let (state, channels) = ledger.session_state();
        assert_eq!(state.pts, 10);
        assert_eq!(state.seq, 5);
        assert_eq!(channels.len(), 1);

        let restored = UpdateLedger::load(state, &channels);
        assert_eq!(restored.session_state(), ledger.session_state());
        assert!(!restored.is_empty());
        assert!(UpdateLedger::new().is_empty());
    }
}
