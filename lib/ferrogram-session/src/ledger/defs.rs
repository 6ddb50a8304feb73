// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::time::{Duration, Instant};

use ferrogram_tl as tl;

/// The server sends `seq` equal to zero when "it doesn't matter".
pub(super) const NO_SEQ: i32 = 0;

/// Some updates carry a `pts` (or `qts`) of zero, meaning their ordering
/// should be ignored. Using the same sentinel locally keeps the arithmetic
/// uniform.
pub(super) const NO_PTS: i32 = 0;

/// Sentinel `date` for synthetic `updates` containers built locally.
pub(super) const NO_DATE: i32 = 0;

/// How long to wait for an out-of-order update to fill a gap by itself
/// before asking the server for the difference.
///
/// > It may be useful to wait up to 0.5 seconds
pub(super) const POSSIBLE_GAP_TIMEOUT: Duration = Duration::from_millis(500);

/// After this long without hearing anything for an entry, fetch its
/// difference anyway. The documentation recommends 15 minutes.
pub(super) const NO_UPDATES_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// How many updates a `getChannelDifference` may return at once.
pub(super) const USER_CHANNEL_DIFF_LIMIT: i32 = 100;
pub(super) const BOT_CHANNEL_DIFF_LIMIT: i32 = 100_000;

/// One independently-ordered sequence of updates.
///
/// The account-wide `pts` and `qts` each form one; every channel has its
/// own. Cross-entry ordering is not defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Entry {
    /// Account-wide, `pts`-ordered.
    Account,
    /// Account-wide secondary, `qts`-ordered.
    Secret,
    /// Channel-specific, ordered by the channel's own `pts`.
    Channel(i64),
}

/// Live state for one [`Entry`].
#[derive(Clone, Debug)]
pub(super) struct EntryState {
    /// The local persistent timestamp: everything up to here was applied
    /// and delivered.
    pub(super) pts: i32,
    /// When to give up waiting for updates and fetch the difference.
    pub(super) deadline: Instant,
}

/// Updates received "from the future", kept around briefly in case the
/// missing ones are merely late.
#[derive(Debug)]
pub(super) struct PossibleGap {
    pub(super) deadline: Instant,
    pub(super) updates: Vec<tl::enums::Update>,
}

/// Marker error: a gap was found and the difference must be fetched
/// before more updates can be processed for the affected entry.
#[derive(Debug, PartialEq, Eq)]
pub struct Gap;

/// Why fetching a channel's difference was cut short.
#[derive(Debug)]
pub enum PrematureEndReason {
    TemporaryServerIssues,
    Banned,
}

/// The ordering information carried by an update.
#[derive(Debug)]
pub(super) struct PtsInfo {
    pub(super) entry: Entry,
    pub(super) pts: i32,
    pub(super) count: i32,
}

fn message_channel_id(message: &tl::enums::Message) -> Option<i64> {
    let peer = match message {
        tl::enums::Message::Empty(m) => m.peer_id.as_ref(),
        tl::enums::Message::Message(m) => Some(&m.peer_id),
        tl::enums::Message::Service(m) => Some(&m.peer_id),
    };
    match peer {
        Some(tl::enums::Peer::Channel(c)) => Some(c.channel_id),
        _ => None,
    }
}

impl PtsInfo {
    /// Extracts the entry and ordering values of an update, or `None` when
    /// the update may be applied in any order.
    pub(super) fn from_update(update: &tl::enums::Update) -> Option<Self> {
        use tl::enums::Update as U;

        match update {
            U::NewMessage(u) => Some(Self {
                entry: Entry::Account,
                pts: u.pts,
                count: u.pts_count,
            }),
            U::DeleteMessages(u) => Some(Self {
                entry: Entry::Account,
                pts: u.pts,
                count: u.pts_count,
            }),
            U::EditMessage(u) => Some(Self {
                entry: Entry::Account,
                pts: u.pts,
                count: u.pts_count,
            }),
            U::ReadHistoryInbox(u) => Some(Self {
                entry: Entry::Account,
                pts: u.pts,
                count: u.pts_count,
            }),
            U::ReadHistoryOutbox(u) => Some(Self {
                entry: Entry::Account,
                pts: u.pts,
                count: u.pts_count,
            }),
            // The channel the `pts` belongs to hides inside the message;
            // `messageEmpty` without a peer gives us nothing to key on,
            // and the resulting gap will recover the lost update anyway.
            U::NewChannelMessage(u) => message_channel_id(&u.message).map(|channel_id| Self {
                entry: Entry::Channel(channel_id),
                pts: u.pts,
                count: u.pts_count,
            }),
            U::EditChannelMessage(u) => message_channel_id(&u.message).map(|channel_id| Self {
                entry: Entry::Channel(channel_id),
                pts: u.pts,
                count: u.pts_count,
            }),
            U::DeleteChannelMessages(u) => Some(Self {
                entry: Entry::Channel(u.channel_id),
                pts: u.pts,
                count: u.pts_count,
            }),
            U::ReadChannelInbox(u) => Some(Self {
                entry: Entry::Channel(u.channel_id),
                pts: u.pts,
                count: 0,
            }),
            U::ChannelTooLong(u) => u.pts.map(|pts| Self {
                entry: Entry::Channel(u.channel_id),
                pts,
                count: 0,
            }),
            U::Channel(_) => None,
            U::BotStopped(u) => Some(Self {
                entry: Entry::Secret,
                pts: u.qts,
                count: 1,
            }),
            U::PtsChanged(_) => None,
            U::DcOptions(_) => None,
        }
    }
}
