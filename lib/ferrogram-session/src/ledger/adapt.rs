// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Every shape of the `Updates` type folded into `updatesCombined`, which
//! carries a superset of the fields of all the others. Handling a single
//! shape keeps the ledger logic straight.
//!
//! > The `updateShortMessage`, `updateShortSentMessage` and
//! > `updateShortChatMessage` constructors [...] should be transformed to
//! > `updateShort` upon receiving.
use ferrogram_tl as tl;
use log::info;

use super::defs::{Gap, NO_SEQ};
use crate::peer_cache::PeerCache;

pub(super) fn updates(updates: tl::types::Updates) -> tl::types::UpdatesCombined {
    tl::types::UpdatesCombined {
        updates: updates.updates,
        users: updates.users,
        chats: updates.chats,
        date: updates.date,
        // seq_start is assumed to equal seq when omitted.
        seq_start: updates.seq,
        seq: updates.seq,
    }
}

pub(super) fn update_short(short: tl::types::UpdateShort) -> tl::types::UpdatesCombined {
    tl::types::UpdatesCombined {
        updates: vec![short.update],
        users: Vec::new(),
        chats: Vec::new(),
        date: short.date,
        seq_start: NO_SEQ,
        seq: NO_SEQ,
    }
}

pub(super) fn update_short_message(
    short: tl::types::UpdateShortMessage,
    self_id: i64,
) -> tl::types::UpdatesCombined {
    update_short(tl::types::UpdateShort {
        update: tl::types::UpdateNewMessage {
            message: tl::types::Message {
                out: short.out,
                id: short.id,
                from_id: Some(
                    tl::types::PeerUser {
                        user_id: if short.out { self_id } else { short.user_id },
                    }
                    .into(),
                ),
                peer_id: tl::types::PeerUser {
                    user_id: short.user_id,
                }
                .into(),
                date: short.date,
                message: short.message,
            }
            .into(),
            pts: short.pts,
            pts_count: short.pts_count,
        }
        .into(),
        date: short.date,
    })
}

pub(super) fn update_short_chat_message(
    short: tl::types::UpdateShortChatMessage,
) -> tl::types::UpdatesCombined {
    update_short(tl::types::UpdateShort {
        update: tl::types::UpdateNewMessage {
            message: tl::types::Message {
                out: short.out,
                id: short.id,
                from_id: Some(
                    tl::types::PeerUser {
                        user_id: short.from_id,
                    }
                    .into(),
                ),
                peer_id: tl::types::PeerChat {
                    chat_id: short.chat_id,
                }
                .into(),
                date: short.date,
                message: short.message,
            }
            .into(),
            pts: short.pts,
            pts_count: short.pts_count,
        }
        .into(),
        date: short.date,
    })
}

pub(super) fn update_short_sent_message(
    short: tl::types::UpdateShortSentMessage,
) -> tl::types::UpdatesCombined {
    // The full message is not known, but the `pts` still has to advance.
    update_short(tl::types::UpdateShort {
        update: tl::types::UpdateNewMessage {
            message: tl::types::MessageEmpty {
                id: short.id,
                peer_id: None,
            }
            .into(),
            pts: short.pts,
            pts_count: short.pts_count,
        }
        .into(),
        date: short.date,
    })
}

/// Fold any `Updates` into `updatesCombined`, or report a gap for the
/// shapes that cannot be processed (`updatesTooLong`).
///
/// The access hashes are assumed to have been checked beforehand through
/// [`super::UpdateLedger::ensure_known_peer_hashes`].
pub(super) fn adapt(
    updates: tl::enums::Updates,
    peers: &PeerCache,
) -> Result<tl::types::UpdatesCombined, Gap> {
    Ok(match updates {
        // > `updatesTooLong` indicates that there are too many events
        // > pending to be pushed to the client.
        tl::enums::Updates::TooLong => {
            info!("received updatesTooLong, treating as gap");
            return Err(Gap);
        }
        tl::enums::Updates::UpdateShortMessage(short) => {
            update_short_message(short, peers.self_id())
        }
        tl::enums::Updates::UpdateShortChatMessage(short) => update_short_chat_message(short),
        tl::enums::Updates::UpdateShort(short) => update_short(short),
        tl::enums::Updates::Combined(combined) => combined,
        tl::enums::Updates::Updates(updates) => self::updates(updates),
        tl::enums::Updates::UpdateShortSentMessage(short) => update_short_sent_message(short),
    })
}
