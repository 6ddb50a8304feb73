// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning bare peer identifiers into input peers the server accepts.
use ferrogram_mtsender::{InvocationError, RpcError};
use ferrogram_session::peer_id;
use ferrogram_tl as tl;
use log::debug;

use super::Client;

fn peer_unresolved() -> InvocationError {
    // Shaped like the error the server itself would have returned had the
    // stale reference been sent anyway.
    InvocationError::Rpc(RpcError {
        code: 400,
        name: "PEER_ID_INVALID".into(),
        value: None,
        caused_by: None,
    })
}

impl Client {
    /// Build an `InputPeer` for the given identifier.
    ///
    /// The entity cache is consulted first. On a miss with a known
    /// username, resolving the username is attempted. Otherwise the
    /// reference cannot be constructed and a `PEER_ID_INVALID` error is
    /// returned, just as the server would.
    pub async fn resolve_peer(&self, id: i64) -> Result<tl::enums::InputPeer, InvocationError> {
        let cached = self.0.peers.lock().unwrap().get(id);
        if let Some(peer) = cached {
            if let Some(input_peer) = peer.to_input_peer() {
                return Ok(input_peer);
            }
        }

        // A username on record can be resolved into a fresh access hash.
        let username = self
            .0
            .storage
            .get_entity(id)
            .and_then(|entity| entity.username);
        if let Some(username) = username {
            debug!("cache miss for peer {id}; resolving username {username:?}");
            if let Some(peer) = self.resolve_username(&username).await? {
                if peer.id == id {
                    if let Some(input_peer) = peer.to_input_peer() {
                        return Ok(input_peer);
                    }
                }
            }
        }

        Err(peer_unresolved())
    }

    /// Resolve a `@username` into a peer reference, feeding the cache with
    /// whatever the server returns.
    pub async fn resolve_username(
        &self,
        username: &str,
    ) -> Result<Option<ferrogram_session::PeerRef>, InvocationError> {
        let resolved = match self
            .invoke(&tl::functions::contacts::ResolveUsername {
                username: username.to_string(),
            })
            .await
        {
            Ok(tl::enums::contacts::ResolvedPeer::Peer(resolved)) => resolved,
            Err(err) if err.is("USERNAME_NOT_OCCUPIED") => return Ok(None),
            Err(err) => return Err(err),
        };

        let mut peers = self.0.peers.lock().unwrap();
        let _ = peers.extend(&resolved.users, &resolved.chats);

        let (_, id) = peer_id(&resolved.peer);
        Ok(peers.get(id))
    }
}
